//! Core data model: endpoints, parameters, documentation references,
//! and the coverage report.

use serde::{Deserialize, Serialize};

/// HTTP methods recognized in route decorators and documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    /// Parse a method name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            "OPTIONS" => Some(HttpMethod::Options),
            "HEAD" => Some(HttpMethod::Head),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::parse(s).ok_or_else(|| format!("unknown HTTP method: {}", s))
    }
}

/// Where a handler parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Body,
    Header,
}

impl std::fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamLocation::Path => write!(f, "path"),
            ParamLocation::Query => write!(f, "query"),
            ParamLocation::Body => write!(f, "body"),
            ParamLocation::Header => write!(f, "header"),
        }
    }
}

/// A handler function parameter.
///
/// `required` holds iff the parameter has no default expression; when a
/// default exists, `default_value` carries its source text (or `"..."`
/// when the expression could not be rendered).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,
    pub location: ParamLocation,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let type_str = match &self.type_hint {
            Some(t) => format!(": {}", t),
            None => String::new(),
        };
        let required_str = if self.required {
            "required".to_string()
        } else {
            format!("default={}", self.default_value.as_deref().unwrap_or("..."))
        };
        write!(
            f,
            "{}{} ({}, {})",
            self.name, type_str, self.location, required_str
        )
    }
}

/// A route-decorated handler function discovered in source code.
///
/// Uniqueness key: `(method, path, file_path)`. `is_documented` is the only
/// field mutated after creation, and only by the reconciler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    pub method: HttpMethod,
    /// Raw route template, including `{name}` or `{name:type}` placeholders.
    pub path: String,
    pub function_name: String,
    pub file_path: String,
    /// 1-based, at the function-definition line, not the decorator line.
    pub line_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docstring: Option<String>,
    pub has_docstring: bool,
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_model: Option<String>,
    pub is_deprecated: bool,
    pub is_async: bool,
    pub is_documented: bool,
}

impl Endpoint {
    /// Unique signature for this route, e.g. `"GET /users/{user_id}"`.
    pub fn route_signature(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let deprecated = if self.is_deprecated { " [deprecated]" } else { "" };
        write!(
            f,
            "{} {} -> {}(){}",
            self.method, self.path, self.function_name, deprecated
        )
    }
}

/// A route mention found on one line of a documentation file.
///
/// One reference per qualifying line; immutable once created. Within a file,
/// references collapsing to the same `(line_number, mentioned_paths,
/// mentioned_methods)` key are deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocReference {
    pub file_path: String,
    /// Trimmed text of the line that triggered the reference.
    pub content: String,
    pub mentioned_paths: Vec<String>,
    pub mentioned_methods: Vec<HttpMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_heading: Option<String>,
    pub line_number: usize,
}

impl DocReference {
    /// Exact-string match: the endpoint's method and path must both appear
    /// in this reference. `/users/{id}` and `/users/{user_id}` are distinct.
    pub fn matches_endpoint(&self, endpoint: &Endpoint) -> bool {
        self.mentioned_methods.contains(&endpoint.method)
            && self.mentioned_paths.iter().any(|p| p == &endpoint.path)
    }
}

impl std::fmt::Display for DocReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let section = match &self.section_heading {
            Some(h) => format!(" (in '{}')", h),
            None => String::new(),
        };
        let methods: Vec<&str> = self.mentioned_methods.iter().map(|m| m.as_str()).collect();
        write!(
            f,
            "{}:{}{} - {}: {}",
            self.file_path,
            self.line_number,
            section,
            if methods.is_empty() { "no methods".to_string() } else { methods.join(", ") },
            if self.mentioned_paths.is_empty() {
                "no paths".to_string()
            } else {
                self.mentioned_paths.join(", ")
            }
        )
    }
}

/// Result of the directory-level code scan: the endpoints found plus the
/// files that were actually parsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodeScan {
    pub endpoints: Vec<Endpoint>,
    pub files_scanned: Vec<String>,
}

impl CodeScan {
    pub fn total_endpoints(&self) -> usize {
        self.endpoints.len()
    }
}

/// Coverage report for one repository.
///
/// All totals are derived from the endpoint list and recomputed whenever the
/// list is set; they are never independently settable.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    total_endpoints: usize,
    documented_endpoints: usize,
    undocumented_endpoints: usize,
    coverage_percentage: f64,
    endpoints: Vec<Endpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    repository: Option<String>,
}

impl AnalysisReport {
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        let mut report = Self {
            total_endpoints: 0,
            documented_endpoints: 0,
            undocumented_endpoints: 0,
            coverage_percentage: 0.0,
            endpoints,
            repository: None,
        };
        report.recompute();
        report
    }

    /// Attach a repository label carried into JSON output.
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// Replace the endpoint list; totals are recomputed.
    pub fn set_endpoints(&mut self, endpoints: Vec<Endpoint>) {
        self.endpoints = endpoints;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.total_endpoints = self.endpoints.len();
        self.documented_endpoints = self.endpoints.iter().filter(|e| e.is_documented).count();
        self.undocumented_endpoints = self.total_endpoints - self.documented_endpoints;
        self.coverage_percentage = if self.total_endpoints > 0 {
            (self.documented_endpoints as f64 / self.total_endpoints as f64) * 100.0
        } else {
            0.0
        };
    }

    pub fn total_endpoints(&self) -> usize {
        self.total_endpoints
    }

    pub fn documented_endpoints(&self) -> usize {
        self.documented_endpoints
    }

    pub fn undocumented_endpoints(&self) -> usize {
        self.undocumented_endpoints
    }

    pub fn coverage_percentage(&self) -> f64 {
        self.coverage_percentage
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    /// Endpoints that have at least one matching documentation mention.
    pub fn documented(&self) -> Vec<&Endpoint> {
        self.endpoints.iter().filter(|e| e.is_documented).collect()
    }

    /// Endpoints with no matching documentation mention.
    pub fn undocumented(&self) -> Vec<&Endpoint> {
        self.endpoints.iter().filter(|e| !e.is_documented).collect()
    }
}

impl std::fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Documentation Coverage: {:.1}% ({}/{} endpoints documented)",
            self.coverage_percentage, self.documented_endpoints, self.total_endpoints
        )
    }
}
