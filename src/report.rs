//! Output formatting for coverage results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::Serialize;

use crate::model::{AnalysisReport, Endpoint};

/// Top-level JSON report envelope.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: String,
    pub path: String,
    pub docs_path: String,
    pub files_scanned: usize,
    #[serde(flatten)]
    pub report: &'a AnalysisReport,
}

/// Write the report as JSON to stdout.
pub fn write_json(
    path: &str,
    docs_path: &str,
    files_scanned: usize,
    report: &AnalysisReport,
) -> anyhow::Result<()> {
    let envelope = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        docs_path: docs_path.to_string(),
        files_scanned,
        report,
    };
    let json = serde_json::to_string_pretty(&envelope)?;
    println!("{}", json);
    Ok(())
}

/// Write a human-readable report to stdout.
pub fn write_pretty(
    path: &str,
    docs_path: &str,
    files_scanned: usize,
    report: &AnalysisReport,
    show_documented: bool,
) {
    println!();
    println!("{}", "doccov - API documentation coverage".bold());
    println!("  code: {}  docs: {}  files scanned: {}", path, docs_path, files_scanned);
    println!();

    let coverage = report.coverage_percentage();
    let summary = format!(
        "{:.1}% covered ({}/{} endpoints documented)",
        coverage,
        report.documented_endpoints(),
        report.total_endpoints()
    );
    let colored_summary = if report.total_endpoints() == 0 {
        summary.normal()
    } else if coverage >= 90.0 {
        summary.green().bold()
    } else if coverage >= 50.0 {
        summary.yellow().bold()
    } else {
        summary.red().bold()
    };
    println!("  {}", colored_summary);
    println!();

    let undocumented = report.undocumented();
    if !undocumented.is_empty() {
        println!("{}", "Undocumented endpoints:".red().bold());
        for endpoint in &undocumented {
            print_endpoint(endpoint);
        }
        println!();
    }

    if show_documented {
        let documented = report.documented();
        if !documented.is_empty() {
            println!("{}", "Documented endpoints:".green().bold());
            for endpoint in &documented {
                print_endpoint(endpoint);
            }
            println!();
        }
    }

    if report.total_endpoints() == 0 {
        println!("  {}", "no endpoints detected".dimmed());
        println!();
    }
}

/// List endpoints without coverage information (the `endpoints` command).
pub fn write_endpoint_list(endpoints: &[Endpoint]) {
    if endpoints.is_empty() {
        println!("{}", "no endpoints detected".dimmed());
        return;
    }

    for endpoint in endpoints {
        print_endpoint(endpoint);
    }
    println!();
    println!("{} endpoint(s)", endpoints.len());
}

fn print_endpoint(endpoint: &Endpoint) {
    let mut tags = Vec::new();
    if endpoint.is_async {
        tags.push("async");
    }
    if endpoint.is_deprecated {
        tags.push("deprecated");
    }
    if !endpoint.has_docstring {
        tags.push("no docstring");
    }
    let tag_str = if tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", tags.join(", "))
    };

    println!(
        "  {:<7} {}  {}:{} {}{}",
        endpoint.method.to_string().cyan(),
        endpoint.path,
        endpoint.file_path.dimmed(),
        endpoint.line_number,
        endpoint.function_name,
        tag_str.dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisReport, HttpMethod};

    #[test]
    fn test_json_envelope_shape() {
        let report = AnalysisReport::new(vec![Endpoint {
            method: HttpMethod::Get,
            path: "/users".to_string(),
            function_name: "list_users".to_string(),
            file_path: "api.py".to_string(),
            line_number: 3,
            docstring: None,
            has_docstring: false,
            parameters: vec![],
            response_model: None,
            is_deprecated: false,
            is_async: true,
            is_documented: true,
        }]);

        let envelope = JsonReport {
            version: "0.1.0".to_string(),
            path: ".".to_string(),
            docs_path: ".".to_string(),
            files_scanned: 1,
            report: &report,
        };

        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&envelope).unwrap()).unwrap();
        assert_eq!(value["total_endpoints"], 1);
        assert_eq!(value["documented_endpoints"], 1);
        assert_eq!(value["coverage_percentage"], 100.0);
        assert_eq!(value["endpoints"][0]["method"], "GET");
        assert_eq!(value["endpoints"][0]["path"], "/users");
        assert_eq!(value["files_scanned"], 1);
    }
}
