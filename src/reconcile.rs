//! Reconciliation: join extracted endpoints against documentation mentions.

use crate::model::{AnalysisReport, DocReference, Endpoint};

/// Mark each endpoint documented iff at least one reference mentions both
/// its exact method and its exact path string, then build the report.
pub fn reconcile(mut endpoints: Vec<Endpoint>, references: &[DocReference]) -> AnalysisReport {
    for endpoint in &mut endpoints {
        endpoint.is_documented = references.iter().any(|r| r.matches_endpoint(endpoint));
    }
    AnalysisReport::new(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HttpMethod;

    fn endpoint(method: HttpMethod, path: &str) -> Endpoint {
        Endpoint {
            method,
            path: path.to_string(),
            function_name: "handler".to_string(),
            file_path: "api.py".to_string(),
            line_number: 1,
            docstring: None,
            has_docstring: false,
            parameters: vec![],
            response_model: None,
            is_deprecated: false,
            is_async: false,
            is_documented: false,
        }
    }

    fn reference(methods: Vec<HttpMethod>, paths: Vec<&str>) -> DocReference {
        DocReference {
            file_path: "README.md".to_string(),
            content: String::new(),
            mentioned_paths: paths.into_iter().map(String::from).collect(),
            mentioned_methods: methods,
            section_heading: None,
            line_number: 1,
        }
    }

    #[test]
    fn test_exact_match_marks_documented() {
        let endpoints = vec![
            endpoint(HttpMethod::Get, "/users"),
            endpoint(HttpMethod::Post, "/users"),
        ];
        let refs = vec![reference(vec![HttpMethod::Get], vec!["/users"])];

        let report = reconcile(endpoints, &refs);
        assert_eq!(report.documented_endpoints(), 1);
        assert_eq!(report.undocumented_endpoints(), 1);
        assert_eq!(report.coverage_percentage(), 50.0);

        let documented = report.documented();
        assert_eq!(documented[0].method, HttpMethod::Get);
    }

    #[test]
    fn test_placeholder_names_are_not_interchangeable() {
        let endpoints = vec![endpoint(HttpMethod::Get, "/users/{id}")];
        let refs = vec![reference(vec![HttpMethod::Get], vec!["/users/{user_id}"])];

        let report = reconcile(endpoints, &refs);
        assert_eq!(report.documented_endpoints(), 0);
    }

    #[test]
    fn test_method_and_path_may_come_from_one_reference_only() {
        // Method in one reference, path in another: not a match.
        let endpoints = vec![endpoint(HttpMethod::Put, "/items")];
        let refs = vec![
            reference(vec![HttpMethod::Put], vec!["/other"]),
            reference(vec![HttpMethod::Get], vec!["/items"]),
        ];

        let report = reconcile(endpoints, &refs);
        assert_eq!(report.documented_endpoints(), 0);
    }

    #[test]
    fn test_empty_inputs() {
        let report = reconcile(vec![], &[]);
        assert_eq!(report.total_endpoints(), 0);
        assert_eq!(report.coverage_percentage(), 0.0);
    }
}
