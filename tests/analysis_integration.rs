//! Integration tests for the full coverage pipeline.
//!
//! These run the code scan, the documentation scan, and reconciliation
//! against the checked-in testdata fixture project.

use std::path::PathBuf;

use doccov::{reconcile, scan_directory, scan_documentation, HttpMethod, ParamLocation};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

#[test]
fn test_code_scan_finds_all_endpoints() {
    let scan = scan_directory(&testdata_path()).expect("code scan should succeed");

    assert_eq!(scan.files_scanned, vec!["sample_api.py"]);
    assert_eq!(scan.total_endpoints(), 5);

    let signatures: Vec<String> = scan.endpoints.iter().map(|e| e.route_signature()).collect();
    assert_eq!(
        signatures,
        vec![
            "GET /users/{user_id}",
            "POST /users",
            "GET /items",
            "DELETE /items/{item_id}",
            "GET /internal/metrics",
        ]
    );
}

#[test]
fn test_code_scan_endpoint_details() {
    let scan = scan_directory(&testdata_path()).expect("code scan should succeed");

    let get_user = &scan.endpoints[0];
    assert_eq!(get_user.function_name, "get_user");
    assert_eq!(get_user.line_number, 9);
    assert!(get_user.is_async);
    assert_eq!(get_user.docstring.as_deref(), Some("Retrieve a user by ID."));
    assert_eq!(get_user.parameters[0].location, ParamLocation::Path);

    let create_user = &scan.endpoints[1];
    assert_eq!(create_user.response_model.as_deref(), Some("User"));
    assert_eq!(create_user.parameters[0].location, ParamLocation::Body);

    let list_items = &scan.endpoints[2];
    assert!(!list_items.is_async);
    assert!(list_items.parameters.iter().all(|p| !p.required));

    let delete_item = &scan.endpoints[3];
    assert!(delete_item.is_deprecated);

    let metrics = &scan.endpoints[4];
    assert!(metrics.has_docstring);
    assert_eq!(metrics.line_number, 32);
}

#[test]
fn test_doc_scan_respects_selection_policy() {
    let refs = scan_documentation(&testdata_path()).expect("doc scan should succeed");

    // README.md (two mentions) + docs/api.md (two table rows); the
    // comment-hidden mention and CHANGELOG.md contribute nothing.
    assert_eq!(refs.len(), 4);
    assert!(refs.iter().all(|r| !r.file_path.contains("CHANGELOG")));
    assert!(!refs
        .iter()
        .any(|r| r.mentioned_paths.iter().any(|p| p == "/internal/metrics")));

    let quick_start = refs
        .iter()
        .find(|r| r.mentioned_paths.iter().any(|p| p == "/users/{user_id}"))
        .expect("README mention should be extracted");
    assert_eq!(quick_start.section_heading.as_deref(), Some("Quick Start"));
    assert_eq!(quick_start.mentioned_methods, vec![HttpMethod::Get]);

    let table_row = refs
        .iter()
        .find(|r| r.mentioned_paths.iter().any(|p| p == "/items/{item_id}"))
        .expect("table mention should be extracted");
    assert_eq!(table_row.mentioned_methods, vec![HttpMethod::Delete]);
    assert_eq!(table_row.section_heading.as_deref(), Some("Items"));
}

#[test]
fn test_full_pipeline_coverage() {
    let root = testdata_path();
    let scan = scan_directory(&root).expect("code scan should succeed");
    let refs = scan_documentation(&root).expect("doc scan should succeed");

    let report = reconcile(scan.endpoints, &refs);

    assert_eq!(report.total_endpoints(), 5);
    assert_eq!(report.documented_endpoints(), 4);
    assert_eq!(report.undocumented_endpoints(), 1);
    assert_eq!(report.coverage_percentage(), 80.0);

    let undocumented = report.undocumented();
    assert_eq!(undocumented.len(), 1);
    assert_eq!(undocumented[0].path, "/internal/metrics");
}

#[test]
fn test_pipeline_is_deterministic() {
    let root = testdata_path();

    let first = scan_directory(&root).expect("code scan should succeed");
    let second = scan_directory(&root).expect("code scan should succeed");
    let first_sigs: Vec<String> = first.endpoints.iter().map(|e| e.route_signature()).collect();
    let second_sigs: Vec<String> = second.endpoints.iter().map(|e| e.route_signature()).collect();
    assert_eq!(first_sigs, second_sigs);

    let refs_a = scan_documentation(&root).expect("doc scan should succeed");
    let refs_b = scan_documentation(&root).expect("doc scan should succeed");
    assert_eq!(refs_a, refs_b);
}
