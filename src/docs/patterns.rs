//! Line-level route-mention extraction from markdown text.
//!
//! Two independent pattern passes run per line and their findings are
//! unioned: a method+path pass (`GET /users`, table rows, prose) and a
//! bare-path pass (paths alone in backticks or table cells).

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{DocReference, HttpMethod};

lazy_static! {
    /// HTTP verb followed by a path token, optionally through a table-cell
    /// delimiter. Case-insensitive on the verb.
    static ref METHOD_PATH: Regex = Regex::new(
        r"(?i)\b(GET|POST|PUT|DELETE|PATCH|OPTIONS|HEAD)\s*\|?\s*(/[A-Za-z0-9/_{}:-]*)"
    )
    .unwrap();

    /// A path enclosed by backticks or table-cell pipes on both sides.
    static ref BARE_PATH: Regex = Regex::new(r"[`|]\s*(/[A-Za-z0-9/_{}:-]+)\s*[`|]").unwrap();
}

/// Scan markdown content for route mentions, one `DocReference` per
/// qualifying line. Empty or whitespace-only content yields nothing.
pub fn parse_markdown(content: &str, file_path: &str) -> Vec<DocReference> {
    if content.trim().is_empty() {
        return vec![];
    }

    let mut references = Vec::new();
    let mut current_heading: Option<String> = None;
    let mut in_comment = false;

    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;

        // HTML-comment spans suppress extraction; the close line itself is
        // never scanned either.
        if line.contains("<!--") {
            in_comment = true;
        }
        if line.contains("-->") {
            in_comment = false;
            continue;
        }
        if in_comment {
            continue;
        }

        // Heading lines update the running section and never produce
        // references themselves.
        if line.starts_with('#') {
            current_heading = Some(line.trim_start_matches('#').trim().to_string());
            continue;
        }

        let (paths, methods) = extract_mentions(line);
        if paths.is_empty() && methods.is_empty() {
            continue;
        }

        references.push(DocReference {
            file_path: file_path.to_string(),
            content: line.trim().to_string(),
            mentioned_paths: paths,
            mentioned_methods: methods,
            section_heading: current_heading.clone(),
            line_number,
        });
    }

    dedup_references(references)
}

/// Union of both pattern passes for one line: paths and methods in order
/// of appearance, first-seen duplicates removed.
fn extract_mentions(line: &str) -> (Vec<String>, Vec<HttpMethod>) {
    let mut paths: Vec<String> = Vec::new();
    let mut methods: Vec<HttpMethod> = Vec::new();

    for caps in METHOD_PATH.captures_iter(line) {
        if let Some(method) = HttpMethod::parse(&caps[1]) {
            if !methods.contains(&method) {
                methods.push(method);
            }
            let path = trim_trailing_punctuation(&caps[2]);
            if !path.is_empty() && !paths.iter().any(|p| p == path) {
                paths.push(path.to_string());
            }
        }
    }

    for caps in BARE_PATH.captures_iter(line) {
        let path = trim_trailing_punctuation(&caps[1]);
        if !path.is_empty() && !paths.iter().any(|p| p == path) {
            paths.push(path.to_string());
        }
    }

    (paths, methods)
}

fn trim_trailing_punctuation(path: &str) -> &str {
    path.trim_end_matches(|c| matches!(c, '.' | ',' | ';' | ':'))
}

/// Collapse references with identical `(line, paths, methods)` keys.
fn dedup_references(references: Vec<DocReference>) -> Vec<DocReference> {
    let mut seen: HashSet<(usize, Vec<String>, Vec<HttpMethod>)> = HashSet::new();
    let mut unique = Vec::new();

    for reference in references {
        let key = (
            reference.line_number,
            reference.mentioned_paths.clone(),
            reference.mentioned_methods.clone(),
        );
        if seen.insert(key) {
            unique.push(reference);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_code_mention() {
        let content = "## Quick Start\n\nUse `POST /api/users`.\n";
        let refs = parse_markdown(content, "README.md");

        assert_eq!(refs.len(), 1);
        let r = &refs[0];
        assert_eq!(r.mentioned_methods, vec![HttpMethod::Post]);
        assert_eq!(r.mentioned_paths, vec!["/api/users"]);
        assert_eq!(r.section_heading.as_deref(), Some("Quick Start"));
        assert_eq!(r.line_number, 3);
        assert_eq!(r.content, "Use `POST /api/users`.");
    }

    #[test]
    fn test_table_row() {
        let content = "| DELETE | /users/{id} | Delete a user |\n";
        let refs = parse_markdown(content, "api.md");

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].mentioned_methods, vec![HttpMethod::Delete]);
        assert_eq!(refs[0].mentioned_paths, vec!["/users/{id}"]);
    }

    #[test]
    fn test_code_fence_content() {
        let content = "```\nPOST /api/auth/token\nContent-Type: application/json\n```\n";
        let refs = parse_markdown(content, "auth.md");

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].mentioned_methods, vec![HttpMethod::Post]);
        assert_eq!(refs[0].mentioned_paths, vec!["/api/auth/token"]);
    }

    #[test]
    fn test_bare_path_in_backticks() {
        let content = "Check the `/health` endpoint for liveness.\n";
        let refs = parse_markdown(content, "ops.md");

        assert_eq!(refs.len(), 1);
        assert!(refs[0].mentioned_methods.is_empty());
        assert_eq!(refs[0].mentioned_paths, vec!["/health"]);
    }

    #[test]
    fn test_trailing_punctuation_trimmed() {
        let content = "Send a GET /users/active, then POST /users.\n";
        let refs = parse_markdown(content, "guide.md");

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].mentioned_paths, vec!["/users/active", "/users"]);
        assert_eq!(
            refs[0].mentioned_methods,
            vec![HttpMethod::Get, HttpMethod::Post]
        );
    }

    #[test]
    fn test_lowercase_method_recognized() {
        let content = "run `get /items` to fetch\n";
        let refs = parse_markdown(content, "guide.md");

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].mentioned_methods, vec![HttpMethod::Get]);
    }

    #[test]
    fn test_html_comment_suppression() {
        let content = "\
GET /visible
<!--
GET /hidden
-->
GET /after
";
        let refs = parse_markdown(content, "README.md");

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].mentioned_paths, vec!["/visible"]);
        assert_eq!(refs[1].mentioned_paths, vec!["/after"]);
    }

    #[test]
    fn test_mention_on_comment_close_line_suppressed() {
        let content = "<!-- note\nGET /secret -->\nGET /open\n";
        let refs = parse_markdown(content, "README.md");

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].mentioned_paths, vec!["/open"]);
    }

    #[test]
    fn test_single_line_comment_suppressed() {
        let content = "<!-- GET /hidden -->\nGET /shown\n";
        let refs = parse_markdown(content, "README.md");

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].mentioned_paths, vec!["/shown"]);
    }

    #[test]
    fn test_heading_lines_produce_no_references() {
        let content = "# GET /not-a-mention\nbody text\n";
        let refs = parse_markdown(content, "README.md");
        assert!(refs.is_empty());
    }

    #[test]
    fn test_heading_persists_across_lines() {
        let content = "## Users\n\nGET /users\n\nGET /users/{id}\n";
        let refs = parse_markdown(content, "api.md");

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].section_heading.as_deref(), Some("Users"));
        assert_eq!(refs[1].section_heading.as_deref(), Some("Users"));
    }

    #[test]
    fn test_duplicates_within_line_collapsed() {
        let content = "GET /users and again GET /users\n";
        let refs = parse_markdown(content, "api.md");

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].mentioned_paths, vec!["/users"]);
        assert_eq!(refs[0].mentioned_methods, vec![HttpMethod::Get]);
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_markdown("", "README.md").is_empty());
        assert!(parse_markdown("   \n\t\n", "README.md").is_empty());
    }

    #[test]
    fn test_plain_prose_without_mentions() {
        let content = "This project does many things.\nNone of them involve routes.\n";
        assert!(parse_markdown(content, "README.md").is_empty());
    }

    #[test]
    fn test_colon_style_params() {
        let content = "GET /users/:id returns one user\n";
        let refs = parse_markdown(content, "api.md");

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].mentioned_paths, vec!["/users/:id"]);
    }
}
