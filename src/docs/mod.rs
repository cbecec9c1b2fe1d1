//! Documentation discovery: the file-selection policy and directory driver.

pub mod patterns;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::endpoints::validate_root;
use crate::error::ScanError;
use crate::model::DocReference;

/// Files never treated as API documentation.
const SKIP_FILES: &[&str] = &["CHANGELOG.md", "LICENSE.md", "CONTRIBUTING.md"];

/// Translation-locale directory segments (mkdocs-style docs trees keep one
/// subtree per language; only the canonical tree is scanned).
const LOCALE_DIRS: &[&str] = &[
    "az", "bn", "de", "em", "es", "fa", "fr", "he", "id", "it", "ja", "ko", "nl", "pl", "pt",
    "ru", "sq", "sv", "ta", "tr", "uk", "ur", "vi", "yo", "zh", "zh-hant",
];

/// Common documentation filenames accepted anywhere in the tree.
const COMMON_DOC_FILES: &[&str] = &[
    "development.md",
    "deployment.md",
    "api.md",
    "guide.md",
    "tutorial.md",
    "setup.md",
    "install.md",
    "installation.md",
    "getting-started.md",
    "quickstart.md",
    "usage.md",
];

/// Select candidate documentation files under `root`, recursively.
///
/// A file is included if any of: its name starts with "README"
/// (case-insensitive); a path segment is `docs` or `documentation`; its
/// name is a common documentation filename; its name contains "api"; it is
/// a direct child of the root. Hidden segments, locale directories, and the
/// skip-list always exclude. Traversal order is deterministic.
pub fn find_doc_files(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    validate_root(root)?;

    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if e.file_type().is_dir()
                && (name.starts_with('.') || LOCALE_DIRS.contains(&name.as_ref()))
            {
                return false;
            }
            true
        })
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if is_selected(relative) {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

/// The inclusion/exclusion policy over a root-relative path.
fn is_selected(relative: &Path) -> bool {
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();

    if segments
        .iter()
        .any(|s| s.starts_with('.') || LOCALE_DIRS.contains(&s.as_str()))
    {
        return false;
    }

    let name = match segments.last() {
        Some(n) => n.as_str(),
        None => return false,
    };
    if SKIP_FILES.contains(&name) {
        return false;
    }

    let name_lower = name.to_lowercase();

    if name_lower.starts_with("readme") {
        return true;
    }
    if segments.iter().any(|s| s == "docs" || s == "documentation") {
        return true;
    }
    if COMMON_DOC_FILES.contains(&name_lower.as_str()) {
        return true;
    }
    if name_lower.contains("api") {
        return true;
    }
    // Direct children of the root are always candidates.
    segments.len() == 1
}

/// Scan all selected documentation files under `root` for route mentions.
///
/// Files that cannot be read are silently omitted; per-file reference order
/// is preserved.
pub fn scan_documentation(root: &Path) -> anyhow::Result<Vec<DocReference>> {
    let files = find_doc_files(root)?;

    let mut references = Vec::new();
    for path in files {
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => continue,
        };

        let display_path = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .to_string_lossy()
            .to_string();

        references.extend(patterns::parse_markdown(&content, &display_path));
    }

    Ok(references)
}
