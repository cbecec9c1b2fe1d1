//! Endpoint detection: the code-extractor API and its directory driver.

pub mod python;

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{ParseError, ScanError};
use crate::model::{CodeScan, Endpoint};

/// Directories never scanned for source files.
const SKIP_DIRS: &[&str] = &[
    "__pycache__",
    ".venv",
    "venv",
    "node_modules",
    "docs_src",
    "examples",
    "example",
    "tests",
    "test",
];

/// Scan one unit of Python source for route-decorated handlers.
///
/// Endpoints come back in declaration order. Invalid syntax is a hard
/// `ParseError`; callers scanning a directory catch it and skip the file.
pub fn scan_source(source: &str, file_path: &str) -> Result<Vec<Endpoint>, ParseError> {
    python::extract_endpoints(source, file_path)
}

/// Scan all Python files under `root` for endpoints.
///
/// Skips hidden directories, dependency/build directories, and
/// test-name-patterned files. Per-file read and parse failures skip that
/// file; a missing or invalid root aborts the scan.
pub fn scan_directory(root: &Path) -> anyhow::Result<CodeScan> {
    validate_root(root)?;

    let mut scan = CodeScan::default();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if e.file_type().is_dir() && (name.starts_with('.') || SKIP_DIRS.contains(&name.as_ref()))
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
        if path.extension().and_then(|e| e.to_str()) != Some("py") {
            continue;
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.starts_with("test_") || name.ends_with("_test.py") {
            continue;
        }

        let source = match std::fs::read_to_string(path) {
            Ok(s) => s,
            // Unreadable or non-UTF-8 files are simply omitted.
            Err(_) => continue,
        };

        let display_path = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        match scan_source(&source, &display_path) {
            Ok(endpoints) => {
                scan.endpoints.extend(endpoints);
                scan.files_scanned.push(display_path);
            }
            // One bad file must not abort the directory scan.
            Err(_) => continue,
        }
    }

    Ok(scan)
}

/// Hard error when the scan root is missing or not a directory.
pub(crate) fn validate_root(root: &Path) -> Result<(), ScanError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::NotADirectory(root.to_path_buf())),
        Err(_) => Err(ScanError::RootNotFound(root.to_path_buf())),
    }
}
