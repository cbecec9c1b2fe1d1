//! Error taxonomy for doccov.
//!
//! Two kinds of failures are surfaced as typed errors:
//! - `ParseError`: a source file with invalid syntax. Directory-level
//!   drivers catch this per file and keep scanning.
//! - `ScanError`: the scan root itself is unusable. Nothing can proceed,
//!   so this aborts the whole scan.
//!
//! Per-file I/O and decoding failures are not part of the taxonomy: the
//! drivers suppress them and simply omit the file from results.

use std::path::PathBuf;
use thiserror::Error;

/// A source file could not be parsed.
#[derive(Debug, Clone, Error)]
#[error("syntax error in {file}: {message}")]
pub struct ParseError {
    /// Logical path of the offending file.
    pub file: String,
    /// Short description of what failed.
    pub message: String,
}

impl ParseError {
    pub fn new(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

/// The target directory for a scan is missing or invalid.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("directory not found: {0}")]
    RootNotFound(PathBuf),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new("api.py", "invalid syntax");
        assert_eq!(err.to_string(), "syntax error in api.py: invalid syntax");
    }

    #[test]
    fn test_scan_error_variants() {
        let missing = ScanError::RootNotFound(PathBuf::from("/no/such/dir"));
        assert!(missing.to_string().contains("directory not found"));

        let not_dir = ScanError::NotADirectory(PathBuf::from("/etc/passwd"));
        assert!(not_dir.to_string().contains("not a directory"));
    }
}
