//! doccov - API documentation coverage analyzer.
//!
//! doccov cross-references HTTP endpoints declared in Python source code
//! against route mentions in markdown documentation and reports which
//! endpoints are undocumented.
//!
//! # Architecture
//!
//! - `endpoints`: tree-sitter based extraction of route-decorated handler
//!   functions, plus the directory-level source scan
//! - `docs`: documentation file selection and line-level route-mention
//!   extraction
//! - `reconcile`: the join step matching endpoints to mentions by exact
//!   method+path equality
//! - `model`: shared entity definitions with derived-field invariants
//! - `report`: output formatting (pretty, JSON)
//!
//! The extractors are pure functions over one input text each; the two
//! directory scans run independently and only the reconciler sees both
//! result sets.

pub mod cli;
pub mod docs;
pub mod endpoints;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod report;

pub use docs::{find_doc_files, scan_documentation};
pub use endpoints::{scan_directory, scan_source};
pub use error::{ParseError, ScanError};
pub use model::{
    AnalysisReport, CodeScan, DocReference, Endpoint, HttpMethod, ParamLocation, Parameter,
};
pub use reconcile::reconcile;
