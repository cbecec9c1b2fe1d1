//! Command-line interface for doccov.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::docs;
use crate::endpoints;
use crate::reconcile::reconcile;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// API documentation coverage analyzer.
///
/// doccov detects HTTP route declarations in Python source code, detects
/// route mentions in markdown documentation, and matches the two sets to
/// flag undocumented endpoints.
#[derive(Parser)]
#[command(name = "doccov")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute documentation coverage for a repository
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// List detected endpoints without coverage matching
    Endpoints(EndpointsArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Repository root to scan for source code
    pub path: PathBuf,

    /// Documentation root (default: same as path)
    #[arg(short, long)]
    pub docs: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Minimum acceptable coverage percentage (exit non-zero below it)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Repository label carried into JSON output
    #[arg(long)]
    pub repository: Option<String>,

    /// Also list documented endpoints in pretty output
    #[arg(long)]
    pub show_documented: bool,
}

/// Arguments for the endpoints command.
#[derive(Parser)]
pub struct EndpointsArgs {
    /// Repository root to scan for source code
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let docs_root = args.docs.clone().unwrap_or_else(|| args.path.clone());

    let scan = match endpoints::scan_directory(&args.path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let references = match docs::scan_documentation(&docs_root) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let files_scanned = scan.files_scanned.len();
    let mut analysis = reconcile(scan.endpoints, &references);
    if let Some(repository) = &args.repository {
        analysis = analysis.with_repository(repository.clone());
    }

    let path_str = args.path.to_string_lossy().to_string();
    let docs_str = docs_root.to_string_lossy().to_string();

    match args.format.as_str() {
        "json" => report::write_json(&path_str, &docs_str, files_scanned, &analysis)?,
        _ => report::write_pretty(
            &path_str,
            &docs_str,
            files_scanned,
            &analysis,
            args.show_documented,
        ),
    }

    if let Some(threshold) = args.threshold {
        if analysis.coverage_percentage() < threshold {
            return Ok(EXIT_FAILED);
        }
    }
    Ok(EXIT_SUCCESS)
}

/// Run the endpoints command.
pub fn run_endpoints(args: &EndpointsArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let scan = match endpoints::scan_directory(&args.path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&scan)?),
        _ => report::write_endpoint_list(&scan.endpoints),
    }

    Ok(EXIT_SUCCESS)
}
