//! CLI binary for splitting a request tree by linked documents.
//!
//! Usage:
//!   split-request --request request.yaml --document host.json
//!   split-request --request request.json --validate-only
//!
//! Input files are JSON, or YAML when the extension is `.yaml`/`.yml`:
//!   - request: the request tree (see `Request`)
//!   - document: a snapshot of the active document and its links
//!
//! Output (JSON on stdout):
//!   - partitions: Object - residual request per document id
//!   - valid: Optional<bool> - result of `--validate-only`
//!   - diagnostics: Array - recorded errors and warnings
//!   - error: Optional<String> - error message if the split failed
//!
//! Logging goes to stderr and respects RUST_LOG.

use clap::Parser;
use revit_request_engine::{
    split_by_links, validate, Diagnostic, Diagnostics, Request, SnapshotDocument,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "split-request")]
#[command(version, about = "Split a BHoM request tree across a Revit document and its links", long_about = None)]
struct Cli {
    /// Request tree file (JSON or YAML)
    #[arg(short, long)]
    request: PathBuf,

    /// Host document snapshot file (JSON or YAML)
    #[arg(short, long, required_unless_present = "validate_only")]
    document: Option<PathBuf>,

    /// Only check the structural rules of the request
    #[arg(long)]
    validate_only: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(serde::Serialize, Default)]
struct SplitResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    partitions: Option<BTreeMap<String, Request>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid: Option<bool>,
    diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn error_response(msg: String) -> SplitResponse {
    SplitResponse {
        error: Some(msg),
        ..SplitResponse::default()
    }
}

fn emit(response: &SplitResponse, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    };
    println!("{}", json.unwrap_or_default());
}

fn run(cli: &Cli) -> SplitResponse {
    let request = match Request::from_file(&cli.request) {
        Ok(request) => request,
        Err(e) => return error_response(format!("Failed to load request: {e}")),
    };

    if cli.validate_only {
        let mut diagnostics = Diagnostics::new();
        let valid = validate(&request, &mut diagnostics);
        return SplitResponse {
            valid: Some(valid),
            diagnostics: diagnostics.into_vec(),
            ..SplitResponse::default()
        };
    }

    let Some(document_path) = &cli.document else {
        return error_response("A host document snapshot is required".to_string());
    };
    let document = match SnapshotDocument::from_file(document_path) {
        Ok(document) => document,
        Err(e) => return error_response(format!("Failed to load document: {e}")),
    };

    let outcome = split_by_links(&request, &document);
    let error = outcome.error().map(|e| e.to_string());
    let partitions = outcome.partitions().map(|partitions| {
        partitions
            .iter()
            .map(|(id, request)| (id.to_string(), request.clone()))
            .collect()
    });

    SplitResponse {
        partitions,
        valid: None,
        diagnostics: outcome.diagnostics.into_vec(),
        error,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let response = run(&cli);
    emit(&response, cli.pretty);

    if response.error.is_some() || response.valid == Some(false) {
        std::process::exit(1);
    }
}
