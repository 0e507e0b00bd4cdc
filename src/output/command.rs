//! JSON output types for CLI commands
//!
//! Every JSON response is wrapped in a [`JsonResponse`] carrying
//! `schema_version` and `execution_id`, so downstream tools can detect
//! format changes and correlate runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::diagnostics::ErrorRecord;
use crate::graph::{Module, Statistics, UnresolvedDependency, ValidationReport};
use crate::parser::Triple;
use crate::scan::{FocusStats, ScanStats};

/// Current JSON output schema version
pub const LINKEDDOC_JSON_SCHEMA_VERSION: &str = "1.0.0";

/// Wrapper for all JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse<T> {
    /// Schema version for parsing stability
    pub schema_version: String,
    /// Unique execution ID for this run
    pub execution_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    /// RFC 3339 creation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub data: T,
    /// Whether the response is partial (aborted run)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial: Option<bool>,
}

impl<T> JsonResponse<T> {
    pub fn new(data: T, execution_id: &str) -> Self {
        JsonResponse {
            schema_version: LINKEDDOC_JSON_SCHEMA_VERSION.to_string(),
            execution_id: execution_id.to_string(),
            tool: Some("linkeddoc".to_string()),
            timestamp: Some(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
            data,
            partial: None,
        }
    }

    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = Some(partial);
        self
    }
}

/// One scanned file, keyed relative to the root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedFile {
    pub path: String,
    pub language: String,
    pub size: u64,
    pub has_metadata: bool,
}

/// Response for the `scan` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    pub root: String,
    pub files: Vec<ScannedFile>,
    pub stats: ScanStats,
    pub errors: Vec<ErrorRecord>,
    /// Present when `--focus` was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<FocusResponse>,
    /// File count before sampling, when `--sample` reduced the list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampled_from: Option<usize>,
    pub duration_ms: u64,
}

/// Focus statistics in JSON form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusResponse {
    pub total: usize,
    pub matched: usize,
    pub per_pattern: BTreeMap<String, usize>,
}

impl From<FocusStats> for FocusResponse {
    fn from(stats: FocusStats) -> Self {
        FocusResponse {
            total: stats.total,
            matched: stats.matched,
            per_pattern: stats.per_pattern.into_iter().collect(),
        }
    }
}

/// Response for the `build` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildResponse {
    pub root: String,
    pub modules: Vec<Module>,
    pub stats: Statistics,
    pub unresolved: Vec<UnresolvedDependency>,
    pub errors: Vec<ErrorRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
}

/// Response for the `deps` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepsResponse {
    pub file: String,
    /// "dependencies" or "dependents"
    pub direction: String,
    pub transitive: bool,
    pub paths: Vec<String>,
}

/// Response for the `parse` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub file: String,
    pub has_block: bool,
    pub triples: Vec<Triple>,
}

/// Error response for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error category/type
    pub error: String,
    pub message: String,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    Human,
    /// JSON output with schema versioning
    Json,
}

impl OutputFormat {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Some(OutputFormat::Human),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Generate a unique execution ID for this run
///
/// Uses timestamp + process ID for uniqueness.
pub fn generate_execution_id() -> String {
    let timestamp = chrono::Utc::now().timestamp();
    format!("{:x}-{:x}", timestamp, std::process::id())
}

/// Output JSON to stdout
pub fn output_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    println!("{}", json);
    Ok(())
}
