//! Top-level errors for scan and build calls.
//!
//! Per-file failures never show up here on their own; they are collected as
//! [`ErrorRecord`]s. These types cover setup failures (missing root, bad
//! pattern, git problems), policy aborts, and failed validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::diagnostics::ErrorRecord;
use crate::error_codes::{LD_SCN_001_STRICT_ABORT, LD_SCN_002_THRESHOLD, LD_SCN_003_TIMEOUT};
use crate::graph::validation::ValidationReport;
use crate::graph::Graph;
use crate::scan::Inventory;

/// When collected errors should stop a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPolicy {
    /// Abort on the first error
    pub strict: bool,
    /// Abort once the error count goes past this many (None = unlimited)
    pub max_errors: Option<usize>,
}

impl ErrorPolicy {
    /// Abort reason after `latest` brought the total to `count`, if any.
    pub fn check(&self, latest: &ErrorRecord, count: usize) -> Option<AbortReason> {
        if self.strict {
            return Some(AbortReason::Strict(Box::new(latest.clone())));
        }
        match self.max_errors {
            Some(limit) if count > limit => Some(AbortReason::ThresholdExceeded { count, limit }),
            _ => None,
        }
    }
}

/// Why a run stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AbortReason {
    /// Strict mode and this was the first error
    Strict(Box<ErrorRecord>),
    /// More errors than the configured maximum
    ThresholdExceeded { count: usize, limit: usize },
    /// The caller's overall timeout passed
    Timeout { elapsed: Duration },
}

impl AbortReason {
    pub fn code(&self) -> &'static str {
        match self {
            AbortReason::Strict(_) => LD_SCN_001_STRICT_ABORT,
            AbortReason::ThresholdExceeded { .. } => LD_SCN_002_THRESHOLD,
            AbortReason::Timeout { .. } => LD_SCN_003_TIMEOUT,
        }
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::Strict(record) => write!(f, "strict mode: {}", record),
            AbortReason::ThresholdExceeded { count, limit } => {
                write!(f, "{} errors exceeds the limit of {}", count, limit)
            }
            AbortReason::Timeout { elapsed } => {
                write!(f, "timed out after {} ms", elapsed.as_millis())
            }
        }
    }
}

/// Failure of [`crate::scan::Scanner::scan`].
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("scan root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("git: {0}")]
    Git(#[from] git2::Error),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("scan aborted: {reason}")]
    Aborted {
        reason: AbortReason,
        /// Everything collected before the abort
        partial: Box<Inventory>,
    },
}

impl ScanError {
    /// Partial inventory of an aborted scan.
    pub fn partial(&self) -> Option<&Inventory> {
        match self {
            ScanError::Aborted { partial, .. } => Some(partial),
            _ => None,
        }
    }

    pub fn abort_reason(&self) -> Option<&AbortReason> {
        match self {
            ScanError::Aborted { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Failure of [`crate::graph::GraphBuilder::build`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("build aborted: {reason}")]
    Aborted {
        reason: AbortReason,
        /// Graph built from the files processed before the abort
        graph: Box<Graph>,
    },

    #[error("{}", validation_listing(.report))]
    Validation {
        graph: Box<Graph>,
        report: ValidationReport,
    },
}

impl BuildError {
    /// Partially built graph, when the build got far enough to have one.
    pub fn graph(&self) -> Option<&Graph> {
        match self {
            BuildError::Aborted { graph, .. } | BuildError::Validation { graph, .. } => Some(graph),
            BuildError::Scan(_) => None,
        }
    }
}

fn validation_listing(report: &ValidationReport) -> String {
    let mut out = format!("graph validation failed with {} error(s):", report.errors.len());
    for error in &report.errors {
        out.push_str(&format!("\n  [{}] {}", error.code, error.message));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ErrorStage;
    use crate::error_codes::LD_IO_004_READ_FAILED;

    fn record() -> ErrorRecord {
        ErrorRecord::new("a.go", ErrorStage::Read, LD_IO_004_READ_FAILED, "denied")
    }

    #[test]
    fn test_default_policy_never_aborts() {
        let policy = ErrorPolicy::default();
        assert_eq!(policy.check(&record(), 1_000), None);
    }

    #[test]
    fn test_strict_aborts_on_first() {
        let policy = ErrorPolicy {
            strict: true,
            max_errors: None,
        };
        let reason = policy.check(&record(), 1).unwrap();
        assert_eq!(reason.code(), LD_SCN_001_STRICT_ABORT);
        assert!(reason.to_string().contains("a.go"));
    }

    #[test]
    fn test_threshold_fires_past_limit() {
        let policy = ErrorPolicy {
            strict: false,
            max_errors: Some(2),
        };
        assert_eq!(policy.check(&record(), 2), None);
        assert_eq!(
            policy.check(&record(), 3),
            Some(AbortReason::ThresholdExceeded { count: 3, limit: 2 })
        );
    }
}
