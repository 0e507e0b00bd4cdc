//! Per-file error records and skip reasons for scan/build runs.
//!
//! A bad file never stops a run on its own: its failure becomes an
//! [`ErrorRecord`] in an [`ErrorCollector`], and the run continues unless
//! the caller opted into strict mode or an error threshold.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// Number of records shown by [`ErrorCollector::summary`].
pub const SUMMARY_LIMIT: usize = 10;

/// Reason a visited path produced no file record.
///
/// Skips are normal outcomes, not errors; they only feed scan statistics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Matched an ignore rule
    Ignored,
    /// Did not match any include pattern
    NotIncluded,
    /// Symlink while symlink following is off
    Symlink,
    /// Extension maps to no known language
    UnsupportedLanguage,
    /// Larger than the configured maximum size
    Oversized,
    /// Not a regular file
    NotAFile,
}

impl SkipReason {
    /// Stable sort key for deterministic ordering.
    pub fn sort_key(&self) -> u8 {
        match self {
            SkipReason::Ignored => 0,
            SkipReason::NotIncluded => 1,
            SkipReason::Symlink => 2,
            SkipReason::UnsupportedLanguage => 3,
            SkipReason::Oversized => 4,
            SkipReason::NotAFile => 5,
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            SkipReason::Ignored => "matched an ignore rule",
            SkipReason::NotIncluded => "not matched by include patterns",
            SkipReason::Symlink => "symlink not followed",
            SkipReason::UnsupportedLanguage => "language not supported",
            SkipReason::Oversized => "larger than max file size",
            SkipReason::NotAFile => "not a regular file",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Stage of the pipeline where an error occurred.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ErrorStage {
    /// Directory traversal
    Walk,
    /// Reading file metadata
    Stat,
    /// Reading file contents
    Read,
    /// Parsing the metadata block
    Parse,
    /// Forwarding triples to the store
    Store,
}

impl ErrorStage {
    /// Stable sort key for deterministic ordering.
    pub fn sort_key(&self) -> u8 {
        match self {
            ErrorStage::Walk => 0,
            ErrorStage::Stat => 1,
            ErrorStage::Read => 2,
            ErrorStage::Parse => 3,
            ErrorStage::Store => 4,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorStage::Walk => "walking directory",
            ErrorStage::Stat => "reading metadata",
            ErrorStage::Read => "reading file",
            ErrorStage::Parse => "parsing metadata block",
            ErrorStage::Store => "storing triples",
        }
    }
}

impl fmt::Display for ErrorStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// One per-file failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorRecord {
    /// File (or directory) the error refers to
    pub path: PathBuf,
    /// Line inside the file, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Pipeline stage
    pub stage: ErrorStage,
    /// Stable error code (see [`crate::error_codes`])
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Underlying cause, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl ErrorRecord {
    pub fn new(
        path: impl Into<PathBuf>,
        stage: ErrorStage,
        code: &str,
        message: impl Into<String>,
    ) -> Self {
        ErrorRecord {
            path: path.into(),
            line: None,
            stage,
            code: code.to_string(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_cause(mut self, cause: impl fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    /// Stable sort key: path, then stage, then line.
    pub fn sort_key(&self) -> (&PathBuf, u8, usize) {
        (&self.path, self.stage.sort_key(), self.line.unwrap_or(0))
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        write!(f, ": [{}] {}", self.code, self.message)?;
        if let Some(ref cause) = self.cause {
            write!(f, " ({})", cause)?;
        }
        Ok(())
    }
}

impl PartialOrd for ErrorRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ErrorRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.message.cmp(&other.message))
    }
}

/// Thread-safe, insertion-ordered list of error records.
#[derive(Default)]
pub struct ErrorCollector {
    records: Mutex<Vec<ErrorRecord>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ErrorRecord>> {
        // A poisoned lock still holds a valid Vec; records are append-only.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append a record; returns the new total.
    pub fn push(&self, record: ErrorRecord) -> usize {
        let mut records = self.lock();
        records.push(record);
        records.len()
    }

    /// Append every record from `other`, preserving its order.
    pub fn extend(&self, other: impl IntoIterator<Item = ErrorRecord>) {
        self.lock().extend(other);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// First record, if any.
    pub fn first(&self) -> Option<ErrorRecord> {
        self.lock().first().cloned()
    }

    /// Snapshot of all records in insertion order.
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.lock().clone()
    }

    pub fn into_records(self) -> Vec<ErrorRecord> {
        self.records.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    /// Bounded human-readable summary: the first ten records, then a
    /// remainder count.
    pub fn summary(&self) -> String {
        summarize(&self.lock())
    }
}

/// Render up to [`SUMMARY_LIMIT`] records plus a remainder line.
pub fn summarize(records: &[ErrorRecord]) -> String {
    if records.is_empty() {
        return "no errors".to_string();
    }

    let mut out = format!("{} error(s):", records.len());
    for record in records.iter().take(SUMMARY_LIMIT) {
        out.push_str("\n  - ");
        out.push_str(&record.to_string());
    }
    if records.len() > SUMMARY_LIMIT {
        out.push_str(&format!("\n  ... and {} more", records.len() - SUMMARY_LIMIT));
    }
    out
}

impl Clone for ErrorCollector {
    fn clone(&self) -> Self {
        ErrorCollector {
            records: Mutex::new(self.records()),
        }
    }
}

impl fmt::Debug for ErrorCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.lock().iter()).finish()
    }
}

impl Serialize for ErrorCollector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.lock().serialize(serializer)
    }
}

impl From<Vec<ErrorRecord>> for ErrorCollector {
    fn from(records: Vec<ErrorRecord>) -> Self {
        ErrorCollector {
            records: Mutex::new(records),
        }
    }
}
