//! Triple store seam.
//!
//! The graph builder forwards every parsed triple to a [`TripleStore`]. The
//! query engine and persistence layers sit behind this trait; the crate only
//! ships [`MemoryStore`], which keeps triples in insertion order.

use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Error returned by a store that refuses a triple.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("empty {0} term")]
    EmptyTerm(&'static str),

    #[error("store rejected triple: {0}")]
    Rejected(String),
}

/// Append-only sink for triples.
///
/// `add` may be called from several threads, so implementations must be
/// `Send + Sync` and do their own locking.
pub trait TripleStore: Send + Sync {
    /// Store one `(subject, predicate, object)` triple.
    fn add(&self, subject: &str, predicate: &str, object: &str) -> Result<(), StoreError>;

    /// Total number of stored triples.
    fn count(&self) -> usize;
}

/// In-memory store backed by a `Vec`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    triples: Mutex<Vec<(String, String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, String, String)>> {
        self.triples.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of stored triples in insertion order.
    pub fn triples(&self) -> Vec<(String, String, String)> {
        self.lock().clone()
    }

    /// Triples with the given subject.
    pub fn with_subject(&self, subject: &str) -> Vec<(String, String, String)> {
        self.lock()
            .iter()
            .filter(|(s, _, _)| s == subject)
            .cloned()
            .collect()
    }
}

impl TripleStore for MemoryStore {
    fn add(&self, subject: &str, predicate: &str, object: &str) -> Result<(), StoreError> {
        if subject.is_empty() {
            return Err(StoreError::EmptyTerm("subject"));
        }
        if predicate.is_empty() {
            return Err(StoreError::EmptyTerm("predicate"));
        }
        self.lock()
            .push((subject.to_string(), predicate.to_string(), object.to_string()));
        Ok(())
    }

    fn count(&self) -> usize {
        self.lock().len()
    }
}
