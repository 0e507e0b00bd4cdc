//! Integration tests for error collection and abort policies.

use linkeddoc::diagnostics::summarize;
use linkeddoc::{
    BuildError, BuildOptions, ErrorCollector, ErrorRecord, ErrorStage, GraphBuilder, MemoryStore,
    ScanOptions, Scanner, StoreError, TripleStore,
};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn record(i: usize) -> ErrorRecord {
    ErrorRecord::new(format!("f{i}.go"), ErrorStage::Read, "LD-IO-004", "cannot read file")
}

#[test]
fn test_summary_truncates_after_ten() {
    let collector = ErrorCollector::new();
    for i in 0..13 {
        collector.push(record(i));
    }
    let summary = collector.summary();
    assert!(summary.starts_with("13 error(s):"));
    assert!(summary.contains("f9.go"));
    assert!(!summary.contains("f10.go"));
    assert!(summary.ends_with("... and 3 more"));
    assert_eq!(summarize(&[]), "no errors");
}

#[test]
fn test_collector_is_shared_across_threads() {
    let collector = Arc::new(ErrorCollector::new());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let collector = Arc::clone(&collector);
            thread::spawn(move || {
                for i in 0..25 {
                    collector.push(record(t * 100 + i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(collector.len(), 100);
}

#[test]
fn test_errors_do_not_stop_default_scan() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.go"), "package a").unwrap();
    let paths: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("gone{i}.go"))).collect();

    let inv = Scanner::new()
        .scan_files(dir.path(), &paths, &ScanOptions::default())
        .unwrap();
    assert_eq!(inv.errors.len(), 20);
    assert!(inv.has_errors());
}

/// Store that rejects every Nth triple.
struct FlakyStore {
    every: usize,
    seen: AtomicUsize,
    inner: MemoryStore,
}

impl TripleStore for FlakyStore {
    fn add(&self, subject: &str, predicate: &str, object: &str) -> Result<(), StoreError> {
        let n = self.seen.fetch_add(1, Ordering::SeqCst) + 1;
        if n % self.every == 0 {
            return Err(StoreError::Rejected("flaky".to_string()));
        }
        self.inner.add(subject, predicate, object)
    }

    fn count(&self) -> usize {
        self.inner.count()
    }
}

#[test]
fn test_store_rejections_are_recorded_not_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("m.go"),
        "// <!-- LinkedDoc RDF -->\n// <#m> a code:Module ; code:name \"m\" ; code:layer \"x\" .\n// <!-- End LinkedDoc RDF -->\n",
    )
    .unwrap();

    let store = Arc::new(FlakyStore {
        every: 2,
        seen: AtomicUsize::new(0),
        inner: MemoryStore::new(),
    });
    let graph = GraphBuilder::new(store)
        .build(dir.path(), &BuildOptions::default())
        .unwrap();

    // The module still exists; only the store lost triples.
    assert_eq!(graph.module("m.go").unwrap().layer, "x");
    assert_eq!(graph.stats.total_triples, 2);
    let records = graph.errors.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].stage, ErrorStage::Store);
    assert_eq!(records[0].code, "LD-STO-001");
}

#[test]
fn test_build_threshold_counts_scan_and_parse_errors() {
    let dir = TempDir::new().unwrap();
    for i in 0..4 {
        fs::write(
            dir.path().join(format!("open{i}.go")),
            "// <!-- LinkedDoc RDF -->\n// <#m> a code:Module .\n",
        )
        .unwrap();
    }

    let lenient = GraphBuilder::new(Arc::new(MemoryStore::new()))
        .build(dir.path(), &BuildOptions::default())
        .unwrap();
    assert_eq!(lenient.errors.len(), 4);

    let options =
        BuildOptions::default().with_scan(ScanOptions::default().with_max_errors(Some(2)));
    let err = GraphBuilder::new(Arc::new(MemoryStore::new()))
        .build(dir.path(), &options)
        .unwrap_err();
    match err {
        BuildError::Aborted { reason, graph } => {
            assert_eq!(reason.code(), "LD-SCN-002");
            assert_eq!(graph.errors.len(), 3);
            assert!(graph.is_empty());
        }
        other => panic!("expected threshold abort, got {other}"),
    }
}
