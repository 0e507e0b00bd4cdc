//! Integration tests for symlink handling during scans.
//!
//! Links are skipped unless following is enabled; a dangling link that is
//! followed becomes a walk error rather than a failed scan.

#![cfg(unix)]

use linkeddoc::{ErrorStage, ScanOptions, Scanner};
use std::fs;
use std::os::unix::fs::symlink;
use tempfile::TempDir;

#[test]
fn test_symlinks_skipped_by_default() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("real.go"), "package real").unwrap();
    symlink(dir.path().join("real.go"), dir.path().join("alias.go")).unwrap();

    let inv = Scanner::new().scan(dir.path(), &ScanOptions::default()).unwrap();
    assert_eq!(inv.files.len(), 1);
    assert!(inv.files[0].path.ends_with("real.go"));
    assert_eq!(inv.stats.symlinks_skipped, 1);
}

#[test]
fn test_followed_symlink_directory_is_scanned() {
    let outside = TempDir::new().unwrap();
    fs::write(outside.path().join("shared.go"), "package shared").unwrap();

    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.go"), "package main").unwrap();
    symlink(outside.path(), dir.path().join("shared")).unwrap();

    let skipped = Scanner::new().scan(dir.path(), &ScanOptions::default()).unwrap();
    assert_eq!(skipped.files.len(), 1);

    let options = ScanOptions::default().with_follow_symlinks(true);
    let followed = Scanner::new().scan(dir.path(), &options).unwrap();
    let keys: Vec<String> = followed.files.iter().map(|f| followed.relative(f)).collect();
    assert_eq!(keys, vec!["main.go", "shared/shared.go"]);
}

#[test]
fn test_dangling_symlink_becomes_walk_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("ok.go"), "package ok").unwrap();
    symlink(dir.path().join("nowhere.go"), dir.path().join("dangling.go")).unwrap();

    let options = ScanOptions::default().with_follow_symlinks(true);
    let inv = Scanner::new().scan(dir.path(), &options).unwrap();

    assert_eq!(inv.files.len(), 1);
    let records = inv.errors.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].stage, ErrorStage::Walk);
    assert_eq!(records[0].code, "LD-IO-002");
}

#[test]
fn test_dangling_symlinks_abort_concurrent_scan_over_threshold() {
    let dir = TempDir::new().unwrap();
    for i in 0..10 {
        fs::write(dir.path().join(format!("ok{i}.go")), "package ok").unwrap();
    }
    for i in 0..4 {
        symlink(
            dir.path().join(format!("missing{i}.go")),
            dir.path().join(format!("dangling{i}.go")),
        )
        .unwrap();
    }

    let options = ScanOptions::default()
        .with_follow_symlinks(true)
        .with_concurrency(2)
        .with_max_errors(Some(1));
    let err = Scanner::new().scan(dir.path(), &options).unwrap_err();

    assert_eq!(err.abort_reason().unwrap().code(), "LD-SCN-002");
    let partial = err.partial().unwrap();
    assert!(partial.errors.len() >= 2);
    assert!(partial.errors.records().iter().all(|r| r.stage == ErrorStage::Walk));
}

#[test]
fn test_strict_concurrent_scan_keeps_first_error() {
    let dir = TempDir::new().unwrap();
    symlink(dir.path().join("a_missing.go"), dir.path().join("a_link.go")).unwrap();
    symlink(dir.path().join("b_missing.go"), dir.path().join("b_link.go")).unwrap();

    let options = ScanOptions::default()
        .with_follow_symlinks(true)
        .with_concurrency(2)
        .with_strict(true);
    let err = Scanner::new().scan(dir.path(), &options).unwrap_err();

    match err.abort_reason().unwrap() {
        linkeddoc::AbortReason::Strict(record) => {
            let partial = err.partial().unwrap();
            assert_eq!(**record, partial.errors.first().unwrap());
        }
        other => panic!("expected strict abort, got {other:?}"),
    }
}
