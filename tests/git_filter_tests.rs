//! Integration tests for git-scoped file selection.
//!
//! Each test builds a throwaway repository with git2 and compares results
//! relative to the repository working directory.

use git2::{Oid, Repository, Signature};
use linkeddoc::{GitFilter, GitScope, LanguageRegistry, ScanOptions, Scanner};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn stage_all(repo: &Repository) {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .unwrap();
    index.update_all(["*"], None).unwrap();
    index.write().unwrap();
}

fn commit_all(repo: &Repository, message: &str) -> Oid {
    stage_all(repo);
    let mut index = repo.index().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let sig = Signature::now("Test", "test@example.com").unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

fn open_filter(dir: &Path) -> GitFilter {
    GitFilter::open(dir, Arc::new(LanguageRegistry::new())).unwrap()
}

fn relative(filter: &GitFilter, files: Vec<std::path::PathBuf>) -> Vec<String> {
    files
        .iter()
        .map(|p| {
            p.strip_prefix(filter.workdir())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn test_changed_in_commit() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "a.go", "package a");
    write(dir.path(), "README", "docs");
    let first = commit_all(&repo, "first");

    write(dir.path(), "b.go", "package b");
    write(dir.path(), "a.go", "package a // changed");
    let second = commit_all(&repo, "second");

    let filter = open_filter(dir.path());
    // The root commit is compared with an empty tree; README has no language.
    assert_eq!(
        relative(&filter, filter.changed_in_commit(&first.to_string()).unwrap()),
        vec!["a.go"]
    );
    assert_eq!(
        relative(&filter, filter.changed_in_commit(&second.to_string()).unwrap()),
        vec!["a.go", "b.go"]
    );
}

#[test]
fn test_changed_since_includes_worktree_and_untracked() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "a.go", "package a");
    write(dir.path(), "b.go", "package b");
    let base = commit_all(&repo, "base");

    write(dir.path(), "c.go", "package c");
    commit_all(&repo, "add c");
    write(dir.path(), "a.go", "package a // edited");
    write(dir.path(), "new/d.py", "x = 1");

    let filter = open_filter(dir.path());
    let files = filter.files(&GitScope::Since(base.to_string())).unwrap();
    assert_eq!(relative(&filter, files), vec!["a.go", "c.go", "new/d.py"]);
}

#[test]
fn test_staged_and_uncommitted() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "a.go", "package a");
    commit_all(&repo, "base");

    write(dir.path(), "staged.go", "package s");
    stage_all(&repo);
    write(dir.path(), "loose.go", "package l");

    let filter = open_filter(dir.path());
    assert_eq!(relative(&filter, filter.staged().unwrap()), vec!["staged.go"]);
    assert_eq!(
        relative(&filter, filter.uncommitted().unwrap()),
        vec!["loose.go", "staged.go"]
    );
}

#[test]
fn test_staged_before_first_commit() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "first.rs", "fn main() {}");
    stage_all(&repo);

    let filter = open_filter(dir.path());
    assert_eq!(relative(&filter, filter.staged().unwrap()), vec!["first.rs"]);
}

#[test]
fn test_deleted_files_are_dropped() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "keep.go", "package k");
    write(dir.path(), "gone.go", "package g");
    let base = commit_all(&repo, "base");

    fs::remove_file(dir.path().join("gone.go")).unwrap();
    write(dir.path(), "keep.go", "package k // edited");

    let filter = open_filter(dir.path());
    let files = filter.changed_since(&base.to_string()).unwrap();
    assert_eq!(relative(&filter, files), vec!["keep.go"]);
}

#[test]
fn test_unknown_reference_is_an_error() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "a.go", "package a");
    commit_all(&repo, "base");

    let filter = open_filter(dir.path());
    assert!(filter.changed_since("no-such-branch").is_err());
}

#[test]
fn test_scanner_with_git_scope() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "a.go", "package a");
    write(dir.path(), "b.go", "package b");
    commit_all(&repo, "base");

    write(
        dir.path(),
        "b.go",
        "// <!-- LinkedDoc RDF -->\n// <#b> a code:Module .\n// <!-- End LinkedDoc RDF -->\n",
    );
    write(dir.path(), "vendor/dep.go", "package dep");

    let options = ScanOptions::default().with_git_scope(Some(GitScope::Uncommitted));
    let inv = Scanner::new().scan(dir.path(), &options).unwrap();

    let keys: Vec<String> = inv.files.iter().map(|f| inv.relative(f)).collect();
    assert_eq!(keys, vec!["b.go"]);
    assert!(inv.files[0].has_metadata);
    assert_eq!(inv.stats.files_ignored, 1);
}

#[test]
fn test_scan_outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.go", "package a");
    let options = ScanOptions::default().with_git_scope(Some(GitScope::Staged));
    // Temp directories are normally not inside a repository; skip if they are.
    if Repository::discover(dir.path()).is_ok() {
        return;
    }
    let err = Scanner::new().scan(dir.path(), &options).unwrap_err();
    assert!(matches!(err, linkeddoc::ScanError::Git(_)));
}
