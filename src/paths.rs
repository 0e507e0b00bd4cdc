//! Path keys and lexical normalization.
//!
//! Modules are keyed by their path relative to the scan root, always with
//! forward slashes. Dependency references are normalized lexically (no
//! filesystem access) so that `pkg/a/../x.go` and `pkg/x.go` share a key.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::path::{Path, PathBuf};

/// Canonicalize a path, returning None if it does not exist.
pub fn canonicalize(path: &Path) -> Option<PathBuf> {
    std::fs::canonicalize(path).ok()
}

/// Root-relative key for `path`, with forward slashes.
///
/// Falls back to the full path if `path` is not under `root`.
pub fn relative_key(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .unwrap_or_else(|_| path.to_string_lossy().replace('\\', "/"))
}

/// Lexically normalize a slash-separated relative path.
///
/// `.` components are dropped and `..` pops the previous component. A `..`
/// that would climb above the start is kept so the result never silently
/// changes meaning.
pub fn normalize(path: &str) -> String {
    let utf8 = Utf8Path::new(path);
    let mut parts: Vec<&str> = Vec::new();
    let mut absolute = false;

    for component in utf8.components() {
        match component {
            Utf8Component::RootDir => absolute = true,
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            Utf8Component::Normal(name) => parts.push(name),
            Utf8Component::Prefix(prefix) => parts.push(prefix.as_str()),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Directory part of a root-relative key (`""` for files at the root).
pub fn parent_dir(key: &str) -> &str {
    match key.rfind('/') {
        Some(idx) => &key[..idx],
        None => "",
    }
}

/// Resolve `reference` against the directory of the file keyed `from`.
pub fn join_relative(from: &str, reference: &str) -> String {
    let mut base = Utf8PathBuf::from(parent_dir(from));
    base.push(reference);
    normalize(base.as_str())
}

/// Bare file name of a key.
pub fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
