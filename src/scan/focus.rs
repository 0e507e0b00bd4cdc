//! Narrow an already-discovered file list to a set of glob patterns.

use globset::{GlobBuilder, GlobMatcher};
use serde::Serialize;
use std::path::Path;

use crate::paths::{file_name, relative_key};

/// Match counts for one focus run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FocusStats {
    pub total: usize,
    pub matched: usize,
    /// `(pattern, files it matched)` in pattern order; a file may count
    /// toward several patterns
    pub per_pattern: Vec<(String, usize)>,
}

/// OR-combined glob filter.
///
/// `*` stays inside one path segment and `**` crosses directories. A
/// pattern without `/` is also tried against the bare file name, so `*.go`
/// matches Go files at any depth.
#[derive(Debug, Clone)]
pub struct FocusFilter {
    patterns: Vec<(String, GlobMatcher)>,
}

impl FocusFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, globset::Error> {
        let patterns = patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                let matcher = GlobBuilder::new(p)
                    .literal_separator(true)
                    .build()?
                    .compile_matcher();
                Ok((p.to_string(), matcher))
            })
            .collect::<Result<Vec<_>, globset::Error>>()?;
        Ok(FocusFilter { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn pattern_matches(pattern: &str, matcher: &GlobMatcher, rel: &str) -> bool {
        matcher.is_match(rel) || (!pattern.contains('/') && matcher.is_match(file_name(rel)))
    }

    /// Whether a root-relative key matches any pattern.
    ///
    /// An empty filter matches everything.
    pub fn matches(&self, rel: &str) -> bool {
        self.is_empty()
            || self
                .patterns
                .iter()
                .any(|(p, m)| Self::pattern_matches(p, m, rel))
    }

    /// Keep the items whose path (relative to `root`) matches any pattern.
    pub fn apply<T: AsRef<Path>>(&self, root: &Path, items: Vec<T>) -> (Vec<T>, FocusStats) {
        let mut stats = FocusStats {
            total: items.len(),
            matched: 0,
            per_pattern: self.patterns.iter().map(|(p, _)| (p.clone(), 0)).collect(),
        };

        if self.is_empty() {
            stats.matched = items.len();
            return (items, stats);
        }

        let mut kept = Vec::new();
        for item in items {
            let rel = relative_key(root, item.as_ref());
            let mut any = false;
            for (idx, (pattern, matcher)) in self.patterns.iter().enumerate() {
                if Self::pattern_matches(pattern, matcher, &rel) {
                    stats.per_pattern[idx].1 += 1;
                    any = true;
                }
            }
            if any {
                kept.push(item);
            }
        }

        stats.matched = kept.len();
        (kept, stats)
    }
}
