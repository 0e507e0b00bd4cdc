//! Ignore rules for pruning scans.
//!
//! An [`IgnoreRuleSet`] is an ordered list of patterns with OR semantics:
//! a path is ignored if any rule matches its root-relative path or its bare
//! file name. Patterns are classified once, when added:
//!
//! | Pattern        | Rule        | Matches                                   |
//! |----------------|-------------|-------------------------------------------|
//! | `build/`       | Directory   | any directory component named `build`     |
//! | `logs/**`      | Directory   | same, for the recursive-glob spelling     |
//! | `*.db`         | Extension   | file names ending in `.db`                |
//! | `**/gen/*.rs`  | Glob        | globset match on path or file name        |
//! | `/dist`        | Anchored    | `dist` at the root and everything below   |
//! | `vendor`       | Name        | any path component named `vendor`         |
//! | `docs/old`     | Substring   | relative paths containing `docs/old`      |
//!
//! Ignore files are gitignore-like: blank lines and `#` comments are
//! skipped. Negations (`!pattern`) are read and dropped, not applied.

use globset::{Glob, GlobBuilder, GlobMatcher};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Directories always ignored when built-in defaults are on.
const DEFAULT_IGNORE_DIRS: &[&str] = &[
    // version control
    ".git",
    ".svn",
    ".hg",
    // dependencies
    "node_modules",
    "vendor",
    ".venv",
    "venv",
    "__pycache__",
    // build output
    "target",
    "build",
    "dist",
    // IDE
    ".idea",
    ".vscode",
];

/// File patterns always ignored when built-in defaults are on.
const DEFAULT_IGNORE_FILES: &[&str] = &[
    ".DS_Store",
    "Thumbs.db",
    "*.swp",
    "*.db",
    "*.db-journal",
    "*.db-wal",
    "*.db-shm",
    "*.sqlite",
    "*.sqlite3",
];

#[derive(Debug, Clone)]
enum Rule {
    Directory(String),
    Extension(String),
    Glob(GlobMatcher),
    Anchored(String),
    Name(String),
    Substring(String),
}

impl Rule {
    fn classify(pattern: &str) -> Result<Rule, globset::Error> {
        if let Some(dir) = pattern.strip_suffix("/**").or_else(|| pattern.strip_suffix('/')) {
            if !has_glob_meta(dir) && !dir.is_empty() {
                return Ok(Rule::Directory(dir.trim_start_matches('/').to_string()));
            }
        }

        if let Some(ext) = pattern.strip_prefix("*.") {
            if !has_glob_meta(ext) && !ext.contains('/') {
                return Ok(Rule::Extension(format!(".{ext}")));
            }
        }

        if has_glob_meta(pattern) {
            let glob = if pattern.contains('/') {
                GlobBuilder::new(pattern.trim_start_matches('/'))
                    .literal_separator(true)
                    .build()?
            } else {
                Glob::new(pattern)?
            };
            return Ok(Rule::Glob(glob.compile_matcher()));
        }

        if let Some(anchored) = pattern.strip_prefix('/') {
            return Ok(Rule::Anchored(anchored.to_string()));
        }

        if pattern.contains('/') {
            return Ok(Rule::Substring(pattern.to_string()));
        }

        Ok(Rule::Name(pattern.to_string()))
    }

    fn matches(&self, rel: &str, name: &str, is_dir: bool) -> bool {
        match self {
            Rule::Directory(dir) if dir.contains('/') => {
                (is_dir && rel == dir) || rel.starts_with(&format!("{dir}/"))
            }
            Rule::Directory(dir) => {
                let mut components: Vec<&str> = rel.split('/').collect();
                if !is_dir {
                    components.pop();
                }
                components.iter().any(|c| c == dir)
            }
            Rule::Extension(ext) => !is_dir && name.ends_with(ext.as_str()),
            Rule::Glob(matcher) => matcher.is_match(rel) || matcher.is_match(name),
            Rule::Anchored(prefix) => rel == prefix || rel.starts_with(&format!("{prefix}/")),
            Rule::Name(n) => rel.split('/').any(|c| c == n),
            Rule::Substring(s) => rel.contains(s.as_str()),
        }
    }
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(|c: char| matches!(c, '*' | '?' | '[' | '{'))
}

/// Ordered set of ignore patterns.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    patterns: Vec<String>,
    rules: Vec<Rule>,
}

impl IgnoreRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule set holding the built-in defaults (VCS, dependency, build, IDE/OS).
    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        for dir in DEFAULT_IGNORE_DIRS {
            set.push(format!("{dir}/"), Rule::Directory(dir.to_string()));
        }
        for pattern in DEFAULT_IGNORE_FILES {
            // Built-in patterns are known to compile.
            if let Ok(rule) = Rule::classify(pattern) {
                set.push(pattern.to_string(), rule);
            }
        }
        set
    }

    fn push(&mut self, pattern: String, rule: Rule) {
        self.patterns.push(pattern);
        self.rules.push(rule);
    }

    /// Add one pattern. Blank and `#` lines are ignored.
    pub fn add(&mut self, pattern: &str) -> Result<(), globset::Error> {
        let pattern = pattern.trim();
        if pattern.is_empty() || pattern.starts_with('#') {
            return Ok(());
        }
        let rule = Rule::classify(pattern)?;
        self.push(pattern.to_string(), rule);
        Ok(())
    }

    /// Add patterns from ignore-file content; returns how many were added.
    ///
    /// Invalid globs are logged and skipped so one bad line does not
    /// disable the whole file.
    pub fn add_ignore_file_content(&mut self, source: &str, content: &str) -> usize {
        let mut added = 0;
        for pattern in parse_ignore_file(source, content) {
            match self.add(&pattern) {
                Ok(()) => added += 1,
                Err(e) => warn!(file = %source, pattern = %pattern, error = %e, "skipping invalid ignore pattern"),
            }
        }
        added
    }

    /// Load an ignore file if it exists. A missing file adds nothing.
    pub fn load_ignore_file(&mut self, path: &Path) -> io::Result<usize> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(self.add_ignore_file_content(&path.display().to_string(), &content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e),
        }
    }

    /// Whether `rel` itself matches any rule.
    ///
    /// `rel` is root-relative with forward slashes.
    pub fn is_ignored(&self, rel: &str, is_dir: bool) -> bool {
        if rel.is_empty() {
            return false;
        }
        let name = crate::paths::file_name(rel);
        self.rules.iter().any(|rule| rule.matches(rel, name, is_dir))
    }

    /// Whether the file at `rel` or any of its ancestor directories is ignored.
    ///
    /// Used when paths arrive without a walk (git scope), where there was no
    /// chance to prune a parent directory.
    pub fn is_path_ignored(&self, rel: &str) -> bool {
        let mut end = 0;
        while let Some(off) = rel[end..].find('/') {
            let ancestor = &rel[..end + off];
            if self.is_ignored(ancestor, true) {
                return true;
            }
            end += off + 1;
        }
        self.is_ignored(rel, false)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Patterns from gitignore-style content.
///
/// Negation lines are dropped with a debug event.
pub fn parse_ignore_file(source: &str, content: &str) -> Vec<String> {
    let mut patterns = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('!') {
            debug!(file = %source, line = idx + 1, pattern = %line, "dropping negated ignore pattern");
            continue;
        }
        patterns.push(line.to_string());
    }
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(patterns: &[&str]) -> IgnoreRuleSet {
        let mut set = IgnoreRuleSet::new();
        for p in patterns {
            set.add(p).unwrap();
        }
        set
    }

    #[test]
    fn test_name_rule_matches_any_component() {
        let rules = set(&["vendor"]);
        assert!(rules.is_ignored("vendor", true));
        assert!(rules.is_ignored("third/vendor", true));
        assert!(rules.is_path_ignored("vendor/lib/x.go"));
        assert!(!rules.is_ignored("vendored.go", false));
    }

    #[test]
    fn test_directory_rule_only_matches_directories() {
        let rules = set(&["build/"]);
        assert!(rules.is_ignored("build", true));
        assert!(rules.is_ignored("a/build", true));
        assert!(!rules.is_ignored("build", false));
        assert!(rules.is_path_ignored("build/out.rs"));
    }

    #[test]
    fn test_recursive_glob_directory_spelling() {
        let rules = set(&["ignored_dir/**"]);
        assert!(rules.is_ignored("ignored_dir", true));
        assert!(rules.is_path_ignored("ignored_dir/code.rs"));
    }

    #[test]
    fn test_extension_rule() {
        let rules = set(&["*.tmp"]);
        assert!(rules.is_ignored("main.tmp", false));
        assert!(rules.is_ignored("deep/dir/x.tmp", false));
        assert!(!rules.is_ignored("main.rs", false));
    }

    #[test]
    fn test_glob_rule_matches_path_or_name() {
        let rules = set(&["**/gen/*.rs", "*_test.go"]);
        assert!(rules.is_ignored("src/gen/a.rs", false));
        assert!(!rules.is_ignored("src/gen/sub/a.rs", false));
        assert!(rules.is_ignored("pkg/a_test.go", false));
    }

    #[test]
    fn test_anchored_and_substring_rules() {
        let rules = set(&["/dist", "docs/old"]);
        assert!(rules.is_ignored("dist", true));
        assert!(rules.is_path_ignored("dist/a.js"));
        assert!(!rules.is_ignored("web/dist", true));
        assert!(rules.is_ignored("site/docs/old/page.md", false));
    }

    #[test]
    fn test_ignore_file_parsing_drops_negations() {
        let content = "# comment\n\n*.log\n!keep.log\nbuild/\n";
        assert_eq!(parse_ignore_file(".gitignore", content), vec!["*.log", "build/"]);

        let mut rules = IgnoreRuleSet::new();
        assert_eq!(rules.add_ignore_file_content(".gitignore", content), 2);
        assert!(rules.is_ignored("keep.log", false));
    }

    #[test]
    fn test_defaults_cover_vcs_and_dependencies() {
        let rules = IgnoreRuleSet::with_defaults();
        assert!(rules.is_ignored(".git", true));
        assert!(rules.is_ignored("web/node_modules", true));
        assert!(rules.is_ignored("target", true));
        assert!(rules.is_ignored("data.sqlite", false));
        assert!(!rules.is_ignored("src", true));
        assert!(!rules.is_ignored("src/main.rs", false));
    }

    #[test]
    fn test_invalid_glob_is_rejected() {
        let mut rules = IgnoreRuleSet::new();
        assert!(rules.add("src/[a.rs").is_err());
        assert!(rules.is_empty());
    }
}
