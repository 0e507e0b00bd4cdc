//! Directory scanning.
//!
//! The Scanner walks a root directory, prunes ignored subtrees, classifies
//! each surviving file, checks it for a metadata block, and returns an
//! [`Inventory`] of file records plus every per-file error it ran into.
//!
//! # Modes
//!
//! - Sequential (default): one thread, records in traversal order (entries
//!   sorted by file name).
//! - Concurrent: one walker thread feeds a bounded queue drained by a worker
//!   pool; record order is not guaranteed. See [`pool`].
//!
//! # Failure policy
//!
//! Per-file failures are recorded, never thrown. [`ErrorPolicy`] can turn
//! the first error (strict) or the error count (threshold) into an abort,
//! in which case the partial inventory rides along in
//! [`ScanError::Aborted`].

pub mod focus;
pub mod git;
pub mod ignore_rules;
pub mod language;
mod pool;
pub mod sample;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::diagnostics::{ErrorCollector, ErrorRecord, ErrorStage, SkipReason};
use crate::error::{AbortReason, ErrorPolicy, ScanError};
use crate::error_codes::{
    LD_IO_001_NOT_FOUND, LD_IO_002_WALK_FAILED, LD_IO_003_STAT_FAILED, LD_IO_004_READ_FAILED,
    LD_IO_005_IGNORE_FILE,
};
use crate::parser;
use crate::paths::{canonicalize, relative_key};

pub use focus::{FocusFilter, FocusStats};
pub use git::{GitFilter, GitScope};
pub use ignore_rules::IgnoreRuleSet;
pub use language::{LanguageRegistry, UNKNOWN_LANGUAGE};
pub use sample::{Sampler, SamplingStrategy};

/// Default maximum file size: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Scan configuration.
///
/// Every field has a default, so a calling layer can deserialize a partial
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Only files matching one of these globs are kept (empty = all)
    pub include: Vec<String>,
    /// Extra ignore patterns
    pub exclude: Vec<String>,
    /// Files larger than this are skipped (None = no limit)
    pub max_file_size: Option<u64>,
    pub follow_symlinks: bool,
    /// Ignore files to load from the root
    pub ignore_files: Vec<String>,
    /// Include the built-in VCS/dependency/build/IDE ignores
    pub use_default_ignores: bool,
    pub concurrent: bool,
    /// Worker count for concurrent mode (0 = available parallelism)
    pub workers: usize,
    pub strict: bool,
    pub max_errors: Option<usize>,
    /// Overall deadline; unset means no deadline
    pub timeout: Option<Duration>,
    /// Files slower than this are logged
    pub file_timeout: Option<Duration>,
    /// Restrict the scan to files changed in git
    pub git_scope: Option<GitScope>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            include: Vec::new(),
            exclude: Vec::new(),
            max_file_size: Some(DEFAULT_MAX_FILE_SIZE),
            follow_symlinks: false,
            ignore_files: vec![".gitignore".to_string(), ".linkeddocignore".to_string()],
            use_default_ignores: true,
            concurrent: false,
            workers: 0,
            strict: false,
            max_errors: None,
            timeout: None,
            file_timeout: None,
            git_scope: None,
        }
    }
}

impl ScanOptions {
    pub fn with_include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }

    pub fn with_exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    pub fn with_max_file_size(mut self, bytes: Option<u64>) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn with_ignore_files(mut self, names: Vec<String>) -> Self {
        self.ignore_files = names;
        self
    }

    pub fn with_default_ignores(mut self, enabled: bool) -> Self {
        self.use_default_ignores = enabled;
        self
    }

    /// Switch to the worker pool with `workers` threads (0 = all cores).
    pub fn with_concurrency(mut self, workers: usize) -> Self {
        self.concurrent = true;
        self.workers = workers;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_max_errors(mut self, max: Option<usize>) -> Self {
        self.max_errors = max;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_file_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.file_timeout = timeout;
        self
    }

    pub fn with_git_scope(mut self, scope: Option<GitScope>) -> Self {
        self.git_scope = scope;
        self
    }

    pub fn policy(&self) -> ErrorPolicy {
        ErrorPolicy {
            strict: self.strict,
            max_errors: self.max_errors,
        }
    }
}

/// One scanned source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path
    pub path: PathBuf,
    /// Classified language (never "unknown" inside an inventory)
    pub language: String,
    /// Size in bytes
    pub size: u64,
    pub modified: DateTime<Utc>,
    /// Whether the file contains the metadata start marker
    pub has_metadata: bool,
}

impl AsRef<Path> for FileRecord {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Counters for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub dirs_visited: u64,
    /// Directories skipped together with their whole subtree
    pub dirs_pruned: u64,
    pub files_visited: u64,
    pub files_ignored: u64,
    pub files_excluded: u64,
    pub files_unsupported: u64,
    pub files_oversized: u64,
    pub files_not_regular: u64,
    pub symlinks_skipped: u64,
    /// Files whose contents were read
    pub files_read: u64,
    pub bytes_read: u64,
}

impl ScanStats {
    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Ignored => self.files_ignored += 1,
            SkipReason::NotIncluded => self.files_excluded += 1,
            SkipReason::Symlink => self.symlinks_skipped += 1,
            SkipReason::UnsupportedLanguage => self.files_unsupported += 1,
            SkipReason::Oversized => self.files_oversized += 1,
            SkipReason::NotAFile => self.files_not_regular += 1,
        }
    }

    fn merge(&mut self, other: &ScanStats) {
        self.dirs_visited += other.dirs_visited;
        self.dirs_pruned += other.dirs_pruned;
        self.files_visited += other.files_visited;
        self.files_ignored += other.files_ignored;
        self.files_excluded += other.files_excluded;
        self.files_unsupported += other.files_unsupported;
        self.files_oversized += other.files_oversized;
        self.files_not_regular += other.files_not_regular;
        self.symlinks_skipped += other.symlinks_skipped;
        self.files_read += other.files_read;
        self.bytes_read += other.bytes_read;
    }
}

/// Result of a scan.
#[derive(Debug, Clone, Serialize)]
pub struct Inventory {
    /// Canonical scan root
    pub root: PathBuf,
    pub files: Vec<FileRecord>,
    pub errors: ErrorCollector,
    pub stats: ScanStats,
    pub duration: Duration,
}

impl Inventory {
    /// Records that carry a metadata block.
    pub fn with_metadata(&self) -> impl Iterator<Item = &FileRecord> {
        self.files.iter().filter(|f| f.has_metadata)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Root-relative key of a record.
    pub fn relative(&self, record: &FileRecord) -> String {
        relative_key(&self.root, &record.path)
    }
}

/// Walks directories and builds inventories.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    registry: Arc<LanguageRegistry>,
}

impl Scanner {
    /// Scanner with the default language registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: Arc<LanguageRegistry>) -> Self {
        Scanner { registry }
    }

    pub fn registry(&self) -> &Arc<LanguageRegistry> {
        &self.registry
    }

    /// Scan `root`.
    ///
    /// # Errors
    /// - Root missing or not a directory
    /// - Invalid include/exclude pattern
    /// - Git failure when `git_scope` is set
    /// - Policy abort (strict, threshold, timeout), with the partial inventory
    pub fn scan(&self, root: &Path, options: &ScanOptions) -> Result<Inventory, ScanError> {
        let root = resolve_root(root)?;

        if let Some(scope) = &options.git_scope {
            let filter = GitFilter::open(&root, Arc::clone(&self.registry))?;
            let mut files = filter.files(scope)?;
            files.retain(|path| path.starts_with(&root));
            info!(root = %root.display(), scope = ?scope, count = files.len(), "git-scoped scan");
            return self.scan_paths(root, &files, options);
        }

        let (ctx, setup_errors) = ScanContext::prepare(root, options, &self.registry)?;
        let signal = AbortSignal::default();
        let mut agg = Aggregator::new(ctx.policy, &signal);
        for record in setup_errors {
            agg.error(record);
        }

        let walk_stats = if options.concurrent {
            pool::run(&ctx, options.workers, &signal, &mut agg)?
        } else {
            walk(&ctx, &signal, |item| {
                match item {
                    WalkItem::File(path) => agg.outcome(process_file(&ctx, &path)),
                    WalkItem::Error(record) => agg.error(record),
                }
                ctx.check_deadline(&signal);
                !signal.is_set()
            })
        };

        agg.finish(&ctx, walk_stats)
    }

    /// Scan an explicit list of files under `root` instead of walking.
    ///
    /// Relative paths are taken relative to `root`. Ignore rules (including
    /// ancestors), include patterns, classification, and size limits still
    /// apply. Missing files become error records.
    pub fn scan_files(
        &self,
        root: &Path,
        paths: &[PathBuf],
        options: &ScanOptions,
    ) -> Result<Inventory, ScanError> {
        let root = resolve_root(root)?;
        self.scan_paths(root, paths, options)
    }

    fn scan_paths(
        &self,
        root: PathBuf,
        paths: &[PathBuf],
        options: &ScanOptions,
    ) -> Result<Inventory, ScanError> {
        let (ctx, setup_errors) = ScanContext::prepare(root, options, &self.registry)?;
        let signal = AbortSignal::default();
        let mut agg = Aggregator::new(ctx.policy, &signal);
        for record in setup_errors {
            agg.error(record);
        }

        let mut stats = ScanStats::default();
        for path in paths {
            ctx.check_deadline(&signal);
            if signal.is_set() {
                break;
            }

            let path = if path.is_absolute() {
                path.clone()
            } else {
                ctx.root.join(path)
            };
            stats.files_visited += 1;

            let rel = relative_key(&ctx.root, &path);
            if ctx.rules.is_path_ignored(&rel) {
                stats.files_ignored += 1;
                continue;
            }
            if !ctx.follow_symlinks && path.is_symlink() {
                stats.symlinks_skipped += 1;
                continue;
            }
            agg.outcome(process_file(&ctx, &path));
        }

        agg.finish(&ctx, stats)
    }
}

fn resolve_root(root: &Path) -> Result<PathBuf, ScanError> {
    let resolved =
        canonicalize(root).ok_or_else(|| ScanError::RootNotFound(root.to_path_buf()))?;
    if !resolved.is_dir() {
        return Err(ScanError::NotADirectory(resolved));
    }
    Ok(resolved)
}

/// Immutable per-scan state shared by the walker and the workers.
pub(crate) struct ScanContext {
    root: PathBuf,
    rules: IgnoreRuleSet,
    include: FocusFilter,
    registry: Arc<LanguageRegistry>,
    max_file_size: Option<u64>,
    follow_symlinks: bool,
    policy: ErrorPolicy,
    timeout: Option<Duration>,
    file_timeout: Option<Duration>,
    started: Instant,
}

impl ScanContext {
    /// Compile rules for `root`; unreadable ignore files come back as records.
    fn prepare(
        root: PathBuf,
        options: &ScanOptions,
        registry: &Arc<LanguageRegistry>,
    ) -> Result<(Self, Vec<ErrorRecord>), ScanError> {
        let mut rules = if options.use_default_ignores {
            IgnoreRuleSet::with_defaults()
        } else {
            IgnoreRuleSet::new()
        };

        for pattern in &options.exclude {
            rules
                .add(pattern)
                .map_err(|source| ScanError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
        }

        let mut setup_errors = Vec::new();
        for name in &options.ignore_files {
            let path = root.join(name);
            match rules.load_ignore_file(&path) {
                Ok(0) => {}
                Ok(count) => debug!(file = %path.display(), count, "loaded ignore file"),
                Err(e) => setup_errors.push(
                    ErrorRecord::new(&path, ErrorStage::Read, LD_IO_005_IGNORE_FILE, "ignore file unreadable")
                        .with_cause(e),
                ),
            }
        }

        let include = FocusFilter::new(&options.include).map_err(|source| ScanError::InvalidPattern {
            pattern: source.glob().unwrap_or_default().to_string(),
            source,
        })?;

        let ctx = ScanContext {
            root,
            rules,
            include,
            registry: Arc::clone(registry),
            max_file_size: options.max_file_size,
            follow_symlinks: options.follow_symlinks,
            policy: options.policy(),
            timeout: options.timeout,
            file_timeout: options.file_timeout,
            started: Instant::now(),
        };
        Ok((ctx, setup_errors))
    }

    /// Raise a timeout abort once the overall deadline has passed.
    fn check_deadline(&self, signal: &AbortSignal) {
        if let Some(limit) = self.timeout {
            let elapsed = self.started.elapsed();
            if elapsed >= limit {
                signal.trigger(AbortReason::Timeout { elapsed });
            }
        }
    }
}

/// Single-shot abort flag. The first reason set wins; later triggers only
/// keep the flag raised.
#[derive(Debug, Default)]
pub(crate) struct AbortSignal {
    raised: AtomicBool,
    reason: OnceLock<AbortReason>,
}

impl AbortSignal {
    pub(crate) fn trigger(&self, reason: AbortReason) -> bool {
        let first = self.reason.set(reason).is_ok();
        self.raised.store(true, Ordering::Release);
        first
    }

    pub(crate) fn is_set(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    pub(crate) fn reason(&self) -> Option<AbortReason> {
        self.reason.get().cloned()
    }
}

/// What happened to one dispatched file.
#[derive(Debug)]
pub(crate) enum FileOutcome {
    Record(FileRecord),
    Skipped(SkipReason),
    Failed(ErrorRecord),
}

/// Item produced by the walker.
pub(crate) enum WalkItem {
    File(PathBuf),
    Error(ErrorRecord),
}

/// Walk the tree under `ctx.root`, pruning ignored directories.
///
/// `emit` returns false to stop the walk. Only the walker's own counters
/// (directories, visited/ignored files, symlinks) are returned.
pub(crate) fn walk<F>(ctx: &ScanContext, signal: &AbortSignal, mut emit: F) -> ScanStats
where
    F: FnMut(WalkItem) -> bool,
{
    let mut stats = ScanStats::default();
    let mut entries = WalkDir::new(&ctx.root)
        .follow_links(ctx.follow_symlinks)
        .sort_by_file_name()
        .into_iter();

    loop {
        ctx.check_deadline(signal);
        if signal.is_set() {
            break;
        }

        let entry = match entries.next() {
            None => break,
            Some(Ok(entry)) => entry,
            Some(Err(err)) => {
                let path = err.path().unwrap_or(ctx.root.as_path()).to_path_buf();
                let record =
                    ErrorRecord::new(path, ErrorStage::Walk, LD_IO_002_WALK_FAILED, "directory traversal failed")
                        .with_cause(&err);
                if !emit(WalkItem::Error(record)) {
                    break;
                }
                continue;
            }
        };

        if entry.depth() == 0 {
            stats.dirs_visited += 1;
            continue;
        }

        let rel = relative_key(&ctx.root, entry.path());

        if entry.path_is_symlink() && !ctx.follow_symlinks {
            stats.symlinks_skipped += 1;
            debug!(path = %rel, "skipping symlink");
            continue;
        }

        if entry.file_type().is_dir() {
            if ctx.rules.is_ignored(&rel, true) {
                stats.dirs_pruned += 1;
                debug!(path = %rel, "pruning ignored directory");
                entries.skip_current_dir();
            } else {
                stats.dirs_visited += 1;
            }
            continue;
        }

        stats.files_visited += 1;
        if ctx.rules.is_ignored(&rel, false) {
            stats.files_ignored += 1;
            continue;
        }

        if !emit(WalkItem::File(entry.into_path())) {
            break;
        }
    }

    stats
}

/// Stat, classify, and read one file.
pub(crate) fn process_file(ctx: &ScanContext, path: &Path) -> FileOutcome {
    let started = Instant::now();
    let rel = relative_key(&ctx.root, path);

    let language = ctx.registry.classify(path);
    if language == UNKNOWN_LANGUAGE {
        return FileOutcome::Skipped(SkipReason::UnsupportedLanguage);
    }
    if !ctx.include.matches(&rel) {
        return FileOutcome::Skipped(SkipReason::NotIncluded);
    }

    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            let code = if e.kind() == io::ErrorKind::NotFound {
                LD_IO_001_NOT_FOUND
            } else {
                LD_IO_003_STAT_FAILED
            };
            return FileOutcome::Failed(
                ErrorRecord::new(path, ErrorStage::Stat, code, "cannot read file metadata").with_cause(e),
            );
        }
    };
    if !metadata.is_file() {
        return FileOutcome::Skipped(SkipReason::NotAFile);
    }

    let size = metadata.len();
    if matches!(ctx.max_file_size, Some(max) if size > max) {
        debug!(path = %rel, size, "skipping oversized file");
        return FileOutcome::Skipped(SkipReason::Oversized);
    }

    let content = match fs::read(path) {
        Ok(c) => c,
        Err(e) => {
            return FileOutcome::Failed(
                ErrorRecord::new(path, ErrorStage::Read, LD_IO_004_READ_FAILED, "cannot read file").with_cause(e),
            )
        }
    };

    let modified = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());

    let record = FileRecord {
        path: path.to_path_buf(),
        language,
        size,
        modified,
        has_metadata: parser::has_block(&content),
    };

    if let Some(limit) = ctx.file_timeout {
        let elapsed = started.elapsed();
        if elapsed >= limit {
            warn!(path = %rel, elapsed_ms = elapsed.as_millis() as u64, "slow file");
        }
    }

    FileOutcome::Record(record)
}

/// Owns all mutable scan results. Only the scan's calling thread touches it.
pub(crate) struct Aggregator<'a> {
    policy: ErrorPolicy,
    signal: &'a AbortSignal,
    files: Vec<FileRecord>,
    errors: ErrorCollector,
    stats: ScanStats,
}

impl<'a> Aggregator<'a> {
    fn new(policy: ErrorPolicy, signal: &'a AbortSignal) -> Self {
        Aggregator {
            policy,
            signal,
            files: Vec::new(),
            errors: ErrorCollector::new(),
            stats: ScanStats::default(),
        }
    }

    pub(crate) fn error(&mut self, record: ErrorRecord) {
        debug!(error = %record, "scan error");
        let count = self.errors.push(record.clone());
        if let Some(reason) = self.policy.check(&record, count) {
            if self.signal.trigger(reason) {
                warn!(count, "aborting scan");
            }
        }
    }

    pub(crate) fn outcome(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Record(record) => {
                self.stats.files_read += 1;
                self.stats.bytes_read += record.size;
                self.files.push(record);
            }
            FileOutcome::Skipped(reason) => self.stats.record_skip(reason),
            FileOutcome::Failed(record) => self.error(record),
        }
    }

    fn finish(mut self, ctx: &ScanContext, walk_stats: ScanStats) -> Result<Inventory, ScanError> {
        self.stats.merge(&walk_stats);
        let inventory = Inventory {
            root: ctx.root.clone(),
            files: self.files,
            errors: self.errors,
            stats: self.stats,
            duration: ctx.started.elapsed(),
        };

        info!(
            root = %inventory.root.display(),
            files = inventory.files.len(),
            with_metadata = inventory.with_metadata().count(),
            errors = inventory.errors.len(),
            pruned = inventory.stats.dirs_pruned,
            duration_ms = inventory.duration.as_millis() as u64,
            "scan finished"
        );

        match self.signal.reason() {
            Some(reason) => Err(ScanError::Aborted {
                reason,
                partial: Box::new(inventory),
            }),
            None => Ok(inventory),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_missing_root_fails_fast() {
        let err = Scanner::new()
            .scan(Path::new("/definitely/not/here"), &ScanOptions::default())
            .unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(_)));
    }

    #[test]
    fn test_sequential_order_is_sorted() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.go", "package b");
        write(dir.path(), "a.go", "package a");
        write(dir.path(), "sub/c.go", "package c");

        let inv = Scanner::new().scan(dir.path(), &ScanOptions::default()).unwrap();
        let rels: Vec<String> = inv.files.iter().map(|f| inv.relative(f)).collect();
        assert_eq!(rels, vec!["a.go", "b.go", "sub/c.go"]);
    }

    #[test]
    fn test_unknown_and_oversized_are_dropped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "notes.txt", "hello");
        write(dir.path(), "big.go", &"x".repeat(64));
        write(dir.path(), "small.go", "x");

        let options = ScanOptions::default().with_max_file_size(Some(16));
        let inv = Scanner::new().scan(dir.path(), &options).unwrap();
        assert_eq!(inv.files.len(), 1);
        assert_eq!(inv.stats.files_unsupported, 1);
        assert_eq!(inv.stats.files_oversized, 1);
        assert!(inv.errors.is_empty());
    }

    #[test]
    fn test_metadata_detection() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "m.go",
            "// <!-- LinkedDoc RDF -->\n// <#m> a code:Module .\n// <!-- End LinkedDoc RDF -->\n",
        );
        write(dir.path(), "plain.go", "package plain");

        let inv = Scanner::new().scan(dir.path(), &ScanOptions::default()).unwrap();
        let with: Vec<String> = inv.with_metadata().map(|f| inv.relative(f)).collect();
        assert_eq!(with, vec!["m.go"]);
    }

    #[test]
    fn test_abort_signal_first_writer_wins() {
        let signal = AbortSignal::default();
        assert!(!signal.is_set());
        assert!(signal.trigger(AbortReason::ThresholdExceeded { count: 3, limit: 2 }));
        assert!(!signal.trigger(AbortReason::Timeout {
            elapsed: Duration::from_secs(1)
        }));
        assert!(signal.is_set());
        assert_eq!(
            signal.reason(),
            Some(AbortReason::ThresholdExceeded { count: 3, limit: 2 })
        );
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: ScanOptions = serde_json::from_str(r#"{"strict": true}"#).unwrap();
        assert!(options.strict);
        assert_eq!(options.max_file_size, Some(DEFAULT_MAX_FILE_SIZE));
        assert!(options.use_default_ignores);
        assert_eq!(options.ignore_files, vec![".gitignore", ".linkeddocignore"]);
    }
}
