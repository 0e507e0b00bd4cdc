//! Git-aware file selection for incremental scans.
//!
//! Lists files that changed since a reference, inside one commit, in the
//! index, or in the working tree. Results are absolute paths of files that
//! still exist and have a supported language, sorted and deduplicated.

use git2::{Diff, DiffOptions, ErrorCode, Repository, Status, StatusOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::language::LanguageRegistry;

/// Which changed files a git-scoped scan should cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GitScope {
    /// Changed between a ref/branch/commit and the working tree
    Since(String),
    /// Touched by one commit
    Commit(String),
    /// Staged in the index
    Staged,
    /// Modified or untracked in the working tree
    Uncommitted,
}

/// Changed-file queries against one repository.
pub struct GitFilter {
    repo: Repository,
    workdir: PathBuf,
    registry: Arc<LanguageRegistry>,
}

impl GitFilter {
    /// Open the repository containing `path`.
    ///
    /// # Errors
    /// Fails if no repository is found or the repository is bare.
    pub fn open(path: &Path, registry: Arc<LanguageRegistry>) -> Result<Self, git2::Error> {
        let repo = Repository::discover(path)?;
        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| git2::Error::from_str("bare repository has no working directory"))?;
        let workdir = crate::paths::canonicalize(&workdir).unwrap_or(workdir);

        Ok(GitFilter {
            repo,
            workdir,
            registry,
        })
    }

    /// Repository working directory (canonical).
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn files(&self, scope: &GitScope) -> Result<Vec<PathBuf>, git2::Error> {
        match scope {
            GitScope::Since(reference) => self.changed_since(reference),
            GitScope::Commit(sha) => self.changed_in_commit(sha),
            GitScope::Staged => self.staged(),
            GitScope::Uncommitted => self.uncommitted(),
        }
    }

    /// Files that differ between `reference` and the working tree.
    ///
    /// Covers commits made after `reference` as well as staged, unstaged,
    /// and untracked changes.
    pub fn changed_since(&self, reference: &str) -> Result<Vec<PathBuf>, git2::Error> {
        let tree = self.resolve_commit(reference)?.tree()?;
        let mut opts = DiffOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);
        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(Some(&tree), Some(&mut opts))?;
        Ok(self.keep_supported(diff_paths(&diff)))
    }

    /// Files touched by a single commit (compared with its first parent).
    pub fn changed_in_commit(&self, sha: &str) -> Result<Vec<PathBuf>, git2::Error> {
        let commit = self.resolve_commit(sha)?;
        let tree = commit.tree()?;
        let parent_tree = if commit.parent_count() > 0 {
            Some(commit.parent(0)?.tree()?)
        } else {
            None
        };
        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?;
        Ok(self.keep_supported(diff_paths(&diff)))
    }

    /// Files staged in the index relative to HEAD.
    pub fn staged(&self) -> Result<Vec<PathBuf>, git2::Error> {
        let head_tree = match self.repo.head() {
            Ok(head) => Some(head.peel_to_tree()?),
            // No commits yet: everything in the index is staged
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
            Err(e) => return Err(e),
        };
        let diff = self.repo.diff_tree_to_index(head_tree.as_ref(), None, None)?;
        Ok(self.keep_supported(diff_paths(&diff)))
    }

    /// Modified, staged, or untracked files in the working tree.
    pub fn uncommitted(&self) -> Result<Vec<PathBuf>, git2::Error> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut opts))?;

        let paths = statuses
            .iter()
            .filter(|entry| {
                let status = entry.status();
                status != Status::CURRENT && !status.contains(Status::IGNORED)
            })
            .filter_map(|entry| entry.path().map(PathBuf::from))
            .collect();
        Ok(self.keep_supported(paths))
    }

    fn resolve_commit(&self, reference: &str) -> Result<git2::Commit<'_>, git2::Error> {
        self.repo.revparse_single(reference)?.peel_to_commit()
    }

    fn keep_supported(&self, relative: Vec<PathBuf>) -> Vec<PathBuf> {
        let total = relative.len();
        let mut files: Vec<PathBuf> = relative
            .into_iter()
            .map(|rel| self.workdir.join(rel))
            .filter(|path| path.is_file() && self.registry.is_supported(path))
            .collect();
        files.sort();
        files.dedup();
        debug!(changed = total, kept = files.len(), "git filter applied");
        files
    }
}

fn diff_paths(diff: &Diff<'_>) -> Vec<PathBuf> {
    diff.deltas()
        .filter_map(|delta| {
            delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(Path::to_path_buf)
        })
        .collect()
}
