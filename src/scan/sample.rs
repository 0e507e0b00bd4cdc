//! Reduce an oversized file list to a target count.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::FileRecord;

/// How to pick the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// Uniform random; the same seed gives the same sample
    Random { seed: u64 },
    /// Proportional per directory, each directory contributing at least one
    Stratified,
    /// Most recently modified first
    RecentFirst,
}

impl SamplingStrategy {
    /// Parse a CLI name (`random`, `stratified`, `recent`).
    pub fn from_name(name: &str, seed: u64) -> Option<Self> {
        match name {
            "random" => Some(SamplingStrategy::Random { seed }),
            "stratified" => Some(SamplingStrategy::Stratified),
            "recent" | "recent-first" => Some(SamplingStrategy::RecentFirst),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    strategy: SamplingStrategy,
}

impl Sampler {
    pub fn new(strategy: SamplingStrategy) -> Self {
        Sampler { strategy }
    }

    /// Return at most `target` records. Lists already within the target are
    /// returned unchanged.
    pub fn sample(&self, files: Vec<FileRecord>, target: usize) -> Vec<FileRecord> {
        if files.len() <= target {
            return files;
        }
        match self.strategy {
            SamplingStrategy::Random { seed } => random(files, target, seed),
            SamplingStrategy::Stratified => stratified(files, target),
            SamplingStrategy::RecentFirst => recent_first(files, target),
        }
    }
}

fn random(files: Vec<FileRecord>, target: usize, seed: u64) -> Vec<FileRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = rand::seq::index::sample(&mut rng, files.len(), target).into_vec();
    picked.sort_unstable();

    let mut picked = picked.into_iter().peekable();
    files
        .into_iter()
        .enumerate()
        .filter_map(|(idx, file)| {
            if picked.peek() == Some(&idx) {
                picked.next();
                Some(file)
            } else {
                None
            }
        })
        .collect()
}

fn stratified(files: Vec<FileRecord>, target: usize) -> Vec<FileRecord> {
    let total = files.len();
    let mut by_dir: BTreeMap<PathBuf, Vec<FileRecord>> = BTreeMap::new();
    for file in files {
        let dir = file.path.parent().map(Path::to_path_buf).unwrap_or_default();
        by_dir.entry(dir).or_default().push(file);
    }
    for group in by_dir.values_mut() {
        group.sort_by(|a, b| a.path.cmp(&b.path));
    }

    let dir_count = by_dir.len();
    let mut remaining = target;
    let mut sampled = Vec::with_capacity(target);
    let mut leftovers = Vec::new();

    for (idx, (_, mut group)) in by_dir.into_iter().enumerate() {
        let share = if idx + 1 == dir_count {
            remaining
        } else {
            (group.len() * target / total).max(1).min(remaining)
        };
        let take = share.min(group.len());
        let rest = group.split_off(take);
        remaining -= take;
        sampled.extend(group);
        leftovers.extend(rest);
    }

    // The last directory may be too small to absorb the remainder.
    sampled.extend(leftovers.into_iter().take(remaining));
    sampled
}

fn recent_first(mut files: Vec<FileRecord>, target: usize) -> Vec<FileRecord> {
    files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| a.path.cmp(&b.path)));
    files.truncate(target);
    files
}
