//! Scan command implementation

use anyhow::{Context, Result};
use linkeddoc::output::{FocusResponse, ScanResponse, ScannedFile};
use linkeddoc::{
    generate_execution_id, output_json, FocusFilter, JsonResponse, OutputFormat, Sampler,
    ScanError, ScanOptions, Scanner,
};
use std::path::PathBuf;

use crate::cli::SampleArgs;

/// Returns the process exit code: 0 on success, 2 when the scan aborted.
pub fn run_scan(
    root: PathBuf,
    options: ScanOptions,
    focus: Vec<String>,
    sample: Option<SampleArgs>,
    output_format: OutputFormat,
) -> Result<u8> {
    let scanner = Scanner::new();
    let (mut inventory, aborted) = match scanner.scan(&root, &options) {
        Ok(inventory) => (inventory, None),
        Err(ScanError::Aborted { reason, partial }) => (*partial, Some(reason)),
        Err(e) => {
            return Err(anyhow::Error::new(e).context(format!("scanning {}", root.display())))
        }
    };

    let focus_stats = if focus.is_empty() {
        None
    } else {
        let filter = FocusFilter::new(&focus).context("invalid --focus pattern")?;
        let (files, stats) = filter.apply(&inventory.root, std::mem::take(&mut inventory.files));
        inventory.files = files;
        Some(stats)
    };

    let mut sampled_from = None;
    if let Some(sample) = sample {
        if inventory.files.len() > sample.target {
            sampled_from = Some(inventory.files.len());
            let files = std::mem::take(&mut inventory.files);
            inventory.files = Sampler::new(sample.strategy).sample(files, sample.target);
        }
    }

    match output_format {
        OutputFormat::Json => {
            let response = ScanResponse {
                root: inventory.root.to_string_lossy().to_string(),
                files: inventory
                    .files
                    .iter()
                    .map(|f| ScannedFile {
                        path: inventory.relative(f),
                        language: f.language.clone(),
                        size: f.size,
                        has_metadata: f.has_metadata,
                    })
                    .collect(),
                stats: inventory.stats,
                errors: inventory.errors.records(),
                focus: focus_stats.map(FocusResponse::from),
                sampled_from,
                duration_ms: inventory.duration.as_millis() as u64,
            };
            let mut json_response = JsonResponse::new(response, &generate_execution_id());
            if aborted.is_some() {
                json_response = json_response.with_partial(true);
            }
            output_json(&json_response)?;
        }
        OutputFormat::Human => {
            println!("Scan: {}", inventory.root.display());
            for file in &inventory.files {
                let marker = if file.has_metadata { '*' } else { ' ' };
                println!("  {} {} [{}]", marker, inventory.relative(file), file.language);
            }
            println!(
                "{} files ({} with metadata), {} directories pruned, {} errors, {} ms",
                inventory.files.len(),
                inventory.with_metadata().count(),
                inventory.stats.dirs_pruned,
                inventory.errors.len(),
                inventory.duration.as_millis()
            );
            if let Some(stats) = &focus_stats {
                println!("Focus: {}/{} files matched", stats.matched, stats.total);
                for (pattern, count) in &stats.per_pattern {
                    println!("  {}: {}", pattern, count);
                }
            }
            if let Some(total) = sampled_from {
                println!("Sampled {} of {} files", inventory.files.len(), total);
            }
            if inventory.has_errors() {
                eprintln!("{}", inventory.errors.summary());
            }
        }
    }

    if let Some(reason) = aborted {
        eprintln!("Scan aborted: {}", reason);
        return Ok(2);
    }
    Ok(0)
}
