//! Parse command implementation

use anyhow::{Context, Result};
use linkeddoc::output::ParseResponse;
use linkeddoc::parser::{has_block, parse_source};
use linkeddoc::{generate_execution_id, output_json, JsonResponse, OutputFormat};
use std::fs;
use std::path::PathBuf;

pub fn run_parse(file: PathBuf, output_format: OutputFormat) -> Result<u8> {
    let raw = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
    let text = String::from_utf8_lossy(&raw);
    let triples =
        parse_source(&text).with_context(|| format!("parsing {}", file.display()))?;

    match output_format {
        OutputFormat::Json => {
            let response = ParseResponse {
                file: file.to_string_lossy().to_string(),
                has_block: has_block(&raw),
                triples,
            };
            output_json(&JsonResponse::new(response, &generate_execution_id()))?;
        }
        OutputFormat::Human => {
            if triples.is_empty() {
                println!("{}: no metadata", file.display());
            }
            for triple in &triples {
                println!("{}", triple);
            }
        }
    }
    Ok(0)
}
