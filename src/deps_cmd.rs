//! Deps command implementation

use anyhow::Result;
use linkeddoc::output::DepsResponse;
use linkeddoc::paths::{canonicalize, relative_key};
use linkeddoc::{
    generate_execution_id, output_json, BuildOptions, JsonResponse, OutputFormat, ScanOptions,
};
use std::path::{Path, PathBuf};

use crate::build_cmd::build_graph;

pub fn run_deps(
    root: PathBuf,
    file: String,
    reverse: bool,
    transitive: bool,
    options: ScanOptions,
    output_format: OutputFormat,
) -> Result<u8> {
    let (graph, failure) = build_graph(&root, &BuildOptions::default().with_scan(options))?;
    if let Some(message) = &failure {
        eprintln!("Warning: using partial graph: {}", message);
    }

    // Absolute paths are turned into root-relative keys.
    let key = if Path::new(&file).is_absolute() {
        let absolute = canonicalize(Path::new(&file)).unwrap_or_else(|| PathBuf::from(&file));
        relative_key(&graph.root, &absolute)
    } else {
        file.clone()
    };

    let paths = match (reverse, transitive) {
        (false, false) => graph.dependencies(&key),
        (true, false) => graph.dependents(&key),
        (false, true) => graph.transitive_dependencies(&key),
        (true, true) => graph.transitive_dependents(&key),
    };
    let direction = if reverse { "dependents" } else { "dependencies" };

    match output_format {
        OutputFormat::Json => {
            let response = DepsResponse {
                file: key,
                direction: direction.to_string(),
                transitive,
                paths,
            };
            output_json(&JsonResponse::new(response, &generate_execution_id()))?;
        }
        OutputFormat::Human => {
            let scope = if transitive { "transitive " } else { "" };
            println!("{}{} of {} ({}):", scope, direction, key, paths.len());
            for path in &paths {
                println!("  {}", path);
            }
        }
    }
    Ok(0)
}
