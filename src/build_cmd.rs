//! Build command implementation

use anyhow::Result;
use linkeddoc::output::BuildResponse;
use linkeddoc::{
    generate_execution_id, output_json, BuildError, BuildOptions, Graph, GraphBuilder,
    JsonResponse, MemoryStore, OutputFormat,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Build a graph, keeping the partial graph of an aborted or invalid build.
///
/// The second value is the failure message in that case.
pub fn build_graph(root: &Path, options: &BuildOptions) -> Result<(Graph, Option<String>)> {
    let builder = GraphBuilder::new(Arc::new(MemoryStore::new()));
    match builder.build(root, options) {
        Ok(graph) => Ok((graph, None)),
        Err(err) => {
            let message = err.to_string();
            match err {
                BuildError::Aborted { graph, .. } | BuildError::Validation { graph, .. } => {
                    Ok((*graph, Some(message)))
                }
                BuildError::Scan(e) => {
                    Err(anyhow::Error::new(e).context(format!("scanning {}", root.display())))
                }
            }
        }
    }
}

/// Returns 0 on success, 2 when the build aborted or failed validation.
pub fn run_build(root: PathBuf, options: BuildOptions, output_format: OutputFormat) -> Result<u8> {
    let (graph, failure) = build_graph(&root, &options)?;

    match output_format {
        OutputFormat::Json => {
            let response = BuildResponse {
                root: graph.root.to_string_lossy().to_string(),
                modules: graph.modules.values().cloned().collect(),
                stats: graph.stats.clone(),
                unresolved: graph.unresolved.clone(),
                errors: graph.errors.records(),
                validation: graph.validation.clone(),
            };
            let mut json_response = JsonResponse::new(response, &generate_execution_id());
            if failure.is_some() {
                json_response = json_response.with_partial(true);
            }
            output_json(&json_response)?;
        }
        OutputFormat::Human => print_graph(&graph),
    }

    if let Some(message) = failure {
        eprintln!("{}", message);
        return Ok(2);
    }
    Ok(0)
}

fn print_graph(graph: &Graph) {
    let stats = &graph.stats;
    println!("Graph: {}", graph.root.display());
    println!("  modules:       {}", stats.total_modules);
    println!("  triples:       {}", stats.total_triples);
    println!("  relationships: {}", stats.total_relationships);
    println!("  unresolved:    {}", graph.unresolved.len());
    println!("  errors:        {}", graph.errors.len());
    if !stats.by_language.is_empty() {
        println!("  by language:   {}", histogram(&stats.by_language));
    }
    if !stats.by_layer.is_empty() {
        println!("  by layer:      {}", histogram(&stats.by_layer));
    }
    println!(
        "  scanned {} files ({} with metadata) in {} ms, built in {} ms",
        stats.files_scanned,
        stats.files_with_metadata,
        stats.scan_duration.as_millis(),
        stats.build_duration.as_millis()
    );

    if !graph.modules.is_empty() {
        println!();
        println!("Modules:");
        for module in graph.modules.values() {
            println!("  {} ({})", module.path, module.name);
            for dep in &module.dependencies {
                println!("    -> {}", dep);
            }
        }
    }

    if !graph.errors.is_empty() {
        eprintln!("{}", graph.errors.summary());
    }
}

fn histogram(counts: &std::collections::BTreeMap<String, usize>) -> String {
    counts
        .iter()
        .map(|(key, count)| format!("{}={}", key, count))
        .collect::<Vec<_>>()
        .join(", ")
}
