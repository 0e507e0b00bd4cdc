//! Two-pass graph construction.
//!
//! Pass 1 parses every file that carries a metadata block, forwards its
//! triples to the store, and synthesizes at most one [`Module`] per file.
//! Pass 2 resolves dependency references and fills in dependents. Both run
//! on the calling thread over an inventory the scanner already produced.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::fields::PredicateTable;
use super::resolve;
use super::validation::{GraphValidator, Validator};
use super::{Graph, Module, Statistics};
use crate::diagnostics::{ErrorCollector, ErrorRecord, ErrorStage};
use crate::error::BuildError;
use crate::error_codes::{LD_IO_004_READ_FAILED, LD_STO_001_REJECTED};
use crate::parser::{Object, Parser, Triple};
use crate::paths::{file_name, relative_key};
use crate::scan::{FileRecord, Inventory, ScanOptions, Scanner};
use crate::store::TripleStore;

/// Options for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    #[serde(flatten)]
    pub scan: ScanOptions,
    /// Run the validator and fail on its errors
    pub validate: bool,
    /// Show a progress bar during pass 1
    pub progress: bool,
}

impl BuildOptions {
    pub fn with_scan(mut self, scan: ScanOptions) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

/// Builds a [`Graph`] from a source tree.
pub struct GraphBuilder {
    store: Arc<dyn TripleStore>,
    scanner: Scanner,
    parser: Parser,
    predicates: PredicateTable,
    validator: Option<Arc<dyn Validator>>,
}

impl GraphBuilder {
    /// Builder forwarding triples to `store`, with the default scanner,
    /// parser, and predicate table.
    pub fn new(store: Arc<dyn TripleStore>) -> Self {
        GraphBuilder {
            store,
            scanner: Scanner::new(),
            parser: Parser::new(),
            predicates: PredicateTable::default(),
            validator: None,
        }
    }

    pub fn with_scanner(mut self, scanner: Scanner) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn with_parser(mut self, parser: Parser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_predicate_table(mut self, predicates: PredicateTable) -> Self {
        self.predicates = predicates;
        self
    }

    /// Validator used when `validate` is set (default: [`GraphValidator`]).
    pub fn with_validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Scan `root` and build its graph.
    ///
    /// # Errors
    /// - [`BuildError::Scan`] when the scan fails or aborts
    /// - [`BuildError::Aborted`] when the error policy fires during pass 1
    /// - [`BuildError::Validation`] when validation was requested and found
    ///   errors
    ///
    /// The last two carry the graph built so far.
    pub fn build(&self, root: &Path, options: &BuildOptions) -> Result<Graph, BuildError> {
        let inventory = self.scanner.scan(root, &options.scan)?;
        self.build_from_inventory(inventory, options)
    }

    /// Build from an inventory that was already scanned.
    pub fn build_from_inventory(
        &self,
        inventory: Inventory,
        options: &BuildOptions,
    ) -> Result<Graph, BuildError> {
        let started = Instant::now();
        let policy = options.scan.policy();
        let Inventory {
            root,
            files,
            errors,
            duration: scan_duration,
            ..
        } = inventory;

        let candidates: Vec<&FileRecord> = files.iter().filter(|f| f.has_metadata).collect();
        let bar = progress_bar(candidates.len(), options.progress);

        // Pass 1: ingestion
        let mut modules: BTreeMap<String, Module> = BTreeMap::new();
        let mut abort = None;
        'files: for record in &candidates {
            let key = relative_key(&root, &record.path);
            bar.set_message(key.clone());

            for failure in self.ingest(record, &key, &mut modules) {
                debug!(error = %failure, "ingestion error");
                let count = errors.push(failure.clone());
                if let Some(reason) = policy.check(&failure, count) {
                    abort = Some(reason);
                    break 'files;
                }
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        // Pass 2: derived relationships
        let (edges, unresolved) = resolve::link(&mut modules);

        let stats = statistics(
            &modules,
            self.store.count(),
            files.len(),
            candidates.len(),
            scan_duration,
            started,
        );
        let mut graph = Graph {
            root,
            modules,
            stats,
            unresolved,
            errors,
            validation: None,
            edges,
            store: Arc::clone(&self.store),
        };

        if let Some(reason) = abort {
            warn!(reason = %reason, modules = graph.len(), "build aborted");
            return Err(BuildError::Aborted {
                reason,
                graph: Box::new(graph),
            });
        }

        if options.validate {
            let report = match &self.validator {
                Some(validator) => validator.validate(&graph),
                None => GraphValidator.validate(&graph),
            };
            for warning in &report.warnings {
                warn!(code = %warning.code, "{}", warning.message);
            }
            graph.validation = Some(report.clone());
            if !report.errors.is_empty() {
                return Err(BuildError::Validation {
                    graph: Box::new(graph),
                    report,
                });
            }
        }

        info!(
            root = %graph.root.display(),
            modules = graph.stats.total_modules,
            triples = graph.stats.total_triples,
            relationships = graph.stats.total_relationships,
            unresolved = graph.unresolved.len(),
            errors = graph.errors.len(),
            duration_ms = graph.stats.build_duration.as_millis() as u64,
            "graph built"
        );
        Ok(graph)
    }

    /// Parse one file, forward its triples, and add its module.
    ///
    /// Returns the file's errors; a read or parse error stops the file.
    fn ingest(
        &self,
        record: &FileRecord,
        key: &str,
        modules: &mut BTreeMap<String, Module>,
    ) -> Vec<ErrorRecord> {
        let raw = match fs::read(&record.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                return vec![ErrorRecord::new(
                    &record.path,
                    ErrorStage::Read,
                    LD_IO_004_READ_FAILED,
                    "cannot read file",
                )
                .with_cause(e)]
            }
        };
        let text = String::from_utf8_lossy(&raw);

        let triples = match self.parser.parse_source(&text) {
            Ok(triples) => triples,
            Err(e) => {
                let mut failure =
                    ErrorRecord::new(&record.path, ErrorStage::Parse, e.code(), e.to_string());
                if let Some(line) = e.line() {
                    failure = failure.with_line(line);
                }
                return vec![failure];
            }
        };

        let mut failures = Vec::new();
        for triple in &triples {
            self.forward(triple, key, &record.path, &mut failures);
        }

        if let Some(module) = self.synthesize(record, key, &triples) {
            modules.insert(key.to_string(), module);
        }
        failures
    }

    /// Store a triple, then its blank-node children.
    ///
    /// Blank-node labels restart at `_:b0` in every file, so they are scoped
    /// by the module key before reaching the shared store.
    fn forward(&self, triple: &Triple, key: &str, path: &Path, failures: &mut Vec<ErrorRecord>) {
        let subject = scope_blank_label(&triple.subject, key);
        let object = match &triple.object {
            Object::Literal { .. } => triple.object.to_term(),
            other => scope_blank_label(&other.to_term(), key),
        };
        if let Err(e) = self.store.add(&subject, &triple.predicate, &object) {
            failures.push(
                ErrorRecord::new(path, ErrorStage::Store, LD_STO_001_REJECTED, format!("triple not stored: {}", triple))
                    .with_cause(e),
            );
        }
        for nested in triple.object.nested() {
            self.forward(nested, key, path, failures);
        }
    }

    fn synthesize(&self, record: &FileRecord, key: &str, triples: &[Triple]) -> Option<Module> {
        let mut subjects = triples
            .iter()
            .filter(|t| t.declares_module())
            .map(|t| t.subject.as_str());
        let Some(subject) = subjects.next() else {
            debug!(path = %key, "metadata block declares no module");
            return None;
        };
        if let Some(other) = subjects.find(|s| *s != subject) {
            warn!(path = %key, kept = %subject, ignored = %other, "file declares more than one module");
        }

        let mut module = Module::new(key, subject);
        for triple in triples.iter().filter(|t| t.subject == subject) {
            self.predicates.apply(&mut module, triple);
        }
        if module.language.is_empty() {
            module.language = record.language.clone();
        }
        if module.name.is_empty() {
            module.name = file_name(key).to_string();
        }
        Some(module)
    }
}

/// `_:b0` in `pkg/a.go` becomes `_:pkg/a.go#b0`; other terms pass through.
fn scope_blank_label(term: &str, key: &str) -> String {
    match term.strip_prefix("_:") {
        Some(label) => format!("_:{key}#{label}"),
        None => term.to_string(),
    }
}

fn progress_bar(len: usize, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}") {
        bar.set_style(style);
    }
    bar
}

fn statistics(
    modules: &BTreeMap<String, Module>,
    total_triples: usize,
    files_scanned: usize,
    files_with_metadata: usize,
    scan_duration: std::time::Duration,
    started: Instant,
) -> Statistics {
    let mut stats = Statistics {
        total_modules: modules.len(),
        total_triples,
        files_scanned,
        files_with_metadata,
        scan_duration,
        ..Default::default()
    };
    for module in modules.values() {
        stats.total_relationships += module.dependencies.len() + module.calls.len();
        *stats.by_language.entry(module.language.clone()).or_default() += 1;
        if !module.layer.is_empty() {
            *stats.by_layer.entry(module.layer.clone()).or_default() += 1;
        }
    }
    stats.build_duration = started.elapsed();
    stats
}
