//! LinkedDoc: turn metadata embedded in source comments into a module graph.
//!
//! Source files may carry one block of triples between the markers
//! `<!-- LinkedDoc RDF -->` and `<!-- End LinkedDoc RDF -->`, usually inside
//! the host language's comments. The ingestion pipeline has three stages:
//!
//! 1. [`Scanner`] walks a tree, prunes ignored directories, classifies files,
//!    and flags the ones carrying a block.
//! 2. [`parser`] extracts a block and parses its constrained grammar into
//!    [`Triple`]s.
//! 3. [`GraphBuilder`] forwards triples to a [`TripleStore`], synthesizes one
//!    [`Module`] per declaring file, and links dependencies in both
//!    directions.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use linkeddoc::{BuildOptions, GraphBuilder, MemoryStore};
//!
//! let builder = GraphBuilder::new(Arc::new(MemoryStore::new()));
//! let graph = builder.build(Path::new("."), &BuildOptions::default())?;
//! for path in graph.transitive_dependencies("cmd/main.go") {
//!     println!("{path}");
//! }
//! # Ok::<(), linkeddoc::BuildError>(())
//! ```
//!
//! # Error handling
//!
//! Per-file problems (I/O, grammar, store rejections) are collected as
//! [`ErrorRecord`]s and never stop a run unless [`ErrorPolicy`] says so.

pub mod diagnostics;
pub mod error;
pub mod error_codes;
pub mod graph;
pub mod output;
pub mod parser;
pub mod paths;
pub mod scan;
pub mod store;
pub mod version;

pub use diagnostics::{ErrorCollector, ErrorRecord, ErrorStage, SkipReason};
pub use error::{AbortReason, BuildError, ErrorPolicy, ScanError};
pub use graph::{
    BuildOptions, Graph, GraphBuilder, GraphValidator, Module, PredicateTable, Statistics,
    UnresolvedDependency, ValidationReport, Validator,
};
pub use output::{generate_execution_id, output_json, JsonResponse, OutputFormat};
pub use parser::{extract_block, parse, parse_source, GrammarError, Object, Parser, Triple};
pub use scan::{
    FileRecord, FocusFilter, GitFilter, GitScope, IgnoreRuleSet, Inventory, LanguageRegistry,
    Sampler, SamplingStrategy, ScanOptions, ScanStats, Scanner,
};
pub use store::{MemoryStore, StoreError, TripleStore};
