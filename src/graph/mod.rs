//! Module-centric dependency graph built from parsed metadata.
//!
//! One [`Module`] per source file that declares `<subject> a code:Module`,
//! keyed by its root-relative path. A [`Graph`] is built fresh by each
//! [`GraphBuilder::build`] call and is not meant to be mutated afterwards.

mod algorithms;
mod builder;
pub mod fields;
pub mod resolve;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::diagnostics::ErrorCollector;
use crate::paths::normalize;
use crate::store::TripleStore;

pub use builder::{BuildOptions, GraphBuilder};
pub use fields::{FieldSetter, PredicateTable};
pub use validation::{GraphValidator, ValidationReport, Validator};

/// Entity synthesized from the triples about one file's module subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Root-relative path (the map key)
    pub path: String,
    /// Declared subject URI
    pub uri: String,
    pub name: String,
    pub description: String,
    pub language: String,
    pub layer: String,
    pub tags: BTreeSet<String>,
    /// Declared dependency references, path-resolved where relative
    pub dependencies: Vec<String>,
    /// Modules that depend on this one; filled by the second build pass
    pub dependents: Vec<String>,
    pub exports: Vec<String>,
    pub calls: Vec<String>,
    /// Unrecognized predicates by local name
    pub properties: BTreeMap<String, Vec<String>>,
}

impl Module {
    pub fn new(path: impl Into<String>, uri: impl Into<String>) -> Self {
        Module {
            path: path.into(),
            uri: uri.into(),
            ..Default::default()
        }
    }
}

/// A dependency reference that matched no module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedDependency {
    /// Path of the declaring module
    pub module: String,
    pub reference: String,
}

/// Aggregate numbers computed once at the end of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_modules: usize,
    /// As reported by the triple store
    pub total_triples: usize,
    /// Dependency plus call edges
    pub total_relationships: usize,
    pub by_language: BTreeMap<String, usize>,
    pub by_layer: BTreeMap<String, usize>,
    pub files_scanned: usize,
    pub files_with_metadata: usize,
    pub scan_duration: Duration,
    pub build_duration: Duration,
}

/// Result of a build.
#[derive(Clone, Serialize)]
pub struct Graph {
    pub root: PathBuf,
    pub modules: BTreeMap<String, Module>,
    pub stats: Statistics,
    /// References pass 2 could not match
    pub unresolved: Vec<UnresolvedDependency>,
    /// Scan errors plus read/parse/store errors from ingestion
    pub errors: ErrorCollector,
    /// Report of the validator, when validation ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
    /// Resolved forward edges: module path -> target module paths
    #[serde(skip)]
    edges: BTreeMap<String, Vec<String>>,
    #[serde(skip)]
    store: Arc<dyn TripleStore>,
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("root", &self.root)
            .field("modules", &self.modules.len())
            .field("stats", &self.stats)
            .field("unresolved", &self.unresolved.len())
            .field("errors", &self.errors.len())
            .finish()
    }
}

impl Graph {
    pub fn module(&self, path: &str) -> Option<&Module> {
        self.modules.get(path)
    }

    pub fn module_by_uri(&self, uri: &str) -> Option<&Module> {
        self.modules.values().find(|m| m.uri == uri)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// The triple store every parsed triple was forwarded to.
    pub fn store(&self) -> &Arc<dyn TripleStore> {
        &self.store
    }

    /// Declared dependencies of the module at `path` (empty if none).
    pub fn dependencies(&self, path: &str) -> Vec<String> {
        self.modules
            .get(&normalize(path))
            .map(|m| m.dependencies.clone())
            .unwrap_or_default()
    }

    /// Modules depending on `path`.
    ///
    /// For a module this is its computed dependents list. A path without a
    /// module (a file with no metadata block) still has dependents: every
    /// module whose declared dependencies name it.
    pub fn dependents(&self, path: &str) -> Vec<String> {
        let key = normalize(path);
        if let Some(module) = self.modules.get(&key) {
            return module.dependents.clone();
        }
        self.modules
            .values()
            .filter(|m| m.dependencies.iter().any(|d| *d == key))
            .map(|m| m.path.clone())
            .collect()
    }

    /// Resolved module targets of the module at `path`.
    pub fn resolved_dependencies(&self, path: &str) -> &[String] {
        self.edges.get(&normalize(path)).map(Vec::as_slice).unwrap_or(&[])
    }
}
