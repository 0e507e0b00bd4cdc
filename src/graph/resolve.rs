//! Dependency reference resolution.
//!
//! Declared values are resolved in pass 1 ([`resolve_declared`]); pass 2
//! ([`link`]) matches each reference to a concrete module and fills in the
//! reverse edges.

use std::collections::BTreeMap;
use tracing::warn;

use super::{Module, UnresolvedDependency};
use crate::paths::{join_relative, normalize};

/// Resolve a declared dependency value against the declaring module's key.
///
/// Values starting with `./` or containing `..` are joined to the module's
/// directory and normalized. Everything else is kept as written.
pub fn resolve_declared(declaring_key: &str, value: &str) -> String {
    if value.starts_with("./") || value.contains("..") {
        join_relative(declaring_key, value)
    } else {
        value.to_string()
    }
}

/// Matches references against a module map.
///
/// Strategies run in a fixed order and the first hit wins:
/// 1. exact path key
/// 2. declared URI
/// 3. module name
/// 4. path suffix at a `/` boundary, in either direction
///
/// Within a strategy modules are tried in sorted path order.
pub struct ReferenceResolver<'a> {
    modules: &'a BTreeMap<String, Module>,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(modules: &'a BTreeMap<String, Module>) -> Self {
        ReferenceResolver { modules }
    }

    /// Path key of the module `reference` names, if any.
    pub fn resolve(&self, reference: &str) -> Option<&'a str> {
        let key = normalize(reference);
        if let Some((path, _)) = self.modules.get_key_value(key.as_str()) {
            return Some(path.as_str());
        }

        let by = |pred: &dyn Fn(&Module) -> bool| {
            self.modules
                .values()
                .find(|m| pred(m))
                .map(|m| m.path.as_str())
        };

        by(&|m| m.uri == reference)
            .or_else(|| by(&|m| !m.name.is_empty() && m.name == reference))
            .or_else(|| by(&|m| suffix_match(&m.path, &key)))
    }
}

fn suffix_match(path: &str, reference: &str) -> bool {
    if reference.is_empty() || reference.starts_with("..") {
        return false;
    }
    ends_at_boundary(path, reference) || ends_at_boundary(reference, path)
}

fn ends_at_boundary(long: &str, short: &str) -> bool {
    long.len() > short.len()
        && long.ends_with(short)
        && long.as_bytes()[long.len() - short.len() - 1] == b'/'
}

/// Pass 2: resolve every declared dependency and record reverse edges.
///
/// Returns the resolved forward edges (module path -> target paths) and the
/// references nothing matched.
pub fn link(
    modules: &mut BTreeMap<String, Module>,
) -> (BTreeMap<String, Vec<String>>, Vec<UnresolvedDependency>) {
    let mut edges: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut unresolved = Vec::new();

    {
        let resolver = ReferenceResolver::new(modules);
        for (path, module) in modules.iter() {
            for reference in &module.dependencies {
                match resolver.resolve(reference) {
                    Some(target) => {
                        let targets = edges.entry(path.clone()).or_default();
                        if !targets.iter().any(|t| t == target) {
                            targets.push(target.to_string());
                        }
                    }
                    None => {
                        warn!(module = %path, reference = %reference, "unresolved dependency");
                        unresolved.push(UnresolvedDependency {
                            module: path.clone(),
                            reference: reference.clone(),
                        });
                    }
                }
            }
        }
    }

    for (source, targets) in &edges {
        for target in targets {
            if let Some(module) = modules.get_mut(target) {
                if !module.dependents.contains(source) {
                    module.dependents.push(source.clone());
                }
            }
        }
    }

    (edges, unresolved)
}
