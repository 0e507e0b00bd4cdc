//! Graph traversals over resolved dependency edges.
//!
//! Every traversal is an iterative depth-first search with a visited set
//! keyed by module path, so cyclic graphs terminate and each reachable module
//! is reported once, in discovery order. Modules sharing a declared URI
//! (relative subjects like `<#m>`) are still distinct.

use std::collections::HashSet;

use super::Graph;
use crate::paths::normalize;

impl Graph {
    /// Every module reachable from `path` by following dependencies.
    ///
    /// The start module is only included when a cycle leads back to it:
    /// for A -> B -> A the closure of A is `[B, A]`.
    pub fn transitive_dependencies(&self, path: &str) -> Vec<String> {
        self.reach(&normalize(path), |p| self.resolved_dependencies(p).to_vec())
    }

    /// Every module that reaches `path` by following dependencies.
    pub fn transitive_dependents(&self, path: &str) -> Vec<String> {
        self.reach(&normalize(path), |p| self.dependents(p))
    }

    /// Modules that sit on a dependency cycle through at least one other
    /// module. Self-dependencies alone do not count.
    pub fn cyclic_modules(&self) -> Vec<String> {
        self.modules
            .keys()
            .filter(|path| {
                self.resolved_dependencies(path)
                    .iter()
                    .filter(|target| target != path)
                    .any(|target| {
                        self.reach(target, |p| self.resolved_dependencies(p).to_vec())
                            .iter()
                            .any(|p| p == *path)
                    })
            })
            .cloned()
            .collect()
    }

    fn reach<F>(&self, start: &str, next: F) -> Vec<String>
    where
        F: Fn(&str) -> Vec<String>,
    {
        let mut visited: HashSet<String> = HashSet::new();
        let mut order = Vec::new();
        let mut stack: Vec<String> = next(start).into_iter().rev().collect();

        while let Some(path) = stack.pop() {
            if !visited.insert(path.clone()) {
                continue;
            }
            stack.extend(next(&path).into_iter().rev());
            order.push(path);
        }

        order
    }
}
