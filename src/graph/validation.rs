//! Graph validation.
//!
//! A [`Validator`] inspects a finished graph and returns errors and warnings.
//! Errors fail a build that asked for validation; warnings are advisory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Graph;
use crate::error_codes::{
    LD_VAL_001_DUPLICATE_URI, LD_VAL_101_UNRESOLVED_DEPENDENCY, LD_VAL_102_SELF_DEPENDENCY,
    LD_VAL_103_DEPENDENCY_CYCLE,
};

/// Report of validation results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether validation passed (no errors)
    pub passed: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Total number of issues found (errors + warnings)
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    pub fn is_clean(&self) -> bool {
        self.total_issues() == 0
    }

    pub fn clean() -> Self {
        ValidationReport {
            passed: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn with_errors(errors: Vec<ValidationError>) -> Self {
        ValidationReport {
            passed: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<ValidationWarning>) -> Self {
        self.warnings = warnings;
        self.passed = self.errors.is_empty();
        self
    }
}

/// A validation error with structured data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Stable `LD-VAL-*` code
    pub code: String,
    pub message: String,
    /// Module path the problem is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl ValidationError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            code: code.into(),
            message: message.into(),
            entity_id: None,
            details: serde_json::Value::Null,
        }
    }

    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}

/// Same shape as [`ValidationError`], for non-fatal findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl ValidationWarning {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationWarning {
            code: code.into(),
            message: message.into(),
            entity_id: None,
            details: serde_json::Value::Null,
        }
    }

    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}

/// Checks a built graph.
pub trait Validator: Send + Sync {
    fn validate(&self, graph: &Graph) -> ValidationReport;
}

/// Built-in consistency checks.
///
/// Errors: duplicate module URIs. Warnings: unresolved dependencies,
/// self-dependencies, and modules on a dependency cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphValidator;

impl Validator for GraphValidator {
    fn validate(&self, graph: &Graph) -> ValidationReport {
        let mut errors = check_duplicate_uris(graph);
        let mut warnings = check_unresolved(graph);
        warnings.extend(check_self_dependencies(graph));
        warnings.extend(check_cycles(graph));

        // Sort deterministically by code for consistent output
        errors.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.message.cmp(&b.message)));
        warnings.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.message.cmp(&b.message)));

        ValidationReport::with_errors(errors).with_warnings(warnings)
    }
}

fn check_duplicate_uris(graph: &Graph) -> Vec<ValidationError> {
    let mut by_uri: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for module in graph.modules.values() {
        by_uri.entry(module.uri.as_str()).or_default().push(module.path.as_str());
    }

    by_uri
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(uri, paths)| {
            ValidationError::new(
                LD_VAL_001_DUPLICATE_URI,
                format!("module URI {} declared by {} files: {}", uri, paths.len(), paths.join(", ")),
            )
            .with_entity_id(paths[0])
            .with_details(serde_json::json!({ "uri": uri, "paths": paths }))
        })
        .collect()
}

fn check_unresolved(graph: &Graph) -> Vec<ValidationWarning> {
    graph
        .unresolved
        .iter()
        .map(|u| {
            ValidationWarning::new(
                LD_VAL_101_UNRESOLVED_DEPENDENCY,
                format!("{} depends on unknown module {}", u.module, u.reference),
            )
            .with_entity_id(u.module.as_str())
            .with_details(serde_json::json!({ "reference": u.reference }))
        })
        .collect()
}

fn check_self_dependencies(graph: &Graph) -> Vec<ValidationWarning> {
    graph
        .modules
        .keys()
        .filter(|path| graph.resolved_dependencies(path).iter().any(|t| t == *path))
        .map(|path| {
            ValidationWarning::new(LD_VAL_102_SELF_DEPENDENCY, format!("{} depends on itself", path))
                .with_entity_id(path.as_str())
        })
        .collect()
}

fn check_cycles(graph: &Graph) -> Vec<ValidationWarning> {
    graph
        .cyclic_modules()
        .into_iter()
        .map(|path| {
            ValidationWarning::new(
                LD_VAL_103_DEPENDENCY_CYCLE,
                format!("{} is part of a dependency cycle", path),
            )
            .with_entity_id(path)
        })
        .collect()
}
