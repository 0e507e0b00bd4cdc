//! Declarative predicate -> Module field mapping.
//!
//! Predicates are matched by local name only, so `code:name`,
//! `<http://other.org/vocab#name>` and `schema:name` all set the name.

use std::collections::HashMap;

use super::resolve::resolve_declared;
use super::Module;
use crate::parser::{Object, Triple};

/// Writes one value into a module field.
pub type FieldSetter = fn(&mut Module, String);

/// Setter plus whether relative values are resolved against the module's
/// directory before being stored.
#[derive(Debug, Clone, Copy)]
pub struct PredicateBinding {
    pub setter: FieldSetter,
    pub resolves_paths: bool,
}

/// Local name -> binding. Anything without a binding goes to the module's
/// property bag.
#[derive(Debug, Clone)]
pub struct PredicateTable {
    bindings: HashMap<String, PredicateBinding>,
}

impl Default for PredicateTable {
    fn default() -> Self {
        let mut table = PredicateTable::empty();
        table.register("name", set_name, false);
        for local in ["description", "comment"] {
            table.register(local, set_description, false);
        }
        table.register("language", set_language, false);
        table.register("layer", set_layer, false);
        for local in ["tag", "tags"] {
            table.register(local, add_tag, false);
        }
        for local in ["linksTo", "dependsOn", "imports", "dependency", "requires"] {
            table.register(local, add_dependency, true);
        }
        for local in ["exports", "export", "provides"] {
            table.register(local, add_export, false);
        }
        for local in ["calls", "invokes"] {
            table.register(local, add_call, false);
        }
        table
    }
}

impl PredicateTable {
    /// Table with no bindings; every predicate lands in the property bag.
    pub fn empty() -> Self {
        PredicateTable {
            bindings: HashMap::new(),
        }
    }

    /// Bind `local_name`, replacing any previous binding.
    pub fn register(&mut self, local_name: &str, setter: FieldSetter, resolves_paths: bool) {
        self.bindings.insert(
            local_name.to_string(),
            PredicateBinding {
                setter,
                resolves_paths,
            },
        );
    }

    pub fn lookup(&self, local_name: &str) -> Option<&PredicateBinding> {
        self.bindings.get(local_name)
    }

    /// Apply one triple about `module`'s subject.
    ///
    /// The type triple is not a field and is skipped.
    pub fn apply(&self, module: &mut Module, triple: &Triple) {
        if triple.declares_module() {
            return;
        }
        let local = triple.predicate_local_name();
        let value = field_value(&triple.object);

        match self.lookup(local) {
            Some(binding) => {
                let value = if binding.resolves_paths {
                    resolve_declared(&module.path, &value)
                } else {
                    value
                };
                (binding.setter)(module, value);
            }
            None => module
                .properties
                .entry(local.to_string())
                .or_default()
                .push(value),
        }
    }
}

/// Flatten an object into a field value.
///
/// A blank node contributes its inner `path`, then its inner `name`, and
/// failing both its label.
fn field_value(object: &Object) -> String {
    match object {
        Object::Literal { value } | Object::Uri { value } => value.clone(),
        Object::BlankNode { id, triples } => ["path", "name"]
            .iter()
            .find_map(|wanted| {
                triples
                    .iter()
                    .find(|t| t.predicate_local_name() == *wanted)
                    .map(|t| field_value(&t.object))
            })
            .unwrap_or_else(|| id.clone()),
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

fn set_name(module: &mut Module, value: String) {
    module.name = value;
}

fn set_description(module: &mut Module, value: String) {
    module.description = value;
}

fn set_language(module: &mut Module, value: String) {
    module.language = value;
}

fn set_layer(module: &mut Module, value: String) {
    module.layer = value;
}

fn add_tag(module: &mut Module, value: String) {
    module.tags.insert(value);
}

fn add_dependency(module: &mut Module, value: String) {
    push_unique(&mut module.dependencies, value);
}

fn add_export(module: &mut Module, value: String) {
    push_unique(&mut module.exports, value);
}

fn add_call(module: &mut Module, value: String) {
    push_unique(&mut module.calls, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{CODE_NAMESPACE, RDF_TYPE};

    fn code(local: &str) -> String {
        format!("{CODE_NAMESPACE}{local}")
    }

    fn apply_all(path: &str, triples: &[Triple]) -> Module {
        let table = PredicateTable::default();
        let mut module = Module::new(path, "#m");
        for t in triples {
            table.apply(&mut module, t);
        }
        module
    }

    #[test]
    fn test_known_fields_are_set() {
        let m = apply_all(
            "svc/api.go",
            &[
                Triple::new("#m", RDF_TYPE, Object::uri(code("Module"))),
                Triple::new("#m", code("name"), Object::literal("api")),
                Triple::new("#m", "http://www.w3.org/2000/01/rdf-schema#comment", Object::literal("HTTP API")),
                Triple::new("#m", code("layer"), Object::literal("service")),
                Triple::new("#m", code("tag"), Object::literal("http")),
                Triple::new("#m", code("tag"), Object::literal("http")),
                Triple::new("#m", code("exports"), Object::literal("Serve")),
                Triple::new("#m", code("calls"), Object::literal("db.Open")),
            ],
        );
        assert_eq!(m.name, "api");
        assert_eq!(m.description, "HTTP API");
        assert_eq!(m.layer, "service");
        assert_eq!(m.tags.len(), 1);
        assert_eq!(m.exports, vec!["Serve"]);
        assert_eq!(m.calls, vec!["db.Open"]);
        assert!(m.properties.is_empty());
    }

    #[test]
    fn test_dependency_paths_resolve_against_module_dir() {
        let m = apply_all(
            "pkg/a/a.go",
            &[
                Triple::new("#m", code("linksTo"), Object::uri("../x.go")),
                Triple::new("#m", "http://other.org/ns#dependsOn", Object::uri("./util.go")),
                Triple::new("#m", code("imports"), Object::literal("fmt")),
                Triple::new("#m", code("requires"), Object::uri("../x.go")),
            ],
        );
        assert_eq!(m.dependencies, vec!["pkg/x.go", "pkg/a/util.go", "fmt"]);
    }

    #[test]
    fn test_blank_node_value_prefers_path() {
        let node = Object::BlankNode {
            id: "_:b0".to_string(),
            triples: vec![
                Triple::new("_:b0", code("name"), Object::literal("auth")),
                Triple::new("_:b0", code("path"), Object::literal("../auth.go")),
            ],
        };
        let m = apply_all("svc/t.go", &[Triple::new("#t", code("linksTo"), node)]);
        assert_eq!(m.dependencies, vec!["auth.go"]);

        let named = Object::BlankNode {
            id: "_:b1".to_string(),
            triples: vec![Triple::new("_:b1", code("name"), Object::literal("Run"))],
        };
        let m = apply_all("t.go", &[Triple::new("#t", code("exports"), named)]);
        assert_eq!(m.exports, vec!["Run"]);
    }

    #[test]
    fn test_unknown_predicates_land_in_property_bag() {
        let m = apply_all(
            "t.go",
            &[
                Triple::new("#t", code("owner"), Object::literal("team-a")),
                Triple::new("#t", code("owner"), Object::literal("team-b")),
            ],
        );
        assert_eq!(m.properties["owner"], vec!["team-a", "team-b"]);
    }

    #[test]
    fn test_registered_binding_overrides_default() {
        fn set_layer_upper(module: &mut Module, value: String) {
            module.layer = value.to_uppercase();
        }
        let mut table = PredicateTable::default();
        table.register("tier", set_layer_upper, false);
        let mut m = Module::new("t.go", "#t");
        table.apply(&mut m, &Triple::new("#t", code("tier"), Object::literal("core")));
        assert_eq!(m.layer, "CORE");
        assert!(PredicateTable::empty().lookup("name").is_none());
    }
}
