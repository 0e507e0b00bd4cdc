//! Triple data model produced by the parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard RDF namespace (pre-seeded as `rdf:`)
pub const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

/// RDFS namespace (pre-seeded as `rdfs:`)
pub const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// XML Schema datatypes (pre-seeded as `xsd:`)
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

/// Code ontology namespace (pre-seeded as `code:`)
pub const CODE_NAMESPACE: &str = "https://linkeddoc.dev/ontology/code#";

/// Expansion of the `a` shorthand
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// Local name of the canonical Module type
pub const MODULE_TYPE: &str = "Module";

/// Object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Object {
    /// Quoted string or bare token
    Literal { value: String },
    /// `<...>` reference or expanded `prefix:local` name
    Uri { value: String },
    /// `[ ... ]` nested predicate-object groups
    BlankNode {
        /// Generated `_:bN` label; the subject of every nested triple
        id: String,
        triples: Vec<Triple>,
    },
}

impl Object {
    pub fn literal(value: impl Into<String>) -> Self {
        Object::Literal {
            value: value.into(),
        }
    }

    pub fn uri(value: impl Into<String>) -> Self {
        Object::Uri {
            value: value.into(),
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Object::Literal { value } => Some(value),
            _ => None,
        }
    }

    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Object::Uri { value } => Some(value),
            _ => None,
        }
    }

    /// Nested triples of a blank node (empty for other kinds).
    pub fn nested(&self) -> &[Triple] {
        match self {
            Object::BlankNode { triples, .. } => triples,
            _ => &[],
        }
    }

    pub fn is_blank_node(&self) -> bool {
        matches!(self, Object::BlankNode { .. })
    }

    /// Term form handed to a triple store: bare URI, quoted literal, or
    /// blank-node label.
    pub fn to_term(&self) -> String {
        match self {
            Object::Literal { value } => quote_literal(value),
            Object::Uri { value } => value.clone(),
            Object::BlankNode { id, .. } => id.clone(),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Literal { value } => write!(f, "{}", quote_literal(value)),
            Object::Uri { value } => write!(f, "<{}>", value),
            Object::BlankNode { triples, .. } => {
                write!(f, "[")?;
                for (i, t) in triples.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ;")?;
                    }
                    write!(f, " <{}> {}", t.predicate, t.object)?;
                }
                write!(f, " ]")
            }
        }
    }
}

/// A Subject-Predicate-Object statement.
///
/// The predicate is always fully expanded; no `prefix:` form survives parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: Object,
}

impl Triple {
    pub fn new(subject: impl Into<String>, predicate: impl Into<String>, object: Object) -> Self {
        Triple {
            subject: subject.into(),
            predicate: predicate.into(),
            object,
        }
    }

    /// Local name of the predicate (namespace-agnostic).
    pub fn predicate_local_name(&self) -> &str {
        local_name(&self.predicate)
    }

    /// Whether this is `<subject> a <...#Module>`.
    pub fn declares_module(&self) -> bool {
        self.predicate == RDF_TYPE
            && self
                .object
                .as_uri()
                .map(|uri| local_name(uri) == MODULE_TYPE)
                .unwrap_or(false)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// Local part of a URI: the text after the last `#`, `/`, or `:`.
pub fn local_name(uri: &str) -> &str {
    match uri.rfind(|c: char| c == '#' || c == '/' || c == ':') {
        Some(idx) if idx + 1 < uri.len() => &uri[idx + 1..],
        _ => uri,
    }
}

fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
