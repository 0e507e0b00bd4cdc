//! Metadata block extraction and parsing.
//!
//! A source file carries at most one metadata block, delimited by
//! [`START_MARKER`] and [`END_MARKER`] and usually sitting inside the host
//! language's comment syntax. [`extract_block`] finds it and [`parse`] turns
//! its text into an ordered list of [`Triple`]s.

pub mod error;
mod grammar;
pub mod triple;

pub use error::GrammarError;
pub use grammar::MAX_BLANK_DEPTH;
pub use triple::{
    local_name, Object, Triple, CODE_NAMESPACE, MODULE_TYPE, RDFS_NAMESPACE, RDF_NAMESPACE,
    RDF_TYPE, XSD_NAMESPACE,
};

/// Literal text opening a metadata block.
pub const START_MARKER: &str = "<!-- LinkedDoc RDF -->";

/// Literal text closing a metadata block.
pub const END_MARKER: &str = "<!-- End LinkedDoc RDF -->";

/// Whether raw file content contains the start marker.
///
/// This is the Scanner's cheap presence check; it does not validate the block.
pub fn has_block(raw: &[u8]) -> bool {
    let marker = START_MARKER.as_bytes();
    raw.windows(marker.len()).any(|w| w == marker)
}

/// Block text plus the file line its first line sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub text: &'a str,
    pub first_line: usize,
}

/// Locate the block in `raw`, keeping track of where it starts.
pub fn locate_block(raw: &str) -> Result<Option<Block<'_>>, GrammarError> {
    let Some(start) = raw.find(START_MARKER) else {
        return Ok(None);
    };
    let inner_start = start + START_MARKER.len();

    let Some(len) = raw[inner_start..].find(END_MARKER) else {
        return Err(GrammarError::BlockNotClosed {
            line: line_of(raw, start),
        });
    };

    let inner = &raw[inner_start..inner_start + len];
    let leading = inner.len() - inner.trim_start().len();
    Ok(Some(Block {
        text: inner.trim(),
        first_line: line_of(raw, inner_start + leading),
    }))
}

/// Trimmed text strictly between the markers.
///
/// Returns `Ok(None)` when there is no start marker; a missing end marker is
/// a [`GrammarError::BlockNotClosed`].
pub fn extract_block(raw: &str) -> Result<Option<&str>, GrammarError> {
    Ok(locate_block(raw)?.map(|block| block.text))
}

/// Parse block text with the default prefixes.
pub fn parse(block: &str) -> Result<Vec<Triple>, GrammarError> {
    Parser::new().parse(block)
}

/// Extract and parse the block of a whole file.
///
/// Error line numbers refer to the file. No block yields no triples.
pub fn parse_source(raw: &str) -> Result<Vec<Triple>, GrammarError> {
    Parser::new().parse_source(raw)
}

/// Parser with a configurable set of pre-seeded prefixes.
///
/// Prefixes declared inside a block only live for that parse call.
#[derive(Debug, Clone)]
pub struct Parser {
    prefixes: Vec<(String, String)>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Parser seeded with `rdf`, `rdfs`, `xsd` and `code`.
    pub fn new() -> Self {
        let prefixes = [
            ("rdf", RDF_NAMESPACE),
            ("rdfs", RDFS_NAMESPACE),
            ("xsd", XSD_NAMESPACE),
            ("code", CODE_NAMESPACE),
        ]
        .into_iter()
        .map(|(name, uri)| (name.to_string(), uri.to_string()))
        .collect();
        Parser { prefixes }
    }

    /// Add or override a seed prefix.
    pub fn with_prefix(mut self, name: impl Into<String>, uri: impl Into<String>) -> Self {
        let name = name.into();
        let uri = uri.into();
        match self.prefixes.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = uri,
            None => self.prefixes.push((name, uri)),
        }
        self
    }

    pub fn parse(&self, block: &str) -> Result<Vec<Triple>, GrammarError> {
        grammar::parse_block(block, &self.prefixes)
    }

    pub fn parse_source(&self, raw: &str) -> Result<Vec<Triple>, GrammarError> {
        match locate_block(raw)? {
            None => Ok(Vec::new()),
            Some(block) => self
                .parse(block.text)
                .map_err(|e| e.offset_lines(block.first_line - 1)),
        }
    }
}

fn line_of(raw: &str, byte_offset: usize) -> usize {
    raw[..byte_offset].bytes().filter(|&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(local: &str) -> String {
        format!("{CODE_NAMESPACE}{local}")
    }

    fn wrap(block: &str) -> String {
        format!("package m\n\n// {START_MARKER}\n{block}\n// {END_MARKER}\n")
    }

    #[test]
    fn test_minimal_module_block() {
        let triples = parse(r#"<#m> a code:Module ; code:name "m.go" ."#).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0], Triple::new("#m", RDF_TYPE, Object::uri(code("Module"))));
        assert_eq!(triples[1], Triple::new("#m", code("name"), Object::literal("m.go")));
        assert!(triples[0].declares_module());
    }

    #[test]
    fn test_blank_node_object() {
        let triples =
            parse(r#"<#t> code:linksTo [ code:name "auth" ; code:path "../auth.go" ] ."#).unwrap();
        assert_eq!(triples.len(), 1);
        match &triples[0].object {
            Object::BlankNode { id, triples: inner } => {
                assert_eq!(id, "_:b0");
                assert_eq!(inner.len(), 2);
                assert_eq!(inner[0].subject, "_:b0");
                assert_eq!(inner[1].object, Object::literal("../auth.go"));
            }
            other => panic!("expected blank node, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_blank_nodes_across_lines() {
        let block = r#"
<#t> code:linksTo [
    code:name "outer" ;
    code:calls [ code:name "inner" ]
  ] ;
  code:layer "core" .
"#;
        let triples = parse(block).unwrap();
        assert_eq!(triples.len(), 2);
        let outer = triples[0].object.nested();
        assert_eq!(outer.len(), 2);
        match &outer[1].object {
            Object::BlankNode { id, triples } => {
                assert_eq!(id, "_:b1");
                assert_eq!(triples[0].object, Object::literal("inner"));
            }
            other => panic!("expected nested blank node, got {other:?}"),
        }
        assert_eq!(triples[1].predicate, code("layer"));
    }

    #[test]
    fn test_missing_end_marker() {
        let raw = format!("line one\n// {START_MARKER}\n<#m> a code:Module .\n");
        let err = extract_block(&raw).unwrap_err();
        assert!(err.to_string().contains("not closed"));
        assert_eq!(err.line(), Some(2));

        let err = parse_source(&raw).unwrap_err();
        assert!(err.to_string().contains("not closed"));
    }

    #[test]
    fn test_absent_block_is_not_an_error() {
        assert_eq!(extract_block("fn main() {}").unwrap(), None);
        assert!(parse_source("fn main() {}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let block = r#"
@prefix ex: <http://example.org/> .
<#m> a code:Module ;
    code:name "m" ;
    code:tag "a", "b", "c" ;
    code:linksTo [ code:path "./x.go" ], [ code:path "./y.go" ] ;
    ex:owner "team" .
"#;
        let first = parse(block).unwrap();
        let second = parse(block).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 8);
        assert_eq!(first[7].predicate, "http://example.org/owner");
    }

    #[test]
    fn test_commas_share_subject_and_predicate() {
        let triples = parse(r#"<#m> code:tag "x", "y" ."#).unwrap();
        assert_eq!(triples.len(), 2);
        assert!(triples.iter().all(|t| t.subject == "#m" && t.predicate == code("tag")));
    }

    #[test]
    fn test_malformed_prefix_reports_line() {
        let err = parse("# header\n@prefix broken <http://x/> .").unwrap_err();
        assert!(matches!(err, GrammarError::MalformedPrefix { line: 2, .. }));
    }

    #[test]
    fn test_sparql_prefix_and_literal_suffixes() {
        let block = r#"
PREFIX ex: <http://example.org/>
<#m> ex:title "Titel"@de ; ex:size "12"^^xsd:integer ; ex:ok true .
"#;
        let triples = parse(block).unwrap();
        assert_eq!(triples[0].object, Object::literal("Titel"));
        assert_eq!(triples[1].object, Object::literal("12"));
        assert_eq!(triples[2].object, Object::literal("true"));
    }

    #[test]
    fn test_implicit_statement_termination() {
        let block = "<#a> code:name \"a\"\n<#b> code:name \"b\" .";
        let triples = parse(block).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[1].subject, "#b");
    }

    #[test]
    fn test_unclosed_bracket_is_error() {
        let err = parse("<#m> code:linksTo [ code:name \"x\" .").unwrap_err();
        assert!(matches!(err, GrammarError::Syntax { .. }));
    }

    #[test]
    fn test_parse_source_offsets_lines_and_strips_leaders() {
        let raw = wrap("// <#m> a code:Module ;\n//   code:name \"m\" ;\n//   code:layer ]");
        let err = parse_source(&raw).unwrap_err();
        assert_eq!(err.line(), Some(6));

        let raw = wrap("// <#m> a code:Module ;\n//   code:name \"m\" .");
        let triples = parse_source(&raw).unwrap();
        assert_eq!(triples.len(), 2);
    }

    #[test]
    fn test_with_prefix_overrides_seed() {
        let parser = Parser::new().with_prefix("code", "urn:code:");
        let triples = parser.parse("<#m> code:name \"m\" .").unwrap();
        assert_eq!(triples[0].predicate, "urn:code:name");
    }

    #[test]
    fn test_has_block() {
        assert!(has_block(wrap("").as_bytes()));
        assert!(!has_block(b"no metadata here"));
    }
}
