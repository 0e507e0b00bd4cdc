//! Integration tests for metadata block extraction and parsing.
//!
//! Blocks are embedded in the comment syntax of several host languages to
//! check that the same triples come out regardless of comment leader.

use linkeddoc::parser::{
    extract_block, parse, parse_source, GrammarError, Object, Triple, CODE_NAMESPACE, RDF_TYPE,
};

fn code(local: &str) -> String {
    format!("{CODE_NAMESPACE}{local}")
}

fn expected_module() -> Vec<Triple> {
    vec![
        Triple::new("#svc", RDF_TYPE, Object::uri(code("Module"))),
        Triple::new("#svc", code("name"), Object::literal("svc")),
        Triple::new("#svc", code("linksTo"), Object::uri("./db.go")),
    ]
}

#[test]
fn test_scenario_minimal_block_yields_two_triples() {
    let triples = parse(r#"<#m> a code:Module ; code:name "m.go" ."#).unwrap();
    assert_eq!(triples.len(), 2);
}

#[test]
fn test_same_triples_under_every_comment_style() {
    let sources = [
        // Go / Rust / C++ line comments
        "// <!-- LinkedDoc RDF -->\n// <#svc> a code:Module ;\n//   code:name \"svc\" ;\n//   code:linksTo <./db.go> .\n// <!-- End LinkedDoc RDF -->\n",
        // Rust doc comments
        "/// <!-- LinkedDoc RDF -->\n/// <#svc> a code:Module ;\n///   code:name \"svc\" ;\n///   code:linksTo <./db.go> .\n/// <!-- End LinkedDoc RDF -->\n",
        // C block comment
        "/*\n * <!-- LinkedDoc RDF -->\n * <#svc> a code:Module ;\n *   code:name \"svc\" ;\n *   code:linksTo <./db.go> .\n * <!-- End LinkedDoc RDF -->\n */\n",
        // SQL / Lua / Haskell
        "-- <!-- LinkedDoc RDF -->\n-- <#svc> a code:Module ;\n--   code:name \"svc\" ;\n--   code:linksTo <./db.go> .\n-- <!-- End LinkedDoc RDF -->\n",
        // Lisp
        ";; <!-- LinkedDoc RDF -->\n;; <#svc> a code:Module ;\n;;   code:name \"svc\" ;\n;;   code:linksTo <./db.go> .\n;; <!-- End LinkedDoc RDF -->\n",
        // Python docstring, no leader at all
        "\"\"\"\n<!-- LinkedDoc RDF -->\n<#svc> a code:Module ;\n  code:name \"svc\" ;\n  code:linksTo <./db.go> .\n<!-- End LinkedDoc RDF -->\n\"\"\"\n",
    ];

    for source in sources {
        let triples = parse_source(source).unwrap_or_else(|e| panic!("{e} in:\n{source}"));
        assert_eq!(triples, expected_module(), "source:\n{source}");
    }
}

#[test]
fn test_scenario_blank_node_has_two_inner_triples() {
    let triples =
        parse(r#"<#t> code:linksTo [ code:name "auth" ; code:path "../auth.go" ] ."#).unwrap();
    assert_eq!(triples.len(), 1);
    assert!(triples[0].object.is_blank_node());
    assert_eq!(triples[0].object.nested().len(), 2);
}

#[test]
fn test_scenario_unclosed_block() {
    let raw = "// <!-- LinkedDoc RDF -->\n// <#m> a code:Module .\n";
    let err = extract_block(raw).unwrap_err();
    assert!(err.to_string().contains("not closed"));
    assert!(matches!(parse_source(raw), Err(GrammarError::BlockNotClosed { .. })));
}

#[test]
fn test_block_text_is_trimmed_and_between_markers() {
    let raw = "x\n<!-- LinkedDoc RDF -->\n\n  <#m> a code:Module .  \n\n<!-- End LinkedDoc RDF -->\ny";
    assert_eq!(extract_block(raw).unwrap(), Some("<#m> a code:Module ."));
}

#[test]
fn test_subject_persists_across_lines_until_terminated() {
    let block = r#"
# two statements, the first spread over four lines
<#a> a code:Module ;
    code:name "a" ;
    code:tag "x",
             "y" .
<#b> code:name "b" .
"#;
    let triples = parse(block).unwrap();
    let subjects: Vec<&str> = triples.iter().map(|t| t.subject.as_str()).collect();
    assert_eq!(subjects, vec!["#a", "#a", "#a", "#a", "#b"]);
}

#[test]
fn test_prefixes_only_live_for_one_parse() {
    let with_prefix = parse("@prefix ex: <http://example.org/> .\n<#m> ex:owner \"me\" .").unwrap();
    assert_eq!(with_prefix[0].predicate, "http://example.org/owner");

    // Without the declaration the token is kept verbatim.
    let without = parse("<#m> ex:owner \"me\" .").unwrap();
    assert_eq!(without[0].predicate, "ex:owner");
}

#[test]
fn test_deeply_nested_blank_nodes() {
    let block = "<#m> code:linksTo [ code:calls [ code:calls [ code:name \"leaf\" ] ] ] .";
    let triples = parse(block).unwrap();
    let level1 = triples[0].object.nested();
    let level2 = level1[0].object.nested();
    let level3 = level2[0].object.nested();
    assert_eq!(level3[0].object, Object::literal("leaf"));
    assert_eq!(level3[0].subject, "_:b2");
}

#[test]
fn test_excessive_nesting_is_rejected() {
    let depth = linkeddoc::parser::MAX_BLANK_DEPTH + 1;
    let block = format!(
        "<#m> code:calls {}code:name \"x\"{} .",
        "[ code:calls ".repeat(depth - 1) + "[ ",
        " ]".repeat(depth)
    );
    assert!(matches!(parse(&block), Err(GrammarError::Syntax { .. })));
}
