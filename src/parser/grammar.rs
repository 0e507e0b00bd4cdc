//! Tokenizer and statement reader for the constrained triple grammar.
//!
//! The block is tokenized line by line (prefix directives are applied as
//! they are met, so a prefix only affects the lines after it). Statements
//! are then read by explicit recursive descent over the token stream, which
//! keeps the current subject alive across physical lines and balances
//! nested `[ ... ]` groups by depth rather than by pattern matching.

use std::collections::HashMap;
use tracing::debug;

use super::error::GrammarError;
use super::triple::{Object, Triple, RDF_TYPE};

/// Deepest allowed blank-node nesting.
pub const MAX_BLANK_DEPTH: usize = 64;

/// Leaders stripped from the start of each line before tokenizing.
///
/// Order matters: longer leaders first. `#` is not a leader; it is the
/// grammar's own comment marker.
const COMMENT_LEADERS: &[&str] = &["///", "//!", "//", "--", ";;"];

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    /// `<...>` or an expanded `prefix:local`
    Iri(String),
    /// `"..."`
    Quoted(String),
    /// Anything unbracketed and unprefixed
    Bare(String),
    /// The `a` shorthand
    A,
    Semicolon,
    Comma,
    Dot,
    Open,
    Close,
}

impl TokenKind {
    fn describe(&self) -> String {
        match self {
            TokenKind::Iri(v) => format!("URI <{v}>"),
            TokenKind::Quoted(v) => format!("literal \"{v}\""),
            TokenKind::Bare(v) => format!("token '{v}'"),
            TokenKind::A => "'a'".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::Open => "'['".to_string(),
            TokenKind::Close => "']'".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    line: usize,
    /// First token on its physical line
    line_start: bool,
}

/// Parse a block with the given seed prefixes.
pub(crate) fn parse_block(
    block: &str,
    seed_prefixes: &[(String, String)],
) -> Result<Vec<Triple>, GrammarError> {
    let mut lexer = Lexer::new(seed_prefixes);
    for (idx, raw_line) in block.lines().enumerate() {
        lexer.line(raw_line, idx + 1)?;
    }

    let mut reader = StatementReader {
        tokens: &lexer.tokens,
        pos: 0,
        blank_counter: 0,
        depth: 0,
    };
    reader.document()
}

struct Lexer {
    prefixes: HashMap<String, String>,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(seed_prefixes: &[(String, String)]) -> Self {
        Lexer {
            prefixes: seed_prefixes.iter().cloned().collect(),
            tokens: Vec::new(),
        }
    }

    fn line(&mut self, raw: &str, line: usize) -> Result<(), GrammarError> {
        let text = strip_comment_leader(raw).trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(());
        }

        if let Some(rest) = directive_body(text) {
            return self.prefix_directive(rest, text, line);
        }

        self.tokenize(text, line)
    }

    fn prefix_directive(&mut self, rest: &str, text: &str, line: usize) -> Result<(), GrammarError> {
        let malformed = || GrammarError::MalformedPrefix {
            line,
            text: text.to_string(),
        };

        let rest = rest.trim();
        let rest = rest.strip_suffix('.').unwrap_or(rest).trim_end();
        let colon = rest.find(':').ok_or_else(malformed)?;
        let name = rest[..colon].trim();
        if !name.is_empty() && !is_prefix_name(name) {
            return Err(malformed());
        }

        let iri = rest[colon + 1..].trim();
        let inner = iri
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix('>'))
            .ok_or_else(malformed)?;
        if inner.contains(char::is_whitespace) {
            return Err(malformed());
        }

        self.prefixes.insert(name.to_string(), inner.to_string());
        Ok(())
    }

    fn push(&mut self, kind: TokenKind, line: usize, line_start: &mut bool) {
        self.tokens.push(Token {
            kind,
            line,
            line_start: *line_start,
        });
        *line_start = false;
    }

    fn tokenize(&mut self, text: &str, line: usize) -> Result<(), GrammarError> {
        let chars: Vec<char> = text.chars().collect();
        let mut i = 0;
        let mut line_start = true;

        while i < chars.len() {
            let c = chars[i];
            if c.is_whitespace() {
                i += 1;
                continue;
            }

            match c {
                '#' => break,
                '<' => {
                    let end = chars[i + 1..]
                        .iter()
                        .position(|&ch| ch == '>')
                        .map(|off| i + 1 + off)
                        .ok_or_else(|| GrammarError::syntax(line, "unterminated URI reference"))?;
                    let value: String = chars[i + 1..end].iter().collect();
                    self.push(TokenKind::Iri(value), line, &mut line_start);
                    i = end + 1;
                }
                '"' => {
                    let (value, next) = read_quoted(&chars, i + 1, line)?;
                    i = skip_literal_suffix(&chars, next);
                    self.push(TokenKind::Quoted(value), line, &mut line_start);
                }
                '[' => {
                    self.push(TokenKind::Open, line, &mut line_start);
                    i += 1;
                }
                ']' => {
                    self.push(TokenKind::Close, line, &mut line_start);
                    i += 1;
                }
                ';' => {
                    self.push(TokenKind::Semicolon, line, &mut line_start);
                    i += 1;
                }
                ',' => {
                    self.push(TokenKind::Comma, line, &mut line_start);
                    i += 1;
                }
                '.' if is_terminator_dot(&chars, i) => {
                    self.push(TokenKind::Dot, line, &mut line_start);
                    i += 1;
                }
                _ => {
                    let mut end = i;
                    while end < chars.len() {
                        let ch = chars[end];
                        if ch.is_whitespace() || matches!(ch, ';' | ',' | '[' | ']' | '"' | '<') {
                            break;
                        }
                        if ch == '.' && is_terminator_dot(&chars, end) {
                            break;
                        }
                        end += 1;
                    }
                    let word: String = chars[i..end].iter().collect();
                    let kind = self.classify_word(word);
                    self.push(kind, line, &mut line_start);
                    i = end;
                }
            }
        }
        Ok(())
    }

    fn classify_word(&self, word: String) -> TokenKind {
        if word == "a" {
            return TokenKind::A;
        }
        if word.starts_with("_:") {
            return TokenKind::Iri(word);
        }
        match word.find(':') {
            Some(colon) if colon == 0 || is_prefix_name(&word[..colon]) => {
                match self.prefixes.get(&word[..colon]) {
                    Some(base) => TokenKind::Iri(format!("{}{}", base, &word[colon + 1..])),
                    // Unknown prefix: keep the token verbatim (urn:x, http://...)
                    None => TokenKind::Iri(word),
                }
            }
            _ => TokenKind::Bare(word),
        }
    }
}

fn strip_comment_leader(line: &str) -> &str {
    let trimmed = line.trim_start();
    for leader in COMMENT_LEADERS {
        if let Some(rest) = trimmed.strip_prefix(leader) {
            return rest;
        }
    }
    match trimmed.strip_prefix('*') {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest,
        _ => trimmed,
    }
}

/// Body of an `@prefix` or `PREFIX` line, if `text` is one.
fn directive_body(text: &str) -> Option<&str> {
    for keyword in ["@prefix", "PREFIX"] {
        if let Some(rest) = text.strip_prefix(keyword) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return Some(rest);
            }
        }
    }
    None
}

fn is_prefix_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A `.` ends a statement when followed by whitespace, end of line, or
/// another separator.
fn is_terminator_dot(chars: &[char], i: usize) -> bool {
    match chars.get(i + 1) {
        None => true,
        Some(&next) => next.is_whitespace() || matches!(next, ';' | ',' | ']' | '#'),
    }
}

fn read_quoted(chars: &[char], start: usize, line: usize) -> Result<(String, usize), GrammarError> {
    let mut value = String::new();
    let mut i = start;
    while i < chars.len() {
        match chars[i] {
            '"' => return Ok((value, i + 1)),
            '\\' => {
                let escaped = chars
                    .get(i + 1)
                    .ok_or_else(|| GrammarError::syntax(line, "dangling escape in string literal"))?;
                value.push(match *escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
                i += 2;
            }
            c => {
                value.push(c);
                i += 1;
            }
        }
    }
    Err(GrammarError::syntax(line, "unterminated string literal"))
}

/// Skip an `@lang` tag or `^^datatype` after a literal; returns the new index.
fn skip_literal_suffix(chars: &[char], mut i: usize) -> usize {
    if chars.get(i) == Some(&'@') {
        i += 1;
        while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '-') {
            i += 1;
        }
        return i;
    }

    if chars.get(i) == Some(&'^') && chars.get(i + 1) == Some(&'^') {
        i += 2;
        if chars.get(i) == Some(&'<') {
            while i < chars.len() && chars[i] != '>' {
                i += 1;
            }
            return (i + 1).min(chars.len());
        }
        while i < chars.len() {
            let c = chars[i];
            if c.is_whitespace() || matches!(c, ';' | ',' | ']') || (c == '.' && is_terminator_dot(chars, i)) {
                break;
            }
            i += 1;
        }
    }
    i
}

struct StatementReader<'a> {
    tokens: &'a [Token],
    pos: usize,
    blank_counter: usize,
    depth: usize,
}

impl<'a> StatementReader<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        match self.peek() {
            Some(tok) if &tok.kind == kind => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn last_line(&self) -> usize {
        self.tokens.last().map(|t| t.line).unwrap_or(1)
    }

    fn document(&mut self) -> Result<Vec<Triple>, GrammarError> {
        let mut triples = Vec::new();

        while let Some(tok) = self.peek() {
            if tok.kind == TokenKind::Dot {
                self.pos += 1;
                continue;
            }

            let subject = self.subject()?;
            self.predicate_objects(&subject, &mut triples)?;

            match self.peek() {
                None => break,
                Some(t) if t.kind == TokenKind::Dot => self.pos += 1,
                Some(t) if t.line_start => {
                    debug!(line = t.line, subject = %subject, "statement ended without '.'");
                }
                Some(t) => {
                    return Err(GrammarError::syntax(
                        t.line,
                        format!("expected '.', ';' or ',' but found {}", t.kind.describe()),
                    ))
                }
            }
        }

        Ok(triples)
    }

    fn subject(&mut self) -> Result<String, GrammarError> {
        let line = self.last_line();
        let tok = self
            .next()
            .ok_or_else(|| GrammarError::syntax(line, "expected subject"))?;
        match &tok.kind {
            TokenKind::Iri(value) | TokenKind::Bare(value) => Ok(value.clone()),
            other => Err(GrammarError::syntax(
                tok.line,
                format!("expected subject but found {}", other.describe()),
            )),
        }
    }

    fn predicate(&mut self) -> Result<String, GrammarError> {
        let line = self.last_line();
        let tok = self
            .next()
            .ok_or_else(|| GrammarError::syntax(line, "statement ended before its predicate"))?;
        match &tok.kind {
            TokenKind::A => Ok(RDF_TYPE.to_string()),
            TokenKind::Iri(value) => Ok(value.clone()),
            TokenKind::Bare(value) => Err(GrammarError::syntax(
                tok.line,
                format!("predicate '{value}' is neither a URI nor a prefixed name"),
            )),
            other => Err(GrammarError::syntax(
                tok.line,
                format!("expected predicate but found {}", other.describe()),
            )),
        }
    }

    fn object(&mut self) -> Result<Object, GrammarError> {
        let line = self.last_line();
        let tok = self
            .next()
            .ok_or_else(|| GrammarError::syntax(line, "statement ended before its object"))?;
        match &tok.kind {
            TokenKind::Iri(value) => Ok(Object::uri(value.clone())),
            TokenKind::Quoted(value) | TokenKind::Bare(value) => Ok(Object::literal(value.clone())),
            TokenKind::A => Ok(Object::literal("a")),
            TokenKind::Open => self.blank_node(tok.line),
            other => Err(GrammarError::syntax(
                tok.line,
                format!("expected object but found {}", other.describe()),
            )),
        }
    }

    /// `predicate object (, object)* (; predicate object ...)*`
    fn predicate_objects(&mut self, subject: &str, out: &mut Vec<Triple>) -> Result<(), GrammarError> {
        loop {
            let predicate = self.predicate()?;
            loop {
                let object = self.object()?;
                out.push(Triple::new(subject, predicate.clone(), object));
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }

            if !self.eat(&TokenKind::Semicolon) {
                return Ok(());
            }
            while self.eat(&TokenKind::Semicolon) {}
            match self.peek() {
                None => return Ok(()),
                Some(t) if matches!(t.kind, TokenKind::Dot | TokenKind::Close) => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn blank_node(&mut self, open_line: usize) -> Result<Object, GrammarError> {
        if self.depth >= MAX_BLANK_DEPTH {
            return Err(GrammarError::syntax(
                open_line,
                format!("blank nodes nested deeper than {MAX_BLANK_DEPTH}"),
            ));
        }

        let id = format!("_:b{}", self.blank_counter);
        self.blank_counter += 1;
        self.depth += 1;

        let mut triples = Vec::new();
        if !self.eat(&TokenKind::Close) {
            self.predicate_objects(&id, &mut triples)?;
            match self.next() {
                Some(t) if t.kind == TokenKind::Close => {}
                Some(t) => {
                    return Err(GrammarError::syntax(
                        t.line,
                        format!("expected ']' but found {}", t.kind.describe()),
                    ))
                }
                None => {
                    return Err(GrammarError::syntax(
                        open_line,
                        "'[' opened here is never closed",
                    ))
                }
            }
        }

        self.depth -= 1;
        Ok(Object::BlankNode { id, triples })
    }
}
