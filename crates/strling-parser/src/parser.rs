//! Recursive-descent parser for STRling patterns.
//!
//! The grammar, from loosest to tightest binding:
//!
//! ```text
//! alt   := seq ('|' seq)*
//! seq   := (atom quant?)*
//! atom  := '.' | '^' | '$' | group | class | escape | literal
//! quant := ('*' | '+' | '?' | '{' m (',' n?)? '}') ('?' | '+')?
//! ```
//!
//! Parsing stops at the first error. Every error is reported at a byte offset
//! into the complete source, directive header included.

use std::collections::HashSet;

use log::{debug, trace};
use strling_core::{
    Flags,
    ast::{ClassItem, Node},
    atom::{AnchorKind, BackrefTarget, Bound, ClassEscape, LookDir, QuantMode},
};

use crate::{
    cursor::Cursor,
    directives::read_header,
    error::{ParseError, Result},
    hint::HintEngine,
    source_map::SourceMap,
    validate,
};

/// Parses one pattern source.
///
/// A parser is single-use: [`Parser::parse`] consumes it.
///
/// # Examples
///
/// ```
/// # use strling_parser::Parser;
/// let parsed = Parser::new("%flags i\nab+").unwrap().parse().unwrap();
/// assert!(parsed.flags().ignore_case());
/// ```
#[derive(Debug)]
pub struct Parser<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    flags: Flags,
    misplaced_directive: Option<usize>,
    capture_count: u32,
    capture_names: HashSet<String>,
    source_map: SourceMap,
    hints: HintEngine,
}

/// A successfully parsed, not yet validated, pattern.
#[derive(Debug, Clone)]
pub struct ParsedPattern<'a> {
    text: &'a str,
    flags: Flags,
    root: Node,
    source_map: SourceMap,
    hints: HintEngine,
}

impl<'a> Parser<'a> {
    /// Reads the directive header of `text` and prepares to parse the rest.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for an unknown directive or an invalid flag.
    pub fn new(text: &'a str) -> Result<Self> {
        Self::with_hints(text, HintEngine::default())
    }

    /// Like [`Parser::new`], attaching hints from `hints` to every error.
    pub fn with_hints(text: &'a str, hints: HintEngine) -> Result<Self> {
        let header = read_header(text, &hints)?;
        trace!(
            body_start = header.body_start,
            flags:% = header.flags;
            "Directive header read"
        );
        Ok(Self {
            text,
            cursor: Cursor::new(text, header.body_start, header.flags.extended()),
            flags: header.flags,
            misplaced_directive: header.misplaced,
            capture_count: 0,
            capture_names: HashSet::new(),
            source_map: SourceMap::default(),
            hints,
        })
    }

    /// Flags collected from the directive header.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Parses the pattern body into an AST.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] in source order.
    pub fn parse(mut self) -> Result<ParsedPattern<'a>> {
        debug!(len = self.text.len(), flags:% = self.flags; "Parsing pattern");

        let result = self.parse_pattern();
        if let Some(pos) = self.misplaced_directive {
            if result.as_ref().err().is_none_or(|err| pos < err.pos()) {
                return Err(self.error_at(
                    "Directive must appear at the start of the pattern",
                    pos,
                ));
            }
        }
        let root = result?;

        trace!(root:?; "Parsed pattern");
        Ok(ParsedPattern {
            text: self.text,
            flags: self.flags,
            root,
            source_map: self.source_map,
            hints: self.hints,
        })
    }

    fn error_at(&self, message: impl Into<String>, pos: usize) -> ParseError {
        ParseError::hinted(message, pos, self.text, &self.hints)
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        self.error_at(message, self.cursor.pos())
    }

    fn parse_pattern(&mut self) -> Result<Node> {
        let root = self.parse_alt()?;
        self.cursor.skip_trivia();
        match self.cursor.peek() {
            None => Ok(root),
            Some(')') => Err(self.error_here("Unmatched ')'")),
            Some(_) => Err(self.error_here("Unexpected trailing input")),
        }
    }

    fn parse_alt(&mut self) -> Result<Node> {
        self.cursor.skip_trivia();
        if self.cursor.peek() == Some('|') {
            return Err(self.error_here("Alternation lacks left-hand side"));
        }

        let mut branches = vec![self.parse_seq()?];
        loop {
            self.cursor.skip_trivia();
            if self.cursor.peek() != Some('|') {
                break;
            }
            let bar_pos = self.cursor.pos();
            self.cursor.take();
            self.cursor.skip_trivia();
            match self.cursor.peek() {
                None => return Err(self.error_at("Alternation lacks right-hand side", bar_pos)),
                Some('|') => return Err(self.error_here("Empty alternation branch")),
                Some(_) => branches.push(self.parse_seq()?),
            }
        }

        if branches.len() == 1 {
            Ok(branches.swap_remove(0))
        } else {
            Ok(Node::alt(branches))
        }
    }

    fn parse_seq(&mut self) -> Result<Node> {
        let mut parts = Vec::new();
        loop {
            self.cursor.skip_trivia();
            match self.cursor.peek() {
                None | Some('|') | Some(')') => break,
                Some(_) => {
                    let atom = self.parse_atom()?;
                    parts.push(self.parse_quantifier(atom)?);
                }
            }
        }

        Ok(match parts.len() {
            0 => Node::lit(""),
            1 => parts.swap_remove(0),
            _ => Node::seq(parts),
        })
    }

    fn parse_atom(&mut self) -> Result<Node> {
        let Some(c) = self.cursor.peek() else {
            return Ok(Node::lit(""));
        };
        match c {
            '.' => {
                self.cursor.take();
                Ok(Node::Dot)
            }
            '^' => {
                self.cursor.take();
                Ok(Node::anchor(AnchorKind::Start))
            }
            '$' => {
                self.cursor.take();
                Ok(Node::anchor(AnchorKind::End))
            }
            '(' => self.parse_group(),
            '[' => self.parse_class(),
            '\\' => self.parse_escape(),
            '*' | '+' | '?' => Err(self.error_here(format!("Invalid quantifier '{c}'"))),
            '{' if self.brace_quantifier_ahead() => {
                Err(self.error_here("Invalid quantifier '{'"))
            }
            _ => {
                self.cursor.take();
                Ok(Node::lit(c))
            }
        }
    }

    /// `{` followed by a digit starts a brace quantifier; any other `{` is a
    /// literal.
    fn brace_quantifier_ahead(&self) -> bool {
        self.cursor.peek() == Some('{')
            && self.cursor.peek_nth(1).is_some_and(|c| c.is_ascii_digit())
    }

    fn parse_quantifier(&mut self, child: Node) -> Result<Node> {
        self.cursor.skip_trivia();
        let start = self.cursor.pos();
        let is_quantifier =
            matches!(self.cursor.peek(), Some('*' | '+' | '?')) || self.brace_quantifier_ahead();
        if !is_quantifier {
            return Ok(child);
        }
        if child.is_anchor() {
            return Err(self.error_at("Cannot quantify anchor", start));
        }

        let (min, max) = match self.cursor.take() {
            Some('*') => (0, Bound::Inf),
            Some('+') => (1, Bound::Inf),
            Some('?') => (0, Bound::Finite(1)),
            _ => self.parse_brace_bounds(start)?,
        };
        let mode = if self.cursor.eat("?") {
            QuantMode::Lazy
        } else if self.cursor.eat("+") {
            QuantMode::Possessive
        } else {
            QuantMode::Greedy
        };
        Ok(Node::quant(child, min, max, mode))
    }

    /// Parses the rest of `{m}`, `{m,}` or `{m,n}` after the `{` at `open`.
    fn parse_brace_bounds(&mut self, open: usize) -> Result<(u32, Bound)> {
        let min = self.read_bound()?;
        if !self.cursor.eat(",") {
            if !self.cursor.eat("}") {
                return Err(self.error_here("Unterminated {n}"));
            }
            return Ok((min, Bound::Finite(min)));
        }

        let max = match self.cursor.peek() {
            Some(c) if c.is_ascii_digit() => Some(self.read_bound()?),
            _ => None,
        };
        if !self.cursor.eat("}") {
            return Err(self.error_here("Unterminated {m,n}"));
        }
        match max {
            Some(max) if min > max => Err(self.error_at("Invalid quantifier range", open)),
            Some(max) => Ok((min, Bound::Finite(max))),
            None => Ok((min, Bound::Inf)),
        }
    }

    fn read_bound(&mut self) -> Result<u32> {
        let pos = self.cursor.pos();
        let digits = self.cursor.eat_while(|c| c.is_ascii_digit());
        digits
            .parse()
            .map_err(|_| self.error_at("Quantifier bound too large", pos))
    }

    fn parse_group(&mut self) -> Result<Node> {
        self.cursor.take();

        if self.cursor.eat("?:") {
            let body = self.parse_group_body("Unterminated group")?;
            return Ok(Node::non_capturing(body));
        }
        if self.cursor.eat("?>") {
            let body = self.parse_group_body("Unterminated atomic group")?;
            return Ok(Node::atomic(body));
        }
        for (prefix, dir, neg, unterminated) in [
            ("?=", LookDir::Ahead, false, "Unterminated lookahead"),
            ("?!", LookDir::Ahead, true, "Unterminated lookahead"),
            ("?<=", LookDir::Behind, false, "Unterminated lookbehind"),
            ("?<!", LookDir::Behind, true, "Unterminated lookbehind"),
        ] {
            if self.cursor.eat(prefix) {
                let body = self.parse_group_body(unterminated)?;
                return Ok(Node::look(dir, neg, body));
            }
        }
        if self.cursor.eat("?<") {
            return self.parse_named_group();
        }
        if self.cursor.peek() == Some('?')
            && self
                .cursor
                .peek_nth(1)
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '-')
        {
            return Err(self.error_here("Inline modifiers (?imsx) are not supported"));
        }

        self.capture_count += 1;
        let body = self.parse_group_body("Unterminated group")?;
        Ok(Node::capture(body))
    }

    fn parse_named_group(&mut self) -> Result<Node> {
        let name_pos = self.cursor.pos();
        let name = self.cursor.eat_while(|c| c != '>');
        if !self.cursor.eat(">") {
            return Err(self.error_here("Unterminated group name"));
        }
        if !is_identifier(name) {
            return Err(self.error_at(format!("Invalid group name <{name}>"), name_pos));
        }

        self.capture_count += 1;
        self.capture_names.insert(name.to_string());
        self.source_map.record_named_group(name_pos);
        let body = self.parse_group_body("Unterminated group")?;
        Ok(Node::named(name, body))
    }

    fn parse_group_body(&mut self, unterminated: &str) -> Result<Node> {
        let body = self.parse_alt()?;
        if !self.cursor.eat(")") {
            return Err(self.error_here(unterminated));
        }
        Ok(body)
    }

    fn parse_class(&mut self) -> Result<Node> {
        self.cursor.take();
        self.cursor.enter_class();
        let class = self.parse_class_body();
        self.cursor.leave_class();
        class
    }

    fn parse_class_body(&mut self) -> Result<Node> {
        let negated = self.cursor.eat("^");
        let mut items = Vec::new();

        if self.cursor.peek() == Some(']') {
            if self.cursor.peek_nth(1).is_none() {
                return Err(self.error_here("Empty character class"));
            }
            self.cursor.take();
            items.push(ClassItem::literal(']'));
        }

        loop {
            match self.cursor.peek() {
                None => return Err(self.error_here("Unterminated character class")),
                Some(']') => {
                    self.cursor.take();
                    break;
                }
                Some('-')
                    if matches!(items.last(), Some(ClassItem::Literal { .. }))
                        && !matches!(self.cursor.peek_nth(1), None | Some(']')) =>
                {
                    let dash_pos = self.cursor.pos();
                    self.cursor.take();
                    match (self.parse_class_item()?, items.pop()) {
                        (ClassItem::Literal { ch: to }, Some(ClassItem::Literal { ch: from })) => {
                            self.source_map.record_range(dash_pos);
                            items.push(ClassItem::range(from, to));
                        }
                        (end, start) => {
                            items.extend(start);
                            items.push(ClassItem::literal('-'));
                            items.push(end);
                        }
                    }
                }
                Some(_) => items.push(self.parse_class_item()?),
            }
        }
        Ok(Node::class(negated, items))
    }

    fn parse_class_item(&mut self) -> Result<ClassItem> {
        let esc_pos = self.cursor.pos();
        match self.cursor.take() {
            Some('\\') => {}
            Some(c) => return Ok(ClassItem::literal(c)),
            None => return Err(self.error_here("Unterminated character class")),
        }

        let Some(c) = self.cursor.peek() else {
            return Err(self.error_here("Unterminated character class"));
        };
        if let Some(escape) = ClassEscape::from_shorthand(c) {
            self.cursor.take();
            return Ok(ClassItem::Escape(escape));
        }
        match c {
            'p' | 'P' => Ok(ClassItem::Escape(self.parse_property(esc_pos)?)),
            'b' => {
                self.cursor.take();
                Ok(ClassItem::literal('\u{8}'))
            }
            'x' | 'u' | 'U' | '0' | 'n' | 'r' | 't' | 'f' | 'v' => {
                Ok(ClassItem::literal(self.parse_char_escape(esc_pos)?))
            }
            _ => {
                self.cursor.take();
                Ok(ClassItem::literal(c))
            }
        }
    }

    /// Parses `p{Name}` or `P{Name}`; errors are reported at `err_pos`.
    fn parse_property(&mut self, err_pos: usize) -> Result<ClassEscape> {
        let negated = self.cursor.take() == Some('P');
        if !self.cursor.eat("{") {
            return Err(self.error_at("Expected { after \\p/\\P", err_pos));
        }
        let name = self.cursor.eat_while(|c| c != '}');
        if !self.cursor.eat("}") {
            return Err(self.error_at("Unterminated \\p{...}", err_pos));
        }
        Ok(ClassEscape::property(name, negated))
    }

    fn parse_escape(&mut self) -> Result<Node> {
        let esc_pos = self.cursor.pos();
        self.cursor.take();
        let Some(c) = self.cursor.peek() else {
            return Err(self.error_at("Incomplete escape at end of pattern", esc_pos));
        };

        if let Some(escape) = ClassEscape::from_shorthand(c) {
            self.cursor.take();
            return Ok(Node::class(false, vec![ClassItem::Escape(escape)]));
        }
        let anchor = match c {
            'b' => Some(AnchorKind::WordBoundary),
            'B' => Some(AnchorKind::NotWordBoundary),
            'A' => Some(AnchorKind::AbsoluteStart),
            'Z' => Some(AnchorKind::EndBeforeFinalNewline),
            'z' => Some(AnchorKind::AbsoluteEnd),
            _ => None,
        };
        if let Some(at) = anchor {
            self.cursor.take();
            return Ok(Node::anchor(at));
        }

        match c {
            '1'..='9' => self.parse_numbered_backref(esc_pos),
            'k' => self.parse_named_backref(esc_pos),
            'p' | 'P' => {
                let err_pos = self.cursor.pos();
                let escape = self.parse_property(err_pos)?;
                Ok(Node::class(false, vec![ClassItem::Escape(escape)]))
            }
            'x' | 'u' | 'U' | '0' | 'n' | 'r' | 't' | 'f' | 'v' => {
                Ok(Node::lit(self.parse_char_escape(esc_pos)?))
            }
            c if c.is_alphanumeric() => {
                Err(self.error_at(format!("Unknown escape sequence \\{c}"), esc_pos))
            }
            c if c.is_whitespace() && !self.cursor.extended() => {
                Err(self.error_at(format!("Unknown escape sequence \\{c}"), esc_pos))
            }
            c => {
                self.cursor.take();
                Ok(Node::lit(c))
            }
        }
    }

    /// Parses `\N`, taking digits while they still name an opened group.
    fn parse_numbered_backref(&mut self, esc_pos: usize) -> Result<Node> {
        let mut index: u32 = 0;
        while let Some(digit) = self.cursor.peek().and_then(|c| c.to_digit(10)) {
            match index.checked_mul(10).and_then(|n| n.checked_add(digit)) {
                Some(next) if next <= self.capture_count => {
                    index = next;
                    self.cursor.take();
                }
                _ => break,
            }
        }

        if index == 0 {
            let checkpoint = self.cursor.checkpoint();
            let digits = self.cursor.eat_while(|c| c.is_ascii_digit());
            self.cursor.reset(&checkpoint);
            return Err(self.error_at(
                format!("Backreference to undefined group \\{digits}"),
                esc_pos,
            ));
        }
        Ok(Node::backref(BackrefTarget::Index(index)))
    }

    fn parse_named_backref(&mut self, esc_pos: usize) -> Result<Node> {
        self.cursor.take();
        if !self.cursor.eat("<") {
            return Err(self.error_here("Expected '<' after \\k"));
        }
        let name = self.cursor.eat_while(|c| c != '>');
        if !self.cursor.eat(">") {
            return Err(self.error_here("Unterminated named backref"));
        }
        if !self.capture_names.contains(name) {
            return Err(self.error_at(
                format!("Backreference to undefined group <{name}>"),
                esc_pos,
            ));
        }
        Ok(Node::backref(BackrefTarget::Name(name.to_string())))
    }

    /// Parses an escape that denotes a single character: control, NUL, hex
    /// and Unicode forms. The cursor sits on the letter after the backslash.
    fn parse_char_escape(&mut self, esc_pos: usize) -> Result<char> {
        let Some(kind) = self.cursor.take() else {
            return Err(self.error_at("Incomplete escape at end of pattern", esc_pos));
        };
        let ch = match kind {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '0' => '\0',
            'x' => {
                if self.cursor.eat("{") {
                    self.parse_braced_code_point(
                        esc_pos,
                        "Unterminated \\x{...}",
                        "Invalid \\x{...} code point",
                    )?
                } else {
                    self.take_hex(2)
                        .ok_or_else(|| self.error_at("Invalid \\xHH escape", esc_pos))?
                }
            }
            'u' => {
                if self.cursor.eat("{") {
                    self.parse_braced_code_point(
                        esc_pos,
                        "Unterminated \\u{...}",
                        "Invalid \\u{...} code point",
                    )?
                } else {
                    self.take_hex(4)
                        .ok_or_else(|| self.error_at("Invalid \\uHHHH", esc_pos))?
                }
            }
            'U' => self
                .take_hex(8)
                .ok_or_else(|| self.error_at("Invalid \\UHHHHHHHH", esc_pos))?,
            other => other,
        };
        Ok(ch)
    }

    /// Reads exactly `count` hex digits naming a Unicode scalar value.
    fn take_hex(&mut self, count: usize) -> Option<char> {
        let mut value: u32 = 0;
        for _ in 0..count {
            let digit = self.cursor.peek()?.to_digit(16)?;
            self.cursor.take();
            value = value * 16 + digit;
        }
        char::from_u32(value)
    }

    fn parse_braced_code_point(
        &mut self,
        esc_pos: usize,
        unterminated: &str,
        invalid: &str,
    ) -> Result<char> {
        let digits = self.cursor.eat_while(|c| c.is_ascii_hexdigit());
        if !self.cursor.eat("}") {
            return Err(self.error_here(unterminated));
        }
        u32::from_str_radix(digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| self.error_at(invalid, esc_pos))
    }
}

impl<'a> ParsedPattern<'a> {
    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Offsets recorded for post-parse diagnostics.
    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    /// The full source text, directive header included.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Runs the whole-tree checks on the parsed AST.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate group name or descending class range.
    pub fn validate(&self) -> Result<()> {
        validate::validate_with(&self.root, self.text, &self.source_map, &self.hints)
    }

    pub fn into_parts(self) -> (Flags, Node) {
        (self.flags, self.root)
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
