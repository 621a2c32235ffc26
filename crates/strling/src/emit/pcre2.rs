//! PCRE2 pattern writer.

use log::trace;
use strling_core::{
    Flags,
    atom::{BackrefTarget, Bound, LookDir, QuantMode},
    ir::{ClassItem, Op},
};

use super::Emitter;

/// Characters that are special outside a character class.
const METACHARACTERS: &str = r"[]^$.|?*+(){}\";

/// Emits PCRE2 syntax.
///
/// Quantified multi-atom children and alternations inside sequences are
/// wrapped in `(?:...)` so precedence matches the tree.
///
/// # Examples
///
/// ```
/// # use strling::{Flags, emit::{Emitter, Pcre2Emitter}, ir::Op, atom::{Bound, QuantMode}};
/// let op = Op::quant(Op::lit("ab"), 1, Bound::Inf, QuantMode::Lazy);
/// let emitter = Pcre2Emitter::new(false);
/// assert_eq!(emitter.emit(&op, Flags::from_letters("m")), "(?:ab)+?");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pcre2Emitter {
    inline_flags: bool,
}

impl Default for Pcre2Emitter {
    fn default() -> Self {
        Self { inline_flags: true }
    }
}

impl Pcre2Emitter {
    /// Creates an emitter; `inline_flags` controls the `(?imsux)` prefix.
    pub fn new(inline_flags: bool) -> Self {
        Self { inline_flags }
    }

    pub fn inline_flags(&self) -> bool {
        self.inline_flags
    }
}

impl Emitter for Pcre2Emitter {
    fn emit(&self, op: &Op, flags: Flags) -> String {
        let mut writer = Writer {
            out: String::new(),
            extended: flags.extended(),
        };
        if self.inline_flags && !flags.is_empty() {
            writer.out.push_str("(?");
            writer.out.push_str(&flags.letters());
            writer.out.push(')');
        }
        writer.write_op(op, Parent::Other);

        trace!(pattern = writer.out.as_str(); "Emitted PCRE2 pattern");
        writer.out
    }
}

/// Where an operation sits, as far as grouping is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    Seq,
    Quant,
    Other,
}

struct Writer {
    out: String,
    extended: bool,
}

impl Writer {
    fn write_op(&mut self, op: &Op, parent: Parent) {
        match op {
            Op::Lit { value } => self.write_literal(value),
            Op::Dot => self.out.push('.'),
            Op::Anchor { at } => self.out.push_str(at.as_pcre2()),
            Op::CharClass { negated, items } => self.write_class(*negated, items),
            Op::Seq { parts } => self.write_seq(parts),
            Op::Alt { branches } => {
                let wrap = parent == Parent::Seq;
                if wrap {
                    self.out.push_str("(?:");
                }
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        self.out.push('|');
                    }
                    self.write_op(branch, Parent::Other);
                }
                if wrap {
                    self.out.push(')');
                }
            }
            Op::Quant {
                child,
                min,
                max,
                mode,
            } => {
                let wrap = needs_group_for_quant(child);
                if wrap {
                    self.out.push_str("(?:");
                }
                self.write_op(child, Parent::Quant);
                if wrap {
                    self.out.push(')');
                }
                self.write_quant_suffix(*min, *max, *mode);
            }
            Op::Group {
                capturing,
                body,
                name,
                atomic,
            } => {
                match (atomic, capturing, name) {
                    (Some(true), _, _) => self.out.push_str("(?>"),
                    (_, true, Some(name)) => {
                        self.out.push_str("(?<");
                        self.out.push_str(name);
                        self.out.push('>');
                    }
                    (_, true, None) => self.out.push('('),
                    (_, false, _) => self.out.push_str("(?:"),
                }
                self.write_op(body, Parent::Other);
                self.out.push(')');
            }
            Op::Backref { target } => match target {
                BackrefTarget::Index(index) => {
                    self.out.push('\\');
                    self.out.push_str(&index.to_string());
                }
                BackrefTarget::Name(name) => {
                    self.out.push_str("\\k<");
                    self.out.push_str(name);
                    self.out.push('>');
                }
            },
            Op::Look { dir, neg, body } => {
                self.out.push_str(match (dir, neg) {
                    (LookDir::Ahead, false) => "(?=",
                    (LookDir::Ahead, true) => "(?!",
                    (LookDir::Behind, false) => "(?<=",
                    (LookDir::Behind, true) => "(?<!",
                });
                self.write_op(body, Parent::Other);
                self.out.push(')');
            }
        }
    }

    fn write_seq(&mut self, parts: &[Op]) {
        let mut after_numbered_backref = false;
        for part in parts {
            let start = self.out.len();
            self.write_op(part, Parent::Seq);
            // `\1` followed by `0` would read as `\10`
            if after_numbered_backref
                && self.out[start..].starts_with(|c: char| c.is_ascii_digit())
            {
                self.out.insert_str(start, "(?:)");
            }
            after_numbered_backref = matches!(
                part,
                Op::Backref {
                    target: BackrefTarget::Index(_)
                }
            );
        }
    }

    fn write_literal(&mut self, value: &str) {
        for c in value.chars() {
            if METACHARACTERS.contains(c) {
                self.out.push('\\');
                self.out.push(c);
                continue;
            }
            if !self.extended {
                self.out.push(c);
                continue;
            }
            match c {
                ' ' => self.out.push_str("\\ "),
                '#' => self.out.push_str("\\#"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                '\u{c}' => self.out.push_str("\\f"),
                '\u{b}' => self.out.push_str("\\x0b"),
                c => self.out.push(c),
            }
        }
    }

    fn write_class(&mut self, negated: bool, items: &[ClassItem]) {
        match items {
            [ClassItem::Escape(escape)] => {
                let escape = if negated {
                    escape.complement()
                } else {
                    escape.clone()
                };
                self.out.push_str(&escape.to_string());
                return;
            }
            // Nothing and anything
            [] if negated => {
                self.out.push_str(r"[\s\S]");
                return;
            }
            [] => {
                self.out.push_str("(?!)");
                return;
            }
            _ => {}
        }

        self.out.push('[');
        if negated {
            self.out.push('^');
        }
        if items.iter().any(|item| *item == ClassItem::Literal { ch: '-' }) {
            self.out.push('-');
        }
        for item in items {
            match item {
                ClassItem::Literal { ch: '-' } => {}
                ClassItem::Literal { ch } => self.write_class_char(*ch, false),
                ClassItem::Range { from, to } => {
                    self.write_class_char(*from, true);
                    self.out.push('-');
                    self.write_class_char(*to, true);
                }
                ClassItem::Escape(escape) => self.out.push_str(&escape.to_string()),
            }
        }
        self.out.push(']');
    }

    fn write_class_char(&mut self, ch: char, range_end: bool) {
        if matches!(ch, '[' | ']' | '\\' | '^') || (range_end && ch == '-') {
            self.out.push('\\');
        }
        self.out.push(ch);
    }

    fn write_quant_suffix(&mut self, min: u32, max: Bound, mode: QuantMode) {
        match (min, max) {
            (0, Bound::Inf) => self.out.push('*'),
            (1, Bound::Inf) => self.out.push('+'),
            (0, Bound::Finite(1)) => self.out.push('?'),
            (min, Bound::Inf) => self.out.push_str(&format!("{{{min},}}")),
            (min, Bound::Finite(max)) if min == max => self.out.push_str(&format!("{{{min}}}")),
            (min, Bound::Finite(max)) => self.out.push_str(&format!("{{{min},{max}}}")),
        }
        match mode {
            QuantMode::Greedy => {}
            QuantMode::Lazy => self.out.push('?'),
            QuantMode::Possessive => self.out.push('+'),
        }
    }
}

/// A quantifier binds to one atom; anything wider needs a group.
fn needs_group_for_quant(child: &Op) -> bool {
    match child {
        Op::Lit { value } => value.chars().count() != 1,
        Op::Seq { .. } | Op::Alt { .. } | Op::Quant { .. } | Op::Look { .. } => true,
        Op::Dot | Op::Anchor { .. } | Op::CharClass { .. } | Op::Group { .. } => false,
        Op::Backref { .. } => false,
    }
}

#[cfg(test)]
mod tests {
    use strling_core::atom::{AnchorKind, ClassEscape};

    use super::*;

    fn emit(op: &Op) -> String {
        Pcre2Emitter::default().emit(op, Flags::default())
    }

    fn class(negated: bool, items: Vec<ClassItem>) -> Op {
        Op::CharClass { negated, items }
    }

    fn backref(index: u32) -> Op {
        Op::Backref {
            target: BackrefTarget::Index(index),
        }
    }

    #[test]
    fn test_literal_escaping() {
        assert_eq!(emit(&Op::lit(r".^$|()?*+{}[]\")), r"\.\^\$\|\(\)\?\*\+\{\}\[\]\\");
        assert_eq!(emit(&Op::lit("a-b c#")), "a-b c#");
    }

    #[test]
    fn test_extended_mode_escapes_whitespace() {
        let flags = Flags::from_letters("x");
        let emitter = Pcre2Emitter::new(false);
        assert_eq!(emitter.emit(&Op::lit("a b#\n"), flags), r"a\ b\#\n");
        assert_eq!(emitter.emit(&Op::lit("\t\u{b}"), flags), r"\t\x0b");
    }

    #[test]
    fn test_flag_prefix() {
        let op = Op::Dot;
        let flags = Flags::from_letters("xsi");
        assert_eq!(Pcre2Emitter::default().emit(&op, flags), "(?isx).");
        assert_eq!(Pcre2Emitter::new(false).emit(&op, flags), ".");
        assert_eq!(emit(&op), ".");
    }

    #[test]
    fn test_quantifier_suffixes() {
        let cases = [
            (0, Bound::Inf, "a*"),
            (1, Bound::Inf, "a+"),
            (0, Bound::Finite(1), "a?"),
            (3, Bound::Finite(3), "a{3}"),
            (2, Bound::Inf, "a{2,}"),
            (2, Bound::Finite(5), "a{2,5}"),
            (0, Bound::Finite(0), "a{0}"),
        ];
        for (min, max, expected) in cases {
            let op = Op::quant(Op::lit("a"), min, max, QuantMode::Greedy);
            assert_eq!(emit(&op), expected);
        }
    }

    #[test]
    fn test_quantifier_modes() {
        let lazy = Op::quant(Op::Dot, 0, Bound::Inf, QuantMode::Lazy);
        let possessive = Op::quant(Op::Dot, 0, Bound::Finite(1), QuantMode::Possessive);
        assert_eq!(emit(&lazy), ".*?");
        assert_eq!(emit(&possessive), ".?+");
    }

    #[test]
    fn test_quantified_children_are_grouped() {
        let star = |child| Op::quant(child, 0, Bound::Inf, QuantMode::Greedy);
        assert_eq!(emit(&star(Op::lit("ab"))), "(?:ab)*");
        assert_eq!(emit(&star(Op::lit(r"\"))), r"\\*");
        assert_eq!(emit(&star(Op::seq(vec![Op::lit("a"), Op::Dot]))), "(?:a.)*");
        assert_eq!(emit(&star(Op::alt(vec![Op::lit("a"), Op::lit("b")]))), "(?:a|b)*");
        assert_eq!(
            emit(&star(Op::look(LookDir::Ahead, false, Op::lit("a")))),
            "(?:(?=a))*"
        );
        assert_eq!(emit(&star(Op::group(true, None, None, Op::lit("ab")))), "(ab)*");
        assert_eq!(emit(&star(backref(1))), r"\1*");
    }

    #[test]
    fn test_alternation_grouping() {
        let alt = Op::alt(vec![Op::lit("a"), Op::lit("b")]);
        assert_eq!(emit(&alt), "a|b");
        assert_eq!(emit(&Op::seq(vec![Op::lit("x"), alt.clone()])), "x(?:a|b)");
        assert_eq!(emit(&Op::group(true, None, None, alt)), "(a|b)");
    }

    #[test]
    fn test_groups() {
        let body = || Op::lit("a");
        assert_eq!(emit(&Op::group(true, None, None, body())), "(a)");
        assert_eq!(emit(&Op::group(false, None, None, body())), "(?:a)");
        assert_eq!(emit(&Op::group(false, None, Some(true), body())), "(?>a)");
        assert_eq!(
            emit(&Op::group(true, Some("n".to_string()), None, body())),
            "(?<n>a)"
        );
    }

    #[test]
    fn test_lookarounds() {
        let look = |dir, neg| emit(&Op::look(dir, neg, Op::lit("a")));
        assert_eq!(look(LookDir::Ahead, false), "(?=a)");
        assert_eq!(look(LookDir::Ahead, true), "(?!a)");
        assert_eq!(look(LookDir::Behind, false), "(?<=a)");
        assert_eq!(look(LookDir::Behind, true), "(?<!a)");
    }

    #[test]
    fn test_anchors_and_backrefs() {
        let op = Op::seq(vec![
            Op::Anchor {
                at: AnchorKind::AbsoluteStart,
            },
            backref(2),
            Op::Backref {
                target: BackrefTarget::Name("x".to_string()),
            },
        ]);
        assert_eq!(emit(&op), r"\A\2\k<x>");
    }

    #[test]
    fn test_numbered_backref_before_digit() {
        assert_eq!(emit(&Op::seq(vec![backref(1), Op::lit("0")])), r"\1(?:)0");
        assert_eq!(
            emit(&Op::seq(vec![
                backref(1),
                Op::quant(Op::lit("0"), 1, Bound::Inf, QuantMode::Greedy)
            ])),
            r"\1(?:)0+"
        );
        assert_eq!(emit(&Op::seq(vec![backref(1), Op::lit("a0")])), r"\1a0");
    }

    #[test]
    fn test_single_shorthand_class() {
        let single = |negated, escape: ClassEscape| emit(&class(negated, vec![escape.into()]));
        assert_eq!(single(false, ClassEscape::Digit), r"\d");
        assert_eq!(single(true, ClassEscape::Digit), r"\D");
        assert_eq!(single(true, ClassEscape::NotWord), r"\w");
        assert_eq!(single(true, ClassEscape::property("Lu", false)), r"\P{Lu}");
        assert_eq!(single(true, ClassEscape::property("Lu", true)), r"\p{Lu}");
    }

    #[test]
    fn test_bracket_class() {
        let op = class(
            true,
            vec![
                ClassItem::Range { from: 'a', to: 'z' },
                ClassItem::Literal { ch: '-' },
                ClassItem::Literal { ch: ']' },
                ClassItem::Literal { ch: '^' },
                ClassEscape::Space.into(),
            ],
        );
        assert_eq!(emit(&op), r"[^-a-z\]\^\s]");
    }

    #[test]
    fn test_range_endpoints_escape_dash() {
        let op = class(false, vec![ClassItem::Range { from: '!', to: '-' }]);
        assert_eq!(emit(&op), r"[!-\-]");
    }

    #[test]
    fn test_class_keeps_whitespace_in_extended_mode() {
        let op = class(false, vec![ClassItem::Literal { ch: ' ' }, ClassItem::Literal { ch: '#' }]);
        let emitter = Pcre2Emitter::new(false);
        assert_eq!(emitter.emit(&op, Flags::from_letters("x")), "[ #]");
    }

    #[test]
    fn test_empty_classes() {
        assert_eq!(emit(&class(false, vec![])), "(?!)");
        assert_eq!(emit(&class(true, vec![])), r"[\s\S]");
    }
}
