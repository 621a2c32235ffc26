//! Abstract syntax tree produced by the parser.
//!
//! The tree mirrors the surface syntax one to one: no flattening, no literal
//! fusion. Each node owns its children outright, and the whole tree is
//! consumed once by lowering.
//!
//! Serialization produces the canonical record projection, with every node
//! tagged by a `kind` field:
//!
//! ```
//! use strling_core::ast::Node;
//!
//! let node = Node::seq(vec![Node::lit("a"), Node::Dot]);
//! let json = serde_json::to_value(&node).unwrap();
//! assert_eq!(json["kind"], "Seq");
//! assert_eq!(json["parts"][1]["kind"], "Dot");
//! ```

use serde::Serialize;

use crate::atom::{AnchorKind, BackrefTarget, Bound, ClassEscape, LookDir, QuantMode};

/// A node of the pattern syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Node {
    /// Ordered alternatives, `a|b|c`.
    Alt { branches: Vec<Node> },
    /// Concatenation of parts.
    Seq { parts: Vec<Node> },
    /// One or more literal characters. The empty literal stands for an empty
    /// sequence.
    Lit { value: String },
    /// The `.` wildcard.
    Dot,
    Anchor { at: AnchorKind },
    CharClass { negated: bool, items: Vec<ClassItem> },
    Quant {
        child: Box<Node>,
        min: u32,
        max: Bound,
        mode: QuantMode,
    },
    /// Any parenthesized group that is not a lookaround.
    Group {
        capturing: bool,
        body: Box<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        atomic: Option<bool>,
    },
    Backref {
        #[serde(flatten)]
        target: BackrefTarget,
    },
    Look { dir: LookDir, neg: bool, body: Box<Node> },
}

/// A member of a bracketed character class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum ClassItem {
    /// Inclusive range `from-to`.
    Range { from: char, to: char },
    /// A single member character.
    #[serde(rename = "Char")]
    Literal {
        #[serde(rename = "char")]
        ch: char,
    },
    /// A shorthand or property escape.
    #[serde(rename = "Esc")]
    Escape(ClassEscape),
}

impl Node {
    pub fn lit(value: impl Into<String>) -> Self {
        Node::Lit {
            value: value.into(),
        }
    }

    pub fn seq(parts: Vec<Node>) -> Self {
        Node::Seq { parts }
    }

    pub fn alt(branches: Vec<Node>) -> Self {
        Node::Alt { branches }
    }

    pub fn anchor(at: AnchorKind) -> Self {
        Node::Anchor { at }
    }

    pub fn class(negated: bool, items: Vec<ClassItem>) -> Self {
        Node::CharClass { negated, items }
    }

    pub fn quant(child: Node, min: u32, max: Bound, mode: QuantMode) -> Self {
        Node::Quant {
            child: Box::new(child),
            min,
            max,
            mode,
        }
    }

    /// A plain capturing group `( ... )`.
    pub fn capture(body: Node) -> Self {
        Node::Group {
            capturing: true,
            body: Box::new(body),
            name: None,
            atomic: None,
        }
    }

    /// A named capturing group `(?<name> ... )`.
    pub fn named(name: impl Into<String>, body: Node) -> Self {
        Node::Group {
            capturing: true,
            body: Box::new(body),
            name: Some(name.into()),
            atomic: None,
        }
    }

    /// A non-capturing group `(?: ... )`.
    pub fn non_capturing(body: Node) -> Self {
        Node::Group {
            capturing: false,
            body: Box::new(body),
            name: None,
            atomic: None,
        }
    }

    /// An atomic group `(?> ... )`.
    pub fn atomic(body: Node) -> Self {
        Node::Group {
            capturing: false,
            body: Box::new(body),
            name: None,
            atomic: Some(true),
        }
    }

    pub fn backref(target: BackrefTarget) -> Self {
        Node::Backref { target }
    }

    pub fn look(dir: LookDir, neg: bool, body: Node) -> Self {
        Node::Look {
            dir,
            neg,
            body: Box::new(body),
        }
    }

    /// Returns `true` for anchor nodes, which can never be quantified.
    pub fn is_anchor(&self) -> bool {
        matches!(self, Node::Anchor { .. })
    }
}

impl ClassItem {
    pub fn range(from: char, to: char) -> Self {
        ClassItem::Range { from, to }
    }

    pub fn literal(ch: char) -> Self {
        ClassItem::Literal { ch }
    }
}

impl From<ClassEscape> for ClassItem {
    fn from(escape: ClassEscape) -> Self {
        ClassItem::Escape(escape)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_quant_projection() {
        let node = Node::quant(
            Node::class(false, vec![ClassEscape::Digit.into()]),
            1,
            Bound::Inf,
            QuantMode::Lazy,
        );
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "kind": "Quant",
                "child": {
                    "kind": "CharClass",
                    "negated": false,
                    "items": [{"kind": "Esc", "type": "d"}],
                },
                "min": 1,
                "max": "Inf",
                "mode": "Lazy",
            })
        );
    }

    #[test]
    fn test_group_omits_absent_fields() {
        let value = serde_json::to_value(Node::capture(Node::Dot)).unwrap();
        assert_eq!(
            value,
            json!({"kind": "Group", "capturing": true, "body": {"kind": "Dot"}})
        );

        let value = serde_json::to_value(Node::atomic(Node::lit("a"))).unwrap();
        assert_eq!(value["atomic"], true);
        assert!(value.get("name").is_none());
    }

    #[test]
    fn test_backref_sets_exactly_one_target() {
        let by_index = serde_json::to_value(Node::backref(BackrefTarget::Index(2))).unwrap();
        assert_eq!(by_index, json!({"kind": "Backref", "byIndex": 2}));

        let by_name =
            serde_json::to_value(Node::backref(BackrefTarget::Name("year".into()))).unwrap();
        assert_eq!(by_name, json!({"kind": "Backref", "byName": "year"}));
    }

    #[test]
    fn test_class_item_projection() {
        let node = Node::class(
            true,
            vec![
                ClassItem::range('a', 'z'),
                ClassItem::literal('-'),
                ClassEscape::property("L", false).into(),
            ],
        );
        assert_eq!(
            serde_json::to_value(&node).unwrap()["items"],
            json!([
                {"kind": "Range", "from": "a", "to": "z"},
                {"kind": "Char", "char": "-"},
                {"kind": "Esc", "type": "p", "property": "L"},
            ])
        );
    }

    #[test]
    fn test_look_and_anchor_projection() {
        let node = Node::seq(vec![
            Node::anchor(AnchorKind::Start),
            Node::look(LookDir::Behind, true, Node::lit("x")),
        ]);
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({
                "kind": "Seq",
                "parts": [
                    {"kind": "Anchor", "at": "Start"},
                    {"kind": "Look", "dir": "Behind", "neg": true,
                     "body": {"kind": "Lit", "value": "x"}},
                ],
            })
        );
    }
}
