//! Intermediate representation consumed by emitters.
//!
//! [`Op`] has the same variant set as [`crate::ast::Node`] but is only ever
//! produced by lowering, and after normalization it holds these invariants:
//!
//! - no `Seq` is a direct part of another `Seq`, no `Alt` a direct branch of
//!   another `Alt`;
//! - no two `Lit` parts of a `Seq` are adjacent;
//! - no `Seq` or `Alt` has a single element.
//!
//! Records are tagged by an `ir` field.

use serde::Serialize;

use crate::atom::{AnchorKind, BackrefTarget, Bound, ClassEscape, LookDir, QuantMode};

/// A node of the intermediate representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "ir")]
pub enum Op {
    Alt { branches: Vec<Op> },
    Seq { parts: Vec<Op> },
    Lit { value: String },
    Dot,
    Anchor { at: AnchorKind },
    CharClass { negated: bool, items: Vec<ClassItem> },
    Quant {
        child: Box<Op>,
        min: u32,
        max: Bound,
        mode: QuantMode,
    },
    Group {
        capturing: bool,
        body: Box<Op>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        atomic: Option<bool>,
    },
    Backref {
        #[serde(flatten)]
        target: BackrefTarget,
    },
    Look { dir: LookDir, neg: bool, body: Box<Op> },
}

/// A member of an IR character class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "ir")]
pub enum ClassItem {
    Range { from: char, to: char },
    #[serde(rename = "Char")]
    Literal {
        #[serde(rename = "char")]
        ch: char,
    },
    #[serde(rename = "Esc")]
    Escape(ClassEscape),
}

impl Op {
    pub fn lit(value: impl Into<String>) -> Self {
        Op::Lit {
            value: value.into(),
        }
    }

    pub fn seq(parts: Vec<Op>) -> Self {
        Op::Seq { parts }
    }

    pub fn alt(branches: Vec<Op>) -> Self {
        Op::Alt { branches }
    }

    pub fn quant(child: Op, min: u32, max: Bound, mode: QuantMode) -> Self {
        Op::Quant {
            child: Box::new(child),
            min,
            max,
            mode,
        }
    }

    pub fn group(capturing: bool, name: Option<String>, atomic: Option<bool>, body: Op) -> Self {
        Op::Group {
            capturing,
            body: Box::new(body),
            name,
            atomic,
        }
    }

    pub fn look(dir: LookDir, neg: bool, body: Op) -> Self {
        Op::Look {
            dir,
            neg,
            body: Box::new(body),
        }
    }

    /// Returns `true` if the tree satisfies the normalization invariants.
    pub fn is_normalized(&self) -> bool {
        match self {
            Op::Seq { parts } => {
                parts.len() != 1
                    && !parts.iter().any(|p| matches!(p, Op::Seq { .. }))
                    && !parts
                        .windows(2)
                        .any(|w| matches!(w, [Op::Lit { .. }, Op::Lit { .. }]))
                    && parts.iter().all(Op::is_normalized)
            }
            Op::Alt { branches } => {
                branches.len() != 1
                    && !branches.iter().any(|b| matches!(b, Op::Alt { .. }))
                    && branches.iter().all(Op::is_normalized)
            }
            Op::Quant { child, .. } => child.is_normalized(),
            Op::Group { body, .. } | Op::Look { body, .. } => body.is_normalized(),
            Op::Lit { .. }
            | Op::Dot
            | Op::Anchor { .. }
            | Op::CharClass { .. }
            | Op::Backref { .. } => true,
        }
    }
}

impl From<ClassEscape> for ClassItem {
    fn from(escape: ClassEscape) -> Self {
        ClassItem::Escape(escape)
    }
}
