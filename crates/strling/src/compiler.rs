//! AST to IR compilation.
//!
//! Compilation runs in two phases:
//!
//! 1. **Lowering** maps every AST variant onto its IR counterpart with no
//!    structural change.
//! 2. **Normalization** flattens nested sequences and alternations, fuses
//!    adjacent literals and collapses single-element containers.
//!
//! [`compile_with_metadata`] additionally scans the final IR for the regex
//! features it relies on.

mod features;
mod normalize;

pub use features::{Feature, scan_features};
pub use normalize::normalize;

use std::collections::BTreeSet;

use log::{debug, trace};
use serde::{Serialize, Serializer, ser::SerializeStruct};

use strling_core::{ast, ir};

/// Maps an AST onto the IR, one node for one node.
pub fn lower(node: ast::Node) -> ir::Op {
    match node {
        ast::Node::Alt { branches } => ir::Op::alt(lower_all(branches)),
        ast::Node::Seq { parts } => ir::Op::seq(lower_all(parts)),
        ast::Node::Lit { value } => ir::Op::Lit { value },
        ast::Node::Dot => ir::Op::Dot,
        ast::Node::Anchor { at } => ir::Op::Anchor { at },
        ast::Node::CharClass { negated, items } => ir::Op::CharClass {
            negated,
            items: items.into_iter().map(lower_class_item).collect(),
        },
        ast::Node::Quant {
            child,
            min,
            max,
            mode,
        } => ir::Op::quant(lower(*child), min, max, mode),
        ast::Node::Group {
            capturing,
            body,
            name,
            atomic,
        } => ir::Op::group(capturing, name, atomic, lower(*body)),
        ast::Node::Backref { target } => ir::Op::Backref { target },
        ast::Node::Look { dir, neg, body } => ir::Op::look(dir, neg, lower(*body)),
    }
}

fn lower_all(nodes: Vec<ast::Node>) -> Vec<ir::Op> {
    nodes.into_iter().map(lower).collect()
}

fn lower_class_item(item: ast::ClassItem) -> ir::ClassItem {
    match item {
        ast::ClassItem::Range { from, to } => ir::ClassItem::Range { from, to },
        ast::ClassItem::Literal { ch } => ir::ClassItem::Literal { ch },
        ast::ClassItem::Escape(escape) => ir::ClassItem::Escape(escape),
    }
}

/// Lowers and normalizes `root`.
///
/// # Examples
///
/// ```
/// # use strling::{ast::Node, compiler::compile, ir::Op};
/// let root = Node::seq(vec![Node::lit("a"), Node::lit("b"), Node::Dot]);
/// assert_eq!(compile(root), Op::seq(vec![Op::lit("ab"), Op::Dot]));
/// ```
pub fn compile(root: ast::Node) -> ir::Op {
    let lowered = lower(root);
    trace!(ir:? = lowered; "Lowered IR");
    let op = normalize(lowered);
    trace!(ir:? = op; "Normalized IR");
    op
}

/// Compiled IR together with the features it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    ir: ir::Op,
    features: BTreeSet<Feature>,
}

impl Compilation {
    pub fn ir(&self) -> &ir::Op {
        &self.ir
    }

    /// Features in sorted order, each listed once.
    pub fn features(&self) -> &BTreeSet<Feature> {
        &self.features
    }

    pub fn into_ir(self) -> ir::Op {
        self.ir
    }
}

impl Serialize for Compilation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Metadata<'a> {
            features_used: &'a BTreeSet<Feature>,
        }

        let mut state = serializer.serialize_struct("Compilation", 2)?;
        state.serialize_field("ir", &self.ir)?;
        state.serialize_field(
            "metadata",
            &Metadata {
                features_used: &self.features,
            },
        )?;
        state.end()
    }
}

/// Compiles `root` and reports the features the result relies on.
pub fn compile_with_metadata(root: ast::Node) -> Compilation {
    let ir = compile(root);
    let features = scan_features(&ir);
    debug!(features:? = features; "Compiled pattern");
    Compilation { ir, features }
}
