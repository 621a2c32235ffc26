//! Fold-based IR normalization.
//!
//! Each IR container has a fold method that consumes the node and returns its
//! rewritten form. Default methods rebuild the node unchanged after folding its
//! children, so a rewrite overrides only the shapes it cares about and always
//! sees already-folded children.

use strling_core::{
    atom::{Bound, LookDir, QuantMode},
    ir::Op,
};

/// Consuming, bottom-up rewriting of IR trees.
trait Folder {
    /// Fold any operation
    fn fold_op(&mut self, op: Op) -> Op {
        match op {
            Op::Seq { parts } => self.fold_seq(parts),
            Op::Alt { branches } => self.fold_alt(branches),
            Op::Quant {
                child,
                min,
                max,
                mode,
            } => self.fold_quant(*child, min, max, mode),
            Op::Group {
                capturing,
                body,
                name,
                atomic,
            } => self.fold_group(capturing, name, atomic, *body),
            Op::Look { dir, neg, body } => self.fold_look(dir, neg, *body),
            leaf => leaf,
        }
    }

    /// Fold a list of siblings
    fn fold_ops(&mut self, ops: Vec<Op>) -> Vec<Op> {
        ops.into_iter().map(|op| self.fold_op(op)).collect()
    }

    fn fold_seq(&mut self, parts: Vec<Op>) -> Op {
        Op::seq(self.fold_ops(parts))
    }

    fn fold_alt(&mut self, branches: Vec<Op>) -> Op {
        Op::alt(self.fold_ops(branches))
    }

    fn fold_quant(&mut self, child: Op, min: u32, max: Bound, mode: QuantMode) -> Op {
        Op::quant(self.fold_op(child), min, max, mode)
    }

    fn fold_group(
        &mut self,
        capturing: bool,
        name: Option<String>,
        atomic: Option<bool>,
        body: Op,
    ) -> Op {
        Op::group(capturing, name, atomic, self.fold_op(body))
    }

    fn fold_look(&mut self, dir: LookDir, neg: bool, body: Op) -> Op {
        Op::look(dir, neg, self.fold_op(body))
    }
}

/// Flattens nested containers, fuses literals and unwraps single elements.
struct Normalize;

impl Folder for Normalize {
    fn fold_seq(&mut self, parts: Vec<Op>) -> Op {
        let mut fused = Vec::with_capacity(parts.len());
        for part in self.fold_ops(parts) {
            match part {
                Op::Seq { parts: inner } => {
                    for op in inner {
                        push_fused(&mut fused, op);
                    }
                }
                op => push_fused(&mut fused, op),
            }
        }

        match fused.len() {
            0 => Op::lit(""),
            1 => fused.swap_remove(0),
            _ => Op::seq(fused),
        }
    }

    fn fold_alt(&mut self, branches: Vec<Op>) -> Op {
        let mut flat = Vec::with_capacity(branches.len());
        for branch in self.fold_ops(branches) {
            match branch {
                Op::Alt { branches: inner } => flat.extend(inner),
                op => flat.push(op),
            }
        }

        if flat.len() == 1 {
            flat.swap_remove(0)
        } else {
            Op::alt(flat)
        }
    }
}

/// Appends `op` to a sequence, merging it into a preceding literal.
///
/// Empty literals match nothing and are dropped.
fn push_fused(parts: &mut Vec<Op>, op: Op) {
    if let Op::Lit { value } = &op {
        if value.is_empty() {
            return;
        }
        if let Some(Op::Lit { value: last }) = parts.last_mut() {
            last.push_str(value);
            return;
        }
    }
    parts.push(op);
}

/// Normalizes an IR tree.
///
/// The result satisfies [`Op::is_normalized`], and normalizing it again
/// returns an identical tree.
///
/// # Examples
///
/// ```
/// # use strling::{compiler::normalize, ir::Op};
/// let nested = Op::seq(vec![Op::lit("a"), Op::seq(vec![Op::lit("b"), Op::Dot])]);
/// assert_eq!(normalize(nested), Op::seq(vec![Op::lit("ab"), Op::Dot]));
/// ```
pub fn normalize(op: Op) -> Op {
    Normalize.fold_op(op)
}
