//! Feature-usage scan over compiled IR.
//!
//! The scan is informational only; it never changes the emitted pattern.

use std::collections::BTreeSet;

use serde::Serialize;
use strling_core::{
    atom::{LookDir, QuantMode},
    ir::{ClassItem, Op},
};

/// A regex feature that not every engine supports.
///
/// Variants are declared in name order, so a sorted set lists them
/// alphabetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    AtomicGroup,
    Backreference,
    Lookahead,
    Lookbehind,
    NamedGroup,
    PossessiveQuantifier,
    UnicodeProperty,
}

impl Feature {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::AtomicGroup => "atomic_group",
            Feature::Backreference => "backreference",
            Feature::Lookahead => "lookahead",
            Feature::Lookbehind => "lookbehind",
            Feature::NamedGroup => "named_group",
            Feature::PossessiveQuantifier => "possessive_quantifier",
            Feature::UnicodeProperty => "unicode_property",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collects the features used anywhere in `op`.
pub fn scan_features(op: &Op) -> BTreeSet<Feature> {
    let mut features = BTreeSet::new();
    scan(op, &mut features);
    features
}

fn scan(op: &Op, features: &mut BTreeSet<Feature>) {
    match op {
        Op::Seq { parts: ops } | Op::Alt { branches: ops } => {
            for op in ops {
                scan(op, features);
            }
        }
        Op::Quant { child, mode, .. } => {
            if *mode == QuantMode::Possessive {
                features.insert(Feature::PossessiveQuantifier);
            }
            scan(child, features);
        }
        Op::Group {
            body, name, atomic, ..
        } => {
            if *atomic == Some(true) {
                features.insert(Feature::AtomicGroup);
            }
            if name.is_some() {
                features.insert(Feature::NamedGroup);
            }
            scan(body, features);
        }
        Op::Look { dir, body, .. } => {
            features.insert(match dir {
                LookDir::Ahead => Feature::Lookahead,
                LookDir::Behind => Feature::Lookbehind,
            });
            scan(body, features);
        }
        Op::Backref { .. } => {
            features.insert(Feature::Backreference);
        }
        Op::CharClass { items, .. } => {
            let has_property = items.iter().any(|item| {
                matches!(item, ClassItem::Escape(escape) if escape.is_property())
            });
            if has_property {
                features.insert(Feature::UnicodeProperty);
            }
        }
        Op::Lit { .. } | Op::Dot | Op::Anchor { .. } => {}
    }
}
