//! STRling Core Types and Definitions
//!
//! This crate provides the foundational types of the STRling pattern language.
//! It includes:
//!
//! - **Flags**: The five pattern-wide modifiers ([`flags::Flags`])
//! - **AST**: The tree produced by the parser ([`ast`] module)
//! - **IR**: The normalized tree consumed by emitters ([`ir`] module)
//! - **Atoms**: Leaf types shared by both trees ([`atom`] module)
//!
//! Every tree type serializes (via [`serde::Serialize`]) to the canonical
//! record projection used by external tooling: AST records are keyed by a
//! `kind` discriminator, IR records by an `ir` discriminator.

pub mod ast;
pub mod atom;
pub mod flags;
pub mod ir;

pub use flags::Flags;
