//! Emitters turn normalized IR into target regex text.

mod pcre2;

pub use pcre2::Pcre2Emitter;

use strling_core::{Flags, ir::Op};

/// Target-specific regex writer.
pub trait Emitter {
    /// Renders `op` as a pattern string for the target engine.
    fn emit(&self, op: &Op, flags: Flags) -> String;
}

/// Emits `op` with the default [`Pcre2Emitter`].
///
/// # Examples
///
/// ```
/// # use strling::{Flags, emit::emit, ir::Op};
/// let op = Op::seq(vec![Op::lit("a.b"), Op::Dot]);
/// assert_eq!(emit(&op, Flags::from_letters("i")), r"(?i)a\.b.");
/// ```
pub fn emit(op: &Op, flags: Flags) -> String {
    Pcre2Emitter::default().emit(op, flags)
}
