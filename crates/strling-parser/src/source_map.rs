//! Source offsets kept alongside a parsed tree.
//!
//! The AST carries no positions. Checks that run after parsing still need to
//! point at the right character, so the parser records the offsets of the
//! constructs those checks inspect, in source order.

/// Offsets recorded during parsing.
///
/// Entries appear in source order, which is also the pre-order of the tree:
/// the `n`-th named group met by a pre-order walk has its name at
/// `named_group(n)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    named_groups: Vec<usize>,
    ranges: Vec<usize>,
}

impl SourceMap {
    /// Offset of the name of the `index`-th named group.
    pub fn named_group(&self, index: usize) -> Option<usize> {
        self.named_groups.get(index).copied()
    }

    /// Offset of the dash of the `index`-th class range.
    pub fn range(&self, index: usize) -> Option<usize> {
        self.ranges.get(index).copied()
    }

    pub(crate) fn record_named_group(&mut self, pos: usize) {
        self.named_groups.push(pos);
    }

    pub(crate) fn record_range(&mut self, pos: usize) {
        self.ranges.push(pos);
    }
}
