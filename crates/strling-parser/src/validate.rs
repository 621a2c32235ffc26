//! Whole-tree validation using the visitor pattern.
//!
//! Some rules cannot be checked while the parser is still descending, because
//! the offending construct may sit anywhere in the tree. This pass walks the
//! finished AST read-only and reports them through the same [`ParseError`]
//! type the parser uses.
//!
//! ## Validations Performed
//!
//! - **Unique group names**: no two capturing groups share a name
//! - **Ascending ranges**: a class range never runs backwards by code point

use std::collections::HashSet;

use log::debug;
use strling_core::ast::{ClassItem, Node};

use crate::{
    error::{ParseError, Result},
    hint::HintEngine,
    source_map::SourceMap,
};

/// Visitor trait for read-only traversal of the AST.
///
/// Default implementations walk the tree in pre-order, which is also source
/// order, so implementors override only the methods they care about.
pub trait Visitor {
    /// Visit any node
    fn visit_node(&mut self, node: &Node) {
        match node {
            Node::Alt { branches } => self.visit_nodes(branches),
            Node::Seq { parts } => self.visit_nodes(parts),
            Node::CharClass { negated, items } => self.visit_class(*negated, items),
            Node::Quant { child, .. } => self.visit_node(child),
            Node::Group { name, body, .. } => {
                if let Some(name) = name {
                    self.visit_group_name(name);
                }
                self.visit_node(body);
            }
            Node::Look { body, .. } => self.visit_node(body),
            Node::Lit { .. } | Node::Dot | Node::Anchor { .. } | Node::Backref { .. } => {}
        }
    }

    /// Visit a list of sibling nodes
    fn visit_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            self.visit_node(node);
        }
    }

    /// Visit a character class
    fn visit_class(&mut self, _negated: bool, items: &[ClassItem]) {
        for item in items {
            self.visit_class_item(item);
        }
    }

    /// Visit a single class member
    fn visit_class_item(&mut self, _item: &ClassItem) {}

    /// Visit the name of a named capturing group, before its body
    fn visit_group_name(&mut self, _name: &str) {}
}

/// Collects validation failures in source order.
struct Validator<'a> {
    text: &'a str,
    source_map: &'a SourceMap,
    hints: &'a HintEngine,
    names: HashSet<String>,
    named_groups_seen: usize,
    ranges_seen: usize,
    errors: Vec<ParseError>,
}

impl<'a> Validator<'a> {
    fn new(text: &'a str, source_map: &'a SourceMap, hints: &'a HintEngine) -> Self {
        Self {
            text,
            source_map,
            hints,
            names: HashSet::new(),
            named_groups_seen: 0,
            ranges_seen: 0,
            errors: Vec::new(),
        }
    }

    fn emit(&mut self, message: String, pos: Option<usize>) {
        let pos = pos.unwrap_or(self.text.len());
        self.errors
            .push(ParseError::hinted(message, pos, self.text, self.hints));
    }
}

impl Visitor for Validator<'_> {
    fn visit_group_name(&mut self, name: &str) {
        let pos = self.source_map.named_group(self.named_groups_seen);
        self.named_groups_seen += 1;
        if !self.names.insert(name.to_string()) {
            self.emit(format!("Duplicate group name <{name}>"), pos);
        }
    }

    fn visit_class_item(&mut self, item: &ClassItem) {
        if let ClassItem::Range { from, to } = item {
            let pos = self.source_map.range(self.ranges_seen);
            self.ranges_seen += 1;
            if from > to {
                self.emit(format!("Invalid character range [{from}-{to}]"), pos);
            }
        }
    }
}

/// Validates a tree that was built without a [`SourceMap`].
///
/// Failures are reported at the end of `text`.
///
/// # Errors
///
/// Returns the first duplicate group name or descending range.
pub fn validate(root: &Node, text: &str) -> Result<()> {
    validate_with(root, text, &SourceMap::default(), &HintEngine::default())
}

/// Validates `root`, locating failures through `source_map`.
///
/// # Errors
///
/// Returns the first failure in source order.
pub fn validate_with(
    root: &Node,
    text: &str,
    source_map: &SourceMap,
    hints: &HintEngine,
) -> Result<()> {
    let mut validator = Validator::new(text, source_map, hints);
    validator.visit_node(root);

    if let Some(err) = validator.errors.into_iter().next() {
        debug!(message = err.message(), pos = err.pos(); "Validation failed");
        return Err(err);
    }
    Ok(())
}
