//! # STRling Parser
//!
//! Parser for the STRling pattern language. This crate turns pattern source
//! into a validated syntax tree and owns the diagnostics raised along the way.
//!
//! ## Usage
//!
//! ```
//! # use strling_parser::{parse, error::ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = "%flags x\n(?<year> \\d{4} ) - (?<month> \\d{2} )";
//!
//!     let (flags, root) = parse(source)?;
//!     assert!(flags.extended());
//!     Ok(())
//! }
//! ```

mod cursor;
mod directives;
pub mod error;
mod hint;
mod parser;
mod source_map;
pub mod validate;

pub use cursor::Cursor;
pub use error::ParseError;
pub use hint::{HintEngine, HintRule};
pub use parser::{ParsedPattern, Parser};
pub use source_map::SourceMap;

use strling_core::{Flags, ast::Node};

/// Parse pattern source into its flags and syntax tree.
///
/// This is the main entry point. It runs the complete front end:
///
/// 1. **Header** - Read the `%` directive lines
/// 2. **Parse** - Build the AST from the pattern body
/// 3. **Validate** - Check whole-tree rules (unique names, ascending ranges)
///
/// # Arguments
///
/// * `source` - The pattern source, directive header included
///
/// # Errors
///
/// Returns the first [`ParseError`] in source order.
///
/// # Example
///
/// ```
/// # use strling_parser::parse;
/// # use strling_core::ast::Node;
/// let (_, root) = parse("a|b").unwrap();
/// assert_eq!(root, Node::alt(vec![Node::lit("a"), Node::lit("b")]));
///
/// let err = parse("a(b").unwrap_err();
/// assert_eq!(err.message(), "Unterminated group");
/// ```
pub fn parse(source: &str) -> Result<(Flags, Node), ParseError> {
    let parsed = Parser::new(source)?.parse()?;
    parsed.validate()?;
    Ok(parsed.into_parts())
}
