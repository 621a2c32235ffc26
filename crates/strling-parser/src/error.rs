//! Error and diagnostic types for the STRling parser.
//!
//! Parsing follows a first-error-wins policy: the first problem found aborts
//! the parse, so a failure is always exactly one [`ParseError`]. The error
//! stores only the message, the byte offset, the full source and an optional
//! hint. Every presentation is derived from those on demand:
//!
//! - [`ParseError::render`] draws the caret diagram shown to users;
//! - [`ParseError::to_editor_diagnostic`] builds an [`EditorDiagnostic`]
//!   record for editor integrations, carrying an [`ErrorCode`] and a
//!   [`Severity`].
//!
//! # Example
//!
//! ```
//! # use strling_parser::error::{ErrorCode, ParseError};
//! let err = ParseError::new("Unterminated group", 3, "a(b", None);
//!
//! assert_eq!(err.code(), ErrorCode::from_message("Unterminated group"));
//! assert_eq!(err.code().as_str(), "unterminated_group");
//! assert!(err.render().ends_with(">   |    ^"));
//! ```

mod editor;
mod error_code;
mod parse_error;
mod severity;

pub(crate) use parse_error::Result;

pub use editor::{EditorDiagnostic, Position, Range};
pub use error_code::ErrorCode;
pub use parse_error::ParseError;
pub use severity::Severity;
