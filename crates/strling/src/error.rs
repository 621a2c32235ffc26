//! Error types for STRling operations.
//!
//! This module provides the main error type [`StrlingError`].

use thiserror::Error;

use strling_parser::error::ParseError;

/// The main error type for STRling operations.
///
/// Compilation and emission cannot fail on a well-formed tree, so every
/// error today comes from parsing or validation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrlingError {
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl StrlingError {
    /// The underlying parse error, if this is one.
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse(err) => Some(err),
        }
    }
}
