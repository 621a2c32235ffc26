//! Adapter for rendering parse errors through [`miette`].
//!
//! [`ParseError`] formats its own caret diagram. Hosts that already report
//! through `miette` can wrap it in a [`PatternDiagnostic`] instead and get a
//! labeled source snippet, the error code and the hint as help text.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use strling_parser::error::{ErrorCode, ParseError};

use crate::StrlingError;

/// Adapter for a single parse error.
pub struct PatternDiagnostic<'a> {
    /// The wrapped error
    err: &'a ParseError,
    /// Source code for displaying snippets
    src: &'a str,
    code: ErrorCode,
}

impl<'a> PatternDiagnostic<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(err: &'a ParseError) -> Self {
        Self {
            err,
            src: err.text(),
            code: err.code(),
        }
    }

    /// Wraps the parse error inside `err`, if there is one.
    pub fn from_error(err: &'a StrlingError) -> Option<Self> {
        err.as_parse_error().map(Self::new)
    }

    /// The span of the offending character; empty at end of input.
    fn span(&self) -> SourceSpan {
        let pos = self.err.pos();
        let len = self
            .src
            .get(pos..)
            .and_then(|rest| rest.chars().next())
            .map_or(0, char::len_utf8);
        SourceSpan::new(pos.into(), len)
    }
}

impl fmt::Debug for PatternDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternDiagnostic")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for PatternDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.err.message())
    }
}

impl std::error::Error for PatternDiagnostic<'_> {}

impl MietteDiagnostic for PatternDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.err
            .hint()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_primary_with_span(
            Some(self.err.message().to_string()),
            self.span(),
        );
        Some(Box::new(std::iter::once(label)))
    }
}
