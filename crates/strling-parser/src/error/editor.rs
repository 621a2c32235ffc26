//! Editor diagnostic records.
//!
//! The record follows the shape language servers publish: a zero-based range,
//! a numeric severity, the message, a source tag and a code.

use serde::Serialize;

use crate::error::{ErrorCode, ParseError, Severity};

/// Source tag attached to every record.
pub const DIAGNOSTIC_SOURCE: &str = "STRling";

/// A zero-based line and character offset.
///
/// `character` counts Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// A parse failure in the form editors consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorDiagnostic {
    range: Range,
    severity: Severity,
    message: String,
    source: &'static str,
    code: ErrorCode,
}

impl EditorDiagnostic {
    /// Builds the record for `err`. The range is one character wide, and a
    /// hint is appended to the message after a blank line.
    pub(crate) fn from_parse_error(err: &ParseError) -> Self {
        let location = err.location();
        let start = Position {
            line: location.line,
            character: location.column,
        };
        let end = Position {
            character: start.character + 1,
            ..start
        };
        let message = match err.hint() {
            Some(hint) => format!("{}\n\nHint: {}", err.message(), hint),
            None => err.message().to_string(),
        };
        Self {
            range: Range { start, end },
            severity: Severity::Error,
            message,
            source: DIAGNOSTIC_SOURCE,
            code: err.code(),
        }
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source(&self) -> &str {
        self.source
    }

    pub fn code(&self) -> &ErrorCode {
        &self.code
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_record_shape() {
        let err = ParseError::new(
            "Unterminated group",
            3,
            "a(b",
            Some("Close the group with ')'.".to_string()),
        );
        let value = serde_json::to_value(err.to_editor_diagnostic()).unwrap();
        assert_eq!(
            value,
            json!({
                "range": {
                    "start": {"line": 0, "character": 3},
                    "end": {"line": 0, "character": 4},
                },
                "severity": 1,
                "message": "Unterminated group\n\nHint: Close the group with ')'.",
                "source": "STRling",
                "code": "unterminated_group",
            })
        );
    }

    #[test]
    fn test_multiline_position() {
        let err = ParseError::new("Unknown directive '%foo'", 9, "%flags i\n%foo", None);
        let diagnostic = err.to_editor_diagnostic();
        assert_eq!(diagnostic.range().start, Position { line: 1, character: 0 });
        assert_eq!(diagnostic.range().end, Position { line: 1, character: 1 });
        assert_eq!(diagnostic.message(), "Unknown directive '%foo'");
        assert_eq!(diagnostic.severity(), Severity::Error);
        assert_eq!(diagnostic.source(), "STRling");
        assert_eq!(diagnostic.code().as_str(), "unknown_directive_foo");
    }
}
