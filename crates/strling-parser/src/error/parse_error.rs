//! The ParseError type raised by parsing and validation.

use std::fmt;

use crate::{
    error::{EditorDiagnostic, ErrorCode},
    hint::HintEngine,
};

/// A type alias for `Result<T, ParseError>`.
pub type Result<T> = std::result::Result<T, ParseError>;

/// A located parse failure.
///
/// Created once, at the offending position, and never mutated. `pos` is a byte
/// offset into `text`, the complete source the parser was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    message: String,
    pos: usize,
    text: String,
    hint: Option<String>,
}

/// Where an offset falls in the source, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SourceLocation<'a> {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, counted in characters.
    pub column: usize,
    /// The line's text, without its terminator.
    pub line_text: &'a str,
}

impl ParseError {
    pub fn new(
        message: impl Into<String>,
        pos: usize,
        text: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self {
            message: message.into(),
            pos,
            text: text.into(),
            hint,
        }
    }

    /// Creates an error whose hint is looked up in `hints`.
    pub fn hinted(
        message: impl Into<String>,
        pos: usize,
        text: &str,
        hints: &HintEngine,
    ) -> Self {
        let message = message.into();
        let hint = hints.lookup(&message);
        Self::new(message, pos, text, hint)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Byte offset of the failure in [`ParseError::text`].
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The full source that failed to parse.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// The snake-case code derived from the message.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::from_message(&self.message)
    }

    /// Locates `pos` in the source.
    ///
    /// An offset past the end of the last line points just after that line's
    /// final character.
    pub(crate) fn location(&self) -> SourceLocation<'_> {
        let mut line_start = 0;
        let mut last = SourceLocation {
            line: 0,
            column: 0,
            line_text: "",
        };
        for (index, raw) in self.text.split('\n').enumerate() {
            let line_text = raw.strip_suffix('\r').unwrap_or(raw);
            if self.pos <= line_start + raw.len() {
                let offset = self.pos - line_start;
                let column = raw
                    .char_indices()
                    .take_while(|(i, _)| *i < offset)
                    .count();
                return SourceLocation {
                    line: index,
                    column: column.min(line_text.chars().count()),
                    line_text,
                };
            }
            last = SourceLocation {
                line: index,
                column: line_text.chars().count(),
                line_text,
            };
            line_start += raw.len() + 1;
        }
        last
    }

    /// Renders the caret diagram.
    ///
    /// ```text
    /// STRling Parse Error: Unterminated group
    ///
    /// > 1 | a(b
    /// >   |    ^
    /// ```
    ///
    /// followed by a blank line and `Hint: ...` when a hint is present. An
    /// empty source degrades to `<message> at position <pos>`.
    pub fn render(&self) -> String {
        if self.text.is_empty() {
            return format!("{} at position {}", self.message, self.pos);
        }

        let location = self.location();
        let mut out = format!(
            "STRling Parse Error: {}\n\n> {} | {}\n>   | {}^",
            self.message,
            location.line + 1,
            location.line_text,
            " ".repeat(location.column),
        );
        if let Some(hint) = &self.hint {
            out.push_str("\n\nHint: ");
            out.push_str(hint);
        }
        out
    }

    /// Converts the error into an editor diagnostic record.
    pub fn to_editor_diagnostic(&self) -> EditorDiagnostic {
        EditorDiagnostic::from_parse_error(self)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_line() {
        let err = ParseError::new("Unterminated group", 3, "a(b", None);
        assert_eq!(
            err.render(),
            "STRling Parse Error: Unterminated group\n\n> 1 | a(b\n>   |    ^"
        );
    }

    #[test]
    fn test_render_with_hint() {
        let err = ParseError::new(
            "Cannot quantify anchor",
            1,
            "^*",
            Some("Anchors match positions.".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "STRling Parse Error: Cannot quantify anchor\n\n> 1 | ^*\n>   |  ^\n\nHint: Anchors match positions."
        );
    }

    #[test]
    fn test_render_second_line() {
        let err = ParseError::new("Invalid flag 'q'", 16, "%flags i\n%flags q", None);
        let location = err.location();
        assert_eq!(location.line, 1);
        assert_eq!(location.column, 7);
        assert!(err.render().ends_with("> 2 | %flags q\n>   |        ^"));
    }

    #[test]
    fn test_location_past_end_uses_last_line() {
        let err = ParseError::new("Unterminated character class", 50, "ab\ncd", None);
        let location = err.location();
        assert_eq!((location.line, location.column), (1, 2));
        assert_eq!(location.line_text, "cd");
    }

    #[test]
    fn test_location_counts_characters() {
        let err = ParseError::new("Unterminated group", 4, "é(b", None);
        assert_eq!(err.location().column, 3);
    }

    #[test]
    fn test_location_strips_carriage_return() {
        let err = ParseError::new("Unexpected trailing input", 0, "%flags i\r\n)", None);
        assert_eq!(err.location().line_text, "%flags i");
        let err = ParseError::new("Unmatched ')'", 10, "%flags i\r\n)", None);
        assert_eq!(err.location().line, 1);
    }

    #[test]
    fn test_hinted_attaches_hint() {
        let err = ParseError::hinted("Cannot quantify anchor", 1, "^*", &HintEngine::default());
        assert!(err.hint().is_some());
        let err = ParseError::hinted("Nothing known", 0, "x", &HintEngine::default());
        assert_eq!(err.hint(), None);
    }

    #[test]
    fn test_render_without_text() {
        let err = ParseError::new("Unterminated group", 7, "", None);
        assert_eq!(err.render(), "Unterminated group at position 7");
    }

    #[test]
    fn test_error_trait_object() {
        let err: Box<dyn std::error::Error> =
            Box::new(ParseError::new("Unmatched ')'", 0, ")", None));
        assert!(err.to_string().starts_with("STRling Parse Error: Unmatched ')'"));
    }
}
