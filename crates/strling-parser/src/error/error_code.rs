//! Normalized error codes.
//!
//! Codes are derived mechanically from the error message, so they need no
//! registry: `"Unterminated {m,n}"` becomes `unterminated_m_n`.

use std::fmt;

use serde::Serialize;

/// A snake-case code identifying an error message.
///
/// Built by lower-casing the message and collapsing every run of
/// non-alphanumeric characters into a single `_`, with no leading or
/// trailing underscore.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ErrorCode(String);

impl ErrorCode {
    /// Derives the code for `message`.
    pub fn from_message(message: &str) -> Self {
        let mut code = String::with_capacity(message.len());
        let mut pending_separator = false;
        for ch in message.chars() {
            if ch.is_alphanumeric() {
                if pending_separator && !code.is_empty() {
                    code.push('_');
                }
                pending_separator = false;
                code.extend(ch.to_lowercase());
            } else {
                pending_separator = true;
            }
        }
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
