//! Severity levels for diagnostics.

use std::fmt;

use serde::{Serialize, Serializer};

/// The severity of a diagnostic.
///
/// The parser only ever fails, so there is a single level. In editor records
/// it serializes as the protocol's numeric code for an error, `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A fatal problem: parsing stopped here.
    #[default]
    Error,
}

impl Severity {
    /// The editor protocol's numeric severity.
    pub fn as_protocol_code(&self) -> u8 {
        match self {
            Severity::Error => 1,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_protocol_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Severity::Error.to_string(), "Error");
    }

    #[test]
    fn test_serializes_as_protocol_code() {
        assert_eq!(serde_json::to_value(Severity::Error).unwrap(), 1);
    }
}
