//! Pattern-wide modifier flags.

use std::fmt;

use serde::Serialize;

/// The five independent modifiers a pattern can carry.
///
/// Flags are read from the `%flags` directive and emitted as an inline
/// modifier group. Once parsed they are never mutated; combining two sets
/// produces a new value.
///
/// # Examples
///
/// ```
/// use strling_core::Flags;
///
/// let flags = Flags::from_letters("i, x");
/// assert!(flags.ignore_case());
/// assert!(flags.extended());
/// assert_eq!(flags.letters(), "ix");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flags {
    ignore_case: bool,
    multiline: bool,
    dot_all: bool,
    unicode: bool,
    extended: bool,
}

impl Flags {
    /// Canonical letter order used when emitting flags.
    pub const LETTERS: [char; 5] = ['i', 'm', 's', 'u', 'x'];

    /// Creates a flag set from explicit values.
    pub fn new(
        ignore_case: bool,
        multiline: bool,
        dot_all: bool,
        unicode: bool,
        extended: bool,
    ) -> Self {
        Self {
            ignore_case,
            multiline,
            dot_all,
            unicode,
            extended,
        }
    }

    /// Builds a flag set from a string of flag letters.
    ///
    /// Letters are case-insensitive. Characters that are not flag letters
    /// (separators, unknown letters) are ignored; rejecting them is the
    /// caller's decision.
    pub fn from_letters(letters: &str) -> Self {
        letters.chars().fold(Self::default(), |flags, ch| {
            flags.with_letter(ch).unwrap_or(flags)
        })
    }

    /// Returns a copy with the flag named by `letter` set, or `None` if
    /// `letter` does not name a flag.
    pub fn with_letter(self, letter: char) -> Option<Self> {
        let mut flags = self;
        match letter.to_ascii_lowercase() {
            'i' => flags.ignore_case = true,
            'm' => flags.multiline = true,
            's' => flags.dot_all = true,
            'u' => flags.unicode = true,
            'x' => flags.extended = true,
            _ => return None,
        }
        Some(flags)
    }

    /// Returns the union of two flag sets.
    pub fn union(self, other: Self) -> Self {
        Self {
            ignore_case: self.ignore_case || other.ignore_case,
            multiline: self.multiline || other.multiline,
            dot_all: self.dot_all || other.dot_all,
            unicode: self.unicode || other.unicode,
            extended: self.extended || other.extended,
        }
    }

    /// Case-insensitive matching (`i`).
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// `^` and `$` match at line boundaries (`m`).
    pub fn multiline(&self) -> bool {
        self.multiline
    }

    /// `.` also matches newlines (`s`).
    pub fn dot_all(&self) -> bool {
        self.dot_all
    }

    /// Unicode-aware matching (`u`).
    pub fn unicode(&self) -> bool {
        self.unicode
    }

    /// Free-spacing mode (`x`).
    pub fn extended(&self) -> bool {
        self.extended
    }

    /// Returns `true` if no flag is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The set flags as letters, in canonical `imsux` order.
    pub fn letters(&self) -> String {
        let set = [
            self.ignore_case,
            self.multiline,
            self.dot_all,
            self.unicode,
            self.extended,
        ];
        Self::LETTERS
            .iter()
            .zip(set)
            .filter_map(|(letter, on)| on.then_some(*letter))
            .collect()
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_letters_ignores_unknown_and_separators() {
        let flags = Flags::from_letters("[m, q s]");
        assert_eq!(flags, Flags::new(false, true, true, false, false));
    }

    #[test]
    fn test_from_letters_is_case_insensitive() {
        assert_eq!(Flags::from_letters("IX"), Flags::from_letters("ix"));
    }

    #[test]
    fn test_letters_use_canonical_order() {
        let flags = Flags::from_letters("xusmi");
        assert_eq!(flags.letters(), "imsux");
        assert_eq!(flags.to_string(), "imsux");
    }

    #[test]
    fn test_with_letter_rejects_unknown() {
        assert_eq!(Flags::default().with_letter('q'), None);
        assert!(Flags::default().with_letter('u').unwrap().unicode());
    }

    #[test]
    fn test_union() {
        let merged = Flags::from_letters("i").union(Flags::from_letters("x"));
        assert_eq!(merged.letters(), "ix");
        assert!(Flags::default().is_empty());
        assert!(!merged.is_empty());
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(Flags::from_letters("is")).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "ignoreCase": true,
                "multiline": false,
                "dotAll": true,
                "unicode": false,
                "extended": false,
            })
        );
    }
}
