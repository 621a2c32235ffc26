//! Leaf types shared by the AST and the IR.
//!
//! These carry no children, so both trees reuse them unchanged: lowering an
//! anchor, a quantifier bound or a class escape is a plain move.

use std::fmt;

use serde::{Serialize, Serializer, ser::SerializeMap};

/// A zero-width position assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AnchorKind {
    /// `^`
    Start,
    /// `$`
    End,
    /// `\b`
    WordBoundary,
    /// `\B`
    NotWordBoundary,
    /// `\A`
    AbsoluteStart,
    /// `\z`
    AbsoluteEnd,
    /// `\Z`
    EndBeforeFinalNewline,
}

impl AnchorKind {
    /// The PCRE2 spelling of this anchor.
    pub fn as_pcre2(&self) -> &'static str {
        match self {
            AnchorKind::Start => "^",
            AnchorKind::End => "$",
            AnchorKind::WordBoundary => r"\b",
            AnchorKind::NotWordBoundary => r"\B",
            AnchorKind::AbsoluteStart => r"\A",
            AnchorKind::AbsoluteEnd => r"\z",
            AnchorKind::EndBeforeFinalNewline => r"\Z",
        }
    }
}

/// Backtracking behavior of a quantifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum QuantMode {
    #[default]
    Greedy,
    Lazy,
    Possessive,
}

/// Upper bound of a quantifier.
///
/// Serializes as a number, or as the string `"Inf"` when unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    Finite(u32),
    Inf,
}

impl Bound {
    /// Returns the bound if it is finite.
    pub fn finite(&self) -> Option<u32> {
        match self {
            Bound::Finite(n) => Some(*n),
            Bound::Inf => None,
        }
    }

    /// Returns `true` for an unbounded maximum.
    pub fn is_inf(&self) -> bool {
        matches!(self, Bound::Inf)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Finite(n) => write!(f, "{n}"),
            Bound::Inf => write!(f, "Inf"),
        }
    }
}

impl Serialize for Bound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Bound::Finite(n) => serializer.serialize_u32(*n),
            Bound::Inf => serializer.serialize_str("Inf"),
        }
    }
}

/// Direction of a lookaround.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LookDir {
    Ahead,
    Behind,
}

/// What a backreference points at. Exactly one target is ever set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum BackrefTarget {
    #[serde(rename = "byIndex")]
    Index(u32),
    #[serde(rename = "byName")]
    Name(String),
}

/// A class shorthand escape: `\d \D \w \W \s \S` or a Unicode property
/// `\p{..}` / `\P{..}`.
///
/// Serializes as `{"type": <letter>}`, plus `"property"` for `p`/`P`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassEscape {
    Digit,
    NotDigit,
    Word,
    NotWord,
    Space,
    NotSpace,
    Property(String),
    NotProperty(String),
}

impl ClassEscape {
    /// Maps a shorthand letter (`d D w W s S`) to its escape.
    pub fn from_shorthand(letter: char) -> Option<Self> {
        match letter {
            'd' => Some(ClassEscape::Digit),
            'D' => Some(ClassEscape::NotDigit),
            'w' => Some(ClassEscape::Word),
            'W' => Some(ClassEscape::NotWord),
            's' => Some(ClassEscape::Space),
            'S' => Some(ClassEscape::NotSpace),
            _ => None,
        }
    }

    /// Builds a property escape; `negated` selects `\P`.
    pub fn property(name: impl Into<String>, negated: bool) -> Self {
        if negated {
            ClassEscape::NotProperty(name.into())
        } else {
            ClassEscape::Property(name.into())
        }
    }

    /// The escape letter as written after the backslash.
    pub fn letter(&self) -> char {
        match self {
            ClassEscape::Digit => 'd',
            ClassEscape::NotDigit => 'D',
            ClassEscape::Word => 'w',
            ClassEscape::NotWord => 'W',
            ClassEscape::Space => 's',
            ClassEscape::NotSpace => 'S',
            ClassEscape::Property(_) => 'p',
            ClassEscape::NotProperty(_) => 'P',
        }
    }

    /// The property name of a `\p`/`\P` escape.
    pub fn property_name(&self) -> Option<&str> {
        match self {
            ClassEscape::Property(name) | ClassEscape::NotProperty(name) => Some(name),
            _ => None,
        }
    }

    /// Returns `true` for Unicode property escapes.
    pub fn is_property(&self) -> bool {
        self.property_name().is_some()
    }

    /// The complementary escape (`d` ↔ `D`, `p` ↔ `P`, ...).
    pub fn complement(&self) -> Self {
        match self {
            ClassEscape::Digit => ClassEscape::NotDigit,
            ClassEscape::NotDigit => ClassEscape::Digit,
            ClassEscape::Word => ClassEscape::NotWord,
            ClassEscape::NotWord => ClassEscape::Word,
            ClassEscape::Space => ClassEscape::NotSpace,
            ClassEscape::NotSpace => ClassEscape::Space,
            ClassEscape::Property(name) => ClassEscape::NotProperty(name.clone()),
            ClassEscape::NotProperty(name) => ClassEscape::Property(name.clone()),
        }
    }
}

impl fmt::Display for ClassEscape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.property_name() {
            Some(name) => write!(f, "\\{}{{{}}}", self.letter(), name),
            None => write!(f, "\\{}", self.letter()),
        }
    }
}

impl Serialize for ClassEscape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let property = self.property_name();
        let mut map = serializer.serialize_map(Some(1 + usize::from(property.is_some())))?;
        map.serialize_entry("type", &self.letter())?;
        if let Some(name) = property {
            map.serialize_entry("property", name)?;
        }
        map.end()
    }
}
