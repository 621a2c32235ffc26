//! Instructional hints for parse errors.
//!
//! [`HintEngine`] maps an error message to a short explanation of how to fix
//! it. Lookup is a substring match against an ordered rule table; the first
//! matching rule wins, so more specific patterns are listed before the general
//! ones they contain (`Unterminated group name` before `Unterminated group`).
//! A message that matches nothing simply has no hint.

/// Escape letters the parser recognizes after a backslash.
const KNOWN_ESCAPES: &str = "dDwWsSbBAZznrtfvxuUpPk0";

/// How a rule produces its hint.
#[derive(Debug, Clone, Copy)]
enum HintText {
    Fixed(&'static str),
    /// Built from the full error message.
    Derived(fn(&str) -> String),
}

/// One entry of the hint table.
#[derive(Debug, Clone, Copy)]
pub struct HintRule {
    pattern: &'static str,
    text: HintText,
}

impl HintRule {
    pub const fn fixed(pattern: &'static str, hint: &'static str) -> Self {
        Self {
            pattern,
            text: HintText::Fixed(hint),
        }
    }

    pub const fn derived(pattern: &'static str, build: fn(&str) -> String) -> Self {
        Self {
            pattern,
            text: HintText::Derived(build),
        }
    }

    /// The message substring this rule reacts to.
    pub fn pattern(&self) -> &'static str {
        self.pattern
    }

    fn hint_for(&self, message: &str) -> String {
        match self.text {
            HintText::Fixed(hint) => hint.to_string(),
            HintText::Derived(build) => build(message),
        }
    }
}

static STANDARD_RULES: &[HintRule] = &[
    HintRule::fixed(
        "Unterminated group name",
        "A named group is written (?<name>...). Close the name with '>' before the group body.",
    ),
    HintRule::fixed(
        "Unterminated group",
        "This group was opened with '(' but never closed. Add a matching ')', or write '\\(' to match a literal parenthesis.",
    ),
    HintRule::fixed(
        "Unterminated named backref",
        "A named backreference is written \\k<name>. Close the name with '>'.",
    ),
    HintRule::fixed(
        "Unterminated character class",
        "This character class was opened with '[' but never closed. Add a matching ']', or write '\\[' to match a literal bracket.",
    ),
    HintRule::fixed(
        "Unterminated lookahead",
        "A lookahead (?=...) or (?!...) must be closed with ')'.",
    ),
    HintRule::fixed(
        "Unterminated lookbehind",
        "A lookbehind (?<=...) or (?<!...) must be closed with ')'.",
    ),
    HintRule::fixed(
        "Unterminated atomic group",
        "An atomic group (?>...) must be closed with ')'.",
    ),
    HintRule::fixed(
        "Unterminated {m,n}",
        "A bounded quantifier looks like {m,n} or {m,}: digits, a comma, optional digits, then '}'.",
    ),
    HintRule::fixed(
        "Unterminated {n}",
        "An exact quantifier looks like {n}: digits followed by '}'.",
    ),
    HintRule::fixed(
        "Unterminated \\x{...}",
        "A braced hex escape looks like \\x{1F600}. Close it with '}'.",
    ),
    HintRule::fixed(
        "Unterminated \\u{...}",
        "A braced Unicode escape looks like \\u{1F600}. Close it with '}'.",
    ),
    HintRule::fixed(
        "Unterminated \\p{...}",
        "A Unicode property escape looks like \\p{Letter}. Close the property name with '}'.",
    ),
    HintRule::fixed(
        "Invalid quantifier range",
        "The minimum of {m,n} must not exceed the maximum. Swap the bounds, for example {2,5} rather than {5,2}.",
    ),
    HintRule::derived("Invalid quantifier", quantifier_hint),
    HintRule::fixed(
        "Quantifier bound too large",
        "Quantifier bounds must fit in 32 bits. Use an open bound such as {m,} for very large counts.",
    ),
    HintRule::fixed(
        "Invalid character range",
        "Range endpoints must ascend by code point: write [a-z], not [z-a].",
    ),
    HintRule::fixed(
        "Empty character class",
        "A class needs at least one member. A ']' right after '[' is taken literally only when more members follow, as in []a].",
    ),
    HintRule::fixed(
        "Invalid flag",
        "The flags are i (ignore case), m (multiline), s (dot matches newline), u (unicode) and x (free spacing).",
    ),
    HintRule::fixed(
        "Unknown directive",
        "The header understands %flags, %lang and %engine.",
    ),
    HintRule::fixed(
        "Directive must appear at the start",
        "Move this directive into the header at the top of the pattern, before any pattern content.",
    ),
    HintRule::derived("Unknown escape sequence", unknown_escape_hint),
    HintRule::fixed(
        "Incomplete escape",
        "The pattern ends with a lone backslash. Write '\\\\' to match a literal backslash.",
    ),
    HintRule::fixed(
        "Unmatched ')'",
        "This ')' closes nothing. Remove it, or write '\\)' to match a literal parenthesis.",
    ),
    HintRule::fixed(
        "Unexpected trailing input",
        "The pattern continues after a complete expression. Look for an unbalanced parenthesis or a stray character.",
    ),
    HintRule::fixed(
        "Cannot quantify anchor",
        "Anchors match a position, not a character, so there is nothing to repeat. Remove the quantifier or quantify the content next to the anchor.",
    ),
    HintRule::fixed(
        "Backreference to undefined group",
        "A backreference can only refer to a group that has already been opened to its left. Check the group number or name.",
    ),
    HintRule::fixed(
        "Duplicate group name",
        "Each named group needs a distinct name. Rename one of them.",
    ),
    HintRule::fixed(
        "Invalid group name",
        "Group names start with a letter or '_' and continue with letters, digits or '_'.",
    ),
    HintRule::fixed(
        "Empty alternation branch",
        "Two '|' in a row leave an empty branch. Write 'a|b' rather than 'a||b', or use a quantifier such as (?:a)? for optional content.",
    ),
    HintRule::fixed(
        "Alternation lacks left-hand side",
        "'|' needs an alternative before it. Write 'a|b', not '|b'.",
    ),
    HintRule::fixed(
        "Alternation lacks right-hand side",
        "'|' needs an alternative after it. Write 'a|b', not 'a|'.",
    ),
    HintRule::fixed(
        "Expected '<' after \\k",
        "A named backreference is written \\k<name>.",
    ),
    HintRule::fixed(
        "Inline modifiers",
        "Set flags for the whole pattern with a %flags directive in the header instead.",
    ),
    HintRule::fixed(
        "Invalid \\xHH escape",
        "\\x takes exactly two hex digits, as in \\x41, or a braced value, as in \\x{41}.",
    ),
    HintRule::fixed(
        "Invalid \\x{...} code point",
        "The braces must hold hex digits naming a Unicode scalar value, at most 10FFFF and outside D800-DFFF.",
    ),
    HintRule::fixed(
        "Invalid \\uHHHH",
        "\\u takes exactly four hex digits, as in \\u00E9, or a braced value, as in \\u{E9}.",
    ),
    HintRule::fixed(
        "Invalid \\u{...} code point",
        "The braces must hold hex digits naming a Unicode scalar value, at most 10FFFF and outside D800-DFFF.",
    ),
    HintRule::fixed(
        "Invalid \\UHHHHHHHH",
        "\\U takes exactly eight hex digits, as in \\U0001F600.",
    ),
    HintRule::fixed(
        "Expected { after \\p/\\P",
        "Unicode property escapes need braces around the property name, as in \\p{L} or \\P{Greek}.",
    ),
];

/// Lookup table from error messages to fix-it hints.
///
/// The engine is a plain copyable value over a static table, so parsers
/// construct their own instead of sharing one.
#[derive(Debug, Clone, Copy)]
pub struct HintEngine {
    rules: &'static [HintRule],
}

impl Default for HintEngine {
    fn default() -> Self {
        Self {
            rules: STANDARD_RULES,
        }
    }
}

impl HintEngine {
    /// Creates an engine over a custom rule table.
    pub fn with_rules(rules: &'static [HintRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [HintRule] {
        self.rules
    }

    /// Returns the hint for `message`, if any rule matches.
    ///
    /// # Examples
    ///
    /// ```
    /// # use strling_parser::HintEngine;
    /// let hints = HintEngine::default();
    /// assert!(hints.lookup("Cannot quantify anchor").is_some());
    /// assert_eq!(hints.lookup("something else entirely"), None);
    /// ```
    pub fn lookup(&self, message: &str) -> Option<String> {
        self.rules
            .iter()
            .find(|rule| message.contains(rule.pattern))
            .map(|rule| rule.hint_for(message))
    }
}

/// The character quoted in a message such as `Invalid quantifier '*'`.
fn quoted_char(message: &str) -> Option<char> {
    let start = message.find('\'')?;
    message[start + 1..].chars().next()
}

fn quantifier_hint(message: &str) -> String {
    let quantifier = quoted_char(message).unwrap_or('*');
    format!(
        "The quantifier '{quantifier}' has nothing to repeat here. Put it after a character, class or group, or write '\\{quantifier}' to match it literally."
    )
}

fn unknown_escape_hint(message: &str) -> String {
    let Some(escaped) = message
        .rfind('\\')
        .and_then(|i| message[i + 1..].chars().next())
    else {
        return "This is not a recognized escape sequence.".to_string();
    };

    let mut hint = format!("'\\{escaped}' is not a recognized escape sequence.");
    let flipped = if escaped.is_uppercase() {
        escaped.to_lowercase().next()
    } else {
        escaped.to_uppercase().next()
    };
    if let Some(flipped) = flipped.filter(|c| *c != escaped && KNOWN_ESCAPES.contains(*c)) {
        hint.push_str(&format!(" Did you mean '\\{flipped}'?"));
    }
    hint.push_str(&format!(
        " To match a literal '{escaped}', drop the backslash."
    ));
    hint
}
