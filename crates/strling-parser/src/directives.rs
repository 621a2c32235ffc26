//! The `%` directive header.
//!
//! A pattern may open with directive lines:
//!
//! ```text
//! %flags [i, x]
//! %lang python
//! # comments and blank lines may sit between directives
//! (?<word> \w+ )
//! ```
//!
//! Only `%flags` affects parsing. `%lang` and `%engine` are advisory.

use log::trace;
use strling_core::Flags;

use crate::{
    error::{ParseError, Result},
    hint::HintEngine,
};

const DIRECTIVE_NAMES: [&str; 3] = ["flags", "lang", "engine"];

/// The parsed header of a pattern source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header {
    pub flags: Flags,
    /// Byte offset where pattern content begins.
    pub body_start: usize,
    /// Offset of the first directive found after pattern content started.
    pub misplaced: Option<usize>,
}

/// Reads the directive header of `text`.
///
/// The header is every leading line that is a directive, blank, or a `#`
/// comment. Without any directive nothing is treated as header, since a
/// pattern can legitimately start with `#`.
pub(crate) fn read_header(text: &str, hints: &HintEngine) -> Result<Header> {
    let mut flags = Flags::default();
    let mut offset = 0;
    let mut body_start = None;
    let mut seen_directive = false;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        let trimmed = content.trim_start();
        let directive_pos = offset + (content.len() - trimmed.len());

        if trimmed.is_empty() || trimmed.starts_with('#') {
            offset += line.len();
            continue;
        }
        let Some(directive) = trimmed.strip_prefix('%') else {
            body_start = Some(offset);
            break;
        };

        let name_len = directive
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(directive.len());
        let (name, args) = directive.split_at(name_len);
        match name {
            "flags" => {
                let args_pos = directive_pos + 1 + name_len;
                flags = read_flags(args, args_pos, flags, text, hints)?;
            }
            "lang" | "engine" => {
                trace!(directive = name, value = args.trim(); "Ignoring advisory directive");
            }
            _ => {
                return Err(ParseError::hinted(
                    format!("Unknown directive '%{name}'"),
                    directive_pos,
                    text,
                    hints,
                ));
            }
        }
        seen_directive = true;
        offset += line.len();
    }

    let body_start = match (seen_directive, body_start) {
        (false, _) => 0,
        (true, Some(start)) => start,
        (true, None) => text.len(),
    };
    Ok(Header {
        flags,
        body_start,
        misplaced: find_misplaced(text, body_start),
    })
}

/// Adds the letters of a `%flags` argument list to `flags`.
///
/// Letters may be separated by whitespace, commas and square brackets.
fn read_flags(
    args: &str,
    args_pos: usize,
    flags: Flags,
    text: &str,
    hints: &HintEngine,
) -> Result<Flags> {
    args.char_indices()
        .filter(|(_, c)| !matches!(c, ' ' | '\t' | ',' | '[' | ']'))
        .try_fold(flags, |flags, (i, c)| {
            flags.with_letter(c).ok_or_else(|| {
                ParseError::hinted(format!("Invalid flag '{c}'"), args_pos + i, text, hints)
            })
        })
}

/// Finds a directive line inside pattern content.
fn find_misplaced(text: &str, body_start: usize) -> Option<usize> {
    let body = text.get(body_start..)?;
    let mut offset = body_start;
    for line in body.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let is_directive = trimmed
            .strip_prefix('%')
            .is_some_and(|rest| DIRECTIVE_NAMES.iter().any(|name| rest.starts_with(name)));
        if is_directive {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(text: &str) -> Header {
        read_header(text, &HintEngine::default()).unwrap()
    }

    fn header_error(text: &str) -> ParseError {
        read_header(text, &HintEngine::default()).unwrap_err()
    }

    #[test]
    fn test_no_header() {
        let parsed = header("# not a comment\nabc");
        assert_eq!(parsed.body_start, 0);
        assert!(parsed.flags.is_empty());
        assert_eq!(parsed.misplaced, None);
    }

    #[test]
    fn test_flags_with_separators() {
        let text = "%flags [i, X]\n\tabc";
        let parsed = header(text);
        assert_eq!(parsed.flags.letters(), "ix");
        assert_eq!(&text[parsed.body_start..], "\tabc");
    }

    #[test]
    fn test_flags_accumulate_over_lines() {
        let parsed = header("%flags i\n%flags m\nabc");
        assert_eq!(parsed.flags.letters(), "im");
    }

    #[test]
    fn test_comments_and_blank_lines_belong_to_header() {
        let text = "\n# leading\n%lang python\n\n# between\n%engine pcre2\n%flags s\n# trailing\nabc";
        let parsed = header(text);
        assert_eq!(&text[parsed.body_start..], "abc");
        assert_eq!(parsed.flags.letters(), "s");
    }

    #[test]
    fn test_header_only() {
        let text = "%flags x\n";
        assert_eq!(header(text).body_start, text.len());
    }

    #[test]
    fn test_invalid_flag_position() {
        let err = header_error("%flags i q");
        assert_eq!(err.message(), "Invalid flag 'q'");
        assert_eq!(err.pos(), 9);
    }

    #[test]
    fn test_unknown_directive() {
        let err = header_error("%flags i\n  %dialect js\nabc");
        assert_eq!(err.message(), "Unknown directive '%dialect'");
        assert_eq!(err.pos(), 11);
    }

    #[test]
    fn test_misplaced_directive_is_recorded() {
        let text = "%flags i\nabc\n  %flags m";
        let parsed = header(text);
        assert_eq!(parsed.misplaced, Some(15));
        assert_eq!(&text[15..16], "%");
    }

    #[test]
    fn test_directive_without_header_is_misplaced() {
        assert_eq!(header("abc\n%engine pcre2").misplaced, Some(4));
        assert_eq!(header("100%").misplaced, None);
    }
}
