//! Character cursor over pattern source.
//!
//! [`Cursor`] wraps a winnow [`LocatingSlice`] so every position it reports is
//! a byte offset into the whole source, header included, even when parsing
//! starts partway into the text.

use winnow::{
    Parser as _,
    error::ModalResult,
    stream::{LocatingSlice, Location, Stream},
    token::{literal, take_while},
};

type Input<'a> = LocatingSlice<&'a str>;

/// Opaque saved position, restored with [`Cursor::reset`].
pub type Checkpoint<'a> = <Input<'a> as Stream>::Checkpoint;

/// Scanning state for one parse.
///
/// Besides the position, the cursor tracks whether free-spacing mode is on
/// and how deep it is inside character classes: insignificant whitespace is
/// only skipped in extended mode and never inside a class.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: Input<'a>,
    extended: bool,
    class_depth: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor over `text`, positioned at byte offset `start`.
    ///
    /// `start` must fall on a character boundary.
    pub fn new(text: &'a str, start: usize, extended: bool) -> Self {
        let mut input = LocatingSlice::new(text);
        let _ = input.next_slice(start.min(text.len()));
        Self {
            input,
            extended,
            class_depth: 0,
        }
    }

    /// Byte offset of the next character in the full source.
    pub fn pos(&self) -> usize {
        self.input.current_token_start()
    }

    pub fn eof(&self) -> bool {
        self.input.eof_offset() == 0
    }

    /// The next character, without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    /// The character `n` positions ahead, without consuming anything.
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.input.iter_offsets().nth(n).map(|(_, c)| c)
    }

    /// Consumes and returns the next character.
    pub fn take(&mut self) -> Option<char> {
        self.input.next_token()
    }

    /// Consumes `s` if the input continues with it.
    pub fn eat(&mut self, s: &str) -> bool {
        let matched: ModalResult<&'a str> = literal(s).parse_next(&mut self.input);
        matched.is_ok()
    }

    /// Consumes the longest prefix whose characters satisfy `pred`.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let taken: ModalResult<&'a str> = take_while(0.., pred).parse_next(&mut self.input);
        taken.unwrap_or_default()
    }

    pub fn checkpoint(&self) -> Checkpoint<'a> {
        self.input.checkpoint()
    }

    pub fn reset(&mut self, checkpoint: &Checkpoint<'a>) {
        self.input.reset(checkpoint);
    }

    pub fn extended(&self) -> bool {
        self.extended
    }

    pub fn in_class(&self) -> bool {
        self.class_depth > 0
    }

    pub fn enter_class(&mut self) {
        self.class_depth += 1;
    }

    pub fn leave_class(&mut self) {
        self.class_depth = self.class_depth.saturating_sub(1);
    }

    /// Skips whitespace and `#` comments in free-spacing mode.
    ///
    /// A no-op outside extended mode and inside character classes.
    pub fn skip_trivia(&mut self) {
        if !self.extended || self.in_class() {
            return;
        }
        loop {
            let spaces = self.eat_while(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
            if self.eat("#") {
                self.eat_while(|c| c != '\n');
                continue;
            }
            if spaces.is_empty() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_absolute() {
        let mut cursor = Cursor::new("%flags x\nab", 9, false);
        assert_eq!(cursor.pos(), 9);
        assert_eq!(cursor.take(), Some('a'));
        assert_eq!(cursor.pos(), 10);
        assert_eq!(cursor.peek(), Some('b'));
    }

    #[test]
    fn test_peek_and_take_at_end() {
        let mut cursor = Cursor::new("é", 0, false);
        assert_eq!(cursor.peek_nth(1), None);
        assert_eq!(cursor.take(), Some('é'));
        assert!(cursor.eof());
        assert_eq!(cursor.pos(), 2);
        assert_eq!(cursor.take(), None);
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_eat_only_consumes_on_match() {
        let mut cursor = Cursor::new("?<=x", 0, false);
        assert!(!cursor.eat("?<!"));
        assert_eq!(cursor.pos(), 0);
        assert!(cursor.eat("?<="));
        assert_eq!(cursor.pos(), 3);
    }

    #[test]
    fn test_checkpoint_reset() {
        let mut cursor = Cursor::new("{x}", 0, false);
        let start = cursor.checkpoint();
        cursor.take();
        cursor.eat_while(|c| c.is_ascii_digit());
        cursor.reset(&start);
        assert_eq!(cursor.peek(), Some('{'));
    }

    #[test]
    fn test_skip_trivia_in_extended_mode() {
        let mut cursor = Cursor::new("  # note\n\t a", 0, true);
        cursor.skip_trivia();
        assert_eq!(cursor.peek(), Some('a'));
    }

    #[test]
    fn test_skip_trivia_is_inert_outside_extended_mode() {
        let mut cursor = Cursor::new(" a", 0, false);
        cursor.skip_trivia();
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_skip_trivia_is_inert_inside_class() {
        let mut cursor = Cursor::new(" a", 0, true);
        cursor.enter_class();
        cursor.skip_trivia();
        assert_eq!(cursor.pos(), 0);
        cursor.leave_class();
        cursor.skip_trivia();
        assert_eq!(cursor.pos(), 1);
    }
}
