//! Scan state shared by the lexer and every tokenizer.
//!
//! The content buffer and the newline table are immutable for the whole
//! session and reference counted, so a [`Checkpoint`] only has to carry the
//! cursor, the cached position and the index of the next unconsumed newline.

use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorImpl},
    tokenizers::tokenizer::Lexed,
    Position, MK_TOKEN,
};

use super::{
    lookahead::LookaheadCache,
    tokens::{Token, TokenType},
};

/// Reserved end-of-input code point, appended once to every buffer.
pub const EOF_SENTINEL: char = '\u{3}';

/// Everything needed to roll a [`State`] back to an earlier token boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    cursor: usize,
    cached_position_cursor: usize,
    cached_position: Position,
    line_start: usize,
    next_newline: usize,
    current_token: Token,
}

impl Checkpoint {
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[derive(Debug)]
pub struct State {
    content: Rc<[char]>,
    content_length: usize,
    newline_offsets: Rc<[usize]>,

    cursor: usize,
    cached_position_cursor: usize,
    cached_position: Position,
    line_start: usize,
    next_newline: usize,
    omit_positions: bool,

    current_token: Token,
    lookahead_cache: LookaheadCache,
}

impl State {
    pub fn new(content: &str) -> Self {
        let mut chars: Vec<char> = content.chars().collect();
        let content_length = chars.len();

        let newline_offsets: Vec<usize> = chars
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == '\n')
            .map(|(i, _)| i)
            .collect();

        chars.push(EOF_SENTINEL);

        State {
            content: chars.into(),
            content_length,
            newline_offsets: newline_offsets.into(),
            cursor: 0,
            cached_position_cursor: 0,
            cached_position: Position::new(1, 1, 0),
            line_start: 0,
            next_newline: 0,
            omit_positions: false,
            current_token: Token::start_of_file(),
            lookahead_cache: LookaheadCache::default(),
        }
    }

    pub fn omitting_positions(mut self, omit: bool) -> Self {
        self.omit_positions = omit;
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn content_length(&self) -> usize {
        self.content_length
    }

    /// The input without the trailing sentinel.
    pub fn source(&self) -> &[char] {
        &self.content[..self.content_length]
    }

    /// Moves the cursor forward, never past the end of the input.
    pub fn advance(&mut self, amount: usize) {
        self.cursor = (self.cursor + amount).min(self.content_length);
    }

    pub fn cursor_is_out_of_bounds(&self) -> bool {
        self.cursor >= self.content_length
    }

    pub fn char_at_cursor(&self) -> char {
        self.char_at_position(self.cursor)
    }

    pub fn char_at_relative_position(&self, offset: usize) -> char {
        self.char_at_position(self.cursor + offset)
    }

    /// Returns the sentinel for any position past the input.
    pub fn char_at_position(&self, pos: usize) -> char {
        if pos >= self.content_length {
            return EOF_SENTINEL;
        }

        self.content[pos]
    }

    /// Checks if the chars from the cursor on match `chars`.
    pub fn next_chars_are(&self, chars: &str) -> bool {
        let mut offset = 0;

        for c in chars.chars() {
            if self.cursor + offset >= self.content_length || self.content[self.cursor + offset] != c {
                return false;
            }
            offset += 1;
        }

        true
    }

    pub fn source_substring(&self, start: usize, end: usize) -> String {
        let end = end.min(self.content_length);
        let start = start.min(end);

        self.content[start..end].iter().collect()
    }

    pub fn skip_whitespace(&mut self) {
        while !self.cursor_is_out_of_bounds() && self.char_at_cursor().is_whitespace() {
            self.cursor += 1;
        }
    }

    /// Position of the cursor.
    ///
    /// Reuses the cached position while the cursor stays on the same line
    /// and folds every newline the cursor has passed since the last call.
    /// Assumes the cursor only moved forward since then.
    pub fn position(&mut self) -> Position {
        if self.omit_positions {
            return Position::default();
        }

        if self.cursor == self.cached_position_cursor {
            return self.cached_position;
        }

        debug_assert!(self.cursor > self.cached_position_cursor);

        while let Some(&newline) = self.newline_offsets.get(self.next_newline) {
            if newline >= self.cursor {
                break;
            }

            self.cached_position.row += 1;
            self.line_start = newline + 1;
            self.next_newline += 1;
        }

        self.cached_position.col = self.cursor - self.line_start + 1;
        self.cached_position.offset = self.cursor;
        self.cached_position_cursor = self.cursor;

        self.cached_position
    }

    pub fn current_token(&self) -> &Token {
        &self.current_token
    }

    pub fn set_current_token(&mut self, token: Token) {
        self.current_token = token;
    }

    pub fn lookahead_cache(&self) -> &LookaheadCache {
        &self.lookahead_cache
    }

    pub fn lookahead_cache_mut(&mut self) -> &mut LookaheadCache {
        &mut self.lookahead_cache
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.cursor,
            cached_position_cursor: self.cached_position_cursor,
            cached_position: self.cached_position,
            line_start: self.line_start,
            next_newline: self.next_newline,
            current_token: self.current_token.clone(),
        }
    }

    /// Rolls back to `checkpoint`. The lookahead cache is left untouched.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.cursor = checkpoint.cursor;
        self.cached_position_cursor = checkpoint.cached_position_cursor;
        self.cached_position = checkpoint.cached_position;
        self.line_start = checkpoint.line_start;
        self.next_newline = checkpoint.next_newline;
        self.current_token = checkpoint.current_token;
    }

    pub fn error(&self, kind: ErrorImpl, position: Position, cursor: usize) -> Error {
        Error::new(kind, position, cursor, self.source())
    }

    pub fn eof_token(&mut self) -> Token {
        let position = self.position();
        MK_TOKEN!(TokenType::EOF, EOF_SENTINEL.to_string(), position)
    }

    /// Consumes the character at the cursor as an `Invalid` token.
    pub fn invalid_token(&mut self) -> Lexed {
        let position = self.position();
        let cursor = self.cursor;
        let character = self.char_at_cursor();
        self.advance(1);

        let token = MK_TOKEN!(TokenType::INVALID, character.to_string(), position);
        let error = self.error(ErrorImpl::UnrecognisedCharacter { character }, position, cursor);

        (token, Some(error))
    }
}
