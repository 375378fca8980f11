use std::borrow::Cow;

use crate::{
    errors::errors::ErrorImpl,
    lexer::{
        state::State,
        tokens::{Token, TokenType, TokenValue},
    },
    Position, MK_TOKEN,
};

use super::tokenizer::{Lexed, Tokenizer};

/// Delimiter bounding a string span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEnclosure {
    pub kind: TokenType,
    pub delimiter: Cow<'static, str>,
    pub escapable: bool,
}

impl StringEnclosure {
    pub const DOUBLE_QUOTE: StringEnclosure = StringEnclosure {
        kind: TokenType::DOUBLE_QUOTE_STRING,
        delimiter: Cow::Borrowed("\""),
        escapable: true,
    };
    pub const SINGLE_QUOTE: StringEnclosure = StringEnclosure {
        kind: TokenType::SINGLE_QUOTE_STRING,
        delimiter: Cow::Borrowed("'"),
        escapable: false,
    };
    pub const BACKTICK: StringEnclosure = StringEnclosure {
        kind: TokenType::BACKTICK_STRING,
        delimiter: Cow::Borrowed("`"),
        escapable: false,
    };
    pub const TRIPLE_BACKTICK: StringEnclosure = StringEnclosure {
        kind: TokenType::TRIPLE_BACKTICK_STRING,
        delimiter: Cow::Borrowed("```"),
        escapable: false,
    };

    pub fn new(kind: TokenType, delimiter: impl Into<Cow<'static, str>>, escapable: bool) -> Self {
        StringEnclosure {
            kind,
            delimiter: delimiter.into(),
            escapable,
        }
    }

    /// Scans the string starting at the cursor, which must sit on the
    /// opening delimiter.
    pub fn tokenize(&self, state: &mut State) -> Lexed {
        let mut delimiter = self.delimiter.chars();

        match (delimiter.next(), delimiter.next()) {
            (Some(delimiter), None) if self.escapable => self.tokenize_escapable(state, delimiter),
            (Some(delimiter), None) => self.tokenize_single_char(state, delimiter),
            _ => self.tokenize_multi_char(state),
        }
    }

    fn tokenize_escapable(&self, state: &mut State, delimiter: char) -> Lexed {
        let position = state.position();
        let start = state.cursor();
        state.advance(1);

        let mut escaped = false;
        while !state.cursor_is_out_of_bounds() && (state.char_at_cursor() != delimiter || escaped) {
            escaped = state.char_at_cursor() == '\\' && state.char_at_relative_position(1) == delimiter;
            state.advance(1);
        }

        self.finish(state, position, start, 1)
    }

    fn tokenize_single_char(&self, state: &mut State, delimiter: char) -> Lexed {
        let position = state.position();
        let start = state.cursor();
        state.advance(1);

        while !state.cursor_is_out_of_bounds() && state.char_at_cursor() != delimiter {
            state.advance(1);
        }

        self.finish(state, position, start, 1)
    }

    fn tokenize_multi_char(&self, state: &mut State) -> Lexed {
        let delimiter_len = self.delimiter.chars().count();
        let position = state.position();
        let start = state.cursor();
        state.advance(delimiter_len);

        while !state.cursor_is_out_of_bounds() && !state.next_chars_are(&self.delimiter) {
            state.advance(1);
        }

        self.finish(state, position, start, delimiter_len)
    }

    /// Consumes the closing delimiter found at the cursor, or reports the
    /// string as unterminated when the input ran out first.
    fn finish(&self, state: &mut State, position: Position, start: usize, delimiter_len: usize) -> Lexed {
        if state.cursor_is_out_of_bounds() {
            let token = MK_TOKEN!(
                self.kind.clone(),
                state.source_substring(start, state.cursor()),
                position
            );
            let error = state.error(
                ErrorImpl::UnterminatedString {
                    delimiter: self.delimiter.to_string(),
                },
                position,
                start,
            );

            return (token, Some(error));
        }

        let value = state.source_substring(start + delimiter_len, state.cursor());
        state.advance(delimiter_len);

        let token = MK_TOKEN!(
            self.kind.clone(),
            state.source_substring(start, state.cursor()),
            Some(TokenValue::String(value)),
            position
        );

        (token, None)
    }
}

/// Tries each configured enclosure, in order, as a prefix at the cursor.
#[derive(Debug, Clone)]
pub struct StringTokenizer {
    enclosures: Vec<StringEnclosure>,
}

impl StringTokenizer {
    pub fn new(enclosures: Vec<StringEnclosure>) -> Self {
        let enclosures = enclosures
            .into_iter()
            .filter(|enclosure| !enclosure.delimiter.is_empty())
            .collect();

        StringTokenizer { enclosures }
    }

    pub fn enclosures(&self) -> &[StringEnclosure] {
        &self.enclosures
    }

    fn recognize(&self, state: &State) -> Option<&StringEnclosure> {
        self.enclosures
            .iter()
            .find(|enclosure| state.next_chars_are(&enclosure.delimiter))
    }
}

impl Default for StringTokenizer {
    fn default() -> Self {
        StringTokenizer::new(vec![StringEnclosure::SINGLE_QUOTE, StringEnclosure::DOUBLE_QUOTE])
    }
}

impl Tokenizer for StringTokenizer {
    fn can_tokenize(&self, state: &State) -> bool {
        self.recognize(state).is_some()
    }

    fn tokenize(&self, state: &mut State) -> Lexed {
        match self.recognize(state) {
            Some(enclosure) => enclosure.tokenize(state),
            None => state.invalid_token(),
        }
    }

    fn try_tokenize(&self, state: &mut State) -> Option<Lexed> {
        self.recognize(state).map(|enclosure| enclosure.tokenize(state))
    }
}
