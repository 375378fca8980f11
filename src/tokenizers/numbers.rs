use crate::{
    errors::errors::{ErrorImpl, NumberDefect},
    lexer::{
        state::State,
        tokens::{Token, TokenType, TokenValue},
    },
    MK_TOKEN,
};

use super::tokenizer::{Lexed, Tokenizer};

const DECIMAL_SEPARATOR: char = '.';

/// Integers and floats with an optional leading minus.
#[derive(Debug, Clone, Default)]
pub struct NumberTokenizer;

impl NumberTokenizer {
    fn is_number_char(c: char) -> bool {
        c.is_ascii_digit() || c == DECIMAL_SEPARATOR
    }
}

impl Tokenizer for NumberTokenizer {
    fn can_tokenize(&self, state: &State) -> bool {
        let c = state.char_at_cursor();

        c.is_ascii_digit() || (c == '-' && state.char_at_relative_position(1).is_ascii_digit())
    }

    fn tokenize(&self, state: &mut State) -> Lexed {
        let position = state.position();
        let start = state.cursor();

        if state.char_at_cursor() == '-' {
            state.advance(1);
        }

        let mut separators = 0;
        while !state.cursor_is_out_of_bounds() && Self::is_number_char(state.char_at_cursor()) {
            if state.char_at_cursor() == DECIMAL_SEPARATOR {
                separators += 1;
            }
            state.advance(1);
        }

        let literal = state.source_substring(start, state.cursor());

        let defect = if literal.ends_with(DECIMAL_SEPARATOR) {
            Some(NumberDefect::MissingDecimalPlaces)
        } else if separators > 1 {
            Some(NumberDefect::TooManySeparators { found: separators })
        } else {
            None
        };

        let (kind, value) = if separators > 0 {
            (TokenType::FLOAT, literal.parse::<f64>().ok().map(TokenValue::Float))
        } else {
            (TokenType::INTEGER, literal.parse::<i64>().ok().map(TokenValue::Integer))
        };

        let error = defect.map(|defect| {
            state.error(
                ErrorImpl::MalformedNumber {
                    literal: literal.clone(),
                    defect,
                },
                position,
                start,
            )
        });

        (MK_TOKEN!(kind, literal, value, position), error)
    }
}
