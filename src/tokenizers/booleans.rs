use crate::{
    lexer::{
        state::State,
        tokens::{Token, TokenType, TokenValue},
    },
    MK_TOKEN,
};

use super::{
    symbols::{CharacterSet, DEFAULT_SYMBOL_CONTINUE},
    tokenizer::{Lexed, Tokenizer},
};

const TRUE: &str = "true";
const FALSE: &str = "false";

/// `true` and `false`, only when they are not the prefix of a longer symbol.
#[derive(Debug, Clone)]
pub struct BooleanTokenizer {
    symbol_continue: CharacterSet,
}

impl BooleanTokenizer {
    pub fn new(symbol_continue: CharacterSet) -> Self {
        BooleanTokenizer { symbol_continue }
    }

    fn recognize(&self, state: &State) -> Option<bool> {
        [(TRUE, true), (FALSE, false)]
            .into_iter()
            .find(|(word, _)| {
                state.next_chars_are(word)
                    && !self
                        .symbol_continue
                        .contains(state.char_at_relative_position(word.len()))
            })
            .map(|(_, value)| value)
    }

    fn produce(&self, state: &mut State, value: bool) -> Lexed {
        let position = state.position();
        let literal = if value { TRUE } else { FALSE };
        state.advance(literal.len());

        (
            MK_TOKEN!(
                TokenType::BOOLEAN,
                literal.to_string(),
                Some(TokenValue::Bool(value)),
                position
            ),
            None,
        )
    }
}

impl Default for BooleanTokenizer {
    fn default() -> Self {
        BooleanTokenizer::new(DEFAULT_SYMBOL_CONTINUE.clone())
    }
}

impl Tokenizer for BooleanTokenizer {
    fn can_tokenize(&self, state: &State) -> bool {
        self.recognize(state).is_some()
    }

    fn tokenize(&self, state: &mut State) -> Lexed {
        match self.recognize(state) {
            Some(value) => self.produce(state, value),
            None => state.invalid_token(),
        }
    }

    fn try_tokenize(&self, state: &mut State) -> Option<Lexed> {
        self.recognize(state).map(|value| self.produce(state, value))
    }
}
