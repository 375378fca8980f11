use std::borrow::Cow;

use lazy_static::lazy_static;

use crate::{
    lexer::{
        state::State,
        tokens::{Token, TokenType},
    },
    MK_LITERAL, MK_TOKEN,
};

use super::tokenizer::{Lexed, Tokenizer};

lazy_static! {
    /// Operators, punctuation and whitespace recognized by default, longest first.
    pub static ref BUILTIN_LITERAL_TOKENS: Vec<LiteralToken> = sort_literal_tokens(vec![
        MK_LITERAL!(TokenType::ELLIPSES, "..."),
        MK_LITERAL!(TokenType::OPEN_CURLY, "{"),
        MK_LITERAL!(TokenType::CLOSE_CURLY, "}"),
        MK_LITERAL!(TokenType::OPEN_PAREN, "("),
        MK_LITERAL!(TokenType::CLOSE_PAREN, ")"),
        MK_LITERAL!(TokenType::OPEN_SQUARE, "["),
        MK_LITERAL!(TokenType::CLOSE_SQUARE, "]"),
        MK_LITERAL!(TokenType::COMMA, ","),
        MK_LITERAL!(TokenType::DOT, "."),
        MK_LITERAL!(TokenType::COLON, ":"),
        MK_LITERAL!(TokenType::SEMICOLON, ";"),
        MK_LITERAL!(TokenType::PLUS, "+"),
        MK_LITERAL!(TokenType::MINUS, "-"),
        MK_LITERAL!(TokenType::MULTIPLY, "*"),
        MK_LITERAL!(TokenType::DIVIDE, "/"),
        MK_LITERAL!(TokenType::MODULO, "%"),
        MK_LITERAL!(TokenType::ASSIGN, "="),
        MK_LITERAL!(TokenType::EQUAL, "=="),
        MK_LITERAL!(TokenType::NOT_EQUAL, "!="),
        MK_LITERAL!(TokenType::LESS_THAN, "<"),
        MK_LITERAL!(TokenType::GREATER_THAN, ">"),
        MK_LITERAL!(TokenType::LESS_THAN_OR_EQUAL, "<="),
        MK_LITERAL!(TokenType::GREATER_THAN_OR_EQUAL, ">="),
        MK_LITERAL!(TokenType::AND, "&&"),
        MK_LITERAL!(TokenType::OR, "||"),
        MK_LITERAL!(TokenType::NOT, "!"),
        MK_LITERAL!(TokenType::ARROW_RIGHT, "->"),
        MK_LITERAL!(TokenType::ARROW_LEFT, "<-"),
        MK_LITERAL!(TokenType::QUESTION_MARK, "?"),
        MK_LITERAL!(TokenType::TILDE, "~"),
        MK_LITERAL!(TokenType::AMPERSAND, "&"),
        MK_LITERAL!(TokenType::PIPE, "|"),
        MK_LITERAL!(TokenType::CARET, "^"),
        MK_LITERAL!(TokenType::DOLLAR, "$"),
        MK_LITERAL!(TokenType::HASH, "#"),
        MK_LITERAL!(TokenType::AT, "@"),
        MK_LITERAL!(TokenType::SPACE, " "),
        MK_LITERAL!(TokenType::TAB, "\t"),
        MK_LITERAL!(TokenType::NEWLINE, "\n"),
        MK_LITERAL!(TokenType::CARRIAGE_RETURN, "\r"),
        MK_LITERAL!(TokenType::FORM_FEED, "\u{c}"),
    ]);
}

/// A fixed string and the token type it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralToken {
    pub kind: TokenType,
    pub literal: Cow<'static, str>,
}

impl LiteralToken {
    pub fn new(kind: TokenType, literal: impl Into<Cow<'static, str>>) -> Self {
        LiteralToken {
            kind,
            literal: literal.into(),
        }
    }

    fn len(&self) -> usize {
        self.literal.chars().count()
    }
}

/// Orders `tokens` by descending literal length. Equal lengths keep their
/// relative order.
pub fn sort_literal_tokens(mut tokens: Vec<LiteralToken>) -> Vec<LiteralToken> {
    tokens.sort_by(|a, b| b.len().cmp(&a.len()));
    tokens
}

/// Greedy longest-match over a fixed-string table.
#[derive(Debug, Clone)]
pub struct LiteralTokenizer {
    literals: Vec<LiteralToken>,
}

impl LiteralTokenizer {
    pub fn new(literals: Vec<LiteralToken>) -> Self {
        let literals = literals
            .into_iter()
            .filter(|literal| !literal.literal.is_empty())
            .collect();

        LiteralTokenizer {
            literals: sort_literal_tokens(literals),
        }
    }

    pub fn literals(&self) -> &[LiteralToken] {
        &self.literals
    }

    fn recognize(&self, state: &State) -> Option<&LiteralToken> {
        self.literals
            .iter()
            .find(|literal| state.next_chars_are(&literal.literal))
    }

    fn produce(&self, state: &mut State, literal: &LiteralToken) -> Lexed {
        let position = state.position();
        state.advance(literal.len());

        (
            MK_TOKEN!(literal.kind.clone(), literal.literal.to_string(), position),
            None,
        )
    }
}

impl Default for LiteralTokenizer {
    fn default() -> Self {
        LiteralTokenizer::new(BUILTIN_LITERAL_TOKENS.clone())
    }
}

impl Tokenizer for LiteralTokenizer {
    fn can_tokenize(&self, state: &State) -> bool {
        self.recognize(state).is_some()
    }

    fn tokenize(&self, state: &mut State) -> Lexed {
        match self.recognize(state) {
            Some(literal) => self.produce(state, literal),
            None => state.invalid_token(),
        }
    }

    fn try_tokenize(&self, state: &mut State) -> Option<Lexed> {
        self.recognize(state)
            .map(|literal| self.produce(state, literal))
    }
}
