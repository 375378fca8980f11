//! Cursor over tokens that have already been produced.
//!
//! A [`TokenCollection`] lets a parser run the structural helpers of
//! [`parse_utils`](super::parse_utils) over a finished token list instead of
//! a live [`Lexer`](super::lexer::Lexer). Every accessor is bounds checked
//! and returns `None` past either end.

use std::ops::Index;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    parse_utils::Enclosed,
    tokens::{Token, TokenType},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenCollection {
    tokens: Vec<Token>,
    cursor: usize,
    source: Vec<char>,
}

impl TokenCollection {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenCollection {
            tokens,
            cursor: 0,
            source: vec![],
        }
    }

    /// Attaches the text the tokens were produced from, so that errors
    /// carry a snippet of it.
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.chars().collect();
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor to `index`, clamped to one past the last token.
    pub fn seek(&mut self, index: usize) {
        self.cursor = index.min(self.tokens.len());
    }

    pub fn advance(&mut self, amount: usize) {
        self.seek(self.cursor.saturating_add(amount));
    }

    pub fn cursor_is_out_of_bounds(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// True on the `Eof` token and once the cursor has run off the end.
    pub fn reached_eof(&self) -> bool {
        self.token_at_cursor().map_or(true, |token| token.kind == TokenType::EOF)
    }

    /// Advances by one and returns the token landed on.
    pub fn next_token(&mut self) -> Option<&Token> {
        self.advance(1);
        self.token_at_cursor()
    }

    pub fn token_at_cursor(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    pub fn token_at_position(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// The token `offset` places from the cursor. Negative offsets look back.
    pub fn token_at_relative_position(&self, offset: isize) -> Option<&Token> {
        self.cursor
            .checked_add_signed(offset)
            .and_then(|index| self.tokens.get(index))
    }

    fn next_is(&self, kind: &TokenType) -> bool {
        self.token_at_relative_position(1).is_some_and(|token| token.is(kind))
    }

    fn error(&self, kind: ErrorImpl, token: Option<&Token>) -> Error {
        let position = token
            .or_else(|| self.tokens.last())
            .map_or(Position::default(), |token| token.position);

        Error::new(kind, position, position.offset, &self.source)
    }

    /// Collects the tokens strictly between the opener at the cursor and its
    /// matching closer.
    ///
    /// `start` and `end` of the result are token indices: the first token
    /// after the opener and the matching closer. On success the cursor rests
    /// on the closer.
    pub fn collect_tokens_between(&mut self, open: TokenType, close: TokenType) -> Result<Enclosed, Error> {
        match self.token_at_cursor() {
            Some(token) if token.is(&open) => {}
            token => {
                let found = token.map_or(TokenType::EOF, |token| token.kind.clone());
                return Err(self.error(ErrorImpl::NotAnOpener { expected: open, found }, token));
            }
        }

        let start = self.cursor + 1;
        let mut tokens = vec![];
        let mut level = 1;

        loop {
            let Some(token) = self.next_token() else {
                return Err(self.error(ErrorImpl::UnexpectedEndOfInput { closer: close }, None));
            };

            if token.kind == TokenType::EOF {
                let token = token.clone();
                return Err(self.error(ErrorImpl::UnexpectedEndOfInput { closer: close }, Some(&token)));
            }

            if token.is(&close) {
                level -= 1;

                if level == 0 {
                    return Ok(Enclosed {
                        tokens,
                        start,
                        end: self.cursor,
                    });
                }
            } else if token.is(&open) {
                level += 1;
            }

            tokens.push(token.clone());
        }
    }

    pub fn collect_tokens_between_parentheses(&mut self) -> Result<Enclosed, Error> {
        self.collect_tokens_between(TokenType::OPEN_PAREN, TokenType::CLOSE_PAREN)
    }

    pub fn collect_tokens_between_curly_braces(&mut self) -> Result<Enclosed, Error> {
        self.collect_tokens_between(TokenType::OPEN_CURLY, TokenType::CLOSE_CURLY)
    }

    /// Collects `token (delimiter token)*` starting at the cursor, where
    /// every token must be of type `kind`. The cursor rests on the last
    /// collected token.
    pub fn collect_tokens_delimited(&mut self, kind: TokenType, delimiter: TokenType) -> Result<Vec<Token>, Error> {
        self.collect_delimited(Some(kind), delimiter)
    }

    /// Like [`TokenCollection::collect_tokens_delimited`] with no type
    /// constraint.
    pub fn collect_any_token_delimited(&mut self, delimiter: TokenType) -> Result<Vec<Token>, Error> {
        self.collect_delimited(None, delimiter)
    }

    fn collect_delimited(&mut self, kind: Option<TokenType>, delimiter: TokenType) -> Result<Vec<Token>, Error> {
        let mut tokens = vec![];

        if self.reached_eof() {
            return Ok(tokens);
        }

        loop {
            let token = match self.token_at_cursor() {
                Some(token) if token.kind != TokenType::EOF => token.clone(),
                token => {
                    let closer = kind.unwrap_or(TokenType::ANY);
                    return Err(self.error(ErrorImpl::UnexpectedEndOfInput { closer }, token));
                }
            };

            if let Some(kind) = kind.as_ref().filter(|kind| !token.is(kind)) {
                return Err(self.error(
                    ErrorImpl::TypeMismatch {
                        expected: kind.clone(),
                        found: token.kind.clone(),
                    },
                    Some(&token),
                ));
            }

            tokens.push(token);

            if !self.next_is(&delimiter) {
                return Ok(tokens);
            }

            self.advance(2);
        }
    }

    /// Collects tokens from the cursor up to, not including, the first token
    /// of type `delimiter`. The cursor rests on the delimiter.
    ///
    /// Reaching `Eof` first is an [`ErrorImpl::UnexpectedEndOfInput`].
    pub fn collect_tokens_until(&mut self, delimiter: TokenType) -> Result<Vec<Token>, Error> {
        let mut tokens = vec![];

        loop {
            match self.token_at_cursor() {
                Some(token) if token.is(&delimiter) => return Ok(tokens),
                Some(token) if token.kind != TokenType::EOF => {
                    tokens.push(token.clone());
                    self.advance(1);
                }
                token => {
                    return Err(self.error(ErrorImpl::UnexpectedEndOfInput { closer: delimiter }, token));
                }
            }
        }
    }
}

impl From<Vec<Token>> for TokenCollection {
    fn from(tokens: Vec<Token>) -> Self {
        TokenCollection::new(tokens)
    }
}

impl Index<usize> for TokenCollection {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenCollection {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
