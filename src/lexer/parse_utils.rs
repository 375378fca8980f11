//! Nesting-aware extraction helpers for parsers built on top of [`Lexer`].
//!
//! The iterators borrow the lexer mutably and consume tokens as they go, so
//! once one is dropped the lexer continues right after the last token it
//! yielded (after the matching closer for [`TokensBetween`]).

use crate::{
    errors::errors::{Error, ErrorImpl},
    tokenizers::tokenizer::Lexed,
};

use super::{
    lexer::Lexer,
    tokens::{Token, TokenType},
};

/// Tokens found between an opener and its matching closer.
///
/// From a [`Lexer`] scan the bounds are code point offsets. From a
/// [`TokenCollection`](super::collection::TokenCollection) they are token
/// indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Enclosed {
    pub tokens: Vec<Token>,
    /// Offset right after the opener.
    pub start: usize,
    /// Offset of the matching closer.
    pub end: usize,
}

/// Yields every token strictly inside a balanced pair.
///
/// Hitting the end of input before the pair balances yields the `Eof`
/// token with an [`ErrorImpl::UnexpectedEndOfInput`] error and ends the
/// iteration.
pub struct TokensBetween<'a> {
    lexer: &'a mut Lexer,
    open: TokenType,
    close: TokenType,
    level: usize,
    start: usize,
    end: Option<usize>,
    done: bool,
}

impl TokensBetween<'_> {
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset of the matching closer, known once it has been consumed.
    pub fn end(&self) -> Option<usize> {
        self.end
    }
}

impl Iterator for TokensBetween<'_> {
    type Item = Lexed;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (token, error) = self.lexer.next_token();

        if token.kind == TokenType::EOF {
            self.done = true;
            let error = error.unwrap_or_else(|| {
                self.lexer.state().error(
                    ErrorImpl::UnexpectedEndOfInput {
                        closer: self.close.clone(),
                    },
                    token.position,
                    self.lexer.cursor(),
                )
            });

            return Some((token, Some(error)));
        }

        if token.kind == self.close {
            self.level -= 1;

            if self.level == 0 {
                self.done = true;
                self.end = Some(self.lexer.cursor() - token.len());
                return None;
            }
        } else if token.kind == self.open {
            self.level += 1;
        }

        Some((token, error))
    }
}

/// Yields a delimiter separated sequence, starting with the current token.
///
/// A one-token lookahead decides whether the sequence continues. When a
/// type is expected, tokens of another type carry an
/// [`ErrorImpl::TypeMismatch`] error but do not stop the iteration.
pub struct TokensDelimited<'a> {
    lexer: &'a mut Lexer,
    kind: Option<TokenType>,
    delimiter: TokenType,
    started: bool,
    done: bool,
}

impl TokensDelimited<'_> {
    fn unexpected_end(&self, token: &Token) -> Error {
        self.lexer.state().error(
            ErrorImpl::UnexpectedEndOfInput {
                closer: self.kind.clone().unwrap_or(TokenType::ANY),
            },
            token.position,
            self.lexer.cursor(),
        )
    }
}

impl Iterator for TokensDelimited<'_> {
    type Item = Lexed;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (token, error) = if !self.started {
            self.started = true;

            let token = self.lexer.current_token().clone();
            if token.kind == TokenType::EOF {
                self.done = true;
                return None;
            }

            (token, None)
        } else {
            if !self.lexer.next_token_is(self.delimiter.clone()) {
                self.done = true;
                return None;
            }

            let (_, delimiter_error) = self.lexer.next_token();
            let (token, error) = self.lexer.next_token();

            if token.kind == TokenType::EOF {
                self.done = true;
                let error = error.unwrap_or_else(|| self.unexpected_end(&token));
                return Some((token, Some(error)));
            }

            (token, error.or(delimiter_error))
        };

        let error = error.or_else(|| match &self.kind {
            Some(kind) if !token.is(kind) => Some(self.lexer.state().error(
                ErrorImpl::TypeMismatch {
                    expected: kind.clone(),
                    found: token.kind.clone(),
                },
                token.position,
                token.position.offset,
            )),
            _ => None,
        });

        Some((token, error))
    }
}

impl Lexer {
    /// Scans the tokens between the current token, which must be of type
    /// `open`, and its matching `close`.
    pub fn iterate_tokens_between(&mut self, open: TokenType, close: TokenType) -> Result<TokensBetween<'_>, Error> {
        let current = self.current_token();

        if current.kind != open {
            return Err(self.state().error(
                ErrorImpl::NotAnOpener {
                    expected: open,
                    found: current.kind.clone(),
                },
                current.position,
                current.position.offset,
            ));
        }

        Ok(TokensBetween {
            start: self.cursor(),
            lexer: self,
            open,
            close,
            level: 1,
            end: None,
            done: false,
        })
    }

    pub fn iterate_tokens_between_parentheses(&mut self) -> Result<TokensBetween<'_>, Error> {
        self.iterate_tokens_between(TokenType::OPEN_PAREN, TokenType::CLOSE_PAREN)
    }

    pub fn iterate_tokens_between_curly_braces(&mut self) -> Result<TokensBetween<'_>, Error> {
        self.iterate_tokens_between(TokenType::OPEN_CURLY, TokenType::CLOSE_CURLY)
    }

    /// Eager form of [`Lexer::iterate_tokens_between`]. Stops at the first
    /// error.
    pub fn collect_tokens_between(&mut self, open: TokenType, close: TokenType) -> Result<Enclosed, Error> {
        let mut iterator = self.iterate_tokens_between(open, close)?;
        let mut tokens = vec![];

        for (token, error) in iterator.by_ref() {
            if let Some(error) = error {
                return Err(error);
            }

            tokens.push(token);
        }

        let start = iterator.start();
        let end = iterator.end().unwrap_or(start);

        Ok(Enclosed { tokens, start, end })
    }

    pub fn collect_tokens_between_parentheses(&mut self) -> Result<Enclosed, Error> {
        self.collect_tokens_between(TokenType::OPEN_PAREN, TokenType::CLOSE_PAREN)
    }

    pub fn collect_tokens_between_curly_braces(&mut self) -> Result<Enclosed, Error> {
        self.collect_tokens_between(TokenType::OPEN_CURLY, TokenType::CLOSE_CURLY)
    }

    /// Scans `token (delimiter token)*` where every token should be of type
    /// `kind`, starting at the current token.
    pub fn iterate_tokens_delimited(&mut self, kind: TokenType, delimiter: TokenType) -> TokensDelimited<'_> {
        TokensDelimited {
            lexer: self,
            kind: Some(kind),
            delimiter,
            started: false,
            done: false,
        }
    }

    /// Like [`Lexer::iterate_tokens_delimited`] with no type constraint.
    pub fn iterate_any_token_delimited(&mut self, delimiter: TokenType) -> TokensDelimited<'_> {
        TokensDelimited {
            lexer: self,
            kind: None,
            delimiter,
            started: false,
            done: false,
        }
    }

    pub fn collect_tokens_delimited(&mut self, kind: TokenType, delimiter: TokenType) -> Result<Vec<Token>, Error> {
        collect_delimited(self.iterate_tokens_delimited(kind, delimiter))
    }

    pub fn collect_any_token_delimited(&mut self, delimiter: TokenType) -> Result<Vec<Token>, Error> {
        collect_delimited(self.iterate_any_token_delimited(delimiter))
    }
}

fn collect_delimited(iterator: TokensDelimited<'_>) -> Result<Vec<Token>, Error> {
    let mut tokens = vec![];

    for (token, error) in iterator {
        if let Some(error) = error {
            return Err(error);
        }

        tokens.push(token);
    }

    Ok(tokens)
}
