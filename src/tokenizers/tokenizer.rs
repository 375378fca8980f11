use std::{borrow::Cow, fmt::Display};

use crate::{errors::errors::Error, lexer::state::State, lexer::tokens::Token};

/// A produced token and the error raised while producing it, if any.
///
/// On error the token is the best-effort result (an `Invalid` token or the
/// span scanned so far) so the caller may keep pulling.
pub type Lexed = (Token, Option<Error>);

/// Open tag naming a tokenizer in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenizerType(Cow<'static, str>);

impl TokenizerType {
    pub const COMMENT: TokenizerType = TokenizerType::from_static("BuildInCommentTokenizer");
    pub const STRING: TokenizerType = TokenizerType::from_static("BuildInStringTokenizer");
    pub const NUMBER: TokenizerType = TokenizerType::from_static("BuildInNumberTokenizer");
    pub const LITERAL: TokenizerType = TokenizerType::from_static("BuildInLiteralTokenizer");
    pub const SYMBOL: TokenizerType = TokenizerType::from_static("BuildInSymbolTokenizer");
    pub const BOOLEAN: TokenizerType = TokenizerType::from_static("BuildInBooleanTokenizer");

    pub const fn from_static(name: &'static str) -> Self {
        TokenizerType(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        TokenizerType(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TokenizerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&'static str> for TokenizerType {
    fn from(name: &'static str) -> Self {
        TokenizerType::from_static(name)
    }
}

/// A recognition strategy.
///
/// `can_tokenize` only peeks. `tokenize` must advance the cursor by at least
/// one code point and return the consumed span as the token literal.
/// Strategies that find a descriptor while recognizing (a literal entry, an
/// enclosure, a comment syntax) override `try_tokenize` to hand it straight
/// to production instead of matching twice.
pub trait Tokenizer {
    fn can_tokenize(&self, state: &State) -> bool;

    fn tokenize(&self, state: &mut State) -> Lexed;

    fn try_tokenize(&self, state: &mut State) -> Option<Lexed> {
        if self.can_tokenize(state) {
            Some(self.tokenize(state))
        } else {
            None
        }
    }
}
