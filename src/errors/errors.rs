use std::fmt::Display;

use thiserror::Error;

use crate::{extract_snippet, lexer::tokens::TokenType, Position};

/// A positioned lexing error.
///
/// Besides the kind of failure it keeps the cursor offset it was raised at
/// and a bounded snippet of the surrounding input, so a diagnostic can be
/// rendered without going back to the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    cursor: usize,
    snippet: String,
    caret: usize,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, cursor: usize, input: &[char]) -> Self {
        let (snippet, caret) = extract_snippet(input, cursor);

        Error {
            internal_error: error_impl,
            position,
            cursor,
            snippet,
            caret,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_cursor(&self) -> usize {
        self.cursor
    }

    pub fn get_snippet(&self) -> &str {
        &self.snippet
    }

    /// Column of the offending character inside [`Error::get_snippet`].
    pub fn get_caret(&self) -> usize {
        self.caret
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn message(&self) -> String {
        self.internal_error.to_string()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::NotAnOpener { .. } => "NotAnOpener",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::InvalidCharacterRange { .. } => "InvalidCharacterRange",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString { delimiter } => {
                ErrorTip::Suggestion(format!("Add a closing `{}` to the string", delimiter))
            }
            ErrorImpl::MalformedNumber { defect, .. } => match defect {
                NumberDefect::MissingDecimalPlaces => ErrorTip::Suggestion(String::from(
                    "Add digits after the decimal point or remove it",
                )),
                NumberDefect::TooManySeparators { .. } => ErrorTip::Suggestion(String::from(
                    "A number can contain at most one decimal point",
                )),
            },
            ErrorImpl::UnexpectedEndOfInput { closer } => {
                ErrorTip::Suggestion(format!("Missing `{}` before the end of input", closer))
            }
            ErrorImpl::NotAnOpener { expected, .. } => ErrorTip::Suggestion(format!(
                "Move to a `{}` token before scanning its contents",
                expected
            )),
            ErrorImpl::TypeMismatch { expected, .. } => ErrorTip::Suggestion(format!(
                "Only `{}` tokens are expected between the delimiters",
                expected
            )),
            ErrorImpl::InvalidCharacterRange { .. } => ErrorTip::Suggestion(String::from(
                "Ranges must join two letters or two digits in ascending order, e.g. `a-z`",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}: {}", self.position, self.internal_error)?;
        writeln!(f, "    {}", self.snippet)?;
        write!(f, "    {:>width$}", "^", width = self.caret + 1)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised character {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("unterminated string literal, expected closing {delimiter:?}")]
    UnterminatedString { delimiter: String },
    #[error("malformed number {literal:?}: {defect}")]
    MalformedNumber { literal: String, defect: NumberDefect },
    #[error("unexpected end of input, expected {closer}")]
    UnexpectedEndOfInput { closer: TokenType },
    #[error("current token is not of opener type {expected}, found {found}")]
    NotAnOpener { expected: TokenType, found: TokenType },
    #[error("expected {expected} but found {found}")]
    TypeMismatch { expected: TokenType, found: TokenType },
    #[error("invalid character range: {start}-{end}")]
    InvalidCharacterRange { start: char, end: char },
}

/// What is wrong with a number literal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberDefect {
    #[error("missing decimal places")]
    MissingDecimalPlaces,
    #[error("too many decimal separators, expected 1 but got {found}")]
    TooManySeparators { found: usize },
}
