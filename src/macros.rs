//! Utility macros for the lexer.
//!
//! This module defines helper macros used throughout the tokenizers:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_LITERAL!` - Creates a LiteralToken table entry
//!
//! These macros reduce boilerplate in the tokenizer implementations.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenType
/// * `$literal` - The token's source text
/// * `$value` - Optional parsed value (omit for `None`)
/// * `$position` - The start position
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenType::INTEGER, "42".to_string(), Some(TokenValue::Integer(42)), position);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $literal:expr, $position:expr) => {
        Token {
            kind: $kind,
            literal: $literal,
            value: None,
            position: $position,
        }
    };
    ($kind:expr, $literal:expr, $value:expr, $position:expr) => {
        Token {
            kind: $kind,
            literal: $literal,
            value: $value,
            position: $position,
        }
    };
}

/// Creates a fixed-string literal table entry.
///
/// # Arguments
///
/// * `$kind` - The TokenType produced when the literal matches
/// * `$literal` - The literal string
///
/// # Example
///
/// ```ignore
/// let plus = MK_LITERAL!(TokenType::PLUS, "+");
/// ```
#[macro_export]
macro_rules! MK_LITERAL {
    ($kind:expr, $literal:literal) => {
        LiteralToken {
            kind: $kind,
            literal: std::borrow::Cow::Borrowed($literal),
        }
    };
}
