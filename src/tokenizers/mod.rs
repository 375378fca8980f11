//! Recognition strategies and their dispatch table.
//!
//! Every strategy implements [`tokenizer::Tokenizer`]: a non-mutating
//! recognition check plus a production step that consumes input from the
//! scan state. The [`registry::TokenizerRegistry`] keeps them keyed by an
//! open [`tokenizer::TokenizerType`] tag and tries them in an explicit order.
//!
//! Built-in strategies:
//!
//! - `comments` - line and block comments
//! - `numbers` - integers and floats, optionally negative
//! - `literals` - fixed-string operators and punctuation (maximal munch)
//! - `strings` - delimiter enclosed strings
//! - `booleans` - `true` / `false`
//! - `symbols` - identifiers and keywords

pub mod booleans;
pub mod comments;
pub mod literals;
pub mod numbers;
pub mod registry;
pub mod strings;
pub mod symbols;
pub mod tokenizer;

#[cfg(test)]
mod tests;
