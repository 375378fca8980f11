//! Lexical analysis module.
//!
//! This module turns raw text into a positioned stream of tokens. It handles:
//!
//! - Scan state, cursor and incremental row/column tracking
//! - Pull-based token production through the tokenizer registry
//! - Bounded lookahead backed by a rollback-safe cache
//! - Nesting-aware extraction of bracketed and delimited token runs
//! - A cursor over already produced tokens for the same extractions
//! - Lexer configuration through a builder

pub mod collection;
pub mod config;
pub mod lexer;
pub mod lookahead;
pub mod parse_utils;
pub mod state;
pub mod tokens;
