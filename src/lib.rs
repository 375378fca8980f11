#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Once};

pub mod errors;
pub mod lexer;
pub mod macros;
pub mod tokenizers;

extern crate regex;

/// Number of code points shown on each side of an error location.
pub const SNIPPET_CONTEXT: usize = 20;

/// Row/column/offset of a token start.
///
/// `row` and `col` are 1-based, `offset` is the 0-based index into the
/// code points of the input. The default value (all zeroes) is used when
/// position tracking is switched off and for the start-of-file token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(row: usize, col: usize, offset: usize) -> Self {
        Position { row, col, offset }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>3}:{:>4}", self.row, self.col)
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber driven by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Cuts `±SNIPPET_CONTEXT` code points around `cursor` out of `input`.
///
/// Returns the snippet and the caret column inside it. Line breaks and tabs
/// are flattened to spaces so the caret stays under the offending character.
pub fn extract_snippet(input: &[char], cursor: usize) -> (String, usize) {
    let cursor = cursor.min(input.len());
    let start = cursor.saturating_sub(SNIPPET_CONTEXT);
    let end = (cursor + SNIPPET_CONTEXT).min(input.len());

    let snippet = input[start..end]
        .iter()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c => *c,
        })
        .collect();

    (snippet, cursor - start)
}

/// Finds the line holding the code point at `position`.
///
/// Returns the 1-based line number, the line text (with its line break, if
/// any) and the code point offset of `position` inside that line. Positions
/// past the end map onto the last line.
pub fn get_line_at_position(source: &str, position: usize) -> (usize, String, usize) {
    let mut start = 0;
    let mut line_number = 1;
    let mut last = (1, String::new(), 0);

    for line in source.split_inclusive('\n') {
        let len = line.chars().count();
        let end = start + len;

        if (start..end).contains(&position) {
            return (line_number, line.to_string(), position - start);
        }

        last = (line_number, line.to_string(), len);
        start = end;
        line_number += 1;
    }

    if source.ends_with('\n') {
        return (line_number, String::new(), position.saturating_sub(start));
    }

    last
}
