use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{
        state::State,
        tokens::{Token, TokenType},
    },
    Position, MK_TOKEN,
};

use super::tokenizer::{Lexed, Tokenizer};

lazy_static! {
    static ref CHARACTER_PATTERN: Regex = Regex::new(r"(?s)(.)-(.)|(.)").unwrap();

    /// Characters a symbol may start with: `a-zA-Z_`.
    pub static ref DEFAULT_SYMBOL_START: CharacterSet =
        ('a'..='z').chain('A'..='Z').chain(['_']).collect();

    /// Characters a symbol may continue with: `a-zA-Z0-9_`.
    pub static ref DEFAULT_SYMBOL_CONTINUE: CharacterSet =
        ('a'..='z').chain('A'..='Z').chain('0'..='9').chain(['_']).collect();
}

/// Expands a range expression such as `a-zA-Z0-9_` into the characters it
/// denotes.
///
/// Each `x-y` must join two ASCII letters (of either case) or two ASCII
/// digits with `x <= y`. Any other character stands for itself.
pub fn expand_character_pattern(pattern: &str) -> Result<String, Error> {
    let mut expanded = String::new();

    for captures in CHARACTER_PATTERN.captures_iter(pattern) {
        if let Some(single) = captures.get(3) {
            expanded.push_str(single.as_str());
            continue;
        }

        let (Some(range), Some(start), Some(end)) = (captures.get(0), captures.get(1), captures.get(2)) else {
            continue;
        };
        let start_char = start.as_str().chars().next().unwrap_or_default();
        let end_char = end.as_str().chars().next().unwrap_or_default();

        let same_class = (start_char.is_ascii_alphabetic() && end_char.is_ascii_alphabetic())
            || (start_char.is_ascii_digit() && end_char.is_ascii_digit());

        if !same_class || start_char > end_char {
            let chars: Vec<char> = pattern.chars().collect();
            let index = pattern[..range.start()].chars().count();

            return Err(Error::new(
                ErrorImpl::InvalidCharacterRange {
                    start: start_char,
                    end: end_char,
                },
                Position::new(1, index + 1, index),
                index,
                &chars,
            ));
        }

        expanded.extend(start_char..=end_char);
    }

    Ok(expanded)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterSet(HashSet<char>);

impl CharacterSet {
    pub fn from_pattern(pattern: &str) -> Result<Self, Error> {
        Ok(expand_character_pattern(pattern)?.chars().collect())
    }

    pub fn from_chars(chars: &str) -> Self {
        chars.chars().collect()
    }

    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<char> for CharacterSet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        CharacterSet(iter.into_iter().collect())
    }
}

/// Identifiers, re-tagged as keywords when found in the keyword set.
#[derive(Debug, Clone)]
pub struct SymbolTokenizer {
    start: CharacterSet,
    cont: CharacterSet,
    keywords: HashSet<String>,
}

impl SymbolTokenizer {
    pub fn new(start: CharacterSet, cont: CharacterSet, keywords: HashSet<String>) -> Self {
        SymbolTokenizer { start, cont, keywords }
    }

    pub fn keywords(&self) -> &HashSet<String> {
        &self.keywords
    }
}

impl Default for SymbolTokenizer {
    fn default() -> Self {
        SymbolTokenizer::new(
            DEFAULT_SYMBOL_START.clone(),
            DEFAULT_SYMBOL_CONTINUE.clone(),
            HashSet::new(),
        )
    }
}

impl Tokenizer for SymbolTokenizer {
    fn can_tokenize(&self, state: &State) -> bool {
        self.start.contains(state.char_at_cursor())
    }

    fn tokenize(&self, state: &mut State) -> Lexed {
        let position = state.position();
        let start = state.cursor();

        // The first character only has to be in the start set.
        state.advance(1);
        while !state.cursor_is_out_of_bounds() && self.cont.contains(state.char_at_cursor()) {
            state.advance(1);
        }

        let literal = state.source_substring(start, state.cursor());
        let kind = if self.keywords.contains(&literal) {
            TokenType::KEYWORD
        } else {
            TokenType::SYMBOL
        };

        (MK_TOKEN!(kind, literal, position), None)
    }
}
