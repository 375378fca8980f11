use std::collections::VecDeque;

use crate::errors::errors::Error;

use super::{state::Checkpoint, tokens::Token};

#[derive(Debug, Clone)]
struct CachedToken {
    token: Token,
    error: Option<Error>,
    /// State right after this token was produced.
    resume: Checkpoint,
}

/// FIFO of tokens produced ahead of the consumer.
///
/// Each entry remembers the scan state right after it, so plucking an entry
/// moves the lexer exactly as if the token had been produced fresh.
#[derive(Debug, Clone, Default)]
pub struct LookaheadCache {
    entries: VecDeque<CachedToken>,
}

impl LookaheadCache {
    pub fn contains_items(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.entries.len()
    }

    pub fn add_item(&mut self, token: Token, error: Option<Error>, resume: Checkpoint) {
        self.entries.push_back(CachedToken {
            token,
            error,
            resume,
        });
    }

    pub fn pluck_item(&mut self) -> Option<(Token, Option<Error>, Checkpoint)> {
        self.entries
            .pop_front()
            .map(|entry| (entry.token, entry.error, entry.resume))
    }

    pub fn get_item(&self, pos: usize) -> Option<&Token> {
        self.entries.get(pos).map(|entry| &entry.token)
    }

    pub fn last_item(&self) -> Option<&Token> {
        self.entries.back().map(|entry| &entry.token)
    }

    /// Where production has to continue to extend the cache.
    pub fn resume_point(&self) -> Option<&Checkpoint> {
        self.entries.back().map(|entry| &entry.resume)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.entries.iter().map(|entry| &entry.token)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
