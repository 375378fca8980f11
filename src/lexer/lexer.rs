use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::{
    errors::errors::Error,
    tokenizers::{
        registry::{Insertion, TokenizerRegistry},
        tokenizer::{Lexed, TokenizerType},
    },
    Position,
};

use super::{
    config::LexerBuilder,
    state::State,
    tokens::{Token, TokenPattern, TokenType},
};

/// Pull-based lexer over one input at a time.
///
/// A session starts with [`Lexer::tokenize_manual`] (or [`Lexer::iterate`])
/// and replaces any previous one. Tokens are pulled with
/// [`Lexer::next_token`]; [`Lexer::lookahead`] peeks without consuming.
#[derive(Debug)]
pub struct Lexer {
    registry: TokenizerRegistry,
    ignored_tokens: HashSet<TokenType>,
    ignore_whitespace: bool,
    omit_token_position: bool,
    debug_print_tokens: bool,
    state: State,
}

impl Default for Lexer {
    fn default() -> Self {
        LexerBuilder::default().build()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Lexer::default()
    }

    pub fn builder() -> LexerBuilder {
        LexerBuilder::new()
    }

    pub(crate) fn from_parts(
        registry: TokenizerRegistry,
        ignored_tokens: HashSet<TokenType>,
        ignore_whitespace: bool,
        omit_token_position: bool,
        debug_print_tokens: bool,
    ) -> Self {
        Lexer {
            registry,
            ignored_tokens,
            ignore_whitespace,
            omit_token_position,
            debug_print_tokens,
            state: State::new("").omitting_positions(omit_token_position),
        }
    }

    /// Starts a fresh session over `source`.
    pub fn tokenize_manual(&mut self, source: &str) {
        self.state = State::new(source).omitting_positions(self.omit_token_position);
    }

    /// Starts a fresh session over `source` and pulls it to the end. The
    /// `Eof` token is the last item.
    pub fn iterate(&mut self, source: &str) -> TokenStream<'_> {
        self.tokenize_manual(source);

        TokenStream {
            lexer: self,
            done: false,
        }
    }

    /// Consumes the next token, from the lookahead cache when it holds any.
    pub fn next_token(&mut self) -> Lexed {
        if let Some((token, error, resume)) = self.state.lookahead_cache_mut().pluck_item() {
            self.state.restore(resume);
            return (token, error);
        }

        self.produce()
    }

    // Bypasses the lookahead cache. Only `next_token` and `fill_lookahead`
    // may call this, or cached tokens would be handed out twice.
    fn produce(&mut self) -> Lexed {
        loop {
            if self.ignore_whitespace {
                self.state.skip_whitespace();
            }

            if self.state.cursor_is_out_of_bounds() {
                let token = self.state.eof_token();
                return self.emit(token, None);
            }

            let start = self.state.cursor();
            let (token, error) = match self.registry.dispatch(&mut self.state) {
                Some(lexed) => lexed,
                None => self.state.invalid_token(),
            };

            if self.state.cursor() == start {
                warn!(kind = %token.kind, cursor = start, "tokenizer did not advance the cursor");
                self.state.advance(1);
            }

            if error.is_none() && self.ignored_tokens.contains(&token.kind) {
                continue;
            }

            return self.emit(token, error);
        }
    }

    fn emit(&mut self, token: Token, error: Option<Error>) -> Lexed {
        if self.debug_print_tokens {
            debug!("{}", token);
        }

        self.state.set_current_token(token.clone());
        (token, error)
    }

    /// Returns the token `offset` positions ahead without consuming it.
    ///
    /// `lookahead(0)` is the current token. Past the end of input the `Eof`
    /// token is returned.
    pub fn lookahead(&mut self, offset: usize) -> Token {
        if offset == 0 {
            return self.state.current_token().clone();
        }

        let cache = self.state.lookahead_cache();
        if let Some(token) = cache.get_item(offset - 1) {
            return token.clone();
        }
        if let Some(last) = cache.last_item().filter(|last| last.kind == TokenType::EOF) {
            return last.clone();
        }

        self.fill_lookahead(offset);

        let cache = self.state.lookahead_cache();
        cache
            .get_item(offset - 1)
            .or_else(|| cache.last_item())
            .cloned()
            .unwrap_or_else(|| self.state.current_token().clone())
    }

    fn fill_lookahead(&mut self, offset: usize) {
        let saved = self.state.checkpoint();
        if let Some(resume) = self.state.lookahead_cache().resume_point().cloned() {
            self.state.restore(resume);
        }

        trace!(
            cached = self.state.lookahead_cache().item_count(),
            wanted = offset,
            "filling lookahead cache"
        );

        while self.state.lookahead_cache().item_count() < offset {
            let (token, error) = self.produce();
            let reached_eof = token.kind == TokenType::EOF;
            let resume = self.state.checkpoint();

            self.state.lookahead_cache_mut().add_item(token, error, resume);

            if reached_eof {
                break;
            }
        }

        self.state.restore(saved);
    }

    /// The next `count` tokens, fewer when the input ends first.
    pub fn lookahead_tokens(&mut self, count: usize) -> Vec<Token> {
        if count == 0 {
            return vec![];
        }

        self.lookahead(count);
        self.state.lookahead_cache().tokens().take(count).cloned().collect()
    }

    pub fn next_token_is(&mut self, pattern: impl Into<TokenPattern>) -> bool {
        self.lookahead(1).matches(&pattern.into())
    }

    pub fn next_token_is_any_of(&mut self, kinds: &[TokenType]) -> bool {
        self.lookahead(1).is_any_of(kinds)
    }

    /// Checks the upcoming tokens, in order, against `patterns`.
    pub fn next_token_sequence_is(&mut self, patterns: &[TokenPattern]) -> bool {
        patterns
            .iter()
            .enumerate()
            .all(|(i, pattern)| self.lookahead(i + 1).matches(pattern))
    }

    pub fn current_token(&self) -> &Token {
        self.state.current_token()
    }

    pub fn reached_eof(&self) -> bool {
        self.state.current_token().kind == TokenType::EOF
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor()
    }

    pub fn position(&mut self) -> Position {
        self.state.position()
    }

    pub fn source_substring(&self, start: usize, end: usize) -> String {
        self.state.source_substring(start, end)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn tokenization_order(&self) -> &[TokenizerType] {
        self.registry.order()
    }

    pub fn insert_tokenizer(&mut self, insertion: Insertion) {
        self.registry.insert(insertion);
    }

    pub fn remove_tokenizer(&mut self, tag: &TokenizerType) -> bool {
        self.registry.remove(tag)
    }
}

/// Pulls a session to its end. Yields the `Eof` token once, then stops.
pub struct TokenStream<'a> {
    lexer: &'a mut Lexer,
    done: bool,
}

impl Iterator for TokenStream<'_> {
    type Item = Lexed;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (token, error) = self.lexer.next_token();
        self.done = token.kind == TokenType::EOF;

        Some((token, error))
    }
}

/// Tokenizes `source` with the default configuration.
///
/// Returns every token up to and including `Eof`, or the first error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new();
    let mut tokens = vec![];

    for (token, error) in lexer.iterate(source) {
        if let Some(error) = error {
            return Err(error);
        }

        tokens.push(token);
    }

    Ok(tokens)
}
