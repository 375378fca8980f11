use std::{collections::HashMap, fmt::Debug};

use tracing::trace;

use crate::lexer::state::State;

use super::{
    booleans::BooleanTokenizer,
    comments::CommentTokenizer,
    literals::LiteralTokenizer,
    numbers::NumberTokenizer,
    strings::StringTokenizer,
    symbols::SymbolTokenizer,
    tokenizer::{Lexed, Tokenizer, TokenizerType},
};

/// Where a new tokenizer goes relative to an existing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Before(TokenizerType),
    After(TokenizerType),
}

/// A tokenizer waiting to be spliced into the order.
pub struct Insertion {
    pub tag: TokenizerType,
    pub tokenizer: Box<dyn Tokenizer>,
    pub placement: Placement,
}

impl Insertion {
    pub fn before(anchor: TokenizerType, tag: TokenizerType, tokenizer: impl Tokenizer + 'static) -> Self {
        Insertion {
            tag,
            tokenizer: Box::new(tokenizer),
            placement: Placement::Before(anchor),
        }
    }

    pub fn after(anchor: TokenizerType, tag: TokenizerType, tokenizer: impl Tokenizer + 'static) -> Self {
        Insertion {
            tag,
            tokenizer: Box::new(tokenizer),
            placement: Placement::After(anchor),
        }
    }
}

impl Debug for Insertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Insertion")
            .field("tag", &self.tag)
            .field("placement", &self.placement)
            .finish_non_exhaustive()
    }
}

/// Tokenizers keyed by tag, tried in an explicit order.
#[derive(Default)]
pub struct TokenizerRegistry {
    tokenizers: HashMap<TokenizerType, Box<dyn Tokenizer>>,
    order: Vec<TokenizerType>,
}

impl TokenizerRegistry {
    pub fn new() -> Self {
        TokenizerRegistry::default()
    }

    /// The built-in set in the default order: comment, number, literal,
    /// string, boolean, symbol.
    pub fn with_builtins(
        comments: CommentTokenizer,
        literals: LiteralTokenizer,
        strings: StringTokenizer,
        booleans: BooleanTokenizer,
        symbols: SymbolTokenizer,
    ) -> Self {
        let mut registry = TokenizerRegistry::new();

        registry.register(TokenizerType::COMMENT, comments);
        registry.register(TokenizerType::NUMBER, NumberTokenizer);
        registry.register(TokenizerType::LITERAL, literals);
        registry.register(TokenizerType::STRING, strings);
        registry.register(TokenizerType::BOOLEAN, booleans);
        registry.register(TokenizerType::SYMBOL, symbols);

        registry
    }

    /// Appends `tokenizer` at the end of the order, replacing any tokenizer
    /// already registered under `tag`.
    pub fn register(&mut self, tag: TokenizerType, tokenizer: impl Tokenizer + 'static) {
        self.register_boxed(tag, Box::new(tokenizer));
    }

    fn register_boxed(&mut self, tag: TokenizerType, tokenizer: Box<dyn Tokenizer>) {
        self.order.retain(|existing| *existing != tag);
        self.order.push(tag.clone());
        self.tokenizers.insert(tag, tokenizer);
    }

    pub fn insert(&mut self, insertion: Insertion) {
        let Insertion {
            tag,
            tokenizer,
            placement,
        } = insertion;

        self.order.retain(|existing| *existing != tag);

        let index = match &placement {
            Placement::Before(anchor) => self.index_of(anchor).unwrap_or(0),
            Placement::After(anchor) => self
                .index_of(anchor)
                .map_or(self.order.len(), |index| index + 1),
        };

        trace!(tag = %tag, placement = ?placement, index, "splicing tokenizer");

        self.order.insert(index, tag.clone());
        self.tokenizers.insert(tag, tokenizer);
    }

    pub fn insert_before(&mut self, anchor: TokenizerType, tag: TokenizerType, tokenizer: impl Tokenizer + 'static) {
        self.insert(Insertion::before(anchor, tag, tokenizer));
    }

    pub fn insert_after(&mut self, anchor: TokenizerType, tag: TokenizerType, tokenizer: impl Tokenizer + 'static) {
        self.insert(Insertion::after(anchor, tag, tokenizer));
    }

    /// Takes `tag` out of the order. Returns whether it was registered.
    pub fn remove(&mut self, tag: &TokenizerType) -> bool {
        self.order.retain(|existing| existing != tag);
        let removed = self.tokenizers.remove(tag).is_some();

        if removed {
            trace!(tag = %tag, "removed tokenizer");
        }

        removed
    }

    pub fn order(&self) -> &[TokenizerType] {
        &self.order
    }

    pub fn contains(&self, tag: &TokenizerType) -> bool {
        self.tokenizers.contains_key(tag)
    }

    pub fn get(&self, tag: &TokenizerType) -> Option<&dyn Tokenizer> {
        self.tokenizers.get(tag).map(|tokenizer| tokenizer.as_ref())
    }

    /// Runs the first tokenizer in order that recognizes the input at the
    /// cursor. `None` when nothing does.
    pub fn dispatch(&self, state: &mut State) -> Option<Lexed> {
        self.order
            .iter()
            .filter_map(|tag| self.tokenizers.get(tag))
            .find_map(|tokenizer| tokenizer.try_tokenize(state))
    }

    fn index_of(&self, tag: &TokenizerType) -> Option<usize> {
        self.order.iter().position(|existing| existing == tag)
    }
}

impl Debug for TokenizerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenizerRegistry")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}
