use std::collections::HashSet;

use crate::{
    errors::errors::Error,
    tokenizers::{
        booleans::BooleanTokenizer,
        comments::{CommentSyntax, CommentTokenizer},
        literals::{LiteralToken, LiteralTokenizer, BUILTIN_LITERAL_TOKENS},
        registry::{Insertion, TokenizerRegistry},
        strings::{StringEnclosure, StringTokenizer},
        symbols::{CharacterSet, SymbolTokenizer, DEFAULT_SYMBOL_CONTINUE, DEFAULT_SYMBOL_START},
    },
};

use super::{lexer::Lexer, tokens::TokenType};

/// Consuming builder for a [`Lexer`].
///
/// ```ignore
/// let lexer = Lexer::builder()
///     .with_keywords(["func", "return"])
///     .with_string_enclosure(StringEnclosure::TRIPLE_BACKTICK)
///     .ignore_comments(true)
///     .build();
/// ```
#[derive(Debug)]
pub struct LexerBuilder {
    debug_print_tokens: bool,
    omit_token_position: bool,
    ignore_whitespace: bool,
    ignored_tokens: HashSet<TokenType>,
    keywords: HashSet<String>,
    symbol_start: CharacterSet,
    symbol_continue: CharacterSet,
    literal_tokens: Vec<LiteralToken>,
    comment_syntaxes: Vec<CommentSyntax>,
    string_enclosures: Vec<StringEnclosure>,
    insertions: Vec<Insertion>,
}

impl Default for LexerBuilder {
    fn default() -> Self {
        LexerBuilder {
            debug_print_tokens: false,
            omit_token_position: false,
            ignore_whitespace: true,
            ignored_tokens: HashSet::new(),
            keywords: HashSet::new(),
            symbol_start: DEFAULT_SYMBOL_START.clone(),
            symbol_continue: DEFAULT_SYMBOL_CONTINUE.clone(),
            literal_tokens: BUILTIN_LITERAL_TOKENS.clone(),
            comment_syntaxes: vec![CommentSyntax::SLASH_SINGLE_LINE, CommentSyntax::SLASH_MULTILINE],
            string_enclosures: vec![StringEnclosure::SINGLE_QUOTE, StringEnclosure::DOUBLE_QUOTE],
            insertions: vec![],
        }
    }
}

impl LexerBuilder {
    pub fn new() -> Self {
        LexerBuilder::default()
    }

    /// Log every produced token at `debug` level.
    pub fn debug_print_tokens(mut self, enabled: bool) -> Self {
        self.debug_print_tokens = enabled;
        self
    }

    /// Report every token at the zero position.
    pub fn omit_token_position(mut self, enabled: bool) -> Self {
        self.omit_token_position = enabled;
        self
    }

    /// Keep whitespace as tokens instead of skipping it.
    pub fn retain_whitespace(mut self, enabled: bool) -> Self {
        self.ignore_whitespace = !enabled;
        self
    }

    /// Drop produced tokens of the given types.
    pub fn ignore_tokens(mut self, kinds: impl IntoIterator<Item = TokenType>) -> Self {
        self.ignored_tokens.extend(kinds);
        self
    }

    pub fn ignore_comments(mut self, enabled: bool) -> Self {
        if enabled {
            self.ignored_tokens.insert(TokenType::COMMENT);
        } else {
            self.ignored_tokens.remove(&TokenType::COMMENT);
        }
        self
    }

    pub fn with_keywords<S: Into<String>>(mut self, keywords: impl IntoIterator<Item = S>) -> Self {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Symbol start and continue sets given as range expressions, e.g.
    /// `a-zA-Z_` and `a-zA-Z0-9_`.
    pub fn symbol_character_map(mut self, start: &str, cont: &str) -> Result<Self, Error> {
        self.symbol_start = CharacterSet::from_pattern(start)?;
        self.symbol_continue = CharacterSet::from_pattern(cont)?;
        Ok(self)
    }

    pub fn symbol_character_set(mut self, start: CharacterSet, cont: CharacterSet) -> Self {
        self.symbol_start = start;
        self.symbol_continue = cont;
        self
    }

    pub fn with_literal_tokens(mut self, literals: impl IntoIterator<Item = LiteralToken>) -> Self {
        self.literal_tokens.extend(literals);
        self
    }

    pub fn without_literal_tokens(mut self, kinds: &[TokenType]) -> Self {
        self.literal_tokens.retain(|literal| !kinds.contains(&literal.kind));
        self
    }

    pub fn with_comment_syntax(mut self, syntax: CommentSyntax) -> Self {
        self.comment_syntaxes.push(syntax);
        self
    }

    pub fn without_comment_syntax(mut self, syntaxes: &[CommentSyntax]) -> Self {
        self.comment_syntaxes.retain(|syntax| !syntaxes.contains(syntax));
        self
    }

    pub fn with_string_enclosure(mut self, enclosure: StringEnclosure) -> Self {
        self.string_enclosures.push(enclosure);
        self
    }

    /// Removes every enclosure whose delimiter is listed.
    pub fn without_string_enclosure(mut self, delimiters: &[&str]) -> Self {
        self.string_enclosures
            .retain(|enclosure| !delimiters.iter().any(|delimiter| *delimiter == enclosure.delimiter));
        self
    }

    /// Splices a custom tokenizer into the order once the lexer is built.
    pub fn with_tokenizer(mut self, insertion: Insertion) -> Self {
        self.insertions.push(insertion);
        self
    }

    pub fn build(self) -> Lexer {
        let mut registry = TokenizerRegistry::with_builtins(
            CommentTokenizer::new(self.comment_syntaxes),
            LiteralTokenizer::new(self.literal_tokens),
            StringTokenizer::new(self.string_enclosures),
            BooleanTokenizer::new(self.symbol_continue.clone()),
            SymbolTokenizer::new(self.symbol_start, self.symbol_continue, self.keywords),
        );

        for insertion in self.insertions {
            registry.insert(insertion);
        }

        Lexer::from_parts(
            registry,
            self.ignored_tokens,
            self.ignore_whitespace,
            self.omit_token_position,
            self.debug_print_tokens,
        )
    }
}
