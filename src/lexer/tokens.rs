use std::{borrow::Cow, fmt::Display};

use crate::Position;

/// Open, string-like identifier of a token's type.
///
/// The associated constants are the types produced by the built-in
/// tokenizers. Custom tokenizers create their own with [`TokenType::new`].
/// [`TokenType::ANY`] is a wildcard for match predicates and is never
/// produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenType(Cow<'static, str>);

impl TokenType {
    pub const ANY: TokenType = TokenType::from_static("AnyTokenType");

    pub const SOF: TokenType = TokenType::from_static("StartOfFile");
    pub const EOF: TokenType = TokenType::from_static("EndOfFile");
    pub const INVALID: TokenType = TokenType::from_static("Invalid");

    /// Reserved for custom tokenizers. No built-in tokenizer produces it.
    pub const STRING: TokenType = TokenType::from_static("String");
    pub const DOUBLE_QUOTE_STRING: TokenType = TokenType::from_static("DoubleQuoteString");
    pub const SINGLE_QUOTE_STRING: TokenType = TokenType::from_static("SingleQuoteString");
    pub const BACKTICK_STRING: TokenType = TokenType::from_static("BacktickString");
    pub const TRIPLE_BACKTICK_STRING: TokenType = TokenType::from_static("TripleBacktickString");
    /// Reserved for custom tokenizers. No built-in tokenizer produces it.
    pub const NUMBER: TokenType = TokenType::from_static("Number");
    pub const INTEGER: TokenType = TokenType::from_static("Integer");
    pub const FLOAT: TokenType = TokenType::from_static("Float");
    pub const BOOLEAN: TokenType = TokenType::from_static("Boolean");
    /// Reserved for custom tokenizers. No built-in tokenizer produces it.
    pub const NULL: TokenType = TokenType::from_static("Null");
    /// Reserved for custom tokenizers. No built-in tokenizer produces it.
    pub const NIL: TokenType = TokenType::from_static("Nil");

    pub const COMMENT: TokenType = TokenType::from_static("Comment");
    pub const KEYWORD: TokenType = TokenType::from_static("Keyword");
    /// Reserved for custom tokenizers. No built-in tokenizer produces it.
    pub const IDENTIFIER: TokenType = TokenType::from_static("Identifier");
    pub const SYMBOL: TokenType = TokenType::from_static("Symbol");

    pub const PLUS: TokenType = TokenType::from_static("Plus"); // +
    pub const MINUS: TokenType = TokenType::from_static("Minus"); // -
    pub const MULTIPLY: TokenType = TokenType::from_static("Multiply"); // *
    pub const DIVIDE: TokenType = TokenType::from_static("Divide"); // /
    pub const MODULO: TokenType = TokenType::from_static("Modulo"); // %
    pub const ASSIGN: TokenType = TokenType::from_static("Assign"); // =
    pub const EQUAL: TokenType = TokenType::from_static("Equal"); // ==
    pub const NOT_EQUAL: TokenType = TokenType::from_static("NotEqual"); // !=
    pub const LESS_THAN: TokenType = TokenType::from_static("LessThan"); // <
    pub const GREATER_THAN: TokenType = TokenType::from_static("GreaterThan"); // >
    pub const LESS_THAN_OR_EQUAL: TokenType = TokenType::from_static("LessThanOrEqual"); // <=
    pub const GREATER_THAN_OR_EQUAL: TokenType = TokenType::from_static("GreaterThanOrEqual"); // >=
    pub const AND: TokenType = TokenType::from_static("And"); // &&
    pub const OR: TokenType = TokenType::from_static("Or"); // ||
    pub const NOT: TokenType = TokenType::from_static("Not"); // !

    pub const OPEN_PAREN: TokenType = TokenType::from_static("OpenParenthesis"); // (
    pub const CLOSE_PAREN: TokenType = TokenType::from_static("CloseParenthesis"); // )
    pub const OPEN_CURLY: TokenType = TokenType::from_static("OpenCurlyBracket"); // {
    pub const CLOSE_CURLY: TokenType = TokenType::from_static("CloseCurlyBracket"); // }
    pub const OPEN_SQUARE: TokenType = TokenType::from_static("OpenSquareBracket"); // [
    pub const CLOSE_SQUARE: TokenType = TokenType::from_static("CloseSquareBracket"); // ]
    pub const COMMA: TokenType = TokenType::from_static("Comma"); // ,
    pub const DOT: TokenType = TokenType::from_static("Dot"); // .
    pub const COLON: TokenType = TokenType::from_static("Colon"); // :
    pub const SEMICOLON: TokenType = TokenType::from_static("Semicolon"); // ;

    pub const ARROW_RIGHT: TokenType = TokenType::from_static("ArrowRight"); // ->
    pub const ARROW_LEFT: TokenType = TokenType::from_static("ArrowLeft"); // <-
    pub const QUESTION_MARK: TokenType = TokenType::from_static("QuestionMark"); // ?
    pub const TILDE: TokenType = TokenType::from_static("Tilde"); // ~
    pub const AMPERSAND: TokenType = TokenType::from_static("Ampersand"); // &
    pub const PIPE: TokenType = TokenType::from_static("Pipe"); // |
    pub const CARET: TokenType = TokenType::from_static("Caret"); // ^
    pub const DOLLAR: TokenType = TokenType::from_static("Dollar"); // $
    pub const HASH: TokenType = TokenType::from_static("Hash"); // #
    pub const AT: TokenType = TokenType::from_static("At"); // @
    pub const ELLIPSES: TokenType = TokenType::from_static("Ellipses"); // ...

    pub const SPACE: TokenType = TokenType::from_static("Space");
    pub const TAB: TokenType = TokenType::from_static("Tab");
    pub const NEWLINE: TokenType = TokenType::from_static("Newline");
    pub const CARRIAGE_RETURN: TokenType = TokenType::from_static("CarriageReturn");
    pub const FORM_FEED: TokenType = TokenType::from_static("FormFeed");

    pub const fn from_static(name: &'static str) -> Self {
        TokenType(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        TokenType(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_any(&self) -> bool {
        *self == TokenType::ANY
    }

    /// Equality that lets either side be the [`TokenType::ANY`] wildcard.
    pub fn matches(&self, other: &TokenType) -> bool {
        self.is_any() || other.is_any() || self == other
    }
}

impl Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&'static str> for TokenType {
    fn from(name: &'static str) -> Self {
        TokenType::from_static(name)
    }
}

/// Parsed payload carried by numbers, strings, booleans and comments.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::Bool(value) => write!(f, "{}", value),
            TokenValue::Integer(value) => write!(f, "{}", value),
            TokenValue::Float(value) => write!(f, "{}", value),
            TokenValue::String(value) => write!(f, "{:?}", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenType,
    pub literal: String,
    pub value: Option<TokenValue>,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {:<22}{:<22}", self.position, self.kind, format!("{:?}", self.literal))?;
        match &self.value {
            Some(value) => write!(f, "({})", value),
            None => write!(f, "()"),
        }
    }
}

impl Token {
    /// The token a fresh session reports as current before any production.
    pub fn start_of_file() -> Self {
        Token {
            kind: TokenType::SOF,
            literal: String::new(),
            value: None,
            position: Position::default(),
        }
    }

    pub fn is(&self, kind: &TokenType) -> bool {
        self.kind.matches(kind)
    }

    pub fn is_any_of(&self, kinds: &[TokenType]) -> bool {
        kinds.iter().any(|kind| self.is(kind))
    }

    pub fn matches(&self, pattern: &TokenPattern) -> bool {
        self.is(&pattern.kind)
            && pattern
                .literal
                .as_ref()
                .map_or(true, |literal| *literal == self.literal)
    }

    /// Number of code points the token spans in the input.
    pub fn len(&self) -> usize {
        if self.kind == TokenType::EOF {
            return 0;
        }

        self.literal.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A pattern for lookahead predicates: a type (possibly [`TokenType::ANY`])
/// plus an optional exact literal.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPattern {
    pub kind: TokenType,
    pub literal: Option<String>,
}

impl TokenPattern {
    pub fn of(kind: TokenType) -> Self {
        TokenPattern { kind, literal: None }
    }

    pub fn literal(literal: impl Into<String>) -> Self {
        TokenPattern {
            kind: TokenType::ANY,
            literal: Some(literal.into()),
        }
    }

    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal = Some(literal.into());
        self
    }
}

impl From<TokenType> for TokenPattern {
    fn from(kind: TokenType) -> Self {
        TokenPattern::of(kind)
    }
}
