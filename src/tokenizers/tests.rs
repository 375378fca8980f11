//! Unit tests for the built-in tokenizers and the registry.
//!
//! Each tokenizer is driven directly against a scan state, without a lexer
//! in between.

use std::collections::HashSet;

use pretty_assertions::assert_eq;

use crate::{
    errors::errors::{ErrorImpl, NumberDefect},
    lexer::{
        state::State,
        tokens::{TokenType, TokenValue},
    },
    Position,
};

use super::{
    booleans::BooleanTokenizer,
    comments::{CommentSyntax, CommentTokenizer},
    literals::{sort_literal_tokens, LiteralToken, LiteralTokenizer},
    numbers::NumberTokenizer,
    registry::{Insertion, TokenizerRegistry},
    strings::{StringEnclosure, StringTokenizer},
    symbols::{expand_character_pattern, CharacterSet, SymbolTokenizer},
    tokenizer::{Lexed, Tokenizer, TokenizerType},
};

fn run(tokenizer: &impl Tokenizer, source: &str) -> (Lexed, usize) {
    let mut state = State::new(source);
    assert!(tokenizer.can_tokenize(&state), "tokenizer should recognize {:?}", source);

    let lexed = tokenizer.tokenize(&mut state);
    (lexed, state.cursor())
}

#[test]
fn test_literal_maximal_munch() {
    let tokenizer = LiteralTokenizer::default();

    let ((token, error), cursor) = run(&tokenizer, "== 1");
    assert!(error.is_none());
    assert_eq!(token.kind, TokenType::EQUAL);
    assert_eq!(token.literal, "==");
    assert_eq!(cursor, 2);

    let ((token, _), _) = run(&tokenizer, "->x");
    assert_eq!(token.kind, TokenType::ARROW_RIGHT);

    let ((token, _), _) = run(&tokenizer, "...");
    assert_eq!(token.kind, TokenType::ELLIPSES);

    let ((token, _), _) = run(&tokenizer, "=a");
    assert_eq!(token.kind, TokenType::ASSIGN);
}

#[test]
fn test_literal_table_sorting_keeps_ties_in_order() {
    let sorted = sort_literal_tokens(vec![
        LiteralToken::new(TokenType::PLUS, "+"),
        LiteralToken::new(TokenType::EQUAL, "=="),
        LiteralToken::new(TokenType::MINUS, "-"),
        LiteralToken::new(TokenType::ELLIPSES, "..."),
    ]);

    let literals: Vec<&str> = sorted.iter().map(|literal| &*literal.literal).collect();
    assert_eq!(literals, vec!["...", "==", "+", "-"]);
}

#[test]
fn test_literal_tokenizer_drops_empty_literals() {
    let tokenizer = LiteralTokenizer::new(vec![
        LiteralToken::new(TokenType::new("Nothing"), ""),
        LiteralToken::new(TokenType::PLUS, "+"),
    ]);

    assert_eq!(tokenizer.literals().len(), 1);
    assert!(!tokenizer.can_tokenize(&State::new("abc")));
}

#[test]
fn test_escapable_string() {
    let tokenizer = StringTokenizer::default();

    let ((token, error), cursor) = run(&tokenizer, r#""quote\"d" rest"#);
    assert!(error.is_none());
    assert_eq!(token.kind, TokenType::DOUBLE_QUOTE_STRING);
    assert_eq!(token.literal, r#""quote\"d""#);
    assert_eq!(token.value, Some(TokenValue::String(r#"quote\"d"#.to_string())));
    assert_eq!(cursor, 10);
}

#[test]
fn test_single_quote_string_does_not_escape() {
    let tokenizer = StringTokenizer::default();

    let ((token, error), _) = run(&tokenizer, r"'a\'b'");
    assert!(error.is_none());
    assert_eq!(token.kind, TokenType::SINGLE_QUOTE_STRING);
    assert_eq!(token.value, Some(TokenValue::String(r"a\".to_string())));
}

#[test]
fn test_multi_char_enclosure() {
    let tokenizer = StringTokenizer::new(vec![StringEnclosure::TRIPLE_BACKTICK, StringEnclosure::BACKTICK]);

    let ((token, error), cursor) = run(&tokenizer, "```a `b` c```");
    assert!(error.is_none());
    assert_eq!(token.kind, TokenType::TRIPLE_BACKTICK_STRING);
    assert_eq!(token.value, Some(TokenValue::String("a `b` c".to_string())));
    assert_eq!(cursor, 13);
}

#[test]
fn test_unterminated_string() {
    let tokenizer = StringTokenizer::default();

    let ((token, error), cursor) = run(&tokenizer, "'abc");
    let error = error.expect("missing closer should be reported");

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnterminatedString {
            delimiter: "'".to_string()
        }
    );
    assert_eq!(token.literal, "'abc");
    assert_eq!(token.value, None);
    assert_eq!(cursor, 4);
    assert_eq!(error.get_cursor(), 0);
}

#[test]
fn test_numbers() {
    let tokenizer = NumberTokenizer;

    let ((token, error), _) = run(&tokenizer, "88;");
    assert!(error.is_none());
    assert_eq!(token.kind, TokenType::INTEGER);
    assert_eq!(token.value, Some(TokenValue::Integer(88)));

    let ((token, _), _) = run(&tokenizer, "-1.25");
    assert_eq!(token.kind, TokenType::FLOAT);
    assert_eq!(token.literal, "-1.25");
    assert_eq!(token.value, Some(TokenValue::Float(-1.25)));

    assert!(!tokenizer.can_tokenize(&State::new("-x")));
    assert!(!tokenizer.can_tokenize(&State::new(".5")));
}

#[test]
fn test_number_with_too_many_separators() {
    let ((token, error), cursor) = run(&NumberTokenizer, "1.2.3");
    let error = error.expect("1.2.3 is malformed");

    assert_eq!(token.kind, TokenType::FLOAT);
    assert_eq!(token.literal, "1.2.3");
    assert_eq!(token.value, None);
    assert_eq!(cursor, 5);
    assert_eq!(
        error.kind(),
        &ErrorImpl::MalformedNumber {
            literal: "1.2.3".to_string(),
            defect: NumberDefect::TooManySeparators { found: 2 },
        }
    );
    assert!(error.message().contains("expected 1 but got 2"));
}

#[test]
fn test_number_with_trailing_separator() {
    let ((token, error), _) = run(&NumberTokenizer, "7.");
    let error = error.expect("7. is malformed");

    assert_eq!(token.literal, "7.");
    assert_eq!(
        error.kind(),
        &ErrorImpl::MalformedNumber {
            literal: "7.".to_string(),
            defect: NumberDefect::MissingDecimalPlaces,
        }
    );
}

#[test]
fn test_integer_overflow_leaves_value_unset() {
    let ((token, error), _) = run(&NumberTokenizer, "99999999999999999999");

    assert!(error.is_none());
    assert_eq!(token.kind, TokenType::INTEGER);
    assert_eq!(token.value, None);
}

#[test]
fn test_booleans() {
    let tokenizer = BooleanTokenizer::default();

    let ((token, _), cursor) = run(&tokenizer, "false;");
    assert_eq!(token.kind, TokenType::BOOLEAN);
    assert_eq!(token.value, Some(TokenValue::Bool(false)));
    assert_eq!(cursor, 5);

    let ((token, _), _) = run(&tokenizer, "true");
    assert_eq!(token.value, Some(TokenValue::Bool(true)));

    assert!(!tokenizer.can_tokenize(&State::new("trueish")));
    assert!(!tokenizer.can_tokenize(&State::new("false_")));
}

#[test]
fn test_symbols_and_keywords() {
    let keywords: HashSet<String> = ["func".to_string()].into_iter().collect();
    let tokenizer = SymbolTokenizer::new(
        CharacterSet::from_chars("abcdefghijklmnopqrstuvwxyz"),
        CharacterSet::from_chars("abcdefghijklmnopqrstuvwxyz0123456789"),
        keywords,
    );

    let ((token, _), cursor) = run(&tokenizer, "func(");
    assert_eq!(token.kind, TokenType::KEYWORD);
    assert_eq!(cursor, 4);

    let ((token, _), _) = run(&tokenizer, "functor2 x");
    assert_eq!(token.kind, TokenType::SYMBOL);
    assert_eq!(token.literal, "functor2");

    assert!(!tokenizer.can_tokenize(&State::new("2abc")));
}

#[test]
fn test_symbol_start_char_outside_continue_set() {
    let tokenizer = SymbolTokenizer::new(
        CharacterSet::from_chars("$"),
        CharacterSet::from_chars("abc"),
        HashSet::new(),
    );

    let ((token, _), cursor) = run(&tokenizer, "$abc$");
    assert_eq!(token.literal, "$abc");
    assert_eq!(cursor, 4);
}

#[test]
fn test_line_comment_stops_before_newline() {
    let tokenizer = CommentTokenizer::default();

    let ((token, error), cursor) = run(&tokenizer, "// note\nx");
    assert!(error.is_none());
    assert_eq!(token.kind, TokenType::COMMENT);
    assert_eq!(token.literal, "// note");
    assert_eq!(token.value, Some(TokenValue::String(" note".to_string())));
    assert_eq!(cursor, 7);
}

#[test]
fn test_block_comment() {
    let tokenizer = CommentTokenizer::default();

    let ((token, _), cursor) = run(&tokenizer, "/* a\nb */x");
    assert_eq!(token.literal, "/* a\nb */");
    assert_eq!(token.value, Some(TokenValue::String(" a\nb ".to_string())));
    assert_eq!(cursor, 9);

    let ((token, error), cursor) = run(&tokenizer, "/* open");
    assert!(error.is_none());
    assert_eq!(token.literal, "/* open");
    assert_eq!(cursor, 7);
}

#[test]
fn test_hashtag_comment() {
    let tokenizer = CommentTokenizer::new(vec![CommentSyntax::HASHTAG_SINGLE_LINE]);

    let ((token, _), _) = run(&tokenizer, "# hi");
    assert_eq!(token.value, Some(TokenValue::String(" hi".to_string())));
    assert!(!tokenizer.can_tokenize(&State::new("// hi")));
}

#[test]
fn test_expand_character_pattern() {
    let expanded = expand_character_pattern("a-zA-Z0-9_").unwrap();

    assert_eq!(
        expanded,
        "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789_"
    );
    assert_eq!(expand_character_pattern("x-").unwrap(), "x-");
    assert_eq!(expand_character_pattern("$_").unwrap(), "$_");
}

#[test]
fn test_expand_invalid_character_range() {
    let error = expand_character_pattern("a-z9-0").unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::InvalidCharacterRange { start: '9', end: '0' });
    assert_eq!(error.get_position(), &Position::new(1, 4, 3));
    assert_eq!(error.get_snippet(), "a-z9-0");
    assert_eq!(error.get_caret(), 3);

    assert!(expand_character_pattern("a-9").is_err());
    assert!(expand_character_pattern("z-A").is_err());
}

#[test]
fn test_expand_mixed_case_range() {
    let expanded = expand_character_pattern("A-z").unwrap();

    assert_eq!(expanded, ('A'..='z').collect::<String>());
    assert_eq!(expanded.len(), 58);
    assert!(expanded.contains('_'));
}

struct Dummy;

impl Tokenizer for Dummy {
    fn can_tokenize(&self, _state: &State) -> bool {
        false
    }

    fn tokenize(&self, state: &mut State) -> Lexed {
        state.invalid_token()
    }
}

fn builtin_order() -> Vec<TokenizerType> {
    vec![
        TokenizerType::COMMENT,
        TokenizerType::NUMBER,
        TokenizerType::LITERAL,
        TokenizerType::STRING,
        TokenizerType::BOOLEAN,
        TokenizerType::SYMBOL,
    ]
}

fn builtin_registry() -> TokenizerRegistry {
    TokenizerRegistry::with_builtins(
        CommentTokenizer::default(),
        LiteralTokenizer::default(),
        StringTokenizer::default(),
        BooleanTokenizer::default(),
        SymbolTokenizer::default(),
    )
}

#[test]
fn test_default_order() {
    assert_eq!(builtin_registry().order(), builtin_order().as_slice());
}

#[test]
fn test_insert_before() {
    let mut registry = builtin_registry();
    registry.insert_before(TokenizerType::NUMBER, TokenizerType::new("New"), Dummy);

    let mut expected = builtin_order();
    expected.insert(1, TokenizerType::new("New"));

    assert_eq!(registry.order(), expected.as_slice());
}

#[test]
fn test_insert_after() {
    let mut registry = builtin_registry();
    registry.insert(Insertion::after(TokenizerType::NUMBER, TokenizerType::new("New"), Dummy));

    let mut expected = builtin_order();
    expected.insert(2, TokenizerType::new("New"));

    assert_eq!(registry.order(), expected.as_slice());
}

#[test]
fn test_insert_with_missing_anchor() {
    let mut registry = builtin_registry();
    registry.insert_before(TokenizerType::new("Missing"), TokenizerType::new("First"), Dummy);
    registry.insert_after(TokenizerType::new("Missing"), TokenizerType::new("Last"), Dummy);

    let order = registry.order();
    assert_eq!(order.first(), Some(&TokenizerType::new("First")));
    assert_eq!(order.last(), Some(&TokenizerType::new("Last")));
}

#[test]
fn test_reinserting_moves_the_tag() {
    let mut registry = builtin_registry();
    registry.insert_after(TokenizerType::SYMBOL, TokenizerType::COMMENT, CommentTokenizer::default());

    let order = registry.order();
    assert_eq!(order.len(), 6);
    assert_eq!(order.last(), Some(&TokenizerType::COMMENT));
}

#[test]
fn test_remove_tokenizer() {
    let mut registry = builtin_registry();

    assert!(registry.remove(&TokenizerType::BOOLEAN));
    assert!(!registry.remove(&TokenizerType::BOOLEAN));
    assert!(!registry.contains(&TokenizerType::BOOLEAN));
    assert_eq!(registry.order().len(), 5);
}

#[test]
fn test_dispatch_uses_order() {
    let registry = builtin_registry();
    let mut state = State::new("true");

    let (token, _) = registry.dispatch(&mut state).unwrap();
    assert_eq!(token.kind, TokenType::BOOLEAN);

    let mut state = State::new("\u{1F600}");
    assert!(registry.dispatch(&mut state).is_none());
}
