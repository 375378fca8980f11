//! Integration tests for end-to-end tokenization.
//!
//! These tests drive the public lexer API the way a downstream parser
//! would: configure a lexer, run sessions over whole inputs and inspect the
//! resulting token streams.

use lexis::{
    errors::errors::{ErrorImpl, NumberDefect},
    lexer::{
        lexer::{tokenize, Lexer},
        tokens::{Token, TokenType, TokenValue},
    },
    tokenizers::{
        comments::CommentSyntax,
        numbers::NumberTokenizer,
        registry::Insertion,
        strings::StringEnclosure,
        tokenizer::TokenizerType,
    },
    Position,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const SOURCE: &str = " func() { test = \"SomeStringValue\"; test = 1.2; test = 88 }";

fn token(kind: TokenType, literal: &str, value: Option<TokenValue>, row: usize, col: usize, offset: usize) -> Token {
    Token {
        kind,
        literal: literal.to_string(),
        value,
        position: Position::new(row, col, offset),
    }
}

fn expected() -> Vec<Token> {
    vec![
        token(TokenType::KEYWORD, "func", None, 1, 2, 1),
        token(TokenType::OPEN_PAREN, "(", None, 1, 6, 5),
        token(TokenType::CLOSE_PAREN, ")", None, 1, 7, 6),
        token(TokenType::OPEN_CURLY, "{", None, 1, 9, 8),
        token(TokenType::SYMBOL, "test", None, 1, 11, 10),
        token(TokenType::ASSIGN, "=", None, 1, 16, 15),
        token(
            TokenType::DOUBLE_QUOTE_STRING,
            "\"SomeStringValue\"",
            Some(TokenValue::String("SomeStringValue".to_string())),
            1,
            18,
            17,
        ),
        token(TokenType::SEMICOLON, ";", None, 1, 35, 34),
        token(TokenType::SYMBOL, "test", None, 1, 37, 36),
        token(TokenType::ASSIGN, "=", None, 1, 42, 41),
        token(TokenType::FLOAT, "1.2", Some(TokenValue::Float(1.2)), 1, 44, 43),
        token(TokenType::SEMICOLON, ";", None, 1, 47, 46),
        token(TokenType::SYMBOL, "test", None, 1, 49, 48),
        token(TokenType::ASSIGN, "=", None, 1, 54, 53),
        token(TokenType::INTEGER, "88", Some(TokenValue::Integer(88)), 1, 56, 55),
        token(TokenType::CLOSE_CURLY, "}", None, 1, 59, 58),
        token(TokenType::EOF, "\u{3}", None, 1, 60, 59),
    ]
}

fn lexer() -> Lexer {
    Lexer::builder().with_keywords(["fun", "func", "def"]).build()
}

fn collect(lexer: &mut Lexer, source: &str) -> Vec<Token> {
    lexer
        .iterate(source)
        .map(|(token, error)| {
            assert!(error.is_none(), "unexpected error: {:?}", error);
            token
        })
        .collect()
}

#[test]
fn test_manual_session() {
    let mut lexer = lexer();
    lexer.tokenize_manual(SOURCE);

    let mut tokens = vec![];
    while !lexer.reached_eof() {
        let (token, error) = lexer.next_token();
        assert!(error.is_none());
        tokens.push(token);
    }

    assert_eq!(tokens, expected());
}

#[test]
fn test_iterator_session() {
    assert_eq!(collect(&mut lexer(), SOURCE), expected());
}

#[test]
fn test_sessions_are_independent() {
    let mut lexer = lexer();

    collect(&mut lexer, "a\nb\nc");
    assert_eq!(collect(&mut lexer, SOURCE), expected());
}

#[test]
fn test_multi_line_eof_position() {
    let tokens = collect(&mut lexer(), "a = true;\nb = false");

    assert_eq!(tokens[4].position, Position::new(2, 1, 10));
    assert_eq!(tokens[6].value, Some(TokenValue::Bool(false)));
    assert_eq!(tokens[7].kind, TokenType::EOF);
    assert_eq!(tokens[7].position, Position::new(2, 10, 19));
}

#[test]
fn test_triple_backtick_string() {
    let mut lexer = Lexer::builder()
        .with_keywords(["func"])
        .with_string_enclosure(StringEnclosure::TRIPLE_BACKTICK)
        .build();

    assert_eq!(
        collect(&mut lexer, "```a string```"),
        vec![
            token(
                TokenType::TRIPLE_BACKTICK_STRING,
                "```a string```",
                Some(TokenValue::String("a string".to_string())),
                1,
                1,
                0
            ),
            token(TokenType::EOF, "\u{3}", None, 1, 15, 14),
        ]
    );
}

#[test]
fn test_tokenization_order_insert_before() {
    let lexer = Lexer::builder()
        .with_tokenizer(Insertion::before(
            TokenizerType::NUMBER,
            TokenizerType::new("New"),
            NumberTokenizer,
        ))
        .build();

    assert_eq!(
        lexer.tokenization_order(),
        &[
            TokenizerType::COMMENT,
            TokenizerType::new("New"),
            TokenizerType::NUMBER,
            TokenizerType::LITERAL,
            TokenizerType::STRING,
            TokenizerType::BOOLEAN,
            TokenizerType::SYMBOL,
        ]
    );
}

#[test]
fn test_tokenization_order_insert_after() {
    let mut lexer = Lexer::new();
    lexer.insert_tokenizer(Insertion::after(
        TokenizerType::NUMBER,
        TokenizerType::new("New"),
        NumberTokenizer,
    ));

    assert_eq!(
        lexer.tokenization_order(),
        &[
            TokenizerType::COMMENT,
            TokenizerType::NUMBER,
            TokenizerType::new("New"),
            TokenizerType::LITERAL,
            TokenizerType::STRING,
            TokenizerType::BOOLEAN,
            TokenizerType::SYMBOL,
        ]
    );
}

#[test]
fn test_malformed_number() {
    let mut lexer = Lexer::new();
    let items: Vec<_> = lexer.iterate("x = 1.2.3;").collect();

    let (token, error) = &items[2];
    let error = error.as_ref().expect("1.2.3 is malformed");

    assert_eq!(token.literal, "1.2.3");
    assert_eq!(
        error.kind(),
        &ErrorImpl::MalformedNumber {
            literal: "1.2.3".to_string(),
            defect: NumberDefect::TooManySeparators { found: 2 },
        }
    );
    assert_eq!(error.get_position(), &Position::new(1, 5, 4));
    assert_eq!(error.get_snippet(), "x = 1.2.3;");
    assert_eq!(error.get_caret(), 4);

    assert_eq!(items[3].0.kind, TokenType::SEMICOLON);
}

#[test]
fn test_tokenize_reports_first_error() {
    let error = tokenize("a = 'open").unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedString");
    assert_eq!(error.get_position(), &Position::new(1, 5, 4));
}

#[test]
fn test_hash_comments() {
    let mut lexer = Lexer::builder()
        .without_comment_syntax(&[CommentSyntax::SLASH_SINGLE_LINE])
        .with_comment_syntax(CommentSyntax::HASHTAG_SINGLE_LINE)
        .build();

    let tokens = collect(&mut lexer, "a # note\n// b");
    let kinds: Vec<TokenType> = tokens.iter().map(|token| token.kind.clone()).collect();

    assert_eq!(
        kinds,
        vec![
            TokenType::SYMBOL,
            TokenType::COMMENT,
            TokenType::DIVIDE,
            TokenType::DIVIDE,
            TokenType::SYMBOL,
            TokenType::EOF,
        ]
    );
}

#[test]
fn test_without_string_enclosure() {
    let mut lexer = Lexer::builder().without_string_enclosure(&["'"]).build();
    let items: Vec<_> = lexer.iterate("'a'").collect();

    assert_eq!(items[0].0.kind, TokenType::INVALID);
    assert!(items[0].1.is_some());
}

#[test]
fn test_nested_function_body() {
    let mut lexer = lexer();
    lexer.tokenize_manual("func f(a, b) { if (a) { b } }");

    lexer.next_token();
    lexer.next_token();
    lexer.next_token();
    let params = lexer.collect_tokens_between_parentheses().unwrap();
    assert_eq!(params.tokens.len(), 3);

    lexer.next_token();
    let body = lexer.collect_tokens_between_curly_braces().unwrap();
    let literals: Vec<&str> = body.tokens.iter().map(|token| token.literal.as_str()).collect();

    assert_eq!(literals, vec!["if", "(", "a", ")", "{", "b", "}"]);
    assert_eq!(lexer.next_token().0.kind, TokenType::EOF);
}

fn session(source: &str, retain_whitespace: bool) -> Vec<Token> {
    Lexer::builder()
        .retain_whitespace(retain_whitespace)
        .build()
        .iterate(source)
        .map(|(token, _)| token)
        .collect()
}

fn source_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("foo".to_string()),
            Just("bar_1".to_string()),
            Just("true".to_string()),
            Just("42".to_string()),
            Just("3.5".to_string()),
            Just("\"s\"".to_string()),
            Just("'q'".to_string()),
            Just("==".to_string()),
            Just("=".to_string()),
            Just("->".to_string()),
            Just("(".to_string()),
            Just(")".to_string()),
            Just("{".to_string()),
            Just("}".to_string()),
            Just(";".to_string()),
            Just(" ".to_string()),
            Just("\n".to_string()),
            Just("\t".to_string()),
            Just("// c\n".to_string()),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn prop_round_trip_with_whitespace(source in source_strategy()) {
        let tokens = session(&source, true);
        let rebuilt: String = tokens
            .iter()
            .filter(|token| token.kind != TokenType::EOF)
            .map(|token| token.literal.as_str())
            .collect();

        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn prop_round_trip_of_arbitrary_text(source in "\\PC{0,60}") {
        let tokens = session(&source, true);
        let rebuilt: String = tokens
            .iter()
            .filter(|token| token.kind != TokenType::EOF)
            .map(|token| token.literal.as_str())
            .collect();

        prop_assert_eq!(rebuilt, source);
    }

    #[test]
    fn prop_sessions_are_deterministic(source in source_strategy()) {
        prop_assert_eq!(session(&source, false), session(&source, false));
    }

    #[test]
    fn prop_lookahead_matches_consumption(source in source_strategy(), depth in 1usize..6) {
        let plain = session(&source, false);

        let mut lexer = Lexer::new();
        lexer.tokenize_manual(&source);

        let mut consumed = vec![];
        loop {
            let peeked = lexer.lookahead(depth);
            let index = (consumed.len() + depth - 1).min(plain.len() - 1);
            prop_assert_eq!(&peeked, &plain[index]);

            let (token, _) = lexer.next_token();
            let reached_eof = token.kind == TokenType::EOF;
            consumed.push(token);
            if reached_eof {
                break;
            }
        }

        prop_assert_eq!(consumed, plain);
    }

    #[test]
    fn prop_maximal_munch(count in 1usize..8) {
        let source = vec!["=="; count].join(" ");
        let tokens = session(&source, false);

        prop_assert_eq!(tokens.len(), count + 1);
        prop_assert!(tokens[..count].iter().all(|token| token.kind == TokenType::EQUAL));
    }
}
