use std::borrow::Cow;

use crate::{
    lexer::{
        state::State,
        tokens::{Token, TokenType, TokenValue},
    },
    MK_TOKEN,
};

use super::tokenizer::{Lexed, Tokenizer};

/// Opener and closer of a comment. An empty closer makes it a line comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSyntax {
    pub opener: Cow<'static, str>,
    pub closer: Cow<'static, str>,
}

impl CommentSyntax {
    pub const SLASH_SINGLE_LINE: CommentSyntax = CommentSyntax {
        opener: Cow::Borrowed("//"),
        closer: Cow::Borrowed(""),
    };
    pub const SLASH_MULTILINE: CommentSyntax = CommentSyntax {
        opener: Cow::Borrowed("/*"),
        closer: Cow::Borrowed("*/"),
    };
    pub const HASHTAG_SINGLE_LINE: CommentSyntax = CommentSyntax {
        opener: Cow::Borrowed("#"),
        closer: Cow::Borrowed(""),
    };

    pub fn new(opener: impl Into<Cow<'static, str>>, closer: impl Into<Cow<'static, str>>) -> Self {
        CommentSyntax {
            opener: opener.into(),
            closer: closer.into(),
        }
    }

    pub fn line(opener: impl Into<Cow<'static, str>>) -> Self {
        CommentSyntax::new(opener, "")
    }

    pub fn is_line_comment(&self) -> bool {
        self.closer.is_empty()
    }

    /// Scans the comment starting at the cursor, which must sit on the opener.
    ///
    /// Line comments stop before the newline. Block comments consume their
    /// closer, or run to the end of input when it never shows up.
    pub fn tokenize(&self, state: &mut State) -> Lexed {
        let position = state.position();
        let start = state.cursor();
        state.advance(self.opener.chars().count());
        let body_start = state.cursor();

        let body_end = if self.is_line_comment() {
            while !state.cursor_is_out_of_bounds() && state.char_at_cursor() != '\n' {
                state.advance(1);
            }
            state.cursor()
        } else {
            while !state.cursor_is_out_of_bounds() && !state.next_chars_are(&self.closer) {
                state.advance(1);
            }
            let body_end = state.cursor();
            state.advance(self.closer.chars().count());
            body_end
        };

        let token = MK_TOKEN!(
            TokenType::COMMENT,
            state.source_substring(start, state.cursor()),
            Some(TokenValue::String(state.source_substring(body_start, body_end))),
            position
        );

        (token, None)
    }
}

#[derive(Debug, Clone)]
pub struct CommentTokenizer {
    syntaxes: Vec<CommentSyntax>,
}

impl CommentTokenizer {
    pub fn new(syntaxes: Vec<CommentSyntax>) -> Self {
        let syntaxes = syntaxes
            .into_iter()
            .filter(|syntax| !syntax.opener.is_empty())
            .collect();

        CommentTokenizer { syntaxes }
    }

    pub fn syntaxes(&self) -> &[CommentSyntax] {
        &self.syntaxes
    }

    fn recognize(&self, state: &State) -> Option<&CommentSyntax> {
        self.syntaxes
            .iter()
            .find(|syntax| state.next_chars_are(&syntax.opener))
    }
}

impl Default for CommentTokenizer {
    fn default() -> Self {
        CommentTokenizer::new(vec![CommentSyntax::SLASH_SINGLE_LINE, CommentSyntax::SLASH_MULTILINE])
    }
}

impl Tokenizer for CommentTokenizer {
    fn can_tokenize(&self, state: &State) -> bool {
        self.recognize(state).is_some()
    }

    fn tokenize(&self, state: &mut State) -> Lexed {
        match self.recognize(state) {
            Some(syntax) => syntax.tokenize(state),
            None => state.invalid_token(),
        }
    }

    fn try_tokenize(&self, state: &mut State) -> Option<Lexed> {
        self.recognize(state).map(|syntax| syntax.tokenize(state))
    }
}
