//! Base tokenization for episteme sources
//!
//! This module provides a raw tokenizer built on the logos lexer library. It is where source
//! strings become token streams; everything downstream is a transformation of that stream.
//!
//! It covers a small indentation-sensitive surface (definitions, names, numbers, strings,
//! brackets and a few operators), enough to feed the post-lexers from real text. The shape of
//! its `_NEWLINE` token is what matters to them: a line break, the indentation after it, and
//! any comment lines in between are folded into a single token,
//!
//!     _NEWLINE: ( /\r?\n[\t ]*/ | COMMENT )+
//!
//! so the indentation post-lexer reads the next line's width off the token's last line and
//! the documentation post-lexer finds comment lines inside it.
//!
//! This is NOT a transformation - transformations operate on token streams.

use crate::episteme::lexing::common::PostLexError;
use crate::episteme::token::{Position, Span, Token, TokenKind};
use crate::episteme::transforms::{TokenResult, TokenStream};
use logos::Logos;

/// Raw token categories recognized by the logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\f]+")]
pub enum RawToken {
    #[regex(r"(\r?\n[\t ]*|[#\x{FE5F}\x{FF03}][^\r\n]*)+")]
    Newline,

    #[token("def")]
    Def,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    #[regex(r"[0-9][0-9_]*(\.[0-9]+)?")]
    Number,

    #[regex(r#""[^"\r\n]*""#)]
    String,

    #[token("(")]
    LPar,
    #[token(")")]
    RPar,
    #[token("[")]
    LSqb,
    #[token("]")]
    RSqb,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("=")]
    Equal,

    #[regex(r"[-+*/<>.^'|&%]")]
    Op,
}

impl RawToken {
    /// Grammar terminal name of this category.
    pub fn kind(self) -> TokenKind {
        match self {
            RawToken::Newline => TokenKind::NEWLINE,
            RawToken::Def => TokenKind::DEF,
            RawToken::Name => TokenKind::NAME,
            RawToken::Number => TokenKind::NUMBER,
            RawToken::String => TokenKind::STRING,
            RawToken::LPar => TokenKind::LPAR,
            RawToken::RPar => TokenKind::RPAR,
            RawToken::LSqb => TokenKind::LSQB,
            RawToken::RSqb => TokenKind::RSQB,
            RawToken::LBrace => TokenKind::LBRACE,
            RawToken::RBrace => TokenKind::RBRACE,
            RawToken::Colon => TokenKind::COLON,
            RawToken::Comma => TokenKind::COMMA,
            RawToken::Equal => TokenKind::EQUAL,
            RawToken::Op => TokenKind::OP,
        }
    }
}

/// Lazy tokenizer tracking line and column alongside logos' byte spans.
pub struct RawLexer<'s> {
    source: &'s str,
    inner: logos::Lexer<'s, RawToken>,
    cursor: Position,
    failed: bool,
}

impl<'s> RawLexer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            inner: RawToken::lexer(source),
            cursor: Position::default(),
            failed: false,
        }
    }
}

impl Iterator for RawLexer<'_> {
    type Item = TokenResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.inner.next()?;
        let range = self.inner.span();
        // Walk over whatever logos skipped to keep lines and columns right
        let start = self
            .cursor
            .advance(&self.source[self.cursor.offset..range.start]);
        let text = self.inner.slice();
        let span = Span::covering(start, text);
        self.cursor = span.end;

        match result {
            Ok(raw) => Some(Ok(Token::new(raw.kind(), text, span))),
            Err(()) => {
                self.failed = true;
                Some(Err(PostLexError::Lex {
                    text: text.to_string(),
                    position: start,
                }))
            }
        }
    }
}

/// Tokenize source text into a lazy token stream.
///
/// Unrecognized input ends the stream with [PostLexError::Lex].
pub fn tokenize(source: &str) -> TokenStream<'_> {
    Box::new(RawLexer::new(source))
}
