//! Test factories
//!
//! Helpers for building token sequences by hand, so tests can state their input as a list of
//! `(kind, text)` pairs instead of spelling out spans. Positions are computed by laying the
//! texts out one after another, as if the raw lexer had produced them from their
//! concatenation.

use crate::episteme::lexing::common::PostLexError;
use crate::episteme::token::{Position, Token, TokenKind};
use crate::episteme::transforms::{collect_tokens, stream_of, PostLex};

/// Build tokens from `(kind, text)` pairs with contiguous positions.
pub fn mk_tokens(pairs: &[(&str, &str)]) -> Vec<Token> {
    let mut cursor = Position::default();
    pairs
        .iter()
        .map(|(kind, text)| {
            let token = Token::at(TokenKind::new(*kind), *text, cursor);
            cursor = token.span.end;
            token
        })
        .collect()
}

/// Kinds of a token sequence, as strings.
pub fn kinds(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|token| token.kind.as_str()).collect()
}

/// Texts of a token sequence.
pub fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|token| token.text.as_str()).collect()
}

/// Kind and text pairs, for comparisons that ignore positions.
pub fn pairs(tokens: &[Token]) -> Vec<(&str, &str)> {
    tokens
        .iter()
        .map(|token| (token.kind.as_str(), token.text.as_str()))
        .collect()
}

/// Run a post-lexer over hand-built tokens and collect the result.
pub fn run<P: PostLex + ?Sized>(
    post_lex: &mut P,
    input: &[(&str, &str)],
) -> Result<Vec<Token>, PostLexError> {
    collect_tokens(post_lex.process(stream_of(mk_tokens(input))))
}
