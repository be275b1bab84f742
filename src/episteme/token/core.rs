//! Token definitions
//!
//!     A token is the unit every pipeline stage consumes and produces: a kind label, the exact
//!     text it stands for, and its source span. Tokens are immutable values; stages never edit
//!     a token in place, they either pass it on or emit new ones next to it.
//!
//!     Kinds are string labels rather than an enum. The raw lexer and the grammar agree on
//!     terminal names (`_NEWLINE`, `DEF`, `(`), and the post-lexers are configured with those
//!     same names, so a configuration file can retarget the pipeline to a different grammar
//!     without recompiling.

use super::position::{Position, Span};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Symbolic label of a token's grammatical category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenKind(Cow<'static, str>);

impl TokenKind {
    /// Line break, carrying the whole whitespace and comment run that follows it.
    pub const NEWLINE: TokenKind = TokenKind::from_static("_NEWLINE");
    pub const INDENT: TokenKind = TokenKind::from_static("_INDENT");
    pub const DEDENT: TokenKind = TokenKind::from_static("_DEDENT");
    pub const DOC: TokenKind = TokenKind::from_static("DOC");
    pub const DEF: TokenKind = TokenKind::from_static("DEF");
    pub const NAME: TokenKind = TokenKind::from_static("NAME");
    pub const NUMBER: TokenKind = TokenKind::from_static("NUMBER");
    pub const STRING: TokenKind = TokenKind::from_static("STRING");
    pub const COLON: TokenKind = TokenKind::from_static("COLON");
    pub const COMMA: TokenKind = TokenKind::from_static("COMMA");
    pub const EQUAL: TokenKind = TokenKind::from_static("EQUAL");
    pub const OP: TokenKind = TokenKind::from_static("OP");
    pub const LPAR: TokenKind = TokenKind::from_static("(");
    pub const RPAR: TokenKind = TokenKind::from_static(")");
    pub const LSQB: TokenKind = TokenKind::from_static("[");
    pub const RSQB: TokenKind = TokenKind::from_static("]");
    pub const LBRACE: TokenKind = TokenKind::from_static("{");
    pub const RBRACE: TokenKind = TokenKind::from_static("}");
    /// Opening half of a string with an interpolation still open.
    pub const STRING_LEFT: TokenKind = TokenKind::from_static("STRING_LEFT");
    pub const STRING_RIGHT: TokenKind = TokenKind::from_static("STRING_RIGHT");

    pub const fn from_static(name: &'static str) -> Self {
        TokenKind(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        TokenKind(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TokenKind {
    fn from(name: &'static str) -> Self {
        TokenKind::from_static(name)
    }
}

impl From<String> for TokenKind {
    fn from(name: String) -> Self {
        TokenKind::new(name)
    }
}

impl PartialEq<str> for TokenKind {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TokenKind {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A lexical token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: impl Into<TokenKind>, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            span,
        }
    }

    /// Token starting at `start`, its end computed from the text.
    pub fn at(kind: impl Into<TokenKind>, text: impl Into<String>, start: Position) -> Self {
        let text = text.into();
        let span = Span::covering(start, &text);
        Self::new(kind, text, span)
    }

    /// Synthetic token located where `origin` is.
    ///
    /// The span is copied by value, including the end: a `DOC` emitted in front of a `DEF`
    /// reports exactly the definition keyword's location.
    pub fn borrow_position(
        kind: impl Into<TokenKind>,
        text: impl Into<String>,
        origin: &Token,
    ) -> Self {
        Self::new(kind, text, origin.span)
    }

    pub fn is(&self, kind: &TokenKind) -> bool {
        &self.kind == kind
    }

    pub fn is_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn start(&self) -> Position {
        self.span.start
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text)
    }
}
