//! Core token types and helpers shared across the lexer, the post-lexers and tooling.

pub mod core;
pub mod formatting;
pub mod position;

pub use self::core::{Token, TokenKind};
pub use formatting::{format_tokens, tokens_to_json};
pub use position::{Position, Span};
