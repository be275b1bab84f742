//! Lexer
//!
//!     This module holds everything that produces or rewrites tokens before the parser sees
//!     them.
//!
//! The Lexing Pipeline
//!
//!     The pipeline consists of:
//!         1. Base tokenization with the logos lexer. See [base_tokenization].
//!            Line breaks, the indentation after them, and whole comment lines are folded
//!            into single `_NEWLINE` tokens.
//!
//!         2. Indentation. See [indentation](transformations::indentation).
//!            `_NEWLINE` whitespace becomes `_INDENT` / `_DEDENT` events; inside brackets
//!            line breaks disappear.
//!
//!         3. Documentation. See [documentation](transformations::documentation).
//!            Comment lines directly above a definition become a `DOC` token in front of it.
//!
//!     Steps 2 and 3 are post-lexers, composed with
//!     [PostLexChain](crate::episteme::transforms::PostLexChain); the raw lexer can be swapped
//!     for any other source of tokens that honors the same `_NEWLINE` contract.
//!
//! Source Position Preservation
//!
//!     Synthetic tokens borrow the span of the token that caused them. Nothing in the pipeline
//!     rewrites the span of a token it passes through, so error messages from the parser point
//!     at real source locations.

pub mod base_tokenization;
pub mod common;
pub mod transformations;

pub use base_tokenization::tokenize;
pub use common::{ConfigurationError, IndentationError, PostLexError};
pub use transformations::{DocExtractor, Indenter};
