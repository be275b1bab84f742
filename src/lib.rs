//! # episteme-lexing
//!
//! Token-stream post-processing for the episteme language.
//!
//! The raw lexer hands over a flat token stream; before a grammar-driven parser sees it, the
//! stream goes through a chain of post-lexers:
//!
//!     raw lexer -> Indenter -> DocExtractor -> parser
//!
//! - The [Indenter](episteme::lexing::transformations::indentation::Indenter) turns
//!   significant leading whitespace into `_INDENT` / `_DEDENT` tokens, ignoring indentation
//!   inside brackets.
//! - The [DocExtractor](episteme::lexing::transformations::documentation::DocExtractor)
//!   injects a `DOC` token carrying the comment lines that immediately precede a definition.
//! - [PostLexChain](episteme::transforms::PostLexChain) composes any number of post-lexers
//!   into one, in data-flow order.
//!
//! Everything is lazy: every stage pulls from the previous one on demand, so memory use does
//! not grow with the input.

pub mod episteme;
