//! Post-lexer infrastructure
//!
//! A post-lexer sits between the raw lexer and the parser and rewrites the token stream on
//! its way through. This module provides the pieces every post-lexer shares.
//!
//! # The `PostLex` Trait
//!
//! One operation: take a stream, return a stream.
//!
//! ```rust,ignore
//! pub trait PostLex {
//!     fn process<'a>(&'a mut self, stream: TokenStream<'a>) -> TokenStream<'a>;
//! }
//! ```
//!
//! The returned stream keeps a mutable borrow of the post-lexer for as long as it lives.
//! Per-parse state (indentation stack, documentation accumulator) lives on the post-lexer and
//! is reset at the top of `process`, so one instance serves any number of parses in sequence
//! while the borrow checker rules out two parses running through it at once.
//!
//! # Streams
//!
//! [TokenStream] is a boxed iterator of `Result<Token, PostLexError>`. Everything is pulled
//! on demand: no stage materializes its input, so unbounded inputs work in bounded memory.
//! Errors are in-band; a stage that yields an `Err` yields nothing after it.
//!
//! # Composition
//!
//! [PostLexChain] wraps an ordered list of post-lexers and is a post-lexer itself, so chains
//! nest. Stages run in registration order:
//!
//! ```rust,ignore
//! let mut chain = PostLexChain::new()
//!     .with(Indenter::default())       // sees the raw tokens
//!     .with(DocExtractor::default());  // sees the indenter's output
//! let tokens = collect_tokens(chain.process(stream))?;
//! ```
//!
//! See [standard] for the pre-built episteme pipeline.

pub mod chain;
pub mod standard;

pub use chain::PostLexChain;

use crate::episteme::lexing::common::PostLexError;
use crate::episteme::token::Token;

/// Item of every token stream.
pub type TokenResult = Result<Token, PostLexError>;

/// A lazy, single-pass token stream.
pub type TokenStream<'a> = Box<dyn Iterator<Item = TokenResult> + 'a>;

/// A token stream transformer.
pub trait PostLex {
    /// Wrap `stream` into the transformed stream.
    ///
    /// Resets all per-parse state before returning.
    fn process<'a>(&'a mut self, stream: TokenStream<'a>) -> TokenStream<'a>;
}

impl<P: PostLex + ?Sized> PostLex for Box<P> {
    fn process<'a>(&'a mut self, stream: TokenStream<'a>) -> TokenStream<'a> {
        (**self).process(stream)
    }
}

/// Stream over already-lexed tokens.
pub fn stream_of(tokens: Vec<Token>) -> TokenStream<'static> {
    stream_from(tokens)
}

/// Stream over any token iterator, lazily.
pub fn stream_from<'a, I>(tokens: I) -> TokenStream<'a>
where
    I: IntoIterator<Item = Token>,
    I::IntoIter: 'a,
{
    Box::new(tokens.into_iter().map(Ok))
}

/// Drain a stream, stopping at the first error.
pub fn collect_tokens(stream: TokenStream<'_>) -> Result<Vec<Token>, PostLexError> {
    stream.collect()
}
