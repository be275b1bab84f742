//! Documentation post-lexer
//!
//!     Comment lines written immediately above a definition, with no blank or unrelated line
//!     in between, document that definition. This post-lexer collects those lines and injects
//!     a `DOC` token carrying them right before the definition token, so the grammar can
//!     attach documentation with an ordinary rule such as `definition: DOC DEF NAME ...`.
//!
//!     Comments never reach us as tokens of their own: the raw lexer folds whole comment lines
//!     into the `_NEWLINE` token that precedes them. So the line-break token is split back into
//!     its physical lines, each keeping its terminator, and every line is classified:
//!
//!         - matches `comment_skip` (a shebang): ignored, as if it were not there
//!         - matches `comment_strip`: a comment line, the text after the match is accumulated
//!         - anything else ending in a line terminator (a blank line, the end of a line of
//!           code): adjacency is broken, the accumulated text is dropped
//!
//! Emission rules
//!
//!     - Before every definition token a `DOC` is emitted, carrying whatever has accumulated.
//!       It may be empty: "no documentation" is information the grammar can rely on.
//!     - The stream opens with one more `DOC`, emitted before the first adjacency break (the
//!       first line break or non-neutral token), carrying the comments the file starts with.
//!       That `pending` opening slot is used at most once per stream.
//!     - Neutral tokens (`_INDENT`, `_DEDENT`) are passed through without touching the
//!       accumulator, so a comment block may sit above an indented definition.
//!
//!     The emitted `DOC` borrows the position of the token that triggered it.

use crate::episteme::config::{DocConfig, DEFAULT_COMMENT_SKIP, DEFAULT_COMMENT_STRIP};
use crate::episteme::lexing::common::ConfigurationError;
use crate::episteme::token::{Token, TokenKind};
use crate::episteme::transforms::{PostLex, TokenResult, TokenStream};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::VecDeque;

static COMMENT_STRIP: Lazy<Regex> = Lazy::new(|| {
    anchored("comment_strip", DEFAULT_COMMENT_STRIP).expect("default comment pattern is valid")
});
static COMMENT_SKIP: Lazy<Regex> = Lazy::new(|| {
    anchored("comment_skip", DEFAULT_COMMENT_SKIP).expect("default skip pattern is valid")
});

/// Compile a pattern that only matches at the start of a line.
fn anchored(name: &'static str, pattern: &str) -> Result<Regex, ConfigurationError> {
    Regex::new(&format!("^(?:{pattern})"))
        .map_err(|source| ConfigurationError::InvalidPattern { name, source })
}

/// Per-parse accumulator state.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DocState {
    accumulated: String,
    /// The opening documentation token is still owed
    pending: bool,
}

impl DocState {
    fn new() -> Self {
        Self {
            accumulated: String::new(),
            pending: true,
        }
    }
}

/// Post-lexer injecting `DOC` tokens before definitions.
#[derive(Debug, Clone)]
pub struct DocExtractor {
    def_tokens: Vec<TokenKind>,
    neutral_tokens: Vec<TokenKind>,
    new_line: TokenKind,
    doc_token: TokenKind,
    comment_strip: Regex,
    comment_skip: Regex,
    state: DocState,
}

impl DocExtractor {
    /// Create an extractor with the episteme defaults.
    pub fn new() -> Self {
        let config = DocConfig::default();
        Self {
            def_tokens: config.def_tokens,
            neutral_tokens: config.neutral_tokens,
            new_line: config.new_line,
            doc_token: config.doc_token,
            comment_strip: COMMENT_STRIP.clone(),
            comment_skip: COMMENT_SKIP.clone(),
            state: DocState::new(),
        }
    }

    /// Create an extractor for a custom grammar.
    ///
    /// Fails when a pattern does not compile or the token kinds contradict each other.
    pub fn from_config(config: DocConfig) -> Result<Self, ConfigurationError> {
        validate(&config)?;
        Ok(Self {
            comment_strip: anchored("comment_strip", &config.comment_strip)?,
            comment_skip: anchored("comment_skip", &config.comment_skip)?,
            def_tokens: config.def_tokens,
            neutral_tokens: config.neutral_tokens,
            new_line: config.new_line,
            doc_token: config.doc_token,
            state: DocState::new(),
        })
    }

    pub fn neutral_tokens(&self) -> &[TokenKind] {
        &self.neutral_tokens
    }

    pub fn doc_token(&self) -> &TokenKind {
        &self.doc_token
    }
}

impl Default for DocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(config: &DocConfig) -> Result<(), ConfigurationError> {
    if config.def_tokens.is_empty() {
        return Err(ConfigurationError::MissingKind("def_tokens"));
    }
    if config.new_line.is_empty() {
        return Err(ConfigurationError::MissingKind("new_line"));
    }
    if config.doc_token.is_empty() {
        return Err(ConfigurationError::MissingKind("doc_token"));
    }
    if let Some(kind) = config
        .def_tokens
        .iter()
        .find(|kind| config.neutral_tokens.contains(kind))
    {
        return Err(ConfigurationError::Inconsistent(format!(
            "`{kind}` cannot be both a definition and a neutral token"
        )));
    }
    if config.def_tokens.contains(&config.new_line) || config.neutral_tokens.contains(&config.new_line)
    {
        return Err(ConfigurationError::Inconsistent(format!(
            "line break token `{}` cannot be a definition or neutral token",
            config.new_line
        )));
    }
    Ok(())
}

impl PostLex for DocExtractor {
    fn process<'a>(&'a mut self, stream: TokenStream<'a>) -> TokenStream<'a> {
        tracing::debug!(doc_token = %self.doc_token, "documentation post-lexer started");
        self.state = DocState::new();
        let DocExtractor {
            def_tokens,
            neutral_tokens,
            new_line,
            doc_token,
            comment_strip,
            comment_skip,
            state,
        } = self;
        Box::new(DocumentedTokens {
            inner: stream,
            def_tokens,
            neutral_tokens,
            new_line,
            doc_token,
            comment_strip,
            comment_skip,
            state,
            queue: VecDeque::new(),
            failed: false,
        })
    }
}

/// The stream returned by [DocExtractor::process].
struct DocumentedTokens<'a> {
    inner: TokenStream<'a>,
    def_tokens: &'a [TokenKind],
    neutral_tokens: &'a [TokenKind],
    new_line: &'a TokenKind,
    doc_token: &'a TokenKind,
    comment_strip: &'a Regex,
    comment_skip: &'a Regex,
    state: &'a mut DocState,
    queue: VecDeque<Token>,
    failed: bool,
}

impl DocumentedTokens<'_> {
    fn handle(&mut self, token: Token) {
        if &token.kind == self.new_line {
            self.handle_newline(&token);
        } else if token.is_any(self.def_tokens) {
            self.emit_doc(&token);
        } else if !token.is_any(self.neutral_tokens) {
            self.interrupt(&token);
        }
        self.queue.push_back(token);
    }

    fn handle_newline(&mut self, newline: &Token) {
        for line in newline.text.split_inclusive('\n') {
            if self.comment_skip.is_match(line) {
                continue;
            }
            if let Some(found) = self.comment_strip.find(line) {
                self.state.accumulated.push_str(&line[found.end()..]);
            } else if line.contains('\n') {
                self.interrupt(newline);
            }
        }
    }

    /// Adjacency break: settle the opening slot if still owed, then forget the comments.
    fn interrupt(&mut self, token: &Token) {
        if self.state.pending {
            self.emit_doc(token);
        }
        self.state.pending = false;
        self.state.accumulated.clear();
    }

    fn emit_doc(&mut self, origin: &Token) {
        let text = std::mem::take(&mut self.state.accumulated);
        tracing::trace!(len = text.len(), "documentation token");
        self.queue
            .push_back(Token::borrow_position(self.doc_token.clone(), text, origin));
        self.state.pending = false;
    }
}

impl Iterator for DocumentedTokens<'_> {
    type Item = TokenResult;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(Ok(token));
            }
            if self.failed {
                return None;
            }
            match self.inner.next()? {
                Ok(token) => self.handle(token),
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
    }
}
