//! Indentation post-lexer
//!
//!     This post-lexer turns significant leading whitespace into `_INDENT` and `_DEDENT`
//!     tokens, Python style, so the grammar can treat blocks like brace-delimited ones.
//!
//!     The raw lexer folds each line break together with the whitespace (and whole comment
//!     lines) that follow it into one `_NEWLINE` token. The text after the last `\n` of that
//!     token is the indentation of the next line of code, which is all we need to measure.
//!
//!     Inside brackets indentation means nothing: an expression may continue over several
//!     lines at any indentation. While a bracket is open, line breaks are dropped altogether.
//!
//! Algorithm
//!
//!     The state is a stack of indentation widths, starting with a sentinel 0, and a bracket
//!     depth counter. For every `_NEWLINE` outside brackets:
//!         1. Yield the line break itself
//!         2. Measure the next line's width (spaces count 1, tabs count `tab_len`)
//!         3. Wider than the top of the stack: push it and emit one `_INDENT`
//!         4. Narrower: pop and emit one `_DEDENT` per popped level until the top matches;
//!            landing between two levels is an error
//!         5. Equal: nothing to emit
//!     At the end of the stream one `_DEDENT` is emitted per level still open, so every
//!     `_INDENT` is balanced.
//!
//!     To catch ambiguous tab/space mixes, each level also records its width with tabs
//!     counted as 1. If the two measures disagree on whether a line is deeper, shallower or
//!     level with a stack entry, the file is ambiguous and rejected.

use crate::episteme::config::IndenterConfig;
use crate::episteme::lexing::common::{ConfigurationError, IndentationError, PostLexError};
use crate::episteme::token::{Span, Token};
use crate::episteme::transforms::{PostLex, TokenResult, TokenStream};
use std::cmp::Ordering;
use std::collections::VecDeque;

/// Width of one indentation level, measured twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Level {
    /// Tabs counted as `tab_len` columns
    width: usize,
    /// Tabs counted as one column
    tabs_as_one: usize,
}

impl Level {
    const SENTINEL: Level = Level {
        width: 0,
        tabs_as_one: 0,
    };
}

/// Per-parse indentation state.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IndentState {
    levels: Vec<Level>,
    paren_level: usize,
}

impl IndentState {
    fn new() -> Self {
        Self {
            levels: vec![Level::SENTINEL],
            paren_level: 0,
        }
    }

    fn top(&self) -> Level {
        // The sentinel is never popped
        self.levels.last().copied().unwrap_or(Level::SENTINEL)
    }
}

/// Post-lexer injecting `_INDENT` / `_DEDENT` tokens.
#[derive(Debug, Clone)]
pub struct Indenter {
    config: IndenterConfig,
    state: IndentState,
}

impl Indenter {
    /// Create an indenter with the episteme defaults.
    pub fn new() -> Self {
        Self {
            config: IndenterConfig::default(),
            state: IndentState::new(),
        }
    }

    /// Create an indenter for a custom grammar, checking the kinds are coherent.
    pub fn from_config(config: IndenterConfig) -> Result<Self, ConfigurationError> {
        validate(&config)?;
        Ok(Self {
            config,
            state: IndentState::new(),
        })
    }

    pub fn config(&self) -> &IndenterConfig {
        &self.config
    }

    /// Number of indentation levels currently open, sentinel excluded.
    pub fn depth(&self) -> usize {
        self.state.levels.len() - 1
    }
}

impl Default for Indenter {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(config: &IndenterConfig) -> Result<(), ConfigurationError> {
    if config.new_line.is_empty() {
        return Err(ConfigurationError::MissingKind("new_line"));
    }
    if config.indent_token.is_empty() {
        return Err(ConfigurationError::MissingKind("indent_token"));
    }
    if config.dedent_token.is_empty() {
        return Err(ConfigurationError::MissingKind("dedent_token"));
    }
    if config.tab_len == 0 {
        return Err(ConfigurationError::Inconsistent(
            "tab_len must be at least 1".to_string(),
        ));
    }
    if config.indent_token == config.dedent_token {
        return Err(ConfigurationError::Inconsistent(format!(
            "indent and dedent tokens are both `{}`",
            config.indent_token
        )));
    }
    if let Some(kind) = config
        .open_paren
        .iter()
        .find(|kind| config.close_paren.contains(kind))
    {
        return Err(ConfigurationError::Inconsistent(format!(
            "`{kind}` both opens and closes a bracket"
        )));
    }
    if config.open_paren.contains(&config.new_line) || config.close_paren.contains(&config.new_line)
    {
        return Err(ConfigurationError::Inconsistent(format!(
            "line break token `{}` cannot be a bracket",
            config.new_line
        )));
    }
    Ok(())
}

impl PostLex for Indenter {
    fn process<'a>(&'a mut self, stream: TokenStream<'a>) -> TokenStream<'a> {
        tracing::debug!(tab_len = self.config.tab_len, "indentation post-lexer started");
        self.state = IndentState::new();
        Box::new(IndentedTokens {
            inner: stream,
            config: &self.config,
            state: &mut self.state,
            queue: VecDeque::new(),
            last_span: None,
            error: None,
            done: false,
        })
    }
}

/// The stream returned by [Indenter::process].
struct IndentedTokens<'a> {
    inner: TokenStream<'a>,
    config: &'a IndenterConfig,
    state: &'a mut IndentState,
    queue: VecDeque<Token>,
    /// Span of the last token pulled, anchoring the end-of-stream dedents
    last_span: Option<Span>,
    error: Option<PostLexError>,
    done: bool,
}

impl IndentedTokens<'_> {
    fn handle(&mut self, token: Token) -> Result<(), IndentationError> {
        self.last_span = Some(token.span);

        if token.kind == self.config.new_line {
            return self.handle_newline(token);
        }

        let opens = token.is_any(&self.config.open_paren);
        let closes = token.is_any(&self.config.close_paren);
        let text = token.text.clone();
        let position = token.start();
        self.queue.push_back(token);

        if opens {
            self.state.paren_level += 1;
        } else if closes {
            if self.state.paren_level == 0 {
                return Err(IndentationError::UnmatchedClose { text, position });
            }
            self.state.paren_level -= 1;
        }
        Ok(())
    }

    fn handle_newline(&mut self, token: Token) -> Result<(), IndentationError> {
        if self.state.paren_level > 0 {
            return Ok(());
        }

        let Some((_, last_line)) = token.text.rsplit_once('\n') else {
            // No line boundary in this token
            self.queue.push_back(token);
            return Ok(());
        };
        let indent_str: String = last_line
            .chars()
            .take_while(|ch| *ch == ' ' || *ch == '\t')
            .collect();
        let level = self.measure(&indent_str);

        match self.compare(level, &token)? {
            Ordering::Greater => {
                self.state.levels.push(level);
                tracing::trace!(width = level.width, "indent");
                let indent =
                    Token::borrow_position(self.config.indent_token.clone(), &indent_str, &token);
                self.queue.push_back(token);
                self.queue.push_back(indent);
            }
            Ordering::Equal => self.queue.push_back(token),
            Ordering::Less => {
                let mut dedents = Vec::new();
                while self.compare(level, &token)? == Ordering::Less {
                    self.state.levels.pop();
                    tracing::trace!(width = level.width, "dedent");
                    dedents.push(Token::borrow_position(
                        self.config.dedent_token.clone(),
                        &indent_str,
                        &token,
                    ));
                }
                let expected = self.state.top().width;
                let position = token.start();
                self.queue.push_back(token);
                self.queue.extend(dedents);

                if level.width != expected {
                    return Err(IndentationError::Dedent {
                        width: level.width,
                        expected,
                        position,
                    });
                }
            }
        }
        Ok(())
    }

    fn measure(&self, indent_str: &str) -> Level {
        let tabs = indent_str.chars().filter(|ch| *ch == '\t').count();
        let spaces = indent_str.len() - tabs;
        Level {
            width: spaces + tabs * self.config.tab_len,
            tabs_as_one: spaces + tabs,
        }
    }

    /// Order `level` against the top of the stack, rejecting ambiguous tab use.
    fn compare(&self, level: Level, token: &Token) -> Result<Ordering, IndentationError> {
        let top = self.state.top();
        let ordering = level.width.cmp(&top.width);
        if ordering != level.tabs_as_one.cmp(&top.tabs_as_one) {
            return Err(IndentationError::InconsistentTabs {
                position: token.start(),
            });
        }
        Ok(ordering)
    }

    fn close_blocks(&mut self) {
        let span = self
            .last_span
            .map(Span::collapse_to_end)
            .unwrap_or_default();
        while self.state.levels.len() > 1 {
            self.state.levels.pop();
            tracing::trace!("dedent at end of stream");
            self.queue
                .push_back(Token::new(self.config.dedent_token.clone(), "", span));
        }
    }
}

impl Iterator for IndentedTokens<'_> {
    type Item = TokenResult;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(Ok(token));
            }
            if self.done {
                return self.error.take().map(Err);
            }
            match self.inner.next() {
                Some(Ok(token)) => {
                    if let Err(err) = self.handle(token) {
                        self.error = Some(err.into());
                        self.done = true;
                    }
                }
                Some(Err(err)) => {
                    self.error = Some(err);
                    self.done = true;
                }
                None => {
                    self.close_blocks();
                    self.done = true;
                }
            }
        }
    }
}
