//! Post-lexer configuration
//!
//! `defaults/episteme.default.toml` is embedded into the library so the documented defaults
//! and the runtime defaults cannot drift apart. Callers layer their own files and overrides on
//! top via [Loader] before deserializing into [PipelineConfig]; the transformers validate
//! what they are given when they are built.

use crate::episteme::lexing::common::ConfigurationError;
use crate::episteme::token::TokenKind;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/episteme.default.toml");

/// Default pattern recognizing a comment line. Matches up to and including the marker.
pub const DEFAULT_COMMENT_STRIP: &str = r"\s*[#\x{FE5F}\x{FF03}]";

/// Default pattern for comment lines that never become documentation.
pub const DEFAULT_COMMENT_SKIP: &str = r"\s*[#\x{FE5F}\x{FF03}]!";

/// Configuration of both post-lexers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PipelineConfig {
    pub indenter: IndenterConfig,
    pub doc: DocConfig,
}

/// Token kinds and widths driving the indentation tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndenterConfig {
    pub new_line: TokenKind,
    pub open_paren: Vec<TokenKind>,
    pub close_paren: Vec<TokenKind>,
    pub indent_token: TokenKind,
    pub dedent_token: TokenKind,
    pub tab_len: usize,
}

impl Default for IndenterConfig {
    fn default() -> Self {
        Self {
            new_line: TokenKind::NEWLINE,
            open_paren: vec![
                TokenKind::LPAR,
                TokenKind::LSQB,
                TokenKind::LBRACE,
                TokenKind::STRING_LEFT,
            ],
            close_paren: vec![
                TokenKind::RPAR,
                TokenKind::RSQB,
                TokenKind::RBRACE,
                TokenKind::STRING_RIGHT,
            ],
            indent_token: TokenKind::INDENT,
            dedent_token: TokenKind::DEDENT,
            tab_len: 8,
        }
    }
}

/// Token kinds and comment patterns driving the documentation extractor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocConfig {
    pub def_tokens: Vec<TokenKind>,
    pub neutral_tokens: Vec<TokenKind>,
    pub new_line: TokenKind,
    pub doc_token: TokenKind,
    pub comment_strip: String,
    pub comment_skip: String,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            def_tokens: vec![TokenKind::DEF],
            neutral_tokens: vec![TokenKind::INDENT, TokenKind::DEDENT],
            new_line: TokenKind::NEWLINE,
            doc_token: TokenKind::DOC,
            comment_strip: DEFAULT_COMMENT_STRIP.to_string(),
            comment_skip: DEFAULT_COMMENT_SKIP.to_string(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a TOML document held in memory.
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override, e.g. `("indenter.tab_len", 4)`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigurationError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<PipelineConfig, ConfigurationError> {
        let config = self.builder.build()?.try_deserialize()?;
        tracing::debug!(?config, "loaded post-lexer configuration");
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PipelineConfig, ConfigurationError> {
    Loader::new().build()
}
