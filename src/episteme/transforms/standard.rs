//! Standard post-lexer pipelines
//!
//! The indenter runs first and the documentation extractor second: the extractor treats the
//! indenter's `_INDENT` / `_DEDENT` as neutral, so comments stay attached to a definition
//! that opens a new block.

use crate::episteme::config::PipelineConfig;
use crate::episteme::lexing::base_tokenization::tokenize;
use crate::episteme::lexing::common::{ConfigurationError, PostLexError};
use crate::episteme::lexing::transformations::{DocExtractor, Indenter};
use crate::episteme::token::Token;
use crate::episteme::transforms::{collect_tokens, PostLex, PostLexChain};

/// The default episteme pipeline: indentation, then documentation.
pub fn episteme_pipeline() -> PostLexChain {
    PostLexChain::new()
        .with(Indenter::new())
        .with(DocExtractor::new())
}

/// Build the pipeline for a custom grammar.
pub fn from_config(config: &PipelineConfig) -> Result<PostLexChain, ConfigurationError> {
    check_agreement(config)?;
    let indenter = Indenter::from_config(config.indenter.clone())?;
    let extractor = DocExtractor::from_config(config.doc.clone())?;
    Ok(PostLexChain::new().with(indenter).with(extractor))
}

/// The two post-lexers must agree on the kinds they hand to each other.
fn check_agreement(config: &PipelineConfig) -> Result<(), ConfigurationError> {
    let PipelineConfig { indenter, doc } = config;
    if indenter.new_line != doc.new_line {
        return Err(ConfigurationError::Inconsistent(format!(
            "indenter line break `{}` differs from documentation line break `{}`",
            indenter.new_line, doc.new_line
        )));
    }
    for kind in [&indenter.indent_token, &indenter.dedent_token] {
        if !doc.neutral_tokens.contains(kind) {
            return Err(ConfigurationError::Inconsistent(format!(
                "`{kind}` must be a neutral token for documentation"
            )));
        }
    }
    Ok(())
}

/// Tokenize `source` with the reference lexer and run it through [episteme_pipeline].
pub fn lex(source: &str) -> Result<Vec<Token>, PostLexError> {
    let mut pipeline = episteme_pipeline();
    collect_tokens(pipeline.process(tokenize(source)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::episteme::lexing::common::IndentationError;
    use crate::episteme::testing::{kinds, pairs};
    use crate::episteme::token::{Position, TokenKind};

    #[test]
    fn test_definition_opens_block() {
        let tokens = lex("def foo:\n    1\n").unwrap();
        assert_eq!(
            pairs(&tokens),
            vec![
                ("DOC", ""),
                ("DEF", "def"),
                ("NAME", "foo"),
                ("COLON", ":"),
                ("_NEWLINE", "\n    "),
                ("_INDENT", "    "),
                ("NUMBER", "1"),
                ("_NEWLINE", "\n"),
                ("_DEDENT", ""),
            ]
        );
    }

    #[test]
    fn test_block_closed_at_end_of_source() {
        let tokens = lex("def foo:\n    1").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec!["DOC", "DEF", "NAME", "COLON", "_NEWLINE", "_INDENT", "NUMBER", "_DEDENT"]
        );
        // Borrowed from the end of the last real token
        assert_eq!(tokens[7].span.start, Position::new(14, 2, 6));
    }

    #[test]
    fn test_comment_block_documents_definition() {
        let tokens = lex("# first line\n# second line\ndef foo\n").unwrap();
        assert_eq!(
            pairs(&tokens),
            vec![
                ("_NEWLINE", "# first line\n# second line\n"),
                ("DOC", " first line\n second line\n"),
                ("DEF", "def"),
                ("NAME", "foo"),
                ("_NEWLINE", "\n"),
            ]
        );
    }

    #[test]
    fn test_blank_line_detaches_comment_block() {
        let tokens = lex("# comment\n\ndef foo\n").unwrap();
        assert_eq!(
            pairs(&tokens),
            vec![
                ("DOC", " comment\n"),
                ("_NEWLINE", "# comment\n\n"),
                ("DOC", ""),
                ("DEF", "def"),
                ("NAME", "foo"),
                ("_NEWLINE", "\n"),
            ]
        );
    }

    #[test]
    fn test_brackets_suppress_indentation() {
        let tokens = lex("(\n    1\n)").unwrap();
        assert_eq!(kinds(&tokens), vec!["DOC", "(", "NUMBER", ")"]);
    }

    #[test]
    fn test_dedent_to_unknown_width() {
        let err = lex("def f:\n    a\n  b\n").unwrap_err();
        assert_eq!(
            err,
            PostLexError::Indentation(IndentationError::Dedent {
                width: 2,
                expected: 0,
                position: Position::new(12, 2, 6),
            })
        );
    }

    #[test]
    fn test_documented_nested_definition() {
        let source = "def outer:\n    # inner docs\n    def inner:\n        1\n";
        let tokens = lex(source).unwrap();
        let docs: Vec<_> = tokens
            .iter()
            .filter(|token| token.kind == TokenKind::DOC)
            .map(|token| token.text.as_str())
            .collect();
        assert_eq!(docs, vec!["", " inner docs\n"]);
    }

    #[test]
    fn test_lex_error_surfaces() {
        let err = lex("def $").unwrap_err();
        assert!(matches!(err, PostLexError::Lex { .. }));
    }

    #[test]
    fn test_from_defaults_matches_standard_pipeline() {
        let source = "# docs\ndef f:\n    g(1,\n  2)\n";
        let mut configured = from_config(&PipelineConfig::default()).unwrap();
        let configured = collect_tokens(configured.process(tokenize(source))).unwrap();
        assert_eq!(configured, lex(source).unwrap());
    }

    #[test]
    fn test_rejects_disagreeing_line_breaks() {
        let mut config = PipelineConfig::default();
        config.doc.new_line = TokenKind::new("_NL");
        assert!(matches!(
            from_config(&config),
            Err(ConfigurationError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_rejects_non_neutral_block_tokens() {
        let mut config = PipelineConfig::default();
        config.doc.neutral_tokens = vec![TokenKind::INDENT];
        assert!(matches!(
            from_config(&config),
            Err(ConfigurationError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_pipeline_is_reusable() {
        let mut pipeline = episteme_pipeline();
        let source = "def f:\n    1\n";
        let first = collect_tokens(pipeline.process(tokenize(source))).unwrap();
        let second = collect_tokens(pipeline.process(tokenize(source))).unwrap();
        assert_eq!(first, second);
    }
}
