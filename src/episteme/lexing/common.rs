//! Errors shared by the lexer and the post-lexers
//!
//! Two families, raised at different times:
//!
//! - [PostLexError] travels inside a token stream. A stage that hits one yields it and then
//!   ends its stream; nothing tries to recover, since a broken indentation stack makes every
//!   block after it meaningless.
//! - [ConfigurationError] is raised while building a transformer, before any token flows.

use crate::episteme::token::Position;
use thiserror::Error;

/// Block structure cannot be derived from the indentation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndentationError {
    #[error("{position}: unexpected dedent to column {width}, expected dedent to {expected}")]
    Dedent {
        width: usize,
        expected: usize,
        position: Position,
    },
    #[error("{position}: inconsistent use of tabs and spaces in indentation")]
    InconsistentTabs { position: Position },
    #[error("{position}: unmatched closing bracket {text:?}")]
    UnmatchedClose { text: String, position: Position },
}

impl IndentationError {
    pub fn position(&self) -> Position {
        match self {
            IndentationError::Dedent { position, .. }
            | IndentationError::InconsistentTabs { position }
            | IndentationError::UnmatchedClose { position, .. } => *position,
        }
    }
}

/// Errors flowing through a token stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostLexError {
    #[error("Indentation error at {0}")]
    Indentation(#[from] IndentationError),
    /// The raw lexer met input it has no token for.
    #[error("Lexing error at {position}: unexpected {text:?}")]
    Lex { text: String, position: Position },
}

impl PostLexError {
    /// Source position of the offending token.
    pub fn position(&self) -> Position {
        match self {
            PostLexError::Indentation(err) => err.position(),
            PostLexError::Lex { position, .. } => *position,
        }
    }
}

/// A transformer was configured in a way it cannot run with.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("pattern `{name}` does not compile: {source}")]
    InvalidPattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("required token kind setting `{0}` is empty")]
    MissingKind(&'static str),
    #[error("inconsistent token kinds: {0}")]
    Inconsistent(String),
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_error_display() {
        let err = IndentationError::Dedent {
            width: 2,
            expected: 0,
            position: Position::new(20, 3, 1),
        };
        assert_eq!(
            err.to_string(),
            "3:1: unexpected dedent to column 2, expected dedent to 0"
        );
    }

    #[test]
    fn test_post_lex_error_wraps_indentation() {
        let err: PostLexError = IndentationError::InconsistentTabs {
            position: Position::new(5, 2, 1),
        }
        .into();

        assert_eq!(err.position(), Position::new(5, 2, 1));
        assert_eq!(
            err.to_string(),
            "Indentation error at 2:1: inconsistent use of tabs and spaces in indentation"
        );
    }

    #[test]
    fn test_lex_error_position() {
        let err = PostLexError::Lex {
            text: "$".to_string(),
            position: Position::new(4, 1, 5),
        };
        assert_eq!(err.position().column, 5);
        assert_eq!(err.to_string(), "Lexing error at 1:5: unexpected \"$\"");
    }

    #[test]
    fn test_configuration_error_from_regex() {
        let source = regex::Regex::new("(").unwrap_err();
        let err = ConfigurationError::InvalidPattern {
            name: "comment_strip",
            source,
        };
        assert!(err.to_string().starts_with("pattern `comment_strip` does not compile"));
    }
}
