//! Token stream transformations run between the raw lexer and the parser
//!
//! - [indentation]: `_NEWLINE` whitespace into `_INDENT` / `_DEDENT` blocks
//! - [documentation]: leading comment lines into `DOC` tokens before definitions
//!
//! Both implement [PostLex](crate::episteme::transforms::PostLex) and are normally chained in
//! that order, see [standard](crate::episteme::transforms::standard).

pub mod documentation;
pub mod indentation;

pub use documentation::DocExtractor;
pub use indentation::Indenter;
