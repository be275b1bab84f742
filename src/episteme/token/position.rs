//! Source positions
//!
//!     Every token carries the span of source text it was cut from. Synthetic tokens never
//!     invent a location: they copy the span of the token that triggered them, so a parser
//!     error on an `_INDENT` or a `DOC` still points at a real place in the file.
//!
//!     Lines and columns are 1-based, offsets are 0-based byte offsets. Columns count chars,
//!     not bytes.

use serde::Serialize;
use std::fmt;

/// A point in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// The position right after `text`, assuming `text` starts at `self`.
    ///
    /// Embedded newlines move to column 1 of the next line, which is what line-break tokens
    /// carrying several physical lines need.
    pub fn advance(self, text: &str) -> Position {
        let mut next = self;
        for ch in text.chars() {
            next.offset += ch.len_utf8();
            if ch == '\n' {
                next.line += 1;
                next.column = 1;
            } else {
                next.column += 1;
            }
        }
        next
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0, 1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start and end of a token, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span of `text` starting at `start`.
    pub fn covering(start: Position, text: &str) -> Self {
        Self::new(start, start.advance(text))
    }

    /// Zero-width span at the end of this one.
    pub fn collapse_to_end(self) -> Self {
        Self::new(self.end, self.end)
    }
}
