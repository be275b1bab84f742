//! Token stream rendering
//!
//! Two views of a token sequence:
//!
//! - [format_tokens]: one `KIND "text"` line per token. Compact and diff-friendly, used for
//!   debugging and snapshot tests.
//! - [tokens_to_json]: kinds, texts and full spans for tooling.

use super::core::Token;
use serde_json::json;

/// Render tokens one per line as `KIND "text"`.
///
/// The text is printed with Rust debug escaping so embedded newlines stay on one line.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| format!("{} {:?}", token.kind, token.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert tokens into a JSON array.
pub fn tokens_to_json(tokens: &[Token]) -> serde_json::Value {
    json!(tokens
        .iter()
        .map(|token| {
            json!({
                "kind": token.kind.as_str(),
                "text": token.text,
                "start": {
                    "offset": token.span.start.offset,
                    "line": token.span.start.line,
                    "column": token.span.start.column,
                },
                "end": {
                    "offset": token.span.end.offset,
                    "line": token.span.end.line,
                    "column": token.span.end.column,
                },
            })
        })
        .collect::<Vec<_>>())
}
