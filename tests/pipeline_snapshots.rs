//! Snapshot tests of the standard pipeline
//!
//! Each sample is lexed, run through indentation and documentation, and rendered with
//! `format_tokens`, one `KIND "text"` line per token.

use episteme_lexing::episteme::token::format_tokens;
use episteme_lexing::episteme::transforms::standard::lex;

fn render(source: &str) -> String {
    format_tokens(&lex(source).expect("sample lexes"))
}

#[test]
fn test_documented_function() {
    let source = "# Module docs\n\n# Adds numbers\ndef add(a, b):\n    return a + b\n";
    insta::assert_snapshot!(render(source), @r###"
    DOC " Module docs\n"
    _NEWLINE "# Module docs\n\n# Adds numbers\n"
    DOC " Adds numbers\n"
    DEF "def"
    NAME "add"
    ( "("
    NAME "a"
    COMMA ","
    NAME "b"
    ) ")"
    COLON ":"
    _NEWLINE "\n    "
    _INDENT "    "
    NAME "return"
    NAME "a"
    OP "+"
    NAME "b"
    _NEWLINE "\n"
    _DEDENT ""
    "###);
}

#[test]
fn test_multiline_brackets() {
    let source = "total = sum([\n    1,\n    2,\n])\n";
    insta::assert_snapshot!(render(source), @r###"
    DOC ""
    NAME "total"
    EQUAL "="
    NAME "sum"
    ( "("
    [ "["
    NUMBER "1"
    COMMA ","
    NUMBER "2"
    COMMA ","
    ] "]"
    ) ")"
    _NEWLINE "\n"
    "###);
}

#[test]
fn test_nested_definitions() {
    let source = "def outer:\n    def inner:\n        x\n    y\n";
    insta::assert_snapshot!(render(source), @r###"
    DOC ""
    DEF "def"
    NAME "outer"
    COLON ":"
    _NEWLINE "\n    "
    _INDENT "    "
    DOC ""
    DEF "def"
    NAME "inner"
    COLON ":"
    _NEWLINE "\n        "
    _INDENT "        "
    NAME "x"
    _NEWLINE "\n    "
    _DEDENT "    "
    NAME "y"
    _NEWLINE "\n"
    _DEDENT ""
    "###);
}

#[test]
fn test_shebang_and_fullwidth_comments() {
    let source = "#!/usr/bin/env episteme\n\u{FF03} wide comment\ndef f:\n\tpass\n";
    insta::assert_snapshot!(render(source), @r###"
    _NEWLINE "#!/usr/bin/env episteme\n＃ wide comment\n"
    DOC " wide comment\n"
    DEF "def"
    NAME "f"
    COLON ":"
    _NEWLINE "\n\t"
    _INDENT "\t"
    NAME "pass"
    _NEWLINE "\n"
    _DEDENT ""
    "###);
}
