//! Test fixtures: building positioned token streams from text.
//!
//!     The layout engine consumes streams produced by an external lexer. Tests and
//!     examples need realistic streams without that lexer, so this module carries a
//!     small logos tokenizer for Pascal-like snippets. It is lenient:
//!     anything it does not recognise becomes a one-character symbol, so positions
//!     always line up with the source.
//!
//!     Layout whitespace follows the stream conventions: spaces and tabs form one
//!     token, and trailing blanks are merged into the line break that ends the line.
//!
//!     [`stream_from_parts`] is the positional half on its own. It takes classified
//!     texts and computes rows, columns and line flags, which lets tests spell out
//!     exact token sequences.

use super::stream::TokenStream;
use super::token::{FeatureFlags, Token, TokenClass, TokenFlags};
use logos::Logos;
use once_cell::sync::Lazy;
use std::collections::HashSet;

static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "and", "array", "asm", "begin", "case", "class", "const", "constructor", "destructor",
        "div", "do", "downto", "else", "end", "except", "file", "finally", "for", "function",
        "goto", "if", "implementation", "in", "inherited", "interface", "label", "mod", "nil",
        "not", "of", "or", "packed", "procedure", "program", "record", "repeat", "set", "shl",
        "shr", "then", "to", "try", "type", "unit", "until", "uses", "var", "while", "with",
        "xor",
    ]
    .into_iter()
    .collect()
});

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[regex(r"[ \t]*\r?\n")]
    LineBreak,

    #[regex(r"[ \t]+")]
    Blank,

    #[regex(r"\{\$[^}]*\}", priority = 10)]
    Directive,

    #[regex(r"\{[^}]*\}")]
    #[regex(r"//[^\n]*")]
    Comment,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r"[0-9]+")]
    Number,

    #[regex(r"'[^'\n]*'")]
    StringLiteral,

    #[regex(r":=|<=|>=|<>|\.\.|[-+*/=<>()\[\];,.:^@]")]
    Symbol,
}

fn classify(lexeme: Lexeme, text: &str) -> TokenClass {
    match lexeme {
        Lexeme::LineBreak | Lexeme::Blank => TokenClass::Whitespace,
        Lexeme::Directive => TokenClass::Directive,
        Lexeme::Comment => TokenClass::Comment,
        Lexeme::Word if RESERVED_WORDS.contains(text.to_ascii_lowercase().as_str()) => {
            TokenClass::ReservedWord
        }
        Lexeme::Word => TokenClass::Identifier,
        Lexeme::Number => TokenClass::Number,
        Lexeme::StringLiteral => TokenClass::StringLiteral,
        Lexeme::Symbol => TokenClass::Symbol,
    }
}

/// Tokenize `source` with every feature flag enabled.
pub fn tokenize(source: &str) -> TokenStream {
    tokenize_with(source, FeatureFlags::all())
}

/// Tokenize `source`, giving every token the same feature flags.
pub fn tokenize_with(source: &str, features: FeatureFlags) -> TokenStream {
    let mut lexer = Lexeme::lexer(source);
    let mut parts = Vec::new();

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let class = match result {
            Ok(lexeme) => classify(lexeme, text),
            Err(()) => TokenClass::Symbol,
        };
        parts.push((class, text.to_string()));
    }

    stream_from_parts(parts, features)
}

/// Build a stream from classified texts, computing positions and line flags.
///
/// A token whose text ends with a line break ends its line and the token after it
/// begins the next one. Breaks inside a token, as in a multi-line comment, only
/// move the position. The first token begins a line and the last one ends it.
pub fn stream_from_parts<I, S>(parts: I, features: FeatureFlags) -> TokenStream
where
    I: IntoIterator<Item = (TokenClass, S)>,
    S: Into<String>,
{
    let mut stream = TokenStream::new();
    let mut position = (0, 0);
    let mut at_line_start = true;

    for (class, text) in parts {
        let (row, col) = position;
        let mut token = Token::new(text, class, TokenFlags::new(features)).at(row, col);
        token.flags.begins_line = at_line_start;
        token.flags.ends_line = token.ends_with_line_break();

        position = token.end_position();
        at_line_start = token.flags.ends_line;
        stream.push_back(token);
    }

    if let Some(tail) = stream.tail() {
        stream[tail].flags.ends_line = true;
    }
    stream
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(stream: &TokenStream) -> Vec<(TokenClass, String)> {
        stream
            .iter()
            .map(|(_, t)| (t.class, t.text.clone()))
            .collect()
    }

    #[test]
    fn test_classifies_pascal_snippet() {
        let stream = tokenize("{$R+} Begin x := 'a'; { c } END");
        assert_eq!(
            classes(&stream),
            vec![
                (TokenClass::Directive, "{$R+}".to_string()),
                (TokenClass::Whitespace, " ".to_string()),
                (TokenClass::ReservedWord, "Begin".to_string()),
                (TokenClass::Whitespace, " ".to_string()),
                (TokenClass::Identifier, "x".to_string()),
                (TokenClass::Whitespace, " ".to_string()),
                (TokenClass::Symbol, ":=".to_string()),
                (TokenClass::Whitespace, " ".to_string()),
                (TokenClass::StringLiteral, "'a'".to_string()),
                (TokenClass::Symbol, ";".to_string()),
                (TokenClass::Whitespace, " ".to_string()),
                (TokenClass::Comment, "{ c }".to_string()),
                (TokenClass::Whitespace, " ".to_string()),
                (TokenClass::ReservedWord, "END".to_string()),
            ]
        );
    }

    #[test]
    fn test_trailing_blanks_merge_into_line_break() {
        let stream = tokenize("x  \n  y");
        let texts: Vec<_> = stream.iter().map(|(_, t)| t.text.as_str()).collect();
        assert_eq!(texts, vec!["x", "  \n", "  ", "y"]);
    }

    #[test]
    fn test_unknown_characters_keep_positions() {
        let stream = tokenize("a # b");
        let hash = stream.iter().nth(2).map(|(_, t)| t.clone()).unwrap();
        assert_eq!(hash.text, "#");
        assert_eq!(hash.class, TokenClass::Symbol);
        assert_eq!(hash.col, 2);
    }

    #[test]
    fn test_multi_line_comment_keeps_code_on_its_last_row() {
        let stream = tokenize("{ a\n  b } x := 1;");
        let summary: Vec<_> = stream
            .iter()
            .take(3)
            .map(|(_, t)| (t.text.as_str(), t.row, t.col, t.flags.begins_line, t.flags.ends_line))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("{ a\n  b }", 0, 0, true, false),
                (" ", 1, 5, false, false),
                ("x", 1, 6, false, false),
            ]
        );
    }

    #[test]
    fn test_line_flags_and_positions() {
        let stream = stream_from_parts(
            vec![
                (TokenClass::Identifier, "a"),
                (TokenClass::Whitespace, "\n"),
                (TokenClass::Whitespace, "\n"),
                (TokenClass::Whitespace, "  "),
                (TokenClass::Identifier, "b"),
            ],
            FeatureFlags::none(),
        );
        let summary: Vec<_> = stream
            .iter()
            .map(|(_, t)| (t.row, t.col, t.flags.begins_line, t.flags.ends_line))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, 0, true, false),
                (0, 1, false, true),
                (1, 0, true, true),
                (2, 0, true, false),
                (2, 2, false, true),
            ]
        );
    }
}
