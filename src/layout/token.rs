//! Token model shared by every layout pass.
//!
//! A token is either one lexical unit produced by the lexer or one run of layout
//! whitespace. Line breaks live inside whitespace tokens: the whitespace token that
//! holds the `\n` is the last token of its line and carries `ends_line`.
//!
//! Tokens know nothing about their neighbours. Links are owned by
//! [`TokenStream`](super::stream::TokenStream), so cloning a token always yields
//! an isolated copy.

/// Lexical class assigned by the lexer. The layout passes never change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Whitespace,
    Comment,
    ReservedWord,
    Identifier,
    Directive,
    Number,
    StringLiteral,
    Symbol,
    /// Parenthesised continuation. Only used as an indent-stack tag.
    VirtualRoundBracket,
}

impl TokenClass {
    /// Short label used in debug listings.
    pub fn label(self) -> &'static str {
        match self {
            TokenClass::Whitespace => "whitespace",
            TokenClass::Comment => "comment",
            TokenClass::ReservedWord => "reserved-word",
            TokenClass::Identifier => "identifier",
            TokenClass::Directive => "directive",
            TokenClass::Number => "number",
            TokenClass::StringLiteral => "string",
            TokenClass::Symbol => "symbol",
            TokenClass::VirtualRoundBracket => "virtual-round-bracket",
        }
    }
}

/// Per-token switches consulted by downstream passes (case fixing, spacing,
/// wrapping). The layout engine carries them through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeatureFlags {
    pub case_fix_reserved: bool,
    pub case_fix_directive: bool,
    pub case_fix_identifier: bool,
    pub space_insertion: bool,
    pub indent: bool,
    pub wrap: bool,
    pub blank_lines: bool,
}

impl FeatureFlags {
    /// Every feature enabled.
    pub fn all() -> Self {
        FeatureFlags {
            case_fix_reserved: true,
            case_fix_directive: true,
            case_fix_identifier: true,
            space_insertion: true,
            indent: true,
            wrap: true,
            blank_lines: true,
        }
    }

    /// Every feature disabled.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Line-position markers plus the feature switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TokenFlags {
    pub begins_line: bool,
    pub ends_line: bool,
    pub features: FeatureFlags,
}

impl TokenFlags {
    pub fn new(features: FeatureFlags) -> Self {
        TokenFlags {
            begins_line: false,
            ends_line: false,
            features,
        }
    }

    /// Same features, both line markers set. Used for a synthesized blank line.
    pub fn whole_line(features: FeatureFlags) -> Self {
        TokenFlags {
            begins_line: true,
            ends_line: true,
            features,
        }
    }

    /// Same features, only `begins_line` set. Used for synthesized indentation.
    pub fn line_start(features: FeatureFlags) -> Self {
        TokenFlags {
            begins_line: true,
            ends_line: false,
            features,
        }
    }
}

/// One positioned token. `row` and `col` are zero-based and must always match the
/// rendered location of the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub class: TokenClass,
    pub flags: TokenFlags,
    pub row: usize,
    pub col: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, class: TokenClass, flags: TokenFlags) -> Self {
        Token {
            text: text.into(),
            class,
            flags,
            row: 0,
            col: 0,
        }
    }

    /// Builder-style position setter.
    pub fn at(mut self, row: usize, col: usize) -> Self {
        self.row = row;
        self.col = col;
        self
    }

    /// Exact class comparison and case-insensitive text comparison.
    ///
    /// Used to recognise closing keywords such as `end` and `until`.
    pub fn matches(&self, class: TokenClass, text: &str) -> bool {
        self.class == class && self.text.eq_ignore_ascii_case(text)
    }

    /// Rendered width in columns.
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of line breaks contained in the text.
    pub fn newline_count(&self) -> usize {
        self.text.matches('\n').count()
    }

    /// Whether the text finishes with a line break, so the next token starts a line.
    ///
    /// A multi-line comment contains breaks but does not end its line.
    pub fn ends_with_line_break(&self) -> bool {
        self.text.ends_with('\n')
    }

    /// Row and column right after the last character, where the next token sits.
    pub fn end_position(&self) -> (usize, usize) {
        match self.text.rfind('\n') {
            Some(last) => (
                self.row + self.newline_count(),
                self.text[last + 1..].chars().count(),
            ),
            None => (self.row, self.col + self.width()),
        }
    }

    pub fn is_whitespace(&self) -> bool {
        self.class == TokenClass::Whitespace
    }

    pub fn is_comment(&self) -> bool {
        self.class == TokenClass::Comment
    }

    /// Whitespace or comment, the tokens skipped when looking for an anchor.
    pub fn is_trivia(&self) -> bool {
        self.is_whitespace() || self.is_comment()
    }
}
