//! Token type produced by the [`lexer`](super::lexer).

use std::fmt;

use crate::span::Span;

/// A single token together with the text that preceded it.
///
/// `separator` holds the inert characters (spaces, tabs, carriage returns)
/// between the previous token and this one. Keeping it lets the line parser
/// rebuild titles, labels and multi-word agent names exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub separator: String,
    pub value: String,
    /// Set for tokens read from a quoted string. A quoted newline never ends
    /// a line.
    pub quoted: bool,
    pub span: Span,
}

impl Token {
    /// Create an unquoted token with no source location.
    pub fn new(separator: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            value: value.into(),
            quoted: false,
            span: Span::default(),
        }
    }

    /// Create a quoted token with no source location.
    pub fn quoted(separator: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            quoted: true,
            ..Self::new(separator, value)
        }
    }

    /// Returns `true` for an unquoted newline, which ends a line.
    pub fn is_line_break(&self) -> bool {
        !self.quoted && self.value == "\n"
    }

    /// Returns `true` if the token's value is exactly `text`.
    pub fn is(&self, text: &str) -> bool {
        self.value == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
