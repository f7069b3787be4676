//! Grouping tokens into logical lines.

use std::ops::Range;

use log::debug;

use crate::{span::Span, tokens::Token};

/// One logical line: a non-empty run of tokens with no unquoted newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    tokens: Vec<Token>,
}

impl Line {
    /// Create a line from tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the token at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Returns `true` if the token at `index` has exactly the value `text`.
    pub fn is_at(&self, index: usize, text: &str) -> bool {
        self.get(index).is_some_and(|token| token.is(text))
    }

    /// Index of the first token at or after `start` whose value is `text`.
    pub fn find(&self, text: &str, start: usize) -> Option<usize> {
        self.tokens
            .iter()
            .skip(start)
            .position(|token| token.is(text))
            .map(|offset| start + offset)
    }

    /// Rebuild the source text of the tokens in `range`.
    ///
    /// The first token contributes only its value; every later token
    /// contributes its separator and value, so inner spacing is kept exactly
    /// while leading whitespace is dropped.
    pub fn join(&self, range: Range<usize>) -> String {
        join_tokens(self.tokens.get(range).unwrap_or_default())
    }

    /// Rebuild the whole line, for diagnostics.
    pub fn text(&self) -> String {
        join_tokens(&self.tokens)
    }

    /// Source span from the first token to the last.
    pub fn span(&self) -> Span {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => first.span.union(last.span),
            _ => Span::default(),
        }
    }
}

/// Rebuild the source text of a token run; see [`Line::join`].
pub(crate) fn join_tokens(tokens: &[Token]) -> String {
    let mut text = String::new();
    for (index, token) in tokens.iter().enumerate() {
        if index > 0 {
            text.push_str(&token.separator);
        }
        text.push_str(&token.value);
    }
    text
}

/// Split a token stream into lines at each unquoted newline.
///
/// Lines with no tokens are dropped rather than returned empty.
pub fn split_lines(tokens: Vec<Token>) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current = Vec::new();

    for token in tokens {
        if token.is_line_break() {
            if !current.is_empty() {
                lines.push(Line::new(std::mem::take(&mut current)));
            }
        } else {
            current.push(token);
        }
    }
    if !current.is_empty() {
        lines.push(Line::new(current));
    }

    debug!(lines = lines.len(); "Split tokens into lines");
    lines
}
