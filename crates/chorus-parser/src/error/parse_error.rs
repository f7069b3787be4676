//! The ParseError type returned by every pipeline stage.

use std::fmt;

use crate::error::{Diagnostic, ErrorCode};

/// A type alias for `Result<T, Diagnostic>`.
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// Error type for the conversion pipeline.
///
/// The pipeline stops at the first problem, so a failed conversion carries
/// exactly one [`Diagnostic`]. There is no diagram for the input; callers
/// surface the diagnostic rather than rendering anything partial.
#[derive(Debug)]
pub struct ParseError {
    diagnostic: Diagnostic,
}

impl ParseError {
    /// The diagnostic describing the failure.
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Error code of the diagnostic, if it has one.
    pub fn code(&self) -> Option<ErrorCode> {
        self.diagnostic.code()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.diagnostic, f)
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }
}
