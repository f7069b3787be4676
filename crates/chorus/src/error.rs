//! Error types for Chorus operations.
//!
//! This module provides the main error type [`ChorusError`] which wraps
//! the failures that can occur while converting a document.

use std::io;

use thiserror::Error;

use chorus_parser::ParseError;

/// The main error type for Chorus operations.
///
/// The `Parse` variant keeps the source text next to the diagnostic so a
/// caller can render snippets for every label.
#[derive(Debug, Error)]
pub enum ChorusError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Export error: {0}")]
    Export(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChorusError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
