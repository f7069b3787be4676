//! Error codes for the Chorus diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Tokenizer errors
//! - `E1xx` - Line parser errors
//! - `E2xx` - Generator errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Tokenizer Errors (E0xx)
    // =========================================================================
    /// Unterminated token.
    ///
    /// The input ended inside a quoted string.
    E001,

    // =========================================================================
    // Line Parser Errors (E1xx)
    // =========================================================================
    /// Unrecognised command.
    ///
    /// No statement form matches the line.
    E100,

    /// Invalid block command.
    ///
    /// A block keyword is followed by something other than its optional
    /// filler word or a label colon, e.g. `else when: x`.
    E101,

    /// Unknown terminator.
    ///
    /// `terminators` was given a mode other than `none`, `box`, `cross` or `bar`.
    E102,

    /// Invalid note arity.
    ///
    /// A note names fewer or more agents than its form allows, e.g.
    /// `note between` with one agent or `state over` with two.
    E103,

    // =========================================================================
    // Generator Errors (E2xx)
    // =========================================================================
    /// Undefined marker.
    ///
    /// `simultaneously with <marker>:` refers to a marker that has not been
    /// defined earlier in the document.
    E200,

    /// Reserved agent.
    ///
    /// A `define`, `begin` or `end` statement names one of the sentinel
    /// agents `[` or `]`.
    E201,

    /// Extra block end.
    ///
    /// An `end` line appears with no block open.
    E202,

    /// Unterminated block.
    ///
    /// The document ends while a block is still open.
    E203,

    /// Invalid split.
    ///
    /// `else`/`elif` appears outside any block, or inside a block that
    /// cannot be split such as `repeat`.
    E204,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Tokenizer errors
            ErrorCode::E001 => "E001",
            // Line parser errors
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            // Generator errors
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            // Tokenizer errors
            ErrorCode::E001 => "unterminated token",
            // Line parser errors
            ErrorCode::E100 => "unrecognised command",
            ErrorCode::E101 => "invalid block command",
            ErrorCode::E102 => "unknown terminator",
            ErrorCode::E103 => "invalid note arity",
            // Generator errors
            ErrorCode::E200 => "undefined marker",
            ErrorCode::E201 => "reserved agent",
            ErrorCode::E202 => "extra block end",
            ErrorCode::E203 => "unterminated block",
            ErrorCode::E204 => "invalid split",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
