//! Document-level metadata.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Visual style used when an agent's lifeline is started or finished.
///
/// `terminators <mode>` selects the mode used when agents still visible at the
/// end of the document are closed. Explicit `begin` statements use
/// [`Terminator::Box`] and explicit `end` statements use [`Terminator::Cross`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminator {
    #[default]
    None,
    Box,
    Cross,
    Bar,
}

impl Terminator {
    /// All terminator modes, in declaration order.
    pub const ALL: [Terminator; 4] = [
        Terminator::None,
        Terminator::Box,
        Terminator::Cross,
        Terminator::Bar,
    ];

    /// Returns the keyword used for this mode in source text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Terminator::None => "none",
            Terminator::Box => "box",
            Terminator::Cross => "cross",
            Terminator::Bar => "bar",
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no [`Terminator`] mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown terminator mode `{0}`")]
pub struct UnknownTerminator(pub String);

impl FromStr for Terminator {
    type Err = UnknownTerminator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Terminator::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownTerminator(s.to_string()))
    }
}

/// Metadata collected from `title` and `terminators` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub title: String,
    pub terminators: Terminator,
}

impl Meta {
    /// Creates metadata with an empty title and the given terminator mode.
    pub fn with_terminators(terminators: Terminator) -> Self {
        Self {
            title: String::new(),
            terminators,
        }
    }
}
