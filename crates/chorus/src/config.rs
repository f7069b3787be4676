//! Configuration types for Chorus.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every section and field is optional.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining parser and export settings.
//! - [`ParserConfig`] - Defaults applied before a document's own metadata lines.
//! - [`ExportConfig`] - Controls how a sequence is serialized.
//!
//! # Example
//!
//! ```
//! # use chorus::config::AppConfig;
//! # use chorus::Terminator;
//! let config = AppConfig::default();
//! assert_eq!(config.parser().default_terminators(), Terminator::None);
//! assert!(config.export().pretty());
//! ```

use serde::Deserialize;

use chorus_core::Terminator;
use chorus_parser::ParseConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(parser: ParserConfig, export: ExportConfig) -> Self {
        Self { parser, export }
    }

    /// Returns the parser configuration.
    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Parser defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParserConfig {
    /// Terminator mode a document starts with, until a `terminators` line
    /// replaces it.
    #[serde(default)]
    default_terminators: Terminator,
}

impl ParserConfig {
    pub fn new(default_terminators: Terminator) -> Self {
        Self {
            default_terminators,
        }
    }

    /// Returns the initial terminator mode.
    pub fn default_terminators(&self) -> Terminator {
        self.default_terminators
    }

    /// Builds the matching [`ParseConfig`] for the parser crate.
    pub fn to_parse_config(&self) -> ParseConfig {
        ParseConfig::new(self.default_terminators)
    }
}

/// Export settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl ExportConfig {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Returns `true` if JSON output is pretty-printed.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}
