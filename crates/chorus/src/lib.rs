//! Chorus - A line-oriented language for sequence diagrams.
//!
//! Converts Chorus source text into a normalized [`Sequence`] that a
//! renderer can lay out, and serializes it as JSON.

pub mod config;

mod error;
mod export;

pub use chorus_core::{Meta, Sequence, Stage, Terminator, agent, meta, stage};

pub use error::ChorusError;

use log::{debug, info, trace};

use config::AppConfig;
use export::JsonExporter;

/// Builder for converting Chorus documents.
///
/// # Examples
///
/// ```rust
/// use chorus::{SequenceBuilder, config::AppConfig};
///
/// let source = "Alice -> Bob: Hello";
///
/// // With custom config
/// let builder = SequenceBuilder::new(AppConfig::default());
///
/// // Parse source to a normalized sequence
/// let sequence = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Serialize the sequence
/// let json = builder.render_json(&sequence)
///     .expect("Failed to render");
/// assert!(json.contains("\"Alice\""));
///
/// // Or use default config
/// let builder = SequenceBuilder::default();
/// ```
#[derive(Default)]
pub struct SequenceBuilder {
    config: AppConfig,
}

impl SequenceBuilder {
    /// Create a new sequence builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including parser and export settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse source code into a normalized sequence.
    ///
    /// This tokenizes, parses and normalizes the document in one go.
    ///
    /// # Errors
    ///
    /// Returns [`ChorusError::Parse`] carrying the diagnostic and the source
    /// text for any lexical, line or structural error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chorus::{SequenceBuilder, config::AppConfig};
    ///
    /// let builder = SequenceBuilder::new(AppConfig::default());
    /// let sequence = builder.parse("A -> B\nB -> C")
    ///     .expect("Failed to parse sequence");
    /// assert_eq!(sequence.agents, vec!["[", "A", "B", "C", "]"]);
    /// ```
    pub fn parse(&self, source: &str) -> Result<Sequence, ChorusError> {
        info!("Parsing sequence");

        let parse_config = self.config.parser().to_parse_config();
        let sequence = chorus_parser::compile(source, &parse_config)
            .map_err(|err| ChorusError::new_parse_error(err, source))?;

        debug!(
            agents = sequence.agents.len(),
            stages = sequence.stages.len();
            "Sequence parsed successfully"
        );
        trace!(sequence:?; "Parsed sequence");

        Ok(sequence)
    }

    /// Serialize a sequence to JSON.
    ///
    /// Output is pretty-printed unless the export configuration turns it off.
    ///
    /// # Errors
    ///
    /// Returns [`ChorusError::Export`] if serialization fails.
    pub fn render_json(&self, sequence: &Sequence) -> Result<String, ChorusError> {
        info!(pretty = self.config.export().pretty(); "Rendering sequence as JSON");
        let json = JsonExporter::new(self.config.export()).export(sequence)?;
        Ok(json)
    }
}
