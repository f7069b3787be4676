//! Chorus CLI library
//!
//! This module contains the core CLI logic for the Chorus sequence tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use chorus::{ChorusError, SequenceBuilder};

/// Run the Chorus CLI application
///
/// This function processes the input file through the Chorus pipeline
/// and writes the normalized sequence as JSON to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ChorusError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), ChorusError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing sequence"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = SequenceBuilder::new(app_config);
    let sequence = builder.parse(&source)?;
    let json = builder.render_json(&sequence)?;

    fs::write(&args.output, json)?;

    info!(output_file = args.output; "JSON exported successfully");

    Ok(())
}
