//! Chorus CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use chorus_cli::{Args, error_adapter::Report};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Chorus");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = chorus_cli::run(&args) {
        let report = Report::new(&err);
        let mut writer = String::new();
        if miette::GraphicalReportHandler::new()
            .render_report(&mut writer, &report)
            .is_err()
        {
            writer = report.to_string();
        }

        error!("{writer}");
        process::exit(1);
    }

    info!("Completed successfully");
}
