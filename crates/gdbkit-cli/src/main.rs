//! gdbkit CLI - Command-line interface
//!
//! Runs the document conversion and geodatabase inventory batches against
//! the host adapters.

mod cli;
mod commands;
mod config_loader;
mod errors;
mod output;
mod progress;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();
    let json = cli.json;

    // Execute the command
    match commands::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let error = errors::from_anyhow(error);
            if json {
                output::OutputWriter::new(true).error(&error);
            } else {
                error.display();
            }
            ExitCode::FAILURE
        }
    }
}
