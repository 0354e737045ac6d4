//! Command implementations

mod config;
mod convert;
mod format_report;
mod inventory;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Convert(args) => convert::execute(args, config_path, &output),
        Commands::Inventory(args) => inventory::execute(args, config_path, &output),
        Commands::FormatReport(args) => format_report::execute(args, config_path, &output),
        Commands::Config => config::execute(config_path, &output),
    }
}
