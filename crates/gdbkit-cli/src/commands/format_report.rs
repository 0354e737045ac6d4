//! Format-report command implementation

use crate::cli::FormatReportArgs;
use crate::config_loader::load_config_with_overrides;
use crate::output::OutputWriter;
use anyhow::Result;
use gdbkit_core::config::CliConfigOverrides;
use gdbkit_core::report::reformat_report;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct FormatReportOutput {
    report: String,
    table_name: String,
    table_style: String,
    replaced_existing: bool,
}

pub fn execute(
    args: FormatReportArgs,
    config_path: Option<&Path>,
    output: &OutputWriter,
) -> Result<()> {
    let config = load_config_with_overrides(
        config_path,
        CliConfigOverrides {
            table_name: args.table.table_name.clone(),
            table_style: args.table.table_style,
            ..Default::default()
        },
    )?;
    let layout = config.report_layout();

    let replaced = reformat_report(&args.path, &layout)?;

    if output.is_json() {
        return output.result(FormatReportOutput {
            report: args.path.display().to_string(),
            table_name: layout.table_name,
            table_style: layout.table_style.to_string(),
            replaced_existing: replaced,
        });
    }

    if replaced {
        output.info(format!("Replaced existing table {}", layout.table_name));
    }
    output.success(format!(
        "Formatted {} as {} ({})",
        args.path.display(),
        layout.table_name,
        layout.table_style
    ));
    Ok(())
}
