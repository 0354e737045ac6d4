use clap::{Parser, Subcommand};
use gdbkit_core::config::{parse_tail_policy, parse_unknown_mode};
use gdbkit_core::models::{TimeZoneSpec, UnknownModePolicy};
use gdbkit_core::naming::TailPolicy;
use gdbkit_core::report::TableStyleName;
use std::path::PathBuf;

/// gdbkit - Batch GIS automation
#[derive(Parser, Debug)]
#[command(name = "gdbkit")]
#[command(
    about = "Import legacy map documents and inventory geodatabases",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import legacy documents into a project and rename their layouts and maps
    Convert(ConvertArgs),

    /// Inventory geodatabases into a spreadsheet report
    Inventory(InventoryArgs),

    /// Re-apply table formatting to an existing report
    FormatReport(FormatReportArgs),

    /// Show the effective configuration and where each value came from
    Config,
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Batch mode: Folder or File
    #[arg(long)]
    pub mode: String,

    /// Folder to scan for legacy documents (Folder mode)
    #[arg(long, value_name = "DIR")]
    pub directory: Option<String>,

    /// Quoted, semicolon-separated document list, e.g. "'a.mxd';'b.mxd'" (File mode)
    #[arg(long, value_name = "LIST")]
    pub files: Option<String>,

    /// Operate on the host's open project; it is not saved
    #[arg(long, conflicts_with = "project")]
    pub current: bool,

    /// Project file to import into and save
    #[arg(long, value_name = "FILE", required_unless_present = "current")]
    pub project: Option<String>,

    /// Host snapshot (JSON) describing the importable documents
    #[arg(long, value_name = "SNAPSHOT")]
    pub host: PathBuf,

    /// Legacy document extension (default: mxd)
    #[arg(long)]
    pub extension: Option<String>,

    /// How suffix tails are carried onto map names (legacy or grammar)
    #[arg(long, value_parser = parse_tail_policy)]
    pub tail_policy: Option<TailPolicy>,

    /// What to do with an unrecognised mode (reject or ignore)
    #[arg(long, value_parser = parse_unknown_mode)]
    pub unknown_mode: Option<UnknownModePolicy>,
}

#[derive(Parser, Debug)]
pub struct InventoryArgs {
    /// Quoted, semicolon-separated geodatabase list, e.g. "'a.gdb';'b.gdb'"
    #[arg(long, value_name = "LIST")]
    pub gdbs: String,

    /// Output spreadsheet (.xlsx)
    #[arg(long, value_name = "FILE")]
    pub report: PathBuf,

    /// Host snapshot (JSON) describing the geodatabase catalogs
    #[arg(long, value_name = "SNAPSHOT")]
    pub host: PathBuf,

    /// Zone the host's naive timestamps are expressed in (local, utc, +HH:MM)
    #[arg(long, value_name = "ZONE")]
    pub source_zone: Option<TimeZoneSpec>,

    /// Zone the report's calendar dates are taken in
    #[arg(long, value_name = "ZONE")]
    pub report_zone: Option<TimeZoneSpec>,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(Parser, Debug)]
pub struct FormatReportArgs {
    /// Report to format in place
    pub path: PathBuf,

    #[command(flatten)]
    pub table: TableArgs,
}

#[derive(clap::Args, Debug)]
pub struct TableArgs {
    /// Name of the table defined over the report (default: GeodatabaseItems)
    #[arg(long)]
    pub table_name: Option<String>,

    /// Table style, e.g. TableStyleMedium2
    #[arg(long)]
    pub table_style: Option<TableStyleName>,
}
