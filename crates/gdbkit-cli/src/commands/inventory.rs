//! Inventory command implementation

use crate::cli::InventoryArgs;
use crate::config_loader::load_config_with_overrides;
use crate::errors::{self, CliError};
use crate::output::OutputWriter;
use crate::progress::InventoryProgress;
use anyhow::Result;
use gdbkit_core::config::CliConfigOverrides;
use gdbkit_core::inventory::run_inventory;
use gdbkit_core::models::{InventoryRecord, InventoryReport};
use gdbkit_core::report::write_report;
use gdbkit_core::sources::parse_path_list;
use gdbkit_host::{HostSnapshot, MemoryCatalog};
use serde::Serialize;
use std::path::Path;
use tabled::Tabled;

#[derive(Debug, Serialize)]
struct InventoryOutput<'a> {
    report: String,
    item_count: usize,
    geodatabases: Vec<GeodatabaseCount>,
    records: &'a [InventoryRecord],
}

#[derive(Debug, Serialize, Tabled)]
struct GeodatabaseCount {
    #[tabled(rename = "Geodatabase")]
    geodatabase: String,
    #[tabled(rename = "Items")]
    items: usize,
}

/// Item counts per geodatabase, in report order
fn count_by_geodatabase(report: &InventoryReport) -> Vec<GeodatabaseCount> {
    let mut counts: Vec<GeodatabaseCount> = Vec::new();
    for record in &report.records {
        match counts.last_mut() {
            Some(last) if last.geodatabase == record.gdb_name => last.items += 1,
            _ => counts.push(GeodatabaseCount {
                geodatabase: record.gdb_name.clone(),
                items: 1,
            }),
        }
    }
    counts
}

pub fn execute(args: InventoryArgs, config_path: Option<&Path>, output: &OutputWriter) -> Result<()> {
    let config = load_config_with_overrides(
        config_path,
        CliConfigOverrides {
            source_zone: args.source_zone,
            report_zone: args.report_zone,
            table_name: args.table.table_name.clone(),
            table_style: args.table.table_style,
            ..Default::default()
        },
    )?;

    let gdbs = parse_path_list(&args.gdbs);
    if gdbs.is_empty() {
        return Err(CliError::new("Nothing to inventory")
            .with_context("--gdbs did not contain any geodatabase paths.")
            .with_suggestion("Quote each path and separate them with ';', e.g. \"'a.gdb';'b.gdb'\"")
            .into());
    }

    let snapshot = HostSnapshot::load(&args.host).map_err(|e| {
        errors::snapshot_unreadable(&args.host.display().to_string(), &e.to_string())
    })?;
    let host = MemoryCatalog::from_snapshot(&snapshot);

    let zones = config.timestamp_zones();
    tracing::debug!("Timestamps read in {} and reported in {}", zones.source, zones.report);

    let mut progress = InventoryProgress::new(output.is_json());
    let report = run_inventory(&host, &gdbs, &zones, &mut progress)?;
    progress.finish(report.len());

    write_report(&report, &args.report, &config.report_layout())?;

    let counts = count_by_geodatabase(&report);
    if output.is_json() {
        return output.result(InventoryOutput {
            report: args.report.display().to_string(),
            item_count: report.len(),
            geodatabases: counts,
            records: &report.records,
        });
    }

    output.section("Inventory");
    output.table(counts);
    output.kv("Items", report.len());
    output.success(format!("Report written: {}", args.report.display()));
    Ok(())
}
