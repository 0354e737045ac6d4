//! Building one report across many geodatabases

use crate::error::Result;
use crate::models::{InventoryRecord, InventoryReport, ItemRef, TimestampZones};
use crate::paths;
use crate::ports::{GeodatabaseHost, Workspace};

use super::collect::{bind_workspace, collect_items};
use super::extract::extract_record;

/// Progress notifications while an inventory runs
pub trait InventoryObserver {
    /// A geodatabase was bound and its items listed
    fn geodatabase_started(&mut self, _gdb_path: &str, _item_count: usize) {}

    /// An item was described
    fn item_done(&mut self, _record: &InventoryRecord) {}
}

/// Observer that ignores everything
pub struct NoopObserver;

impl InventoryObserver for NoopObserver {}

/// Records for a single bound workspace, in collection order
pub fn inventory_workspace<W: Workspace + ?Sized, O: InventoryObserver + ?Sized>(
    workspace: &W,
    items: &[ItemRef],
    zones: &TimestampZones,
    observer: &mut O,
) -> Result<Vec<InventoryRecord>> {
    let gdb_name = paths::last_segment(workspace.path());
    let mut records = Vec::with_capacity(items.len());

    for item in items {
        let describe = workspace.describe(&item.full_path)?;
        let record = extract_record(item, gdb_name, &describe, zones)?;
        tracing::trace!("{} -> {}", item.full_path, record.data_type);
        observer.item_done(&record);
        records.push(record);
    }

    Ok(records)
}

/// Inventory every geodatabase in order into one report.
///
/// Any binding or describe failure aborts the run and discards what was
/// gathered so far.
pub fn run_inventory<H, O>(
    host: &H,
    gdb_paths: &[String],
    zones: &TimestampZones,
    observer: &mut O,
) -> Result<InventoryReport>
where
    H: GeodatabaseHost + ?Sized,
    O: InventoryObserver + ?Sized,
{
    let mut report = InventoryReport::new();

    for gdb in gdb_paths {
        let workspace = bind_workspace(host, gdb)?;
        tracing::info!("File GDB: {}", gdb);

        tracing::info!("Fetching raster/table/feature class lists...");
        let items = collect_items(&workspace)?;
        observer.geodatabase_started(gdb, items.len());

        tracing::info!("Iterating {} items...", items.len());
        let records = inventory_workspace(&workspace, &items, zones, observer)?;
        report.records.extend(records);
    }

    tracing::info!("Inventoried {} items across {} geodatabases", report.len(), gdb_paths.len());
    Ok(report)
}
