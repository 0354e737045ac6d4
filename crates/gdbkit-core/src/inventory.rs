//! Geodatabase inventory pipeline
//!
//! Bind each geodatabase, list its items, describe them, and gather the
//! records into a single [`InventoryReport`](crate::models::InventoryReport).

pub mod aggregate;
pub mod collect;
pub mod extract;

pub use aggregate::{inventory_workspace, run_inventory, InventoryObserver, NoopObserver};
pub use collect::{bind_workspace, collect_items};
pub use extract::{extract_record, report_date};
