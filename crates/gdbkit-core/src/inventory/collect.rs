//! Workspace binding and item discovery

use crate::error::{GdbkitError, Result};
use crate::models::{ItemKind, ItemRef};
use crate::paths;
use crate::ports::{GeodatabaseHost, Workspace};

/// Bind a workspace and check it points at the requested geodatabase.
///
/// A handle bound to any other path is a fatal mismatch.
pub fn bind_workspace<H: GeodatabaseHost + ?Sized>(host: &H, gdb_path: &str) -> Result<H::Workspace> {
    let workspace = host.bind(gdb_path)?;
    if workspace.path() != gdb_path {
        tracing::error!("Workspace and geodatabase path don't match");
        return Err(GdbkitError::WorkspaceMismatch {
            requested: gdb_path.to_string(),
            bound: workspace.path().to_string(),
        });
    }
    Ok(workspace)
}

/// Every item of a workspace in report order: tables, rasters, feature
/// classes inside feature datasets, then feature classes at the root.
pub fn collect_items<W: Workspace + ?Sized>(workspace: &W) -> Result<Vec<ItemRef>> {
    let root = workspace.path();
    let mut items = Vec::new();

    for table in workspace.list_tables()? {
        items.push(ItemRef {
            kind: ItemKind::Table,
            full_path: paths::join(root, &table),
        });
    }

    for raster in workspace.list_rasters()? {
        items.push(ItemRef {
            kind: ItemKind::Raster,
            full_path: paths::join(root, &raster),
        });
    }

    for dataset in workspace.list_feature_datasets()? {
        let dataset_path = paths::join(root, &dataset);
        for feature_class in workspace.list_feature_classes(Some(&dataset))? {
            items.push(ItemRef {
                kind: ItemKind::DatasetFeatureClass,
                full_path: paths::join(&dataset_path, &feature_class),
            });
        }
    }

    for feature_class in workspace.list_feature_classes(None)? {
        items.push(ItemRef {
            kind: ItemKind::RootFeatureClass,
            full_path: paths::join(root, &feature_class),
        });
    }

    tracing::debug!("Collected {} items from {}", items.len(), root);
    Ok(items)
}
