//! JSON snapshots of host state
//!
//! A snapshot describes what the host toolkit would expose: the legacy
//! documents that can be imported and the geodatabase catalogs that can be
//! bound. Project containers persist to a [`ProjectFile`].

use gdbkit_core::error::{GdbkitError, Result};
use gdbkit_core::models::{DataType, DescribeInfo, SpatialReferenceInfo};
use gdbkit_core::paths;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Everything the host can import or bind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    /// Legacy documents keyed by path
    #[serde(default)]
    pub documents: BTreeMap<String, DocumentSnapshot>,

    /// Geodatabases keyed by path
    #[serde(default)]
    pub geodatabases: BTreeMap<String, GeodatabaseSnapshot>,
}

impl HostSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let snapshot = serde_json::from_str(&content).map_err(|e| {
            GdbkitError::Serialization(format!(
                "Failed to parse host snapshot {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(snapshot)
    }

    /// Write the snapshot as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Look up a legacy document, first by exact path, then by the last
    /// two path segments so folder scans match regardless of separator.
    pub fn document(&self, path: &str) -> Option<&DocumentSnapshot> {
        if let Some(doc) = self.documents.get(path) {
            return Some(doc);
        }

        let wanted = paths::tail_segments(path, 2);
        self.documents
            .iter()
            .find(|(key, _)| paths::tail_segments(key, 2) == wanted)
            .map(|(_, doc)| doc)
    }
}

/// What importing a legacy document produces: one layout whose map frames
/// reference the listed maps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    #[serde(default = "default_layout_name")]
    pub layout: String,

    #[serde(default)]
    pub maps: Vec<String>,

    /// Kinds of the layout's other elements, e.g. `TEXT_ELEMENT`
    #[serde(default)]
    pub elements: Vec<String>,
}

fn default_layout_name() -> String {
    "Layout".to_string()
}

/// A geodatabase catalog in host listing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeodatabaseSnapshot {
    #[serde(default)]
    pub tables: Vec<CatalogItem>,

    #[serde(default)]
    pub rasters: Vec<CatalogItem>,

    #[serde(default)]
    pub feature_datasets: Vec<FeatureDatasetSnapshot>,

    /// Feature classes at the workspace root
    #[serde(default)]
    pub feature_classes: Vec<CatalogItem>,
}

/// A feature dataset and its feature classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDatasetSnapshot {
    pub name: String,

    #[serde(default)]
    pub feature_classes: Vec<CatalogItem>,
}

/// A single catalog entry with what describe reports for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,

    /// Overrides the data type implied by the listing it appears in
    #[serde(default)]
    pub data_type: Option<DataType>,

    #[serde(default)]
    pub date_modified: Option<String>,

    #[serde(default)]
    pub spatial_reference: Option<SpatialReferenceInfo>,

    /// Describe fails for this item
    #[serde(default)]
    pub unreadable: bool,
}

impl CatalogItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: None,
            date_modified: None,
            spatial_reference: None,
            unreadable: false,
        }
    }

    pub fn modified(mut self, timestamp: impl Into<String>) -> Self {
        self.date_modified = Some(timestamp.into());
        self
    }

    pub fn spatial_reference(mut self, factory_code: i64, name: impl Into<String>) -> Self {
        self.spatial_reference = Some(SpatialReferenceInfo {
            factory_code,
            name: name.into(),
        });
        self
    }

    /// Describe info as the host reports it, with `listed_as` used when no
    /// explicit data type is set
    pub fn describe(&self, listed_as: DataType) -> DescribeInfo {
        DescribeInfo {
            data_type: self.data_type.clone().unwrap_or(listed_as),
            name: self.name.clone(),
            date_modified: self.date_modified.clone(),
            spatial_reference: self.spatial_reference.clone(),
        }
    }
}

/// Persisted form of a project container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub layouts: Vec<LayoutEntry>,
}

/// A saved layout and the names of the maps its frames reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub name: String,

    #[serde(default)]
    pub maps: Vec<String>,
}

impl ProjectFile {
    /// Read a project file; a missing file is an empty project
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let project = serde_json::from_str(&content).map_err(|e| {
            GdbkitError::Serialization(format!("Failed to parse project {}: {}", path.display(), e))
        })?;
        Ok(project)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| GdbkitError::SaveFailed {
            reason: format!("{}: {}", path.display(), e),
        })
    }
}
