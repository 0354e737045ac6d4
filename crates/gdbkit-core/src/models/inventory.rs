use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for fields that do not apply to an item's data type
pub const NOT_APPLICABLE: &str = "N/A";

/// Report column headers, in output order
pub const REPORT_COLUMNS: [&str; 7] = [
    "Item Name",
    "Data Type",
    "GDB Name",
    "Last Modified Date",
    "WKID",
    "Spatial Reference",
    "Full Path",
];

/// Data type reported by the host's describe call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Table,
    RasterDataset,
    FeatureClass,
    /// Any other host type string (e.g. "ShapeFile"), kept verbatim
    Other(String),
}

impl DataType {
    pub fn from_host(s: &str) -> Self {
        match s {
            "Table" => DataType::Table,
            "RasterDataset" => DataType::RasterDataset,
            "FeatureClass" => DataType::FeatureClass,
            other => DataType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DataType::Table => "Table",
            DataType::RasterDataset => "RasterDataset",
            DataType::FeatureClass => "FeatureClass",
            DataType::Other(s) => s,
        }
    }

    /// Tables carry no spatial reference
    pub fn has_spatial_reference(&self) -> bool {
        !matches!(self, DataType::Table)
    }

    /// Rasters report modification time unreliably
    pub fn has_reliable_modified_date(&self) -> bool {
        !matches!(self, DataType::RasterDataset)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DataType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(DataType::from_host(&s))
    }
}

/// Spatial reference as exposed by describe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialReferenceInfo {
    /// Factory code (WKID); 0 for unknown references
    pub factory_code: i64,

    /// Display name
    pub name: String,
}

/// Result of introspecting a single geodatabase item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeInfo {
    pub data_type: DataType,

    pub name: String,

    /// Timestamp text in `YYYY-MM-DDTHH:MM:SS.ffffff` form
    #[serde(default)]
    pub date_modified: Option<String>,

    #[serde(default)]
    pub spatial_reference: Option<SpatialReferenceInfo>,
}

/// Where an item was found inside a geodatabase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Table,
    Raster,
    /// Feature class inside a feature dataset
    DatasetFeatureClass,
    /// Feature class at the workspace root
    RootFeatureClass,
}

/// A collected item: full path plus where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub kind: ItemKind,
    pub full_path: String,
}

/// One report row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub gdb_name: String,
    pub data_type: DataType,
    pub item_name: String,
    pub last_modified_date: String,
    pub wkid: String,
    pub spatial_reference_name: String,
    pub full_path: String,
}

impl InventoryRecord {
    /// Cell values in report column order
    pub fn to_row(&self) -> [String; 7] {
        [
            self.item_name.clone(),
            self.data_type.to_string(),
            self.gdb_name.clone(),
            self.last_modified_date.clone(),
            self.wkid.clone(),
            self.spatial_reference_name.clone(),
            self.full_path.clone(),
        ]
    }
}

/// All records of one run, in discovery order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryReport {
    pub records: Vec<InventoryRecord>,
}

impl InventoryReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Header row followed by one row per record
    pub fn to_table(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.records.len() + 1);
        rows.push(REPORT_COLUMNS.iter().map(|c| c.to_string()).collect());
        rows.extend(self.records.iter().map(|r| r.to_row().to_vec()));
        rows
    }
}
