pub mod document;
pub mod inventory;
pub mod zone;

pub use document::{BatchMode, LegacyDocumentRef, ProjectTarget, UnknownModePolicy, LEGACY_EXTENSION};
pub use inventory::{
    DataType, DescribeInfo, InventoryRecord, InventoryReport, ItemKind, ItemRef,
    SpatialReferenceInfo, NOT_APPLICABLE, REPORT_COLUMNS,
};
pub use zone::{TimeZoneSpec, TimestampZones};
