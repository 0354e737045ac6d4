//! Turning describe output into report records

use chrono::NaiveDateTime;

use crate::error::{GdbkitError, Result};
use crate::models::{DescribeInfo, InventoryRecord, ItemRef, TimestampZones, NOT_APPLICABLE};

/// Timestamp layout produced by the host's describe call
pub const HOST_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Date layout written to the report
pub const REPORT_DATE_FORMAT: &str = "%Y/%m/%d";

/// Convert a host timestamp into a report date.
///
/// The timestamp carries no zone of its own: it is read in `zones.source`
/// and the calendar date is taken in `zones.report`.
pub fn report_date(timestamp: &str, zones: &TimestampZones) -> Result<String> {
    let naive = NaiveDateTime::parse_from_str(timestamp.trim(), HOST_TIMESTAMP_FORMAT).map_err(|e| {
        GdbkitError::InvalidTimestamp {
            value: timestamp.to_string(),
            reason: e.to_string(),
        }
    })?;

    let instant = zones.source.anchor(&naive).ok_or_else(|| GdbkitError::InvalidTimestamp {
        value: timestamp.to_string(),
        reason: format!("does not exist in time zone {}", zones.source),
    })?;

    Ok(zones.report.calendar_date(&instant).format(REPORT_DATE_FORMAT).to_string())
}

/// Build the report record for one item.
///
/// Rasters get `N/A` for the modification date and tables get `N/A` for the
/// spatial reference. A missing field that does apply is an error.
pub fn extract_record(
    item: &ItemRef,
    gdb_name: &str,
    describe: &DescribeInfo,
    zones: &TimestampZones,
) -> Result<InventoryRecord> {
    let last_modified_date = if describe.data_type.has_reliable_modified_date() {
        let timestamp = describe
            .date_modified
            .as_deref()
            .ok_or_else(|| GdbkitError::Introspection {
                item: item.full_path.clone(),
                reason: "no modification date".to_string(),
            })?;
        report_date(timestamp, zones)?
    } else {
        NOT_APPLICABLE.to_string()
    };

    let (wkid, spatial_reference_name) = if describe.data_type.has_spatial_reference() {
        let sr = describe
            .spatial_reference
            .as_ref()
            .ok_or_else(|| GdbkitError::Introspection {
                item: item.full_path.clone(),
                reason: "no spatial reference".to_string(),
            })?;
        (sr.factory_code.to_string(), sr.name.clone())
    } else {
        (NOT_APPLICABLE.to_string(), NOT_APPLICABLE.to_string())
    };

    Ok(InventoryRecord {
        gdb_name: gdb_name.to_string(),
        data_type: describe.data_type.clone(),
        item_name: describe.name.clone(),
        last_modified_date,
        wkid,
        spatial_reference_name,
        full_path: item.full_path.clone(),
    })
}
