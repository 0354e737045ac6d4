//! Shaping an inventory into the styled spreadsheet report

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::models::InventoryReport;

use super::style::TableStyleName;
use super::workbook::{ReportSheet, ReportWorkbook, TableDefinition};

/// Default name of the report table
pub const DEFAULT_TABLE_NAME: &str = "GeodatabaseItems";

/// Sheet name used for new reports
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Column widths (character units) in report column order
pub const DEFAULT_COLUMN_WIDTHS: [f64; 7] = [35.0, 15.0, 25.0, 20.0, 15.0, 40.0, 150.0];

/// How the report sheet is dressed up after the data is in place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLayout {
    pub table_name: String,
    pub table_style: TableStyleName,
    pub column_widths: Vec<f64>,
    pub wrap_text: bool,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            table_style: TableStyleName::default(),
            column_widths: DEFAULT_COLUMN_WIDTHS.to_vec(),
            wrap_text: true,
        }
    }
}

/// Apply the layout to a sheet: one named table over the data extent,
/// fixed column widths and wrapped text.
///
/// An existing table with the same name is dropped first, so formatting is
/// idempotent, and so is any other table overlapping the data. Returns the
/// replaced same-name definition, if any.
pub fn format_sheet(sheet: &mut ReportSheet, layout: &ReportLayout) -> Option<TableDefinition> {
    let replaced = sheet.remove_table(&layout.table_name);
    if replaced.is_some() {
        tracing::debug!("Removed existing table {}", layout.table_name);
    }

    if let Some(mut extent) = sheet.dimension() {
        // A table needs at least one data row below its header
        if extent.rows() < 2 {
            extent.last_row = extent.first_row + 1;
        }
        // Tables may not overlap, so differently named ones over the data go too
        for table in sheet.remove_overlapping(&extent) {
            tracing::warn!("Removed table {} overlapping the report data", table.name);
        }
        tracing::debug!("Defining table {} over {}", layout.table_name, extent);
        sheet.define_table(TableDefinition::new(
            layout.table_name.clone(),
            extent,
            layout.table_style,
        ));
    } else {
        tracing::warn!("Sheet {} is empty; no table defined", sheet.name());
    }

    for (col, &width) in layout.column_widths.iter().enumerate() {
        sheet.set_column_width(col as u16, width);
    }
    sheet.set_wrap_text(layout.wrap_text);

    replaced
}

/// Sheet holding the report's header and rows
pub fn report_sheet(report: &InventoryReport) -> ReportSheet {
    ReportSheet::from_rows(DEFAULT_SHEET_NAME, report.to_table())
}

/// Write a fresh, formatted report to `path`
pub fn write_report(report: &InventoryReport, path: &Path, layout: &ReportLayout) -> Result<()> {
    tracing::info!("Exporting {} rows...", report.len());
    let mut sheet = report_sheet(report);

    tracing::info!("Formatting report...");
    format_sheet(&mut sheet, layout);

    sheet.save(path)
}

/// Re-apply the layout to the first sheet of an existing report file in
/// place. Other sheets are written back with their cells and tables.
///
/// Returns `true` when a table of the same name was replaced.
pub fn reformat_report(path: &Path, layout: &ReportLayout) -> Result<bool> {
    let mut workbook = ReportWorkbook::open(path)?;
    let replaced = workbook
        .first_sheet_mut()
        .and_then(|sheet| format_sheet(sheet, layout));
    workbook.save(path)?;
    Ok(replaced.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataType, InventoryRecord, NOT_APPLICABLE};

    fn record(name: &str) -> InventoryRecord {
        InventoryRecord {
            gdb_name: "city.gdb".into(),
            data_type: DataType::Table,
            item_name: name.into(),
            last_modified_date: "2024/01/01".into(),
            wkid: NOT_APPLICABLE.into(),
            spatial_reference_name: NOT_APPLICABLE.into(),
            full_path: format!("/data/city.gdb/{}", name),
        }
    }

    #[test]
    fn test_format_sheet_covers_full_extent() {
        let report = InventoryReport {
            records: vec![record("A"), record("B"), record("C")],
        };
        let mut sheet = report_sheet(&report);
        let replaced = format_sheet(&mut sheet, &ReportLayout::default());

        assert!(replaced.is_none());
        assert_eq!(sheet.tables().len(), 1);
        let table = &sheet.tables()[0];
        assert_eq!(table.name, DEFAULT_TABLE_NAME);
        assert_eq!(table.range.to_string(), "A1:G4");
        assert!(table.show_first_column);
        assert!(table.show_row_stripes);
        assert!(!table.show_last_column);
        assert!(!table.show_column_stripes);
        assert!(sheet.wraps_text());
    }

    #[test]
    fn test_column_widths_follow_column_order() {
        let mut sheet = report_sheet(&InventoryReport::new());
        format_sheet(&mut sheet, &ReportLayout::default());
        let widths: Vec<f64> = (0..7).map(|c| sheet.column_width(c).unwrap()).collect();
        assert_eq!(widths, vec![35.0, 15.0, 25.0, 20.0, 15.0, 40.0, 150.0]);
    }

    #[test]
    fn test_header_only_report_still_gets_a_data_row() {
        let mut sheet = report_sheet(&InventoryReport::new());
        format_sheet(&mut sheet, &ReportLayout::default());
        assert_eq!(sheet.tables()[0].range.to_string(), "A1:G2");
    }

    #[test]
    fn test_formatting_twice_keeps_one_table() {
        let report = InventoryReport {
            records: vec![record("A")],
        };
        let mut sheet = report_sheet(&report);
        let layout = ReportLayout::default();

        assert!(format_sheet(&mut sheet, &layout).is_none());
        let replaced = format_sheet(&mut sheet, &layout);

        assert_eq!(replaced.map(|t| t.name), Some(DEFAULT_TABLE_NAME.to_string()));
        assert_eq!(sheet.tables().len(), 1);
    }

    #[test]
    fn test_renamed_table_replaces_overlapping_one() {
        let report = InventoryReport {
            records: vec![record("A"), record("B")],
        };
        let mut sheet = report_sheet(&report);
        format_sheet(&mut sheet, &ReportLayout::default());

        let renamed = ReportLayout {
            table_name: "Items".to_string(),
            ..ReportLayout::default()
        };
        assert!(format_sheet(&mut sheet, &renamed).is_none());

        let names: Vec<&str> = sheet.tables().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Items"]);
    }
}
