//! Integration tests for the spreadsheet report
//!
//! Reports are written to disk and read back to check cells and table
//! definitions survive the round trip through the file format.

use gdbkit_core::models::{DataType, InventoryRecord, InventoryReport, NOT_APPLICABLE, REPORT_COLUMNS};
use gdbkit_core::report::{
    reformat_report, write_report, CellRange, ReportLayout, ReportSheet, ReportWorkbook,
    TableDefinition, TableStyleName, DEFAULT_TABLE_NAME,
};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

fn sample_report() -> InventoryReport {
    InventoryReport {
        records: vec![
            InventoryRecord {
                gdb_name: "city.gdb".into(),
                data_type: DataType::Table,
                item_name: "Owners".into(),
                last_modified_date: "2024/02/10".into(),
                wkid: NOT_APPLICABLE.into(),
                spatial_reference_name: NOT_APPLICABLE.into(),
                full_path: "/data/city.gdb/Owners".into(),
            },
            InventoryRecord {
                gdb_name: "city.gdb".into(),
                data_type: DataType::FeatureClass,
                item_name: "Parcels".into(),
                last_modified_date: "2024/03/01".into(),
                wkid: "2277".into(),
                spatial_reference_name: "NAD_1983_StatePlane_Texas_Central_FIPS_4203_Feet".into(),
                full_path: "/data/city.gdb/Cadastre/Parcels".into(),
            },
        ],
    }
}

#[test]
fn test_written_report_reads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.xlsx");

    write_report(&sample_report(), &path, &ReportLayout::default()).unwrap();

    let sheet = ReportSheet::open(&path).unwrap();
    assert_eq!(sheet.name(), "Sheet1");
    assert_eq!(sheet.rows().len(), 3);
    assert_eq!(sheet.rows()[0], REPORT_COLUMNS.iter().map(|c| c.to_string()).collect::<Vec<_>>());
    assert_eq!(sheet.rows()[2][0], "Parcels");
    assert_eq!(sheet.rows()[2][4], "2277");
    assert_eq!(sheet.rows()[1][5], "N/A");

    let names: Vec<&str> = sheet.tables().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec![DEFAULT_TABLE_NAME]);
    assert_eq!(sheet.tables()[0].range.to_string(), "A1:G3");
}

#[test]
fn test_reformat_replaces_existing_table() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.xlsx");

    // A stale table of the same name covering only part of the data
    let mut sheet = ReportSheet::from_rows("Sheet1", sample_report().to_table());
    sheet.define_table(TableDefinition::new(
        DEFAULT_TABLE_NAME,
        CellRange {
            first_row: 0,
            first_col: 0,
            last_row: 1,
            last_col: 2,
        },
        TableStyleName::default(),
    ));
    sheet.save(&path).unwrap();

    let replaced = reformat_report(&path, &ReportLayout::default()).unwrap();
    assert!(replaced);

    let reloaded = ReportSheet::open(&path).unwrap();
    assert_eq!(reloaded.tables().len(), 1);
    assert_eq!(reloaded.tables()[0].name, DEFAULT_TABLE_NAME);
    assert_eq!(reloaded.tables()[0].range.to_string(), "A1:G3");
}

#[test]
fn test_reformat_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.xlsx");
    let layout = ReportLayout::default();

    write_report(&sample_report(), &path, &layout).unwrap();
    assert!(reformat_report(&path, &layout).unwrap());
    assert!(reformat_report(&path, &layout).unwrap());

    let reloaded = ReportSheet::open(&path).unwrap();
    assert_eq!(reloaded.tables().len(), 1);
    assert_eq!(reloaded.rows().len(), 3);
}

#[test]
fn test_custom_table_name() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.xlsx");
    let layout = ReportLayout {
        table_name: "Inventory".to_string(),
        table_style: "TableStyleLight9".parse().unwrap(),
        ..ReportLayout::default()
    };

    write_report(&sample_report(), &path, &layout).unwrap();

    let reloaded = ReportSheet::open(&path).unwrap();
    assert_eq!(reloaded.tables().len(), 1);
    assert_eq!(reloaded.tables()[0].name, "Inventory");
}

#[test]
fn test_open_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(ReportSheet::open(&dir.path().join("missing.xlsx")).is_err());
}

#[test]
fn test_reformat_keeps_other_sheets() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.xlsx");

    let mut workbook = Workbook::new();
    let report = workbook.add_worksheet().set_name("Sheet1").unwrap();
    for (r, row) in sample_report().to_table().iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            report.write_string(r as u32, c as u16, value).unwrap();
        }
    }
    let notes = workbook.add_worksheet().set_name("Notes").unwrap();
    notes.write_string(0, 0, "keep me").unwrap();
    workbook.save(&path).unwrap();

    assert!(!reformat_report(&path, &ReportLayout::default()).unwrap());

    let reloaded = ReportWorkbook::open(&path).unwrap();
    let names: Vec<&str> = reloaded.sheets().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Sheet1", "Notes"]);

    let report = &reloaded.sheets()[0];
    assert_eq!(report.tables().len(), 1);
    assert_eq!(report.tables()[0].range.to_string(), "A1:G3");

    let notes = &reloaded.sheets()[1];
    assert_eq!(notes.rows()[0][0], "keep me");
    assert!(notes.tables().is_empty());
}
