//! Spreadsheet report output

pub mod formatter;
pub mod style;
pub mod workbook;

pub use formatter::{
    format_sheet, reformat_report, report_sheet, write_report, ReportLayout, DEFAULT_COLUMN_WIDTHS,
    DEFAULT_SHEET_NAME, DEFAULT_TABLE_NAME,
};
pub use style::{StyleFamily, TableStyleName};
pub use workbook::{column_letter, CellRange, ReportSheet, ReportWorkbook, TableDefinition};
