//! In-memory worksheets with named tables, saved as `.xlsx`
//!
//! The sheet is edited in memory and written in one go, so redefining a
//! table is a plain replace rather than an in-place file edit.

use calamine::{open_workbook, Reader, Xlsx};
use rust_xlsxwriter::{Format, Table, TableColumn, Workbook, Worksheet, XlsxError};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{GdbkitError, Result};

use super::style::TableStyleName;

/// Inclusive, zero-based cell rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl CellRange {
    pub fn rows(&self) -> u32 {
        self.last_row - self.first_row + 1
    }

    pub fn cols(&self) -> u16 {
        self.last_col - self.first_col + 1
    }

    /// Whether the two ranges share at least one cell
    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.first_row <= other.last_row
            && other.first_row <= self.last_row
            && self.first_col <= other.last_col
            && other.first_col <= self.last_col
    }
}

/// Spreadsheet column letters for a zero-based index (`0` is `A`)
pub fn column_letter(col: u16) -> String {
    let mut n = col as u32 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

impl fmt::Display for CellRange {
    /// A1-style reference, e.g. `A1:G12`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            column_letter(self.first_col),
            self.first_row + 1,
            column_letter(self.last_col),
            self.last_row + 1
        )
    }
}

/// A named table over a cell range; the first row holds the headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub name: String,
    pub range: CellRange,
    pub style: TableStyleName,
    pub show_first_column: bool,
    pub show_last_column: bool,
    pub show_row_stripes: bool,
    pub show_column_stripes: bool,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>, range: CellRange, style: TableStyleName) -> Self {
        Self {
            name: name.into(),
            range,
            style,
            show_first_column: true,
            show_last_column: false,
            show_row_stripes: true,
            show_column_stripes: false,
        }
    }
}

/// A single worksheet of string cells plus its table and column settings
#[derive(Debug, Clone, Default)]
pub struct ReportSheet {
    name: String,
    rows: Vec<Vec<String>>,
    tables: Vec<TableDefinition>,
    column_widths: BTreeMap<u16, f64>,
    wrap_text: bool,
}

impl ReportSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sheet holding `rows` starting at `A1`
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            ..Self::new(name)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn tables(&self) -> &[TableDefinition] {
        &self.tables
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn wraps_text(&self) -> bool {
        self.wrap_text
    }

    /// Range from `A1` to the last non-empty cell, or `None` for a blank sheet
    pub fn dimension(&self) -> Option<CellRange> {
        let mut last_row = None;
        let mut last_col = 0u16;
        for (r, row) in self.rows.iter().enumerate() {
            if let Some(c) = row.iter().rposition(|cell| !cell.is_empty()) {
                last_row = Some(r as u32);
                last_col = last_col.max(c as u16);
            }
        }
        last_row.map(|last_row| CellRange {
            first_row: 0,
            first_col: 0,
            last_row,
            last_col,
        })
    }

    /// Remove a table by name, returning its old definition
    pub fn remove_table(&mut self, name: &str) -> Option<TableDefinition> {
        let index = self.tables.iter().position(|t| t.name == name)?;
        Some(self.tables.remove(index))
    }

    /// Add a table, first removing any existing table with the same name.
    ///
    /// Returns the definition that was replaced.
    pub fn define_table(&mut self, table: TableDefinition) -> Option<TableDefinition> {
        let replaced = self.remove_table(&table.name);
        self.tables.push(table);
        replaced
    }

    /// Remove every table whose range overlaps `range`
    pub fn remove_overlapping(&mut self, range: &CellRange) -> Vec<TableDefinition> {
        let (overlapping, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.tables)
            .into_iter()
            .partition(|t| t.range.overlaps(range));
        self.tables = kept;
        overlapping
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn set_wrap_text(&mut self, wrap: bool) {
        self.wrap_text = wrap;
    }

    /// Load the first worksheet of an `.xlsx` file: its cells and table
    /// names and ranges. Table styles are not read back; loaded tables get
    /// the default style.
    pub fn open(path: &Path) -> Result<Self> {
        ReportWorkbook::open(path)?
            .sheets
            .into_iter()
            .next()
            .ok_or_else(|| GdbkitError::Report {
                path: path.to_path_buf(),
                reason: "Workbook has no worksheets".to_string(),
            })
    }

    /// Write the sheet as a single-sheet `.xlsx` workbook, replacing `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        ReportWorkbook {
            sheets: vec![self.clone()],
        }
        .save(path)
    }

    fn read(
        workbook: &mut Xlsx<BufReader<File>>,
        name: &str,
    ) -> std::result::Result<Self, String> {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| format!("Failed to read sheet {}: {}", name, e))?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        if let Some((start_row, start_col)) = range.start() {
            rows.resize(start_row as usize, Vec::new());
            for row in range.rows() {
                let mut cells = vec![String::new(); start_col as usize];
                cells.extend(row.iter().map(|cell| cell.to_string()));
                rows.push(cells);
            }
        }

        let mut sheet = Self::from_rows(name, rows);

        let table_names: Vec<String> =
            workbook.table_names_in_sheet(name).into_iter().cloned().collect();
        for table_name in table_names {
            let table = workbook
                .table_by_name(&table_name)
                .map_err(|e| format!("Failed to read table {}: {}", table_name, e))?;
            let data = table.data();
            // The header row sits directly above the data range
            if let (Some(start), Some(end)) = (data.start(), data.end()) {
                let range = CellRange {
                    first_row: start.0.saturating_sub(1),
                    first_col: start.1 as u16,
                    last_row: end.0,
                    last_col: end.1 as u16,
                };
                sheet
                    .tables
                    .push(TableDefinition::new(table_name, range, TableStyleName::default()));
            }
        }

        tracing::debug!(
            "Loaded sheet {} with {} rows and {} tables",
            sheet.name,
            sheet.rows.len(),
            sheet.tables.len()
        );
        Ok(sheet)
    }

    fn write(&self, worksheet: &mut Worksheet) -> std::result::Result<(), XlsxError> {
        worksheet.set_name(&self.name)?;

        let cell_format = if self.wrap_text {
            Format::new().set_text_wrap()
        } else {
            Format::new()
        };

        for table in &self.tables {
            let range = table.range;
            let columns: Vec<TableColumn> = (range.first_col..=range.last_col)
                .map(|col| TableColumn::new().set_header(self.header_text(range.first_row, col)))
                .collect();

            let xlsx_table = Table::new()
                .set_name(&table.name)
                .set_style(table.style.to_table_style())
                .set_first_column(table.show_first_column)
                .set_last_column(table.show_last_column)
                .set_banded_rows(table.show_row_stripes)
                .set_banded_columns(table.show_column_stripes)
                .set_columns(&columns);

            worksheet.add_table(
                range.first_row,
                range.first_col,
                range.last_row,
                range.last_col,
                &xlsx_table,
            )?;
        }

        // Cells are written after the tables so header cells keep the cell format
        for (r, row) in self.rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    if self.wrap_text {
                        worksheet.write_blank(r as u32, c as u16, &cell_format)?;
                    }
                    continue;
                }
                worksheet.write_string_with_format(r as u32, c as u16, value, &cell_format)?;
            }
        }

        for (&col, &width) in &self.column_widths {
            worksheet.set_column_width(col, width)?;
        }
        Ok(())
    }

    /// Header text for a table column; blank headers get Excel's default
    fn header_text(&self, row: u32, col: u16) -> String {
        self.rows
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .filter(|text| !text.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Column{}", col + 1))
    }
}

/// Every worksheet of an `.xlsx` file, in workbook order.
///
/// Reformatting goes through this so sheets other than the report survive
/// the rewrite. Their cell values and tables are kept; cell styling is not.
#[derive(Debug, Clone, Default)]
pub struct ReportWorkbook {
    sheets: Vec<ReportSheet>,
}

impl ReportWorkbook {
    pub fn sheets(&self) -> &[ReportSheet] {
        &self.sheets
    }

    /// The report sheet, which is always the first one
    pub fn first_sheet_mut(&mut self) -> Option<&mut ReportSheet> {
        self.sheets.first_mut()
    }

    pub fn open(path: &Path) -> Result<Self> {
        let report_err = |reason: String| GdbkitError::Report {
            path: path.to_path_buf(),
            reason,
        };

        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e| report_err(format!("Failed to open workbook: {}", e)))?;
        workbook
            .load_tables()
            .map_err(|e| report_err(format!("Failed to read tables: {}", e)))?;

        let names = workbook.sheet_names();
        let sheets = names
            .iter()
            .map(|name| ReportSheet::read(&mut workbook, name))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(report_err)?;

        if sheets.is_empty() {
            return Err(report_err("Workbook has no worksheets".to_string()));
        }
        Ok(Self { sheets })
    }

    /// Write all sheets, replacing `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let report_err = |e: XlsxError| GdbkitError::Report {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut workbook = Workbook::new();
        for sheet in &self.sheets {
            sheet.write(workbook.add_worksheet()).map_err(report_err)?;
        }
        workbook.save(path).map_err(report_err)?;

        tracing::debug!("Saved {} sheets to {}", self.sheets.len(), path.display());
        Ok(())
    }
}
