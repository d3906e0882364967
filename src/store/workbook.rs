//! Workbook-backed sheet store (.xlsx)
//!
//! Loads the tracker sheet through calamine into an in-memory grid and
//! serves reads from it. Mutations update the grid and flush the whole
//! sheet back through rust_xlsxwriter. The store is single-sheet: only the
//! configured tracker sheet survives a flush.

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::{Duration, NaiveDate};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::core::dates;
use crate::error::{TrackerError, TrackerResult};
use crate::store::{MemorySheet, SheetStore};
use crate::types::CellValue;

/// Excel's serial-date epoch (with the 1900 leap-year quirk folded in).
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

pub struct WorkbookStore {
    path: PathBuf,
    grid: MemorySheet,
}

impl WorkbookStore {
    /// Open an existing workbook and load the named sheet.
    ///
    /// A workbook without the named sheet still opens; operations against
    /// it surface `SheetNotFound` through the record mapper.
    pub fn open<P: AsRef<Path>>(path: P, sheet_name: &str) -> TrackerResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut workbook: Xlsx<_> = open_workbook(&path)
            .map_err(|e| TrackerError::Unknown(format!("Failed to open workbook: {}", e)))?;

        if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
            return Ok(Self {
                path,
                grid: MemorySheet::from_grid(sheet_name, Vec::new(), Vec::new(), false),
            });
        }

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| TrackerError::Unknown(format!("Failed to read sheet: {}", e)))?;
        let grid = Self::grid_from_range(sheet_name, &range);
        Ok(Self { path, grid })
    }

    /// Create a new workbook containing just the header row.
    pub fn create<P: AsRef<Path>>(
        path: P,
        sheet_name: &str,
        headers: &[&str],
    ) -> TrackerResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            grid: MemorySheet::new(sheet_name, headers),
        };
        store.flush()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn grid_from_range(sheet_name: &str, range: &Range<Data>) -> MemorySheet {
        let (height, width) = range.get_size();
        if height == 0 {
            return MemorySheet::from_grid(sheet_name, Vec::new(), Vec::new(), true);
        }

        let mut headers = Vec::with_capacity(width);
        for col in 0..width {
            let cell = range.get((0, col)).map(convert_cell).unwrap_or_default();
            headers.push(cell);
        }

        let mut rows = Vec::with_capacity(height.saturating_sub(1));
        for row in 1..height {
            let mut cells = Vec::with_capacity(width);
            for col in 0..width {
                let cell = range.get((row, col)).map(convert_cell).unwrap_or_default();
                cells.push(cell);
            }
            rows.push(cells);
        }

        MemorySheet::from_grid(sheet_name, headers, rows, true)
    }

    /// Rewrite the workbook from the in-memory grid.
    fn flush(&self) -> TrackerResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(self.grid.sheet_name())
            .map_err(|e| TrackerError::Write(format!("Failed to name sheet: {}", e)))?;

        write_row(worksheet, 0, &self.grid.header_row()?)?;
        for (i, row) in self.grid.data_rows()?.iter().enumerate() {
            write_row(worksheet, (i + 1) as u32, row)?;
        }

        workbook
            .save(&self.path)
            .map_err(|e| TrackerError::Write(format!("Failed to save workbook: {}", e)))?;
        Ok(())
    }
}

impl SheetStore for WorkbookStore {
    fn sheet_name(&self) -> &str {
        self.grid.sheet_name()
    }

    fn sheet_exists(&self) -> bool {
        self.grid.sheet_exists()
    }

    fn header_row(&self) -> TrackerResult<Vec<CellValue>> {
        self.grid.header_row()
    }

    fn data_rows(&self) -> TrackerResult<Vec<Vec<CellValue>>> {
        self.grid.data_rows()
    }

    fn cell(&self, row: usize, col: usize) -> TrackerResult<CellValue> {
        self.grid.cell(row, col)
    }

    fn set_cell(&mut self, row: usize, col: usize, value: CellValue) -> TrackerResult<()> {
        self.grid.set_cell(row, col, value)?;
        self.flush()
    }

    fn append_row(&mut self, values: Vec<CellValue>) -> TrackerResult<usize> {
        let index = self.grid.append_row(values)?;
        self.flush()?;
        Ok(index)
    }
}

/// Convert a calamine cell into a tracker cell value.
fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => {
            if s.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.clone())
            }
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => serial_to_date(dt.as_f64())
            .map(CellValue::Date)
            .unwrap_or(CellValue::Empty),
        Data::DateTimeIso(s) => dates::parse_date(s)
            .map(CellValue::Date)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

/// Excel serial day number to calendar date.
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

fn write_row(worksheet: &mut Worksheet, row: u32, cells: &[CellValue]) -> TrackerResult<()> {
    for (col, cell) in cells.iter().enumerate() {
        let col = col as u16;
        let result = match cell {
            CellValue::Empty => continue,
            CellValue::Text(s) => worksheet.write_string(row, col, s),
            CellValue::Number(n) => worksheet.write_number(row, col, *n),
            CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
            // Dates are stored in display form; the read path keeps them as
            // pass-through strings, matching what callers were served.
            CellValue::Date(d) => worksheet.write_string(row, col, dates::format_date(*d)),
        };
        result.map_err(|e| TrackerError::Write(format!("Failed to write cell: {}", e)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_to_date() {
        // 45295 = 2024-01-04
        assert_eq!(
            serial_to_date(45295.0),
            NaiveDate::from_ymd_opt(2024, 1, 4)
        );
        // Time-of-day fraction is truncated
        assert_eq!(
            serial_to_date(45295.75),
            NaiveDate::from_ymd_opt(2024, 1, 4)
        );
    }

    #[test]
    fn test_convert_cell_scalars() {
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
        assert_eq!(
            convert_cell(&Data::String("Active".to_string())),
            CellValue::text("Active")
        );
        assert_eq!(convert_cell(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(convert_cell(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(convert_cell(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Bool(true));
    }

    #[test]
    fn test_convert_cell_iso_datetime() {
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2024-03-04".to_string())),
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
        );
    }
}
