//! In-memory sheet store
//!
//! Backs the unit and integration tests, and serves as the grid behind
//! [`super::WorkbookStore`].

use crate::error::{TrackerError, TrackerResult};
use crate::store::SheetStore;
use crate::types::CellValue;

/// A sheet held entirely in memory: one header row plus data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySheet {
    name: String,
    headers: Vec<CellValue>,
    rows: Vec<Vec<CellValue>>,
    present: bool,
}

impl MemorySheet {
    /// An empty sheet with the given header labels.
    pub fn new(name: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            name: name.into(),
            headers: headers.iter().map(|h| CellValue::text(*h)).collect(),
            rows: Vec::new(),
            present: true,
        }
    }

    /// A sheet pre-populated with data rows.
    pub fn with_rows(
        name: impl Into<String>,
        headers: &[&str],
        rows: Vec<Vec<CellValue>>,
    ) -> Self {
        let mut sheet = Self::new(name, headers);
        sheet.rows = rows;
        sheet
    }

    /// A store whose named sheet does not exist. Every tracker operation
    /// against it reports `SheetNotFound`.
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            headers: Vec::new(),
            rows: Vec::new(),
            present: false,
        }
    }

    pub(crate) fn from_grid(
        name: impl Into<String>,
        headers: Vec<CellValue>,
        rows: Vec<Vec<CellValue>>,
        present: bool,
    ) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
            present,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    fn check_coords(&self, row: usize, col: usize) -> TrackerResult<()> {
        if row == 0 || row > self.rows.len() {
            return Err(TrackerError::Write(format!(
                "row {} out of range (1..={})",
                row,
                self.rows.len()
            )));
        }
        if col == 0 || col > self.headers.len() {
            return Err(TrackerError::Write(format!(
                "column {} out of range (1..={})",
                col,
                self.headers.len()
            )));
        }
        Ok(())
    }
}

impl SheetStore for MemorySheet {
    fn sheet_name(&self) -> &str {
        &self.name
    }

    fn sheet_exists(&self) -> bool {
        self.present
    }

    fn header_row(&self) -> TrackerResult<Vec<CellValue>> {
        Ok(self.headers.clone())
    }

    fn data_rows(&self) -> TrackerResult<Vec<Vec<CellValue>>> {
        Ok(self.rows.clone())
    }

    fn cell(&self, row: usize, col: usize) -> TrackerResult<CellValue> {
        if row == 0 || col == 0 {
            return Ok(CellValue::Empty);
        }
        Ok(self
            .rows
            .get(row - 1)
            .and_then(|r| r.get(col - 1))
            .cloned()
            .unwrap_or(CellValue::Empty))
    }

    fn set_cell(&mut self, row: usize, col: usize, value: CellValue) -> TrackerResult<()> {
        self.check_coords(row, col)?;
        let target = &mut self.rows[row - 1];
        if target.len() < col {
            target.resize(col, CellValue::Empty);
        }
        target[col - 1] = value;
        Ok(())
    }

    fn append_row(&mut self, values: Vec<CellValue>) -> TrackerResult<usize> {
        self.rows.push(values);
        Ok(self.rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemorySheet {
        MemorySheet::with_rows(
            "Projects",
            &["Project / Activity Name", "Category", "Status"],
            vec![
                vec![
                    CellValue::text("Onboarding revamp"),
                    CellValue::text("Training"),
                    CellValue::text("Active"),
                ],
                vec![
                    CellValue::text("Q3 audit"),
                    CellValue::text("Compliance"),
                    CellValue::text("At Risk"),
                ],
            ],
        )
    }

    #[test]
    fn test_header_row() {
        let sheet = sample();
        let headers = sheet.header_row().unwrap();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[0], CellValue::text("Project / Activity Name"));
    }

    #[test]
    fn test_data_rows_in_order() {
        let sheet = sample();
        let rows = sheet.data_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2], CellValue::text("At Risk"));
    }

    #[test]
    fn test_cell_read() {
        let sheet = sample();
        assert_eq!(sheet.cell(1, 2).unwrap(), CellValue::text("Training"));
        // Beyond the used range reads as empty, not an error
        assert_eq!(sheet.cell(99, 1).unwrap(), CellValue::Empty);
        assert_eq!(sheet.cell(1, 99).unwrap(), CellValue::Empty);
    }

    #[test]
    fn test_set_cell() {
        let mut sheet = sample();
        sheet.set_cell(1, 3, CellValue::text("Complete")).unwrap();
        assert_eq!(sheet.cell(1, 3).unwrap(), CellValue::text("Complete"));
    }

    #[test]
    fn test_set_cell_out_of_range() {
        let mut sheet = sample();
        let err = sheet.set_cell(5, 1, CellValue::text("x")).unwrap_err();
        assert!(matches!(err, TrackerError::Write(_)));
        let err = sheet.set_cell(1, 9, CellValue::text("x")).unwrap_err();
        assert!(matches!(err, TrackerError::Write(_)));
    }

    #[test]
    fn test_set_cell_pads_short_row() {
        let mut sheet = MemorySheet::with_rows(
            "Projects",
            &["A", "B", "C"],
            vec![vec![CellValue::text("only-a")]],
        );
        sheet.set_cell(1, 3, CellValue::text("c")).unwrap();
        assert_eq!(sheet.cell(1, 2).unwrap(), CellValue::Empty);
        assert_eq!(sheet.cell(1, 3).unwrap(), CellValue::text("c"));
    }

    #[test]
    fn test_append_row_returns_position() {
        let mut sheet = sample();
        let idx = sheet
            .append_row(vec![
                CellValue::text("New project"),
                CellValue::text("Ops"),
                CellValue::text("Not Started"),
            ])
            .unwrap();
        assert_eq!(idx, 3);
        assert_eq!(sheet.cell(3, 1).unwrap(), CellValue::text("New project"));
    }

    #[test]
    fn test_missing_sheet() {
        let sheet = MemorySheet::missing("Projects");
        assert!(!sheet.sheet_exists());
        assert_eq!(sheet.sheet_name(), "Projects");
    }
}
