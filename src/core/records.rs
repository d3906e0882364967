//! Record mapping
//!
//! Converts the sheet's header row plus data rows into keyed records: each
//! header is normalized to its field key, native date cells are formatted
//! to display strings, and rows without a project name are dropped as
//! blanks.

use crate::core::dates;
use crate::core::fields::field_key;
use crate::error::{TrackerError, TrackerResult};
use crate::store::SheetStore;
use crate::types::{CellValue, HeaderBinding, Record, SheetData};

/// Field key every real tracker row must populate. Rows where it is blank
/// are treated as padding and excluded from all views.
pub const REQUIRED_FIELD: &str = "projectActivityName";

pub(crate) fn ensure_sheet<S: SheetStore>(store: &S) -> TrackerResult<()> {
    if store.sheet_exists() {
        Ok(())
    } else {
        Err(TrackerError::SheetNotFound(store.sheet_name().to_string()))
    }
}

/// Read the whole sheet into header bindings plus records.
///
/// A sheet with no data rows maps to an empty result, not an error. Output
/// order follows sheet row order; `row_index` is the 1-based data row
/// position and stays stable until the row is deleted.
pub fn fetch_sheet<S: SheetStore>(store: &S) -> TrackerResult<SheetData> {
    ensure_sheet(store)?;

    let rows = store.data_rows()?;
    if rows.is_empty() {
        return Ok(SheetData::empty());
    }

    let headers: Vec<HeaderBinding> = store
        .header_row()?
        .iter()
        .map(|cell| {
            let original = cell.display_string();
            HeaderBinding {
                normalized: field_key(&original),
                original,
            }
        })
        .collect();

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let mut record = Record::new(i + 1);
        for (binding, cell) in headers.iter().zip(row.iter()) {
            if binding.normalized.is_empty() {
                continue;
            }
            let value = match cell {
                CellValue::Date(d) => CellValue::Text(dates::format_date(*d)),
                other => other.clone(),
            };
            record.fields.insert(binding.normalized.clone(), value);
        }
        if record.field_is_blank(REQUIRED_FIELD) {
            continue;
        }
        records.push(record);
    }

    Ok(SheetData { headers, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySheet;
    use chrono::NaiveDate;

    const HEADERS: [&str; 4] = [
        "Project / Activity Name",
        "Status",
        "Start Date",
        "Help Needed?",
    ];

    #[test]
    fn test_missing_sheet_is_not_found() {
        let store = MemorySheet::missing("Projects");
        let err = fetch_sheet(&store).unwrap_err();
        match err {
            TrackerError::SheetNotFound(name) => assert_eq!(name, "Projects"),
            other => panic!("expected SheetNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_sheet_maps_to_empty_result() {
        let store = MemorySheet::new("Projects", &HEADERS);
        let data = fetch_sheet(&store).unwrap();
        assert!(data.headers.is_empty());
        assert!(data.records.is_empty());
    }

    #[test]
    fn test_headers_carry_original_and_normalized() {
        let store = MemorySheet::with_rows(
            "Projects",
            &HEADERS,
            vec![vec![CellValue::text("Roadmap refresh")]],
        );
        let data = fetch_sheet(&store).unwrap();
        assert_eq!(data.headers.len(), 4);
        assert_eq!(data.headers[0].original, "Project / Activity Name");
        assert_eq!(data.headers[0].normalized, "projectActivityName");
        assert_eq!(data.headers[3].normalized, "helpNeeded");
    }

    #[test]
    fn test_rows_map_to_keyed_records() {
        let store = MemorySheet::with_rows(
            "Projects",
            &HEADERS,
            vec![vec![
                CellValue::text("Roadmap refresh"),
                CellValue::text("Active"),
                CellValue::text("1/15/2024"),
                CellValue::text("No"),
            ]],
        );
        let data = fetch_sheet(&store).unwrap();
        assert_eq!(data.records.len(), 1);
        let record = &data.records[0];
        assert_eq!(record.row_index, 1);
        assert_eq!(record.field_display("status"), "Active");
        assert_eq!(record.field_display("startDate"), "1/15/2024");
    }

    #[test]
    fn test_native_dates_format_to_display_strings() {
        let store = MemorySheet::with_rows(
            "Projects",
            &HEADERS,
            vec![vec![
                CellValue::text("Roadmap refresh"),
                CellValue::text("Active"),
                CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()),
                CellValue::text("No"),
            ]],
        );
        let data = fetch_sheet(&store).unwrap();
        assert_eq!(
            data.records[0].field("startDate"),
            Some(&CellValue::text("3/4/2024"))
        );
    }

    #[test]
    fn test_blank_project_name_rows_are_dropped() {
        let store = MemorySheet::with_rows(
            "Projects",
            &HEADERS,
            vec![
                vec![
                    CellValue::text("Real project"),
                    CellValue::text("Active"),
                    CellValue::Empty,
                    CellValue::Empty,
                ],
                // Populated row, but no project name
                vec![
                    CellValue::Empty,
                    CellValue::text("Active"),
                    CellValue::text("1/1/2024"),
                    CellValue::text("Yes"),
                ],
                vec![
                    CellValue::text("Another project"),
                    CellValue::Empty,
                    CellValue::Empty,
                    CellValue::Empty,
                ],
            ],
        );
        let data = fetch_sheet(&store).unwrap();
        assert_eq!(data.records.len(), 2);
        // Row indexes keep their sheet positions despite the dropped row
        assert_eq!(data.records[0].row_index, 1);
        assert_eq!(data.records[1].row_index, 3);
    }

    #[test]
    fn test_short_rows_map_without_trailing_fields() {
        let store = MemorySheet::with_rows(
            "Projects",
            &HEADERS,
            vec![vec![CellValue::text("Short row")]],
        );
        let data = fetch_sheet(&store).unwrap();
        let record = &data.records[0];
        assert_eq!(record.field_display("projectActivityName"), "Short row");
        assert!(record.field("status").is_none());
    }
}
