//! Mutation layer
//!
//! Each write is an independent call against the shared sheet: no
//! transactions, no conflict detection, no retries. Column positions are
//! resolved against the live header row at call time.

use std::collections::HashMap;

use crate::core::fields::field_key;
use crate::core::records::ensure_sheet;
use crate::error::{TrackerError, TrackerResult};
use crate::store::SheetStore;
use crate::types::{CellValue, TrackerConfig};

/// Write a new status into the configured status column.
pub fn update_status<S: SheetStore>(
    store: &mut S,
    config: &TrackerConfig,
    row_index: usize,
    status: &str,
) -> TrackerResult<()> {
    ensure_sheet(store)?;
    store.set_cell(row_index, config.status_column, CellValue::text(status))
}

/// Write a value into the column whose normalized header matches `field`.
///
/// The header row is re-read on every call so renamed or reordered columns
/// resolve correctly. An unmatched field key fails with `ColumnNotFound`
/// and performs no write.
pub fn update_cell<S: SheetStore>(
    store: &mut S,
    row_index: usize,
    field: &str,
    value: CellValue,
) -> TrackerResult<()> {
    ensure_sheet(store)?;
    let headers = store.header_row()?;
    let position = headers
        .iter()
        .position(|h| field_key(&h.display_string()) == field)
        .ok_or_else(|| TrackerError::ColumnNotFound(field.to_string()))?;
    store.set_cell(row_index, position + 1, value)
}

/// Append a new row built from the input fields, keyed by normalized
/// header. Headers absent from the input get empty cells. Returns the new
/// row's 1-based data position.
pub fn add_record<S: SheetStore>(
    store: &mut S,
    fields: &HashMap<String, CellValue>,
) -> TrackerResult<usize> {
    ensure_sheet(store)?;
    let headers = store.header_row()?;
    let row: Vec<CellValue> = headers
        .iter()
        .map(|h| {
            let key = field_key(&h.display_string());
            fields.get(&key).cloned().unwrap_or(CellValue::Empty)
        })
        .collect();
    store.append_row(row)
}
