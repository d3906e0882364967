//! Date shaping
//!
//! The tracker surfaces every date as an `M/D/YYYY` string (1-based month,
//! no zero padding). Parsing accepts that US slash format first and falls
//! back to ISO-8601 `YYYY-MM-DD`; anything else yields `None` so callers
//! treat invalid dates as absent rather than failing.

use chrono::{Datelike, NaiveDate};

use crate::types::CellValue;

/// Render a date in the tracker display format.
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Render a cell for record output.
///
/// Text passes through unchanged so pre-formatted date strings are never
/// reformatted. Only native date cells are converted.
pub fn format_cell(value: &CellValue) -> String {
    match value {
        CellValue::Date(d) => format_date(*d),
        other => other.display_string(),
    }
}

/// Parse a date string: `month/day/year` when it contains two slashes,
/// otherwise ISO-8601 `YYYY-MM-DD`. Unrecognized input yields `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.matches('/').count() == 2 {
        return NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").ok();
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Parse a cell as a date. Native date cells pass through as-is.
pub fn parse_cell_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Date(d) => Some(*d),
        CellValue::Text(s) => parse_date(s),
        _ => None,
    }
}

/// First and last day of the given month, or `None` for an invalid month.
pub fn month_bounds(month: u32, year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_first.pred_opt()?;
    Some((first, last))
}
