//! Query and aggregation layer
//!
//! Every operation re-fetches through the record mapper, so callers always
//! see the sheet as it is at call time and mapper errors propagate
//! unchanged.

use std::collections::{BTreeSet, HashMap};

use chrono::Datelike;

use crate::core::{dates, records};
use crate::error::{TrackerError, TrackerResult};
use crate::store::SheetStore;
use crate::types::{FilterOptions, Record, SummaryStats};

const FIELD_CATEGORY: &str = "category";
const FIELD_STATUS: &str = "status";
const FIELD_OWNER: &str = "functionalOwnerOfDeliverable";
const FIELD_PROGRAM_OWNER: &str = "programOwnerLeadContact";
const FIELD_EFFORT: &str = "effort";
const FIELD_HELP_NEEDED: &str = "helpNeeded";
const FIELD_START_DATE: &str = "startDate";
const FIELD_END_DATE: &str = "endDate";

/// Distinct, sorted, non-empty values per filterable field.
///
/// Help-needed is the fixed `Yes`/`No` pair regardless of what the sheet
/// holds.
pub fn filter_options<S: SheetStore>(store: &S) -> TrackerResult<FilterOptions> {
    let data = records::fetch_sheet(store)?;

    Ok(FilterOptions {
        categories: distinct_values(&data.records, FIELD_CATEGORY),
        statuses: distinct_values(&data.records, FIELD_STATUS),
        owners: distinct_values(&data.records, FIELD_OWNER),
        program_owners: distinct_values(&data.records, FIELD_PROGRAM_OWNER),
        efforts: distinct_values(&data.records, FIELD_EFFORT),
        help_needed: vec!["Yes".to_string(), "No".to_string()],
    })
}

/// Single-pass tallies over the record set.
pub fn summary_stats<S: SheetStore>(store: &S) -> TrackerResult<SummaryStats> {
    let data = records::fetch_sheet(store)?;

    let mut stats = SummaryStats {
        total: data.records.len(),
        ..SummaryStats::default()
    };

    for record in &data.records {
        let status = record.field_display(FIELD_STATUS);
        bucket(&mut stats.by_status, &status);
        bucket(&mut stats.by_category, &record.field_display(FIELD_CATEGORY));
        bucket(&mut stats.by_effort, &record.field_display(FIELD_EFFORT));

        if record.field_display(FIELD_HELP_NEEDED) == "Yes" {
            stats.help_needed += 1;
        }
        if status == "At Risk" {
            stats.at_risk += 1;
        }
    }

    Ok(stats)
}

/// Records whose date range touches the given month.
///
/// With both dates present the record matches when `[start, end]` overlaps
/// the month interval inclusively. With one date present, that date's
/// month and year must match. Undated records (including records whose
/// date strings fail to parse) never match.
pub fn projects_by_month<S: SheetStore>(
    store: &S,
    month: u32,
    year: i32,
) -> TrackerResult<Vec<Record>> {
    let (first, last) = dates::month_bounds(month, year)
        .ok_or_else(|| TrackerError::Unknown(format!("Invalid month: {}", month)))?;

    let data = records::fetch_sheet(store)?;
    let matched = data
        .records
        .into_iter()
        .filter(|record| {
            let start = record.field(FIELD_START_DATE).and_then(dates::parse_cell_date);
            let end = record.field(FIELD_END_DATE).and_then(dates::parse_cell_date);
            match (start, end) {
                (Some(start), Some(end)) => start <= last && end >= first,
                (Some(start), None) => start.month() == month && start.year() == year,
                (None, Some(end)) => end.month() == month && end.year() == year,
                (None, None) => false,
            }
        })
        .collect();

    Ok(matched)
}

fn distinct_values(records: &[Record], key: &str) -> Vec<String> {
    let set: BTreeSet<String> = records
        .iter()
        .filter(|r| !r.field_is_blank(key))
        .map(|r| r.field_display(key))
        .collect();
    set.into_iter().collect()
}

fn bucket(map: &mut HashMap<String, usize>, value: &str) {
    let key = if value.trim().is_empty() {
        "Unknown"
    } else {
        value
    };
    *map.entry(key.to_string()).or_insert(0) += 1;
}
