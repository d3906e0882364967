//! Query and aggregation integration tests

use pretty_assertions::assert_eq;

use trackboard::{CellValue, MemorySheet, Tracker};

const HEADERS: [&str; 8] = [
    "Project / Activity Name",
    "Category",
    "Status",
    "Effort",
    "Functional Owner of Deliverable",
    "Help Needed?",
    "Start Date",
    "End Date",
];

fn row(values: [&str; 8]) -> Vec<CellValue> {
    values
        .iter()
        .map(|v| {
            if v.is_empty() {
                CellValue::Empty
            } else {
                CellValue::text(*v)
            }
        })
        .collect()
}

fn sample_tracker() -> Tracker<MemorySheet> {
    Tracker::new(MemorySheet::with_rows(
        "Projects",
        &HEADERS,
        vec![
            row(["Alpha", "Training", "Active", "High", "Dana", "No", "1/15/2024", "2/10/2024"]),
            row(["Beta", "Compliance", "Active", "Low", "Sam", "Yes", "2/1/2024", ""]),
            row(["Gamma", "Training", "At Risk", "High", "Dana", "No", "", "3/20/2024"]),
            row(["Delta", "", "", "", "", "", "", ""]),
        ],
    ))
}

// ═══════════════════════════════════════════════════════════════════════════
// FILTER OPTIONS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_filter_options_sorted_distinct() {
    let options = sample_tracker().get_filter_options().unwrap();

    assert_eq!(options.categories, vec!["Compliance", "Training"]);
    assert_eq!(options.statuses, vec!["Active", "At Risk"]);
    assert_eq!(options.owners, vec!["Dana", "Sam"]);
    assert_eq!(options.efforts, vec!["High", "Low"]);
}

#[test]
fn test_filter_options_drop_empty_values() {
    let options = sample_tracker().get_filter_options().unwrap();
    // Delta's empty fields must not produce an empty-string option
    assert!(!options.categories.contains(&String::new()));
    assert!(!options.statuses.contains(&String::new()));
}

#[test]
fn test_help_needed_options_are_constant() {
    let options = sample_tracker().get_filter_options().unwrap();
    assert_eq!(options.help_needed, vec!["Yes", "No"]);
}

#[test]
fn test_filter_options_serialize_camel_case() {
    let options = sample_tracker().get_filter_options().unwrap();
    let json = serde_json::to_string(&options).unwrap();
    assert!(json.contains("\"programOwners\""));
    assert!(json.contains("\"helpNeeded\""));
}

// ═══════════════════════════════════════════════════════════════════════════
// SUMMARY STATISTICS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_summary_stats_counts() {
    let stats = sample_tracker().get_summary_stats().unwrap();

    assert_eq!(stats.total, 4);
    assert_eq!(stats.by_status.get("Active"), Some(&2));
    assert_eq!(stats.by_status.get("At Risk"), Some(&1));
    assert_eq!(stats.by_category.get("Training"), Some(&2));
    assert_eq!(stats.by_category.get("Compliance"), Some(&1));
    assert_eq!(stats.by_effort.get("High"), Some(&2));
    assert_eq!(stats.help_needed, 1);
    assert_eq!(stats.at_risk, 1);
}

#[test]
fn test_summary_stats_bucket_empty_as_unknown() {
    let stats = sample_tracker().get_summary_stats().unwrap();
    assert_eq!(stats.by_status.get("Unknown"), Some(&1));
    assert_eq!(stats.by_category.get("Unknown"), Some(&1));
    assert_eq!(stats.by_effort.get("Unknown"), Some(&1));
}

#[test]
fn test_help_needed_counts_exact_yes_only() {
    let tracker = Tracker::new(MemorySheet::with_rows(
        "Projects",
        &HEADERS,
        vec![
            row(["A", "", "", "", "", "Yes", "", ""]),
            row(["B", "", "", "", "", "yes", "", ""]),
            row(["C", "", "", "", "", "YES", "", ""]),
            row(["D", "", "", "", "", "No", "", ""]),
        ],
    ));
    let stats = tracker.get_summary_stats().unwrap();
    assert_eq!(stats.help_needed, 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// MONTH OVERLAP
// ═══════════════════════════════════════════════════════════════════════════

fn month_names(tracker: &Tracker<MemorySheet>, month: u32, year: i32) -> Vec<String> {
    tracker
        .get_projects_by_month(month, year)
        .unwrap()
        .iter()
        .map(|r| r.field_display("projectActivityName"))
        .collect()
}

#[test]
fn test_date_range_overlaps_both_months() {
    let tracker = sample_tracker();
    // Alpha spans 1/15/2024 - 2/10/2024
    assert!(month_names(&tracker, 1, 2024).contains(&"Alpha".to_string()));
    assert!(month_names(&tracker, 2, 2024).contains(&"Alpha".to_string()));
    assert!(!month_names(&tracker, 3, 2024).contains(&"Alpha".to_string()));
}

#[test]
fn test_start_only_matches_its_own_month() {
    let tracker = sample_tracker();
    assert!(month_names(&tracker, 2, 2024).contains(&"Beta".to_string()));
    assert!(!month_names(&tracker, 3, 2024).contains(&"Beta".to_string()));
}

#[test]
fn test_end_only_matches_its_own_month() {
    let tracker = sample_tracker();
    assert!(month_names(&tracker, 3, 2024).contains(&"Gamma".to_string()));
    assert!(!month_names(&tracker, 2, 2024).contains(&"Gamma".to_string()));
}

#[test]
fn test_undated_records_never_match() {
    let tracker = sample_tracker();
    for month in 1..=12 {
        assert!(!month_names(&tracker, month, 2024).contains(&"Delta".to_string()));
    }
}

#[test]
fn test_year_boundary_overlap() {
    let tracker = Tracker::new(MemorySheet::with_rows(
        "Projects",
        &HEADERS,
        vec![row([
            "YearEnd", "", "", "", "", "", "12/20/2023", "1/10/2024",
        ])],
    ));
    assert!(month_names(&tracker, 12, 2023).contains(&"YearEnd".to_string()));
    assert!(month_names(&tracker, 1, 2024).contains(&"YearEnd".to_string()));
    assert!(!month_names(&tracker, 2, 2024).contains(&"YearEnd".to_string()));
    assert!(!month_names(&tracker, 1, 2023).contains(&"YearEnd".to_string()));
}

#[test]
fn test_iso_dates_accepted_via_fallback() {
    let tracker = Tracker::new(MemorySheet::with_rows(
        "Projects",
        &HEADERS,
        vec![row(["Iso", "", "", "", "", "", "2024-02-15", ""])],
    ));
    assert!(month_names(&tracker, 2, 2024).contains(&"Iso".to_string()));
}
