use std::collections::HashMap;
use std::path::PathBuf;

use colored::Colorize;

use crate::api::server::ApiConfig;
use crate::core::Tracker;
use crate::error::{TrackerError, TrackerResult};
use crate::store::WorkbookStore;
use crate::types::{CellValue, TrackerConfig, CANONICAL_HEADERS};

fn open_tracker(file: &PathBuf, sheet: &str) -> TrackerResult<Tracker<WorkbookStore>> {
    let store = WorkbookStore::open(file, sheet)?;
    let config = TrackerConfig {
        sheet_name: sheet.to_string(),
        ..TrackerConfig::default()
    };
    Ok(Tracker::with_config(store, config))
}

/// Execute the init command: create a workbook with the canonical headers.
pub fn init(file: PathBuf, sheet: String) -> TrackerResult<()> {
    if file.exists() {
        return Err(TrackerError::Write(format!(
            "Refusing to overwrite existing file: {}",
            file.display()
        )));
    }
    WorkbookStore::create(&file, &sheet, &CANONICAL_HEADERS)?;

    println!("{}", "✅ Created tracker workbook".bold().green());
    println!("   File: {}", file.display());
    println!("   Sheet: {}", sheet);
    println!("   Columns: {}", CANONICAL_HEADERS.len());
    Ok(())
}

/// Execute the list command: print every mapped record.
pub fn list(file: PathBuf, sheet: String) -> TrackerResult<()> {
    let tracker = open_tracker(&file, &sheet)?;
    let data = tracker.get_projects()?;

    println!("{}", "📋 Tracker records".bold().green());
    println!("   File: {}\n", file.display());

    if data.records.is_empty() {
        println!("   (no records)");
        return Ok(());
    }

    for record in &data.records {
        println!(
            "   {:>4}  {}  {}",
            record.row_index.to_string().cyan(),
            record.field_display("projectActivityName").bold(),
            format!(
                "[{} | {}]",
                record.field_display("status"),
                record.field_display("category")
            )
            .dimmed()
        );
    }
    println!("\n   {} records", data.records.len());
    Ok(())
}

/// Execute the filters command: print distinct filter values per field.
pub fn filters(file: PathBuf, sheet: String) -> TrackerResult<()> {
    let tracker = open_tracker(&file, &sheet)?;
    let options = tracker.get_filter_options()?;

    println!("{}", "🔍 Filter options".bold().green());
    print_group("Categories", &options.categories);
    print_group("Statuses", &options.statuses);
    print_group("Functional owners", &options.owners);
    print_group("Program owners", &options.program_owners);
    print_group("Efforts", &options.efforts);
    print_group("Help needed", &options.help_needed);
    Ok(())
}

fn print_group(label: &str, values: &[String]) {
    if values.is_empty() {
        println!("   {}: {}", label.cyan(), "(none)".dimmed());
    } else {
        println!("   {}: {}", label.cyan(), values.join(", "));
    }
}

/// Execute the stats command: print summary statistics.
pub fn stats(file: PathBuf, sheet: String) -> TrackerResult<()> {
    let tracker = open_tracker(&file, &sheet)?;
    let stats = tracker.get_summary_stats()?;

    println!("{}", "📊 Summary statistics".bold().green());
    println!("   Total records: {}", stats.total);
    println!("   Help needed:   {}", stats.help_needed);
    println!("   At risk:       {}", stats.at_risk);
    print_counts("By status", &stats.by_status);
    print_counts("By category", &stats.by_category);
    print_counts("By effort", &stats.by_effort);
    Ok(())
}

fn print_counts(label: &str, counts: &HashMap<String, usize>) {
    println!("   {}:", label.cyan());
    let mut entries: Vec<_> = counts.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    for (value, count) in entries {
        println!("      {:<24} {}", value, count);
    }
}

/// Execute the by-month command: print records overlapping a month.
pub fn by_month(file: PathBuf, month: u32, year: i32, sheet: String) -> TrackerResult<()> {
    let tracker = open_tracker(&file, &sheet)?;
    let records = tracker.get_projects_by_month(month, year)?;

    println!(
        "{}",
        format!("📅 Records overlapping {}/{}", month, year)
            .bold()
            .green()
    );
    if records.is_empty() {
        println!("   (none)");
        return Ok(());
    }
    for record in &records {
        println!(
            "   {:>4}  {}  {}",
            record.row_index.to_string().cyan(),
            record.field_display("projectActivityName").bold(),
            format!(
                "[{} → {}]",
                record.field_display("startDate"),
                record.field_display("endDate")
            )
            .dimmed()
        );
    }
    Ok(())
}

/// Execute the set-status command.
pub fn set_status(file: PathBuf, row: usize, status: String, sheet: String) -> TrackerResult<()> {
    let mut tracker = open_tracker(&file, &sheet)?;
    tracker.update_status(row, &status)?;
    println!("{}", "✅ Status updated".bold().green());
    println!("   Row {}: {}", row, status);
    Ok(())
}

/// Execute the set-cell command.
pub fn set_cell(
    file: PathBuf,
    row: usize,
    field: String,
    value: String,
    sheet: String,
) -> TrackerResult<()> {
    let mut tracker = open_tracker(&file, &sheet)?;
    tracker.update_cell(row, &field, CellValue::parse_input(&value))?;
    println!("{}", "✅ Cell updated".bold().green());
    println!("   Row {}, field '{}': {}", row, field, value);
    Ok(())
}

/// Execute the add command: append a record from `key=value` pairs.
pub fn add(file: PathBuf, pairs: Vec<String>, sheet: String) -> TrackerResult<()> {
    let mut fields = HashMap::new();
    for pair in &pairs {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            TrackerError::Unknown(format!("Expected key=value, got '{}'", pair))
        })?;
        fields.insert(key.to_string(), CellValue::parse_input(value));
    }

    let mut tracker = open_tracker(&file, &sheet)?;
    let row = tracker.add_record(&fields)?;
    println!("{}", "✅ Record added".bold().green());
    println!("   Row index: {}", row);
    Ok(())
}

/// Execute the serve command: run the API server in-process.
pub fn serve(
    file: PathBuf,
    host: String,
    port: u16,
    sheet: String,
) -> TrackerResult<()> {
    let config = ApiConfig {
        host,
        port,
        workbook: file,
        sheet,
    };
    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(crate::api::run_api_server(config))
        .map_err(|e| TrackerError::Unknown(e.to_string()))
}
