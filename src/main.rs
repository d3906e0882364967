use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trackboard::cli;
use trackboard::error::TrackerResult;

#[derive(Parser)]
#[command(name = "trackboard")]
#[command(about = "Spreadsheet-backed project tracker: inspect and mutate a tracker workbook.")]
#[command(long_about = "Trackboard - project tracker over an .xlsx sheet

Reads a sheet of project/activity rows into keyed records and exposes
filters, summary statistics, month views, and cell-level updates.

COMMANDS:
  init        - Create a workbook with the canonical tracker headers
  list        - Print all records
  filters     - Print distinct filter values per field
  stats       - Print summary statistics
  by-month    - Print records whose date range overlaps a month
  set-status  - Update a record's status column
  set-cell    - Update a single cell addressed by field key
  add         - Append a record from key=value pairs
  serve       - Run the HTTP API server over the workbook

EXAMPLES:
  trackboard init tracker.xlsx
  trackboard add tracker.xlsx projectActivityName=Onboarding status=Active
  trackboard stats tracker.xlsx
  trackboard by-month tracker.xlsx 2 2024
  trackboard serve tracker.xlsx --port 8080")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a workbook with the canonical tracker headers
    Init {
        /// Path of the workbook to create (.xlsx)
        file: PathBuf,

        /// Sheet name for tracker rows
        #[arg(short, long, default_value = "Projects")]
        sheet: String,
    },

    /// Print all records
    List {
        /// Path to the tracker workbook (.xlsx)
        file: PathBuf,

        /// Sheet name holding tracker rows
        #[arg(short, long, default_value = "Projects")]
        sheet: String,
    },

    /// Print distinct filter values per field
    Filters {
        /// Path to the tracker workbook (.xlsx)
        file: PathBuf,

        /// Sheet name holding tracker rows
        #[arg(short, long, default_value = "Projects")]
        sheet: String,
    },

    /// Print summary statistics
    Stats {
        /// Path to the tracker workbook (.xlsx)
        file: PathBuf,

        /// Sheet name holding tracker rows
        #[arg(short, long, default_value = "Projects")]
        sheet: String,
    },

    /// Print records whose date range overlaps a month
    ByMonth {
        /// Path to the tracker workbook (.xlsx)
        file: PathBuf,

        /// Target month (1-12)
        month: u32,

        /// Target year (4-digit)
        year: i32,

        /// Sheet name holding tracker rows
        #[arg(short, long, default_value = "Projects")]
        sheet: String,
    },

    /// Update a record's status column
    SetStatus {
        /// Path to the tracker workbook (.xlsx)
        file: PathBuf,

        /// 1-based data row index
        row: usize,

        /// New status value
        status: String,

        /// Sheet name holding tracker rows
        #[arg(short, long, default_value = "Projects")]
        sheet: String,
    },

    /// Update a single cell addressed by field key
    SetCell {
        /// Path to the tracker workbook (.xlsx)
        file: PathBuf,

        /// 1-based data row index
        row: usize,

        /// Field key (camelCase, e.g. functionalOwnerOfDeliverable)
        field: String,

        /// New cell value
        value: String,

        /// Sheet name holding tracker rows
        #[arg(short, long, default_value = "Projects")]
        sheet: String,
    },

    /// Append a record from key=value pairs
    Add {
        /// Path to the tracker workbook (.xlsx)
        file: PathBuf,

        /// Field assignments as key=value (keys are camelCase field keys)
        #[arg(required = true)]
        fields: Vec<String>,

        /// Sheet name holding tracker rows
        #[arg(short, long, default_value = "Projects")]
        sheet: String,
    },

    /// Run the HTTP API server over the workbook
    Serve {
        /// Path to the tracker workbook (.xlsx)
        file: PathBuf,

        /// Host address to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Sheet name holding tracker rows
        #[arg(long, default_value = "Projects")]
        sheet: String,
    },
}

fn main() -> TrackerResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { file, sheet } => cli::init(file, sheet),

        Commands::List { file, sheet } => cli::list(file, sheet),

        Commands::Filters { file, sheet } => cli::filters(file, sheet),

        Commands::Stats { file, sheet } => cli::stats(file, sheet),

        Commands::ByMonth {
            file,
            month,
            year,
            sheet,
        } => cli::by_month(file, month, year, sheet),

        Commands::SetStatus {
            file,
            row,
            status,
            sheet,
        } => cli::set_status(file, row, status, sheet),

        Commands::SetCell {
            file,
            row,
            field,
            value,
            sheet,
        } => cli::set_cell(file, row, field, value, sheet),

        Commands::Add {
            file,
            fields,
            sheet,
        } => cli::add(file, fields, sheet),

        Commands::Serve {
            file,
            host,
            port,
            sheet,
        } => cli::serve(file, host, port, sheet),
    }
}
