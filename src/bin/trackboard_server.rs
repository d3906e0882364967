//! Trackboard API server binary
//!
//! HTTP REST API over a tracker workbook.
//! Provides project, filter, stats, month-view, and update endpoints.

use std::path::PathBuf;

use clap::Parser;
use trackboard::api::{run_api_server, server::ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "trackboard-server")]
#[command(version)]
#[command(about = "Trackboard API Server - HTTP REST API for the spreadsheet-backed tracker")]
#[command(long_about = r#"
Trackboard API Server

Read endpoints:
  - GET  /api/v1/projects           - All tracker records plus headers
  - GET  /api/v1/filters            - Filter options per field
  - GET  /api/v1/stats              - Summary statistics
  - GET  /api/v1/projects/by-month  - Records overlapping a month (?month=&year=)

Write endpoints:
  - POST /api/v1/projects           - Append a new record
  - POST /api/v1/projects/status    - Update a record's status
  - POST /api/v1/projects/cell      - Update a single cell by field key

Additional endpoints:
  - GET  /health                    - Health check
  - GET  /version                   - Server version info
  - GET  /                          - API documentation

Features:
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM
  - JSON response format with request IDs
  - Tracing and structured logging

Example usage:
  trackboard-server tracker.xlsx
  trackboard-server tracker.xlsx --host 0.0.0.0 --port 3000

  curl http://localhost:8080/api/v1/stats
  curl -X POST http://localhost:8080/api/v1/projects/status \
    -H "Content-Type: application/json" \
    -d '{"rowIndex": 2, "status": "At Risk"}'
"#)]
struct Args {
    /// Path to the tracker workbook (.xlsx)
    #[arg(env = "TRACKBOARD_FILE")]
    file: PathBuf,

    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "TRACKBOARD_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "TRACKBOARD_PORT")]
    port: u16,

    /// Sheet name holding tracker rows
    #[arg(long, default_value = "Projects", env = "TRACKBOARD_SHEET")]
    sheet: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        workbook: args.file,
        sheet: args.sheet,
    };

    run_api_server(config).await
}
