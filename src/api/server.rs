//! Trackboard API server implementation
//!
//! HTTP REST API server using Axum. Exposes the tracker sheet as read
//! endpoints (projects, filters, stats, month views) and write endpoints
//! (status, cell, new project).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::core::Tracker;
use crate::store::WorkbookStore;
use crate::types::TrackerConfig;

use super::handlers;

/// API server configuration
#[derive(Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Workbook file backing the tracker.
    pub workbook: PathBuf,
    /// Sheet within the workbook holding tracker rows.
    pub sheet: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workbook: PathBuf::from("tracker.xlsx"),
            sheet: "Projects".to_string(),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub version: String,
    /// Requests serialize on the tracker: the backing store has no locking
    /// discipline of its own, so one write at a time is the whole model.
    pub tracker: Mutex<Tracker<WorkbookStore>>,
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trackboard=info,tower_http=info".into()),
        )
        .init();

    let store = WorkbookStore::open(&config.workbook, &config.sheet)?;
    let tracker_config = TrackerConfig {
        sheet_name: config.sheet.clone(),
        ..TrackerConfig::default()
    };
    let state = Arc::new(AppState {
        version: env!("CARGO_PKG_VERSION").to_string(),
        tracker: Mutex::new(Tracker::with_config(store, tracker_config)),
    });

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Core API endpoints
        .route(
            "/api/v1/projects",
            get(handlers::get_projects).post(handlers::add_project),
        )
        .route("/api/v1/filters", get(handlers::get_filters))
        .route("/api/v1/stats", get(handlers::get_stats))
        .route("/api/v1/projects/by-month", get(handlers::get_projects_by_month))
        .route("/api/v1/projects/status", post(handlers::update_status))
        .route("/api/v1/projects/cell", post(handlers::update_cell))
        // State and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Trackboard API server starting on http://{}", addr);
    info!(
        "   Workbook: {} (sheet '{}')",
        config.workbook.display(),
        config.sheet
    );
    info!("   Endpoints: /api/v1/projects, /api/v1/filters, /api/v1/stats");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Trackboard API server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}
