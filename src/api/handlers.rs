//! API request handlers
//!
//! Handlers for all REST API endpoints. Every operation answers with the
//! [`ApiResponse`] envelope; tracker faults become `{error}` payloads
//! rather than HTTP-level failures.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TrackerResult;
use crate::types::{CellValue, FilterOptions, Record, SheetData, SummaryStats};

use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn from_result(result: TrackerResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

fn endpoint(path: &str, method: &str, description: &str) -> EndpointInfo {
    EndpointInfo {
        path: path.to_string(),
        method: method.to_string(),
        description: description.to_string(),
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Trackboard API Server".to_string(),
        version: state.version.clone(),
        description: "HTTP API for the spreadsheet-backed project tracker".to_string(),
        endpoints: vec![
            endpoint("/health", "GET", "Health check endpoint"),
            endpoint("/version", "GET", "Get server version"),
            endpoint("/api/v1/projects", "GET", "List all tracker records"),
            endpoint("/api/v1/filters", "GET", "Filter options per field"),
            endpoint("/api/v1/stats", "GET", "Summary statistics"),
            endpoint(
                "/api/v1/projects/by-month",
                "GET",
                "Records overlapping a month (?month=&year=)",
            ),
            endpoint("/api/v1/projects", "POST", "Append a new tracker record"),
            endpoint("/api/v1/projects/status", "POST", "Update a record's status"),
            endpoint("/api/v1/projects/cell", "POST", "Update a single cell by field key"),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "projects".to_string(),
            "filters".to_string(),
            "stats".to_string(),
            "by-month".to_string(),
            "update-status".to_string(),
            "update-cell".to_string(),
            "add-project".to_string(),
        ],
    }))
}

/// GET /api/v1/projects - All mapped records plus headers
pub async fn get_projects(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SheetData>> {
    let tracker = state.tracker.lock().await;
    Json(ApiResponse::from_result(tracker.get_projects()))
}

/// GET /api/v1/filters - Filter options
pub async fn get_filters(State(state): State<Arc<AppState>>) -> Json<ApiResponse<FilterOptions>> {
    let tracker = state.tracker.lock().await;
    Json(ApiResponse::from_result(tracker.get_filter_options()))
}

/// GET /api/v1/stats - Summary statistics
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<SummaryStats>> {
    let tracker = state.tracker.lock().await;
    Json(ApiResponse::from_result(tracker.get_summary_stats()))
}

/// By-month query parameters
#[derive(Deserialize)]
pub struct ByMonthParams {
    pub month: u32,
    pub year: i32,
}

/// By-month response
#[derive(Serialize)]
pub struct MonthProjectsResponse {
    pub records: Vec<Record>,
}

/// GET /api/v1/projects/by-month - Records overlapping a month
pub async fn get_projects_by_month(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ByMonthParams>,
) -> Json<ApiResponse<MonthProjectsResponse>> {
    let tracker = state.tracker.lock().await;
    let result = tracker
        .get_projects_by_month(params.month, params.year)
        .map(|records| MonthProjectsResponse { records });
    Json(ApiResponse::from_result(result))
}

/// Update-status request
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(rename = "rowIndex")]
    pub row_index: usize,
    pub status: String,
}

/// Update-status response
#[derive(Serialize)]
pub struct UpdateStatusResponse {
    #[serde(rename = "rowIndex")]
    pub row_index: usize,
    pub status: String,
}

/// POST /api/v1/projects/status - Update a record's status
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateStatusRequest>,
) -> Json<ApiResponse<UpdateStatusResponse>> {
    let mut tracker = state.tracker.lock().await;
    let result = tracker
        .update_status(req.row_index, &req.status)
        .map(|()| UpdateStatusResponse {
            row_index: req.row_index,
            status: req.status,
        });
    Json(ApiResponse::from_result(result))
}

/// Update-cell request
#[derive(Deserialize)]
pub struct UpdateCellRequest {
    #[serde(rename = "rowIndex")]
    pub row_index: usize,
    pub field: String,
    pub value: CellValue,
}

/// Update-cell response
#[derive(Serialize)]
pub struct UpdateCellResponse {
    #[serde(rename = "rowIndex")]
    pub row_index: usize,
    pub field: String,
}

/// POST /api/v1/projects/cell - Update a single cell by field key
pub async fn update_cell(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateCellRequest>,
) -> Json<ApiResponse<UpdateCellResponse>> {
    let mut tracker = state.tracker.lock().await;
    let result = tracker
        .update_cell(req.row_index, &req.field, req.value)
        .map(|()| UpdateCellResponse {
            row_index: req.row_index,
            field: req.field,
        });
    Json(ApiResponse::from_result(result))
}

/// Add-project request
#[derive(Deserialize)]
pub struct AddProjectRequest {
    pub fields: HashMap<String, CellValue>,
}

/// Add-project response
#[derive(Serialize)]
pub struct AddProjectResponse {
    #[serde(rename = "rowIndex")]
    pub row_index: usize,
}

/// POST /api/v1/projects - Append a new tracker record
pub async fn add_project(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddProjectRequest>,
) -> Json<ApiResponse<AddProjectResponse>> {
    let mut tracker = state.tracker.lock().await;
    let result = tracker
        .add_record(&req.fields)
        .map(|row_index| AddProjectResponse { row_index });
    Json(ApiResponse::from_result(result))
}
