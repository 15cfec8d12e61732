//! Export downloads: per-table CSV, full text report, heatmap asset
//!
//! CSV exports serialize the raw tables exactly as loaded (no synthesized
//! display columns). Download filenames carry a compact timestamp suffix.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use dsc2_common::time;

use crate::loader::{load_access, load_iva};
use crate::report::{generate_report, to_csv};
use crate::AppState;

/// Export API errors
#[derive(Debug)]
pub enum ExportError {
    NoData(String),
    AssetMissing(String),
}

impl IntoResponse for ExportError {
    fn into_response(self) -> Response {
        let message = match self {
            ExportError::NoData(msg) => msg,
            ExportError::AssetMissing(msg) => msg,
        };
        let body = Json(json!({
            "error": message,
        }));
        (StatusCode::NOT_FOUND, body).into_response()
    }
}

/// Attachment response with the standard export headers
fn attachment(content_type: &str, filename: &str, body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response()
}

/// GET /api/export/iva.csv
pub async fn export_iva(State(state): State<AppState>) -> Result<Response, ExportError> {
    let (table, _status) = load_iva(&state.paths.iva_log());
    if table.is_empty() {
        return Err(ExportError::NoData("No IVA data to export".to_string()));
    }
    let filename = time::export_filename("iva_events", "csv", time::now());
    Ok(attachment("text/csv", &filename, to_csv(&table).into_bytes()))
}

/// GET /api/export/access.csv
pub async fn export_access(State(state): State<AppState>) -> Result<Response, ExportError> {
    let (table, _status) = load_access(&state.paths.access_log());
    if table.is_empty() {
        return Err(ExportError::NoData("No Access data to export".to_string()));
    }
    let filename = time::export_filename("access_logs", "csv", time::now());
    Ok(attachment("text/csv", &filename, to_csv(&table).into_bytes()))
}

/// GET /api/export/report.txt
///
/// Always available: an empty data folder still yields a report with zero
/// counts and "No data" sections.
pub async fn export_report(State(state): State<AppState>) -> Response {
    let (iva, _) = load_iva(&state.paths.iva_log());
    let (access, _) = load_access(&state.paths.access_log());
    let now = time::now();
    let report = generate_report(&iva, &access, now);
    let filename = time::export_filename("dashboard_report", "txt", now);
    attachment("text/plain; charset=utf-8", &filename, report.into_bytes())
}

/// GET /heatmap.png
///
/// Serves the externally-produced activity heatmap as-is. Absence is a
/// warning and a 404, never a pipeline failure.
pub async fn serve_heatmap(State(state): State<AppState>) -> Result<Response, ExportError> {
    let path = state.paths.heatmap();
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/png".to_string())],
            bytes,
        )
            .into_response()),
        Err(_) => {
            warn!("Heatmap image not available: {}", path.display());
            Err(ExportError::AssetMissing(
                "Heatmap image not available".to_string(),
            ))
        }
    }
}
