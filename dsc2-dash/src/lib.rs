//! dsc2-dash library - Dashboard module
//!
//! Read-only operational dashboard over the IVA event log and the
//! access-control decision log. Every request reruns the full pipeline
//! (load, classify, build) from the two source files; no state is shared
//! between runs beyond the resolved configuration.

use axum::Router;
use dsc2_common::config::DataPaths;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod loader;
pub mod report;
pub mod viewmodel;

/// Application state shared across HTTP handlers.
///
/// Holds only the resolved data-folder paths; the pipeline itself is
/// stateless and re-entrant.
#[derive(Clone)]
pub struct AppState {
    pub paths: DataPaths,
}

impl AppState {
    pub fn new(paths: DataPaths) -> AppState {
        AppState { paths }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::serve_index))
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/export/iva.csv", get(api::export_iva))
        .route("/api/export/access.csv", get(api::export_access))
        .route("/api/export/report.txt", get(api::export_report))
        .route("/heatmap.png", get(api::serve_heatmap))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
