//! HTTP API for the dashboard
//!
//! All endpoints are read-only. The dashboard endpoint always answers 200
//! with a view model (missing sources degrade to warnings inside it);
//! export endpoints answer 404 when there is nothing to export.

mod dashboard;
mod exports;
mod health;
mod ui;

pub use dashboard::get_dashboard;
pub use exports::{export_access, export_iva, export_report, serve_heatmap};
pub use health::health_routes;
pub use ui::serve_index;
