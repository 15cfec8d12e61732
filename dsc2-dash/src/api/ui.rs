//! UI serving routes
//!
//! Serves the static single-page dashboard. The page owns filter selection
//! and the refresh timer; it re-fetches the view model on each tick.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../ui/index.html");

/// GET /
///
/// Serves the main dashboard page
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
