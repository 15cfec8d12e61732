//! Dashboard view-model endpoint
//!
//! Runs the full pipeline on every request: load both sources, classify,
//! build the view model. Filter selections arrive as comma-separated query
//! parameters owned by the page; the pipeline sees them as plain sets.

use std::collections::HashSet;

use axum::{
    extract::{Query, State},
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::loader::{load_access, load_iva};
use crate::viewmodel::{build, FilterSpec, ViewModel};
use crate::AppState;

/// Query parameters for the dashboard endpoint
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Comma-separated event types to retain (empty/absent = all)
    pub event_type: Option<String>,
    /// Comma-separated zones to retain (empty/absent = all)
    pub zone: Option<String>,
}

/// Split a comma-separated multi-select parameter into a set
fn parse_multi(param: Option<&str>) -> HashSet<String> {
    param
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// GET /api/dashboard
///
/// Never fails: missing or malformed sources produce an empty view model
/// with load warnings rather than an error status.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Json<ViewModel> {
    let (iva, iva_status) = load_iva(&state.paths.iva_log());
    let (access, access_status) = load_access(&state.paths.access_log());

    let filters = FilterSpec {
        event_types: parse_multi(query.event_type.as_deref()),
        zones: parse_multi(query.zone.as_deref()),
    };

    let mut rng = StdRng::from_entropy();
    let vm = build(&iva, &access, &filters, &mut rng);

    // Load warnings lead, data-quality warnings follow
    let mut warnings: Vec<String> = Vec::new();
    warnings.extend(iva_status.warning().map(String::from));
    warnings.extend(access_status.warning().map(String::from));
    warnings.extend(vm.warnings.clone());

    Json(ViewModel { warnings, ..vm })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multi() {
        let set = parse_multi(Some("Loitering, Motion ,"));
        assert_eq!(set.len(), 2);
        assert!(set.contains("Loitering"));
        assert!(set.contains("Motion"));
    }

    #[test]
    fn test_parse_multi_absent_means_no_filter() {
        assert!(parse_multi(None).is_empty());
        assert!(parse_multi(Some("")).is_empty());
    }
}
