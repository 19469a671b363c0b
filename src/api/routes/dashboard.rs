//! Precomputed dashboard endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::dashboard::{build_snapshot, DashboardSnapshot, ALL_POSITIONS};

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub position: Option<String>,
}

/// `GET /api/dashboard?position=...`: all six chart configurations for
/// the given position filter (default "all"). The four leaderboards
/// respect the filter; the two distribution charts never do.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Json<DashboardSnapshot> {
    let filter = params.position.as_deref().unwrap_or(ALL_POSITIONS);
    Json(build_snapshot(&state.players, filter))
}
