//! Player dataset endpoints.

use axum::extract::State;
use axum::Json;

use crate::api::state::AppState;
use crate::calculate;
use crate::models::PlayerRecord;

/// `GET /api/players`: the full record array, original column names.
pub async fn all_players(State(state): State<AppState>) -> Json<Vec<PlayerRecord>> {
    Json(state.players.as_ref().clone())
}

/// `GET /api/positions`: distinct positions for the filter control, in
/// order of first appearance in the dataset.
pub async fn positions(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(calculate::positions(&state.players))
}
