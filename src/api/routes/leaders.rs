//! Metric leaderboard endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{Map, Number, Value};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate;
use crate::capitalize;
use crate::models::{Metric, PlayerRecord};

const TOP_N: usize = 5;

fn parse_metric(key: &str) -> Result<Metric, ApiError> {
    Metric::parse(key).ok_or_else(|| ApiError::NotFound("Metric not found".to_string()))
}

/// One leaderboard row, keyed by the dataset's original column names,
/// including the ranked metric's own column.
fn leaderboard_row(player: &PlayerRecord, metric: Metric, with_position: bool) -> Value {
    let mut row = Map::new();
    row.insert(
        "PlayerName".to_string(),
        Value::String(player.player_name.clone()),
    );
    if let Some(ref team) = player.team_name {
        row.insert("TeamName".to_string(), Value::String(team.clone()));
    }
    if with_position {
        row.insert(
            "Position".to_string(),
            Value::String(player.position.clone()),
        );
    }

    let value = player.metric(metric).unwrap_or_default();
    row.insert(
        metric.column().to_string(),
        Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null),
    );

    Value::Object(row)
}

/// `GET /api/top-players/{metric}`: top 5 across the whole dataset.
pub async fn top_players(
    State(state): State<AppState>,
    Path(metric_key): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let metric = parse_metric(&metric_key)?;

    let refs: Vec<&PlayerRecord> = state.players.iter().collect();
    let top = calculate::leaderboard(&refs, metric, TOP_N);

    Ok(Json(
        top.iter()
            .map(|p| leaderboard_row(p, metric, true))
            .collect(),
    ))
}

/// `GET /api/position/{position}/{metric}`: top 5 within one position.
/// The position segment is case-folded ("mid" -> "Mid") to match the
/// dataset's values.
pub async fn position_leaders(
    State(state): State<AppState>,
    Path((position, metric_key)): Path<(String, String)>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let metric = parse_metric(&metric_key)?;

    let position = capitalize(&position);
    let matching = calculate::filter_by_position(&state.players, &position);
    if matching.is_empty() {
        return Err(ApiError::NotFound("Position not found".to_string()));
    }

    let top = calculate::leaderboard(&matching, metric, TOP_N);

    Ok(Json(
        top.iter()
            .map(|p| leaderboard_row(p, metric, false))
            .collect(),
    ))
}
