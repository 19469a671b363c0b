//! REST API endpoints.
//!
//! Axum-based HTTP API serving the player dataset, metric leaderboards,
//! and precomputed dashboard chart configurations.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;

pub mod routes;
pub mod state;

use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Assemble the API router over the shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/players", get(routes::players::all_players))
        .route("/api/positions", get(routes::players::positions))
        .route("/api/top-players/:metric", get(routes::leaders::top_players))
        .route(
            "/api/position/:position/:metric",
            get(routes::leaders::position_leaders),
        )
        .route("/api/dashboard", get(routes::dashboard::dashboard))
        .with_state(state)
}
