//! REST API endpoints.
//!
//! Axum-based HTTP API serving the derived tables as JSON and accepting new
//! match results.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::models::MatchRecord;
use crate::storage::StorageError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Rejected(e) => ApiError::BadRequest(e.to_string()),
            StorageError::NotFound(id) => ApiError::NotFound(format!("match {}", id)),
            other => ApiError::Internal(other.to_string()),
        }
    }
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
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
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

/// Load the current snapshot of the match log.
pub(crate) fn load_matches(state: &AppState) -> Result<Vec<MatchRecord>, ApiError> {
    Ok(state.store.load()?)
}

fn cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, allowing any origin", origin);
            CorsLayer::permissive()
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/api/health", get(routes::stats::health))
        .route("/api/leaderboard", get(routes::stats::leaderboard))
        .route("/api/head-to-head", get(routes::stats::head_to_head))
        .route("/api/monthly", get(routes::stats::monthly))
        .route("/api/streaks", get(routes::stats::streaks))
        .route("/api/report", get(routes::stats::report))
        .route(
            "/api/matches",
            get(routes::matches::list_matches).post(routes::matches::create_match),
        )
        .route("/api/matches/longest", get(routes::matches::longest_match))
        .route("/api/matches/:id", delete(routes::matches::delete_match))
        .route(
            "/api/players/:name/biggest-win",
            get(routes::matches::biggest_win),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
