pub mod analyze;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::state::AppState;

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::home_handler))
        .route("/health", get(health::health_handler))
        .route("/api/analyze", post(analyze::analyze_handler))
        .layer(DefaultBodyLimit::max(analyze::BODY_LIMIT))
        .fallback(not_found)
        .with_state(state)
}
