use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Error bodies follow the `{"error": ..., "details"?: ...}` shape the frontend
/// expects. No error here is fatal to the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The inference API answered with a non-200 status. The upstream body is
    /// surfaced verbatim under `details`.
    #[error("Upstream inference call failed (status {status})")]
    Upstream { status: u16, details: String },

    /// The inference API could not be reached at all (DNS, connect, timeout).
    /// Kept distinct from `Upstream` so callers can tell the two apart.
    #[error("Could not reach inference API: {0}")]
    UpstreamRequest(#[from] reqwest::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to extract text from document" }),
                )
            }
            AppError::Upstream { status, details } => {
                tracing::error!("Inference API returned {status}: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Upstream inference call failed",
                        "details": details,
                    }),
                )
            }
            AppError::UpstreamRequest(e) => {
                tracing::error!("Inference API unreachable: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Could not reach inference API" }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
