//! Proxy error type and its HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Message returned to callers when the backend could not be reached
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete product";

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Backend answered with a non-success status
    #[error("backend returned {status}")]
    Backend { status: StatusCode, body: String },

    /// The outbound call did not complete
    #[error("backend request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            // Status and body pass through untouched
            ProxyError::Backend { status, body } => (status, body).into_response(),
            ProxyError::Transport(e) => {
                tracing::error!("Proxy error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": DELETE_FAILED_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}
