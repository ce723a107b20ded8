//! Product handlers
//! Handles DELETE /api/backend/product/:id

use axum::{
    extract::{OriginalUri, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::proxy::error::ProxyError;
use crate::proxy::server::AppState;

/// Forward a product deletion to the backend and relay its outcome.
///
/// The identifier is taken from the raw request path, still percent-encoded,
/// so it reaches the backend byte for byte.
pub async fn handle_delete_product(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Result<Response, ProxyError> {
    let id = raw_product_id(uri.path());
    let cookie = forwarded_cookie(&headers);

    let response = state.backend.delete_product(id, cookie).await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.map_err(ProxyError::Transport)?;
        tracing::warn!("Backend rejected delete of product {}: {}", id, status);
        return Err(ProxyError::Backend { status, body });
    }

    tracing::debug!("Deleted product {} ({})", id, status);
    Ok((success_status(status), Json(json!({ "status": status.as_u16() }))).into_response())
}

/// Last path segment, as it appeared on the wire.
pub fn raw_product_id(path: &str) -> &str {
    path.rsplit_once('/').map(|(_, id)| id).unwrap_or(path)
}

/// All inbound `Cookie` headers folded into one, joined with `"; "`.
pub fn forwarded_cookie(headers: &HeaderMap) -> Option<HeaderValue> {
    let mut values = headers.get_all(header::COOKIE).iter();
    let first = values.next()?;

    let mut joined = first.as_bytes().to_vec();
    for value in values {
        joined.extend_from_slice(b"; ");
        joined.extend_from_slice(value.as_bytes());
    }

    // Every piece was already a valid header value
    HeaderValue::from_bytes(&joined).ok().or_else(|| Some(first.clone()))
}

/// Statuses that forbid a body are answered as 200 so the JSON reaches the caller.
fn success_status(backend: StatusCode) -> StatusCode {
    match backend {
        StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT => StatusCode::OK,
        other => other,
    }
}
