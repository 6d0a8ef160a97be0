//! Door-check HTTP handlers.
//!
//! - POST /api/door-check/verify - validate the `x-api-key` header
//! - POST /api/door-check - public relay that calls the verify endpoint
//!   with the server's own key

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::AppError,
    services::{
        door_relay::{self, RelayResponse},
        key_validator,
    },
};

/// Verify a door-check API key.
///
/// # Response
///
/// - **200**: `{ "ok": true }`
/// - **401**: `{ "ok": false, "error": "Missing API key" | "Invalid API key" }`
pub async fn verify_key(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    key_validator::validate_api_key(state.keys.as_ref(), key_validator::presented_key(&headers))
        .await?;

    Ok(Json(json!({ "ok": true })))
}

/// Relay a door-check request to the verify endpoint.
///
/// The body is forwarded as raw bytes without being parsed. The internal
/// status code and body come back unchanged, marked `no-store`.
///
/// # Errors
///
/// - **500**: `DOOR_API_KEY` unset, request host unresolvable or not in
///   `DOOR_RELAY_HOSTS`, or the internal endpoint unreachable
pub async fn relay(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<RelayResponse, AppError> {
    door_relay::relay(
        &state.http,
        state.config.door_secret(),
        &state.config.door_relay_hosts,
        &headers,
        body,
    )
    .await
}
