//! HTTP Basic authentication for the admin area.
//!
//! The gate runs on every request and only acts on paths under `/admin`.
//! Each request is checked from scratch; nothing is remembered between
//! requests.

use axum::{
    extract::{Request, State},
    http::{
        StatusCode,
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use subtle::ConstantTimeEq;

use crate::AppState;

/// Path prefix guarded by the gate.
pub const ADMIN_PREFIX: &str = "/admin";

/// Fixed Basic-auth user name; only the password is configurable.
pub const ADMIN_USER: &str = "admin";

fn is_admin_path(path: &str) -> bool {
    path == ADMIN_PREFIX
        || path
            .strip_prefix(ADMIN_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// `Authorization` value a correct browser prompt produces for `secret`.
pub fn expected_authorization(secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", ADMIN_USER, secret))
    )
}

/// Admin gate middleware.
///
/// # Flow
///
/// 1. Paths outside `/admin` pass straight through
/// 2. No `ADMIN_PASSWORD` configured: 500 `ADMIN_PASSWORD missing`
/// 3. `Authorization` not exactly `Basic base64(admin:<secret>)`: 401 with a
///    `WWW-Authenticate: Basic realm="<app name>"` challenge
/// 4. Otherwise the request continues unmodified
///
/// Bodies are plain text because this gate fronts browser pages.
pub async fn admin_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !is_admin_path(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(secret) = state.config.admin_secret() else {
        tracing::error!("admin request rejected: ADMIN_PASSWORD is not configured");
        return (StatusCode::INTERNAL_SERVER_ERROR, "ADMIN_PASSWORD missing").into_response();
    };

    let expected = expected_authorization(secret);
    let presented = request
        .headers()
        .get(AUTHORIZATION)
        .map(|h| h.as_bytes())
        .unwrap_or_default();

    if !bool::from(presented.ct_eq(expected.as_bytes())) {
        let challenge = format!("Basic realm=\"{}\"", state.config.app_name.replace('"', ""));
        return (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, challenge)],
            "Authentication required",
        )
            .into_response();
    }

    next.run(request).await
}
