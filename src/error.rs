//! Error types and HTTP error response handling.
//!
//! Every handler returns `Result<_, AppError>`; the conversion below is the
//! single place where failures become HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Configuration**: a required secret or setting is absent (500)
/// - **Authentication**: missing or invalid API key (401)
/// - **Upstream**: the database or an external HTTP service failed (500)
/// - **Bad request / not found**: unusable input (400 / 404)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required server-side value is not configured.
    ///
    /// Kept apart from authentication failures so a broken deployment is
    /// never reported as a bad credential.
    #[error("{0}")]
    Configuration(String),

    /// No `x-api-key` header, or one that is blank after trimming.
    #[error("Missing API key")]
    MissingApiKey,

    /// API key unknown, inactive, or the lookup itself failed.
    ///
    /// These cases share one message so callers cannot probe which keys exist.
    #[error("Invalid API key")]
    InvalidApiKey,

    /// An external HTTP service answered with an error or could not be reached.
    #[error("{0}")]
    Upstream(String),

    /// Database operation failed.
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// Request input is malformed or missing.
    #[error("{0}")]
    BadRequest(String),

    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingApiKey | AppError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Configuration(_) | AppError::Upstream(_) | AppError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// { "ok": false, "error": "Invalid API key" }
/// ```
///
/// Server-side failures keep the underlying message for diagnostics.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "request failed: {}", self);
        }

        let body = Json(json!({
            "ok": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
