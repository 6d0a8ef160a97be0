//! Door-check API key validation.

use axum::http::HeaderMap;

use crate::{error::AppError, store::KeyStore};

/// Header carrying the door-check key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Raw `x-api-key` value, if present and valid UTF-8.
pub fn presented_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(API_KEY_HEADER).and_then(|h| h.to_str().ok())
}

/// Validate a presented key against the active keys in the store.
///
/// # Flow
///
/// 1. Trim the key; missing or blank fails with `MissingApiKey` without
///    touching the store
/// 2. Look up the trimmed key among active records (at most one row)
/// 3. No match, or a failed lookup, fails with `InvalidApiKey`
///
/// Unknown and inactive keys produce the same error. Failed attempts are
/// neither counted nor throttled here.
pub async fn validate_api_key(store: &dyn KeyStore, presented: Option<&str>) -> Result<(), AppError> {
    let api_key = presented
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(AppError::MissingApiKey)?;

    match store.find_active_key(api_key).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(AppError::InvalidApiKey),
        Err(e) => {
            tracing::warn!("api key lookup failed: {}", e);
            Err(AppError::InvalidApiKey)
        }
    }
}
