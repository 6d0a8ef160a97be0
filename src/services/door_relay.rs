//! Same-origin relay for door-check requests.
//!
//! The public client posts to the relay without any credential. The relay
//! re-issues the request to the internal verify endpoint on the same host
//! with the server-held `x-api-key` attached, then hands back the internal
//! response untouched. The secret only ever travels on the outbound call.

use axum::{
    body::Bytes,
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{CACHE_CONTROL, CONTENT_TYPE, HOST},
    },
    response::{IntoResponse, Response},
};
use url::Url;

use crate::{error::AppError, services::key_validator::API_KEY_HEADER};

/// Internal endpoint the relay forwards to.
pub const DOOR_CHECK_VERIFY_PATH: &str = "/api/door-check/verify";

const FORWARDED_HOST: &str = "x-forwarded-host";
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Scheme and host the original request was addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: &'static str,
    pub host: String,
}

impl Origin {
    /// Absolute URL for `path` on this origin.
    pub fn url(&self, path: &str) -> Result<Url, AppError> {
        let url = Url::parse(&format!("{}://{}{}", self.scheme, self.host, path))
            .map_err(|_| unresolved_host())?;

        if url.host_str().is_none() {
            return Err(unresolved_host());
        }

        Ok(url)
    }
}

fn unresolved_host() -> AppError {
    AppError::Configuration("Unable to resolve request host".to_string())
}

/// First comma-separated value of a header, trimmed, if non-empty.
fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Resolve the effective origin of a request.
///
/// # Precedence
///
/// - host: `x-forwarded-host`, then `Host`
/// - scheme: `x-forwarded-proto` when it is `http` or `https`, else `http`
///
/// Both headers come from the client, so the resolved host must also be
/// listed in `allowed_hosts` (case-insensitive, `name[:port]`). Fails when
/// no host can be found, the host carries anything beyond `name[:port]`,
/// or it is not allowed.
pub fn resolve_origin(headers: &HeaderMap, allowed_hosts: &[String]) -> Result<Origin, AppError> {
    let host = first_value(headers, FORWARDED_HOST)
        .or_else(|| first_value(headers, HOST.as_str()))
        .ok_or_else(unresolved_host)?;

    if host
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '\\' | '@' | '?' | '#'))
    {
        return Err(unresolved_host());
    }

    if !allowed_hosts
        .iter()
        .map(|h| h.trim())
        .any(|h| !h.is_empty() && h.eq_ignore_ascii_case(host))
    {
        tracing::warn!(host, "door-check relay refused host outside DOOR_RELAY_HOSTS");
        return Err(unresolved_host());
    }

    let scheme = match first_value(headers, FORWARDED_PROTO) {
        Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
        // TODO: decide whether production should refuse plain http when no proto header is set.
        _ => "http",
    };

    Ok(Origin {
        scheme,
        host: host.to_string(),
    })
}

/// Internal endpoint response, passed through as-is.
#[derive(Debug)]
pub struct RelayResponse {
    pub status: StatusCode,
    pub content_type: HeaderValue,
    pub body: Bytes,
}

impl IntoResponse for RelayResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [
                (CONTENT_TYPE, self.content_type),
                (CACHE_CONTROL, HeaderValue::from_static("no-store")),
            ],
            self.body,
        )
            .into_response()
    }
}

/// Forward `body` to the internal verify endpoint with the secret attached.
///
/// # Errors
///
/// - `Configuration` when the secret is unset, or the origin cannot be
///   resolved or is not in `allowed_hosts`
/// - `Upstream` when the internal endpoint cannot be reached or its body
///   cannot be read
///
/// Non-2xx answers from the internal endpoint are not errors; their status
/// and body are relayed unchanged.
pub async fn relay(
    http: &reqwest::Client,
    secret: Option<&str>,
    allowed_hosts: &[String],
    headers: &HeaderMap,
    body: Bytes,
) -> Result<RelayResponse, AppError> {
    let secret = secret
        .ok_or_else(|| AppError::Configuration("DOOR_API_KEY missing".to_string()))?;

    let target = resolve_origin(headers, allowed_hosts)?.url(DOOR_CHECK_VERIFY_PATH)?;

    let content_type = headers
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    tracing::debug!(%target, "relaying door-check request");

    let response = http
        .post(target)
        .header(CONTENT_TYPE, content_type)
        .header(API_KEY_HEADER, secret)
        .body(body)
        .send()
        .await
        .map_err(relay_failed)?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));
    let body = response.bytes().await.map_err(relay_failed)?;

    Ok(RelayResponse {
        status,
        content_type,
        body,
    })
}

fn relay_failed(e: reqwest::Error) -> AppError {
    AppError::Upstream(format!("Door-check relay failed: {}", e))
}
