//! HTTP Basic authentication against a single configured principal.
//!
//! An empty configured username disables the check. `main` warns about this
//! once at startup; each bypassed request is logged at `debug`.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, WWW_AUTHENTICATE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sandbox_common::DeployServerConfig;
use thiserror::Error;

const CHALLENGE: &str = r#"Basic realm="Login Required""#;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("no Authorization header")]
    Missing,

    #[error("Authorization header is not valid Basic credentials")]
    Malformed,

    #[error("invalid username or password")]
    Invalid,
}

/// Middleware stage for `axum::middleware::from_fn_with_state`.
pub async fn require_basic_auth(
    State(config): State<Arc<DeployServerConfig>>,
    request: Request,
    next: Next,
) -> Response {
    if config.auth_disabled() {
        tracing::debug!(path = %request.uri().path(), "auth disabled, allowing request");
        return next.run(request).await;
    }

    match check_credentials(request.headers(), &config) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            tracing::warn!(path = %request.uri().path(), error = %err, "authentication failed");
            unauthorized()
        }
    }
}

/// Validate the `Authorization` header against the configured principal.
///
/// # Errors
///
/// Returns the reason the credentials were rejected.
pub fn check_credentials(headers: &HeaderMap, config: &DeployServerConfig) -> Result<(), AuthError> {
    let header = headers.get(AUTHORIZATION).ok_or(AuthError::Missing)?;
    let header = header.to_str().map_err(|_| AuthError::Malformed)?;
    let (scheme, encoded) = header.split_once(' ').ok_or(AuthError::Malformed)?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(AuthError::Malformed);
    }
    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::Malformed)?;
    if !decoded.contains(&b':') {
        return Err(AuthError::Malformed);
    }

    let expected = format!("{}:{}", config.username, config.password);
    if constant_time_eq(&decoded, expected.as_bytes()) {
        Ok(())
    } else {
        Err(AuthError::Invalid)
    }
}

/// Byte equality whose running time depends only on the longer input.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut diff = u8::from(a.len() != b.len());
    for i in 0..len {
        diff |= a.get(i).copied().unwrap_or(0) ^ b.get(i).copied().unwrap_or(0);
    }
    diff == 0
}

fn unauthorized() -> Response {
    let mut response = (
        StatusCode::UNAUTHORIZED,
        "Could not verify your access level for that URL.\nYou have to login with proper credentials",
    )
        .into_response();
    response
        .headers_mut()
        .insert(WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
    response
}
