//! Maps action failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sandbox_deploy::domain::{ProcessError, RequestError};

/// Handler error: a 400 for invalid input, a 500 for everything else.
///
/// Captured process output is logged, never sent to the client.
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = format!("{:#}", self.0);
        if self.0.downcast_ref::<RequestError>().is_some() {
            tracing::info!(error = %message, "rejected request");
            return (StatusCode::BAD_REQUEST, message).into_response();
        }

        let output = self
            .0
            .downcast_ref::<ProcessError>()
            .and_then(ProcessError::output)
            .unwrap_or_default();
        tracing::error!(error = %message, output, "action failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal Server Error: {message}"),
        )
            .into_response()
    }
}
