//! JSON error responses for the `/api` routes.
//!
//! The webhook has its own body shape; see [`super::webhook`].

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::subscription::SubscriptionError;

/// Error body: `{code, message}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub SubscriptionError);

impl From<SubscriptionError> for ApiError {
    fn from(err: SubscriptionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.0.code(), "Request failed: {}", self.0);
        }

        // Store failures keep their detail in the log only
        let message = match &self.0 {
            SubscriptionError::Store(_) => "Internal server error".to_string(),
            other => other.message(),
        };

        (status, Json(ErrorResponse::new(self.0.code(), message))).into_response()
    }
}

/// Shorthand for a 400 from a request field that failed to parse.
pub fn invalid_field(field: &str, message: impl Into<String>) -> ApiError {
    ApiError(SubscriptionError::validation(field, message))
}
