//! Error taxonomy shared by the webhook and the auth gateway.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Configuration | 500 |
//! | Validation | 400 |
//! | Authorization | 403 |
//! | Auth(InvalidCredentials / SessionInvalid) | 401 |
//! | Auth(Rejected) | 400 |
//! | Auth(ServiceUnavailable) | 503 |
//! | Store | 500 |

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::{AuthError, DomainError, ValidationError};

#[derive(Debug, Clone, Error)]
pub enum SubscriptionError {
    /// A credential or secret the operation needs was never configured.
    #[error("Not configured: {0}")]
    Configuration(String),

    /// Malformed request input.
    #[error("Validation failed on '{field}': {message}")]
    Validation { field: String, message: String },

    /// Shared secret missing or wrong.
    #[error("Unauthorized: {0}")]
    Authorization(String),

    /// Identity provider failure, propagated to the caller.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Subscription store failure other than "no rows".
    #[error("Store error: {0}")]
    Store(String),
}

impl SubscriptionError {
    pub fn configuration(what: impl Into<String>) -> Self {
        Self::Configuration(what.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn authorization(reason: impl Into<String>) -> Self {
        Self::Authorization(reason.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Maps the error to an HTTP status code.
    ///
    /// 5xx responses make the payment processor redeliver the event.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SubscriptionError::Configuration(_) | SubscriptionError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            SubscriptionError::Validation { .. } => StatusCode::BAD_REQUEST,
            SubscriptionError::Authorization(_) => StatusCode::FORBIDDEN,
            SubscriptionError::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::SessionInvalid => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::Rejected(_) => StatusCode::BAD_REQUEST,
                AuthError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    /// Caller-facing message without the variant prefix `Display` adds.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::Configuration(msg)
            | SubscriptionError::Authorization(msg)
            | SubscriptionError::Store(msg) => msg.clone(),
            SubscriptionError::Validation { message, .. } => message.clone(),
            SubscriptionError::Auth(err) => err.to_string(),
        }
    }

    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            SubscriptionError::Configuration(_) => "CONFIGURATION_ERROR",
            SubscriptionError::Validation { .. } => "VALIDATION_ERROR",
            SubscriptionError::Authorization(_) => "AUTHORIZATION_ERROR",
            SubscriptionError::Auth(_) => "AUTH_ERROR",
            SubscriptionError::Store(_) => "STORE_ERROR",
        }
    }
}

impl From<ValidationError> for SubscriptionError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        SubscriptionError::validation(field, err.to_string())
    }
}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        SubscriptionError::Store(err.to_string())
    }
}
