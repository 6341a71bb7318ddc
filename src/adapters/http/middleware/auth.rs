//! Bearer token extraction for axum.
//!
//! The token is passed to the identity provider as-is; resolving it to a user
//! happens in the handler through `AuthGateway`, so a missing gateway can be
//! reported as a configuration error rather than a 401.
//!
//! # Example
//!
//! ```ignore
//! async fn sign_out(BearerToken(token): BearerToken) -> impl IntoResponse {
//!     gateway.sign_out(token).await
//! }
//! ```

use axum::{
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;

/// Access token from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    /// Reads the token from request headers. The scheme is case-insensitive.
    pub fn from_parts(parts: &Parts) -> Result<Self, AuthRejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthRejection::MissingToken)?
            .to_str()
            .map_err(|_| AuthRejection::MalformedHeader)?;

        let (scheme, token) = header
            .split_once(' ')
            .ok_or(AuthRejection::MalformedHeader)?;
        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return Err(AuthRejection::MalformedHeader);
        }
        Ok(BearerToken(token.to_string()))
    }
}

impl<S> axum::extract::FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move { BearerToken::from_parts(parts) })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header.
    MissingToken,
    /// Header present but not `Bearer <token>`.
    MalformedHeader,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            AuthRejection::MissingToken => "Authentication required",
            AuthRejection::MalformedHeader => "Expected 'Authorization: Bearer <token>'",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("UNAUTHENTICATED", message)),
        )
            .into_response()
    }
}
