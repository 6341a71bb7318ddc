//! HTTP handlers for the auth and analytics endpoints.
//!
//! These handlers connect Axum routes to `AuthGateway`.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::{invalid_field, ApiError};
use crate::adapters::http::middleware::BearerToken;
use crate::adapters::http::router::AppState;
use crate::application::AuthGateway;
use crate::domain::analytics::UserAction;
use crate::domain::foundation::Email;
use crate::domain::subscription::SubscriptionError;

use super::dto::{
    CredentialsRequest, CurrentSubscriptionResponse, LogActionRequest, SignInResponse,
    SignUpResponse,
};

fn gateway(state: &AppState) -> Result<Arc<AuthGateway>, ApiError> {
    state.auth_gateway.clone().ok_or_else(|| {
        ApiError(SubscriptionError::configuration(
            "Authentication service is not configured",
        ))
    })
}

fn parse_email(raw: &str) -> Result<Email, ApiError> {
    Email::parse(raw).map_err(|e| invalid_field("email", e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/auth/signup - Create an account
pub async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let gateway = gateway(&state)?;
    let email = parse_email(&request.email)?;

    let registration = gateway.sign_up(email, request.password).await?;

    Ok((StatusCode::CREATED, Json(SignUpResponse::from(registration))))
}

/// POST /api/auth/signin - Password sign-in, linking any paid subscription
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let gateway = gateway(&state)?;
    let email = parse_email(&request.email)?;

    let result = gateway.sign_in(email, request.password).await?;

    Ok(Json(SignInResponse::from(result)))
}

/// POST /api/auth/signout - Revoke the caller's session
pub async fn sign_out(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError> {
    gateway(&state)?.sign_out(token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/analytics/events - Record a user action
///
/// Answers 202 before the write completes.
pub async fn log_action(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(request): Json<LogActionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let gateway = gateway(&state)?;
    let user = gateway.authenticate(&token).await?;
    let action =
        UserAction::parse(&request.action).map_err(|e| invalid_field("action", e.to_string()))?;

    gateway.log_user_action(user.id, action, request.page, request.metadata);

    Ok(StatusCode::ACCEPTED)
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/auth/subscription - Caller's subscription and access flag
pub async fn current_subscription(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<impl IntoResponse, ApiError> {
    let result = gateway(&state)?.current_subscription(token).await?;
    Ok(Json(CurrentSubscriptionResponse::from(result)))
}
