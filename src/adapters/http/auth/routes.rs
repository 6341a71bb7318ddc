//! Axum router configuration for auth and analytics endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::router::AppState;

use super::handlers::{current_subscription, log_action, sign_in, sign_out, sign_up};

/// Create the auth API router.
///
/// # Routes
///
/// ## Public
/// - `POST /auth/signup` - Create an account
/// - `POST /auth/signin` - Sign in
///
/// ## Bearer token required
/// - `POST /auth/signout` - Revoke the session
/// - `GET /auth/subscription` - Current subscription
/// - `POST /analytics/events` - Record a user action
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
        .route("/auth/signout", post(sign_out))
        .route("/auth/subscription", get(current_subscription))
        .route("/analytics/events", post(log_action))
}
