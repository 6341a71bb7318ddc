//! Dashboard route definitions.

use axum::{routing::get, Router};

use crate::adapters::http::router::AppState;

use super::handlers::get_dashboard_overview;

/// Creates dashboard routes.
///
/// - `GET /dashboard` - Overview (not gated by subscription)
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard_overview))
}
