//! Webhook route definitions.

use axum::{routing::any, Router};

use crate::adapters::http::router::AppState;

use super::handlers::handle_kirvano_webhook;

/// Create the webhook router.
///
/// Webhooks don't use bearer auth; they're verified by the shared `token`
/// header. The route accepts any method so non-POST calls get the 405 body.
///
/// # Routes
/// - `/webhooks/kirvano` - Kirvano checkout events
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/webhooks/kirvano", any(handle_kirvano_webhook))
}
