//! Application router: shared state, route tree and tower-http layers.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use http::{header, HeaderValue, Method};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::handlers::GetDashboardOverviewHandler;
use crate::application::{AuthGateway, HandlePaymentWebhookHandler};
use crate::config::ServerConfig;

use super::auth::auth_routes;
use super::dashboard::dashboard_routes;
use super::webhook::webhook_routes;

/// Shared application state.
///
/// Cloned for each request; dependencies are Arc-wrapped. The gateway is
/// absent when the identity provider or store is not configured, and its
/// routes then answer with a configuration error.
#[derive(Clone)]
pub struct AppState {
    pub auth_gateway: Option<Arc<AuthGateway>>,
    pub webhook_handler: Arc<HandlePaymentWebhookHandler>,
    pub dashboard_handler: GetDashboardOverviewHandler,
}

/// Builds the complete router.
///
/// # Routes
/// - `GET /health`
/// - `/api/webhooks/kirvano` (own CORS headers, not covered by the CORS layer)
/// - `/api/auth/*`, `/api/analytics/events`, `/api/dashboard`
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    let mut api = Router::new().merge(auth_routes()).merge(dashboard_routes());
    if let Some(cors) = cors_layer(&server.cors_origins_list()) {
        api = api.layer(cors);
    }

    Router::new()
        .route("/health", get(health))
        .nest("/api", api.merge(webhook_routes()))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// GET /health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// CORS for the browser-facing API. `None` when no origin is configured.
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
    )
}
