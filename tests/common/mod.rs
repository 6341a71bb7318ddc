//! Shared fixtures for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use secrecy::SecretString;
use tower::ServiceExt;

use member_portal::adapters::auth::MockIdentityProvider;
use member_portal::adapters::http::{app_router, AppState};
use member_portal::adapters::memory::{InMemoryAnalyticsSink, InMemorySubscriptionStore};
use member_portal::application::handlers::GetDashboardOverviewHandler;
use member_portal::application::{AuthGateway, HandlePaymentWebhookHandler};
use member_portal::config::ServerConfig;

pub const WEBHOOK_TOKEN: &str = "kirvano-test-token";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemorySubscriptionStore>,
    pub analytics: Arc<InMemoryAnalyticsSink>,
}

/// Fully configured app over in-memory adapters.
pub fn test_app(provider: MockIdentityProvider) -> TestApp {
    let store = Arc::new(InMemorySubscriptionStore::new());
    let analytics = Arc::new(InMemoryAnalyticsSink::new());

    let state = AppState {
        auth_gateway: Some(Arc::new(AuthGateway::new(
            Arc::new(provider),
            store.clone(),
            analytics.clone(),
        ))),
        webhook_handler: Arc::new(HandlePaymentWebhookHandler::new(
            Some(SecretString::new(WEBHOOK_TOKEN.to_string())),
            Some(store.clone()),
        )),
        dashboard_handler: GetDashboardOverviewHandler::new(),
    };

    TestApp {
        router: app_router(state, &ServerConfig::default()),
        store,
        analytics,
    }
}

/// App with nothing configured.
pub fn unconfigured_app() -> Router {
    let state = AppState {
        auth_gateway: None,
        webhook_handler: Arc::new(HandlePaymentWebhookHandler::new(None, None)),
        dashboard_handler: GetDashboardOverviewHandler::new(),
    };
    app_router(state, &ServerConfig::default())
}

pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn webhook_request(token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/webhooks/kirvano")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("token", token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}

/// Waits for detached analytics writes.
pub async fn wait_for_events(sink: &InMemoryAnalyticsSink, count: usize) {
    for _ in 0..200 {
        if sink.event_count() >= count {
            return;
        }
        tokio::task::yield_now().await;
    }
}
