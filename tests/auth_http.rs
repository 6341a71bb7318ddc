//! Integration tests for the auth and analytics endpoints.
//!
//! Covers the pay-first flow: the webhook writes a subscription for an
//! e-mail, the buyer signs up and signs in, and sign-in links the row.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use common::{
    assert_status, body_json, json_request, send, test_app, unconfigured_app, wait_for_events,
    webhook_request, WEBHOOK_TOKEN,
};
use member_portal::adapters::auth::MockIdentityProvider;

fn credentials(email: &str, password: &str) -> serde_json::Value {
    json!({ "email": email, "password": password })
}

fn bearer(method: &str, uri: &str, token: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json");
    match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

// =============================================================================
// Sign-up
// =============================================================================

#[tokio::test]
async fn sign_up_returns_created_and_logs_registration() {
    let app = test_app(MockIdentityProvider::new());

    let response = send(
        &app.router,
        json_request("POST", "/api/auth/signup", credentials("new@b.com", "secret123")),
    )
    .await;

    assert_status(&response, StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["user"]["email"], "new@b.com");
    assert!(body["session"]["access_token"].is_string());

    wait_for_events(&app.analytics, 1).await;
    assert!(app.analytics.has_action("user_registered"));
}

#[tokio::test]
async fn duplicate_sign_up_is_bad_request() {
    let app = test_app(MockIdentityProvider::new().with_account("u1", "dup@b.com", "secret123"));

    let response = send(
        &app.router,
        json_request("POST", "/api/auth/signup", credentials("dup@b.com", "secret123")),
    )
    .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn malformed_email_is_validation_error() {
    let app = test_app(MockIdentityProvider::new());

    let response = send(
        &app.router,
        json_request("POST", "/api/auth/signup", credentials("not-an-email", "secret123")),
    )
    .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Sign-in and linking
// =============================================================================

#[tokio::test]
async fn pay_then_sign_in_links_subscription() {
    let app = test_app(MockIdentityProvider::new());
    let paid = json!({
        "email": "buyer@b.com",
        "payment_status": "paid",
        "amount": "29.90",
    })
    .to_string();
    let response = send(&app.router, webhook_request(Some(WEBHOOK_TOKEN), &paid)).await;
    assert_status(&response, StatusCode::OK);

    send(
        &app.router,
        json_request("POST", "/api/auth/signup", credentials("buyer@b.com", "secret123")),
    )
    .await;
    let response = send(
        &app.router,
        json_request("POST", "/api/auth/signin", credentials("buyer@b.com", "secret123")),
    )
    .await;

    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["linked"], true);
    assert_eq!(body["subscription"]["plan"], "premium");
    assert_eq!(body["subscription"]["linked"], true);
    let user_id = body["user"]["id"].as_str().unwrap().to_string();
    assert_eq!(
        app.store.rows()[0].user_id.as_ref().map(|id| id.to_string()),
        Some(user_id)
    );

    // Access check with the issued token
    let token = body["session"]["access_token"].as_str().unwrap();
    let response = send(
        &app.router,
        bearer("GET", "/api/auth/subscription", token, None),
    )
    .await;
    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["has_access"], true);

    wait_for_events(&app.analytics, 2).await;
    assert!(app.analytics.has_action("user_login"));
}

#[tokio::test]
async fn sign_in_without_subscription_succeeds() {
    let app = test_app(MockIdentityProvider::new().with_account("u1", "free@b.com", "secret123"));

    let response = send(
        &app.router,
        json_request("POST", "/api/auth/signin", credentials("free@b.com", "secret123")),
    )
    .await;

    assert_status(&response, StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["subscription"].is_null());
    assert_eq!(body["linked"], false);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = test_app(MockIdentityProvider::new().with_account("u1", "a@b.com", "secret123"));

    let response = send(
        &app.router,
        json_request("POST", "/api/auth/signin", credentials("a@b.com", "wrong")),
    )
    .await;

    assert_status(&response, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.call_count(), 0);
}

// =============================================================================
// Bearer endpoints
// =============================================================================

#[tokio::test]
async fn sign_out_revokes_token() {
    let app = test_app(MockIdentityProvider::new().with_account("u1", "a@b.com", "secret123"));
    let response = send(
        &app.router,
        json_request("POST", "/api/auth/signin", credentials("a@b.com", "secret123")),
    )
    .await;
    let token = body_json(response).await["session"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(&app.router, bearer("POST", "/api/auth/signout", &token, None)).await;
    assert_status(&response, StatusCode::NO_CONTENT);

    let response = send(
        &app.router,
        bearer("GET", "/api/auth/subscription", &token, None),
    )
    .await;
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_bearer_is_unauthorized() {
    let app = test_app(MockIdentityProvider::new());

    let response = send(
        &app.router,
        Request::builder()
            .uri("/api/auth/subscription")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_status(&response, StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn analytics_event_is_accepted_and_recorded() {
    let app = test_app(MockIdentityProvider::new().with_account("u1", "a@b.com", "secret123"));
    let response = send(
        &app.router,
        json_request("POST", "/api/auth/signin", credentials("a@b.com", "secret123")),
    )
    .await;
    let token = body_json(response).await["session"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(
        &app.router,
        bearer(
            "POST",
            "/api/analytics/events",
            &token,
            Some(json!({ "action": "content_viewed", "page": "/dashboard" })),
        ),
    )
    .await;

    assert_status(&response, StatusCode::ACCEPTED);
    wait_for_events(&app.analytics, 2).await;
    assert!(app.analytics.has_action("content_viewed"));
}

#[tokio::test]
async fn invalid_action_name_is_rejected() {
    let app = test_app(MockIdentityProvider::new().with_account("u1", "a@b.com", "secret123"));
    let response = send(
        &app.router,
        json_request("POST", "/api/auth/signin", credentials("a@b.com", "secret123")),
    )
    .await;
    let token = body_json(response).await["session"]["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = send(
        &app.router,
        bearer(
            "POST",
            "/api/analytics/events",
            &token,
            Some(json!({ "action": "Not An Action!" })),
        ),
    )
    .await;

    assert_status(&response, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Configuration
// =============================================================================

#[tokio::test]
async fn unconfigured_gateway_is_configuration_error() {
    let app = unconfigured_app();

    let response = send(
        &app,
        json_request("POST", "/api/auth/signin", credentials("a@b.com", "secret123")),
    )
    .await;

    assert_status(&response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "CONFIGURATION_ERROR");
}
