//! HTTP handler for `/api/webhooks/kirvano`.
//!
//! Every response, including errors and the preflight, carries the same
//! permissive CORS headers so the processor's test console can call it.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::router::AppState;
use crate::application::{HandlePaymentWebhookCommand, HandlePaymentWebhookResult};
use crate::domain::subscription::SubscriptionError;

use super::dto::{
    ActivatedBody, PendingBody, WebhookErrorBody, ACCESS_GRANTED, METHOD_NOT_ALLOWED,
    PAYMENT_PENDING,
};

/// Header carrying the shared secret. Lookup is case-insensitive.
pub const TOKEN_HEADER: &str = "token";

const ALLOW_ORIGIN: &str = "*";
const ALLOW_HEADERS: &str = "Content-Type, token";
const ALLOW_METHODS: &str = "POST, OPTIONS";

/// ANY /api/webhooks/kirvano - Kirvano checkout webhook
pub async fn handle_kirvano_webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    tracing::info!(method = %method, "Webhook received");

    let response = match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::POST => {
            let cmd = HandlePaymentWebhookCommand {
                token: headers
                    .get(TOKEN_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string),
                payload: body.to_vec(),
            };
            match state.webhook_handler.handle(cmd).await {
                Ok(result) => success_response(result),
                Err(err) => WebhookError(err).into_response(),
            }
        }
        _ => (
            StatusCode::METHOD_NOT_ALLOWED,
            Json(WebhookErrorBody::new(METHOD_NOT_ALLOWED)),
        )
            .into_response(),
    };

    with_cors_headers(response)
}

fn success_response(result: HandlePaymentWebhookResult) -> Response {
    match result {
        HandlePaymentWebhookResult::PaymentPending { .. } => (
            StatusCode::OK,
            Json(PendingBody {
                message: PAYMENT_PENDING,
            }),
        )
            .into_response(),
        HandlePaymentWebhookResult::SubscriptionActivated { email, plan, .. } => (
            StatusCode::OK,
            Json(ActivatedBody {
                success: true,
                message: ACCESS_GRANTED,
                email: email.to_string(),
                plan,
            }),
        )
            .into_response(),
    }
}

fn with_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    response
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Renders handler errors as `{error, details?}`.
pub struct WebhookError(pub SubscriptionError);

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let body = match &self.0 {
            SubscriptionError::Validation { field, message } if field != "body" => {
                WebhookErrorBody::with_details(message.clone(), field.clone())
            }
            other => WebhookErrorBody::new(other.message()),
        };
        (self.0.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn cors_headers_are_added() {
        let response = with_cors_headers(StatusCode::OK.into_response());
        let headers = response.headers();

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type, token");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
    }

    #[tokio::test]
    async fn validation_error_carries_field_as_details() {
        let response =
            WebhookError(SubscriptionError::validation("email", "Email inválido")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Email inválido");
        assert_eq!(body["details"], "email");
    }

    #[tokio::test]
    async fn authorization_error_is_forbidden_without_details() {
        let response =
            WebhookError(SubscriptionError::authorization("Token inválido")).into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Token inválido" }));
    }
}
