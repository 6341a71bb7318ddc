//! Request/response DTOs for the auth and analytics endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthSession, AuthenticatedUser, Registration, Timestamp};
use crate::domain::subscription::{
    PaymentStatus, Subscription, SubscriptionPlan, SubscriptionStatus,
};
use crate::application::handlers::{GetCurrentSubscriptionResult, SignInResult};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/auth/signup` and `POST /api/auth/signin`.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/analytics/events`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogActionRequest {
    pub action: String,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
}

impl From<AuthenticatedUser> for UserResponse {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub email: String,
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub payment_status: PaymentStatus,
    pub payment_amount: Decimal,
    pub payment_date: Timestamp,
    pub expires_at: Timestamp,
    pub days_remaining: i64,
    pub linked: bool,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        let days_remaining = subscription.days_remaining_at(Timestamp::now());
        Self {
            id: subscription.id.to_string(),
            linked: subscription.is_linked(),
            email: subscription.email.to_string(),
            plan: subscription.plan,
            status: subscription.status,
            payment_status: subscription.payment_status,
            payment_amount: subscription.payment_amount,
            payment_date: subscription.payment_date,
            expires_at: subscription.expires_at,
            days_remaining,
        }
    }
}

/// `POST /api/auth/signup` response.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpResponse {
    pub user: UserResponse,
    /// Absent when the provider requires e-mail confirmation.
    pub session: Option<SessionResponse>,
}

impl From<Registration> for SignUpResponse {
    fn from(registration: Registration) -> Self {
        Self {
            user: registration.user.into(),
            session: registration.session.map(SessionResponse::from),
        }
    }
}

/// `POST /api/auth/signin` response.
#[derive(Debug, Clone, Serialize)]
pub struct SignInResponse {
    pub user: UserResponse,
    pub session: SessionResponse,
    pub subscription: Option<SubscriptionResponse>,
    pub linked: bool,
}

impl From<SignInResult> for SignInResponse {
    fn from(result: SignInResult) -> Self {
        Self {
            user: result.session.user.clone().into(),
            session: result.session.into(),
            subscription: result.subscription.map(SubscriptionResponse::from),
            linked: result.linked,
        }
    }
}

/// `GET /api/auth/subscription` response.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentSubscriptionResponse {
    pub subscription: Option<SubscriptionResponse>,
    pub has_access: bool,
}

impl From<GetCurrentSubscriptionResult> for CurrentSubscriptionResponse {
    fn from(result: GetCurrentSubscriptionResult) -> Self {
        Self {
            subscription: result.subscription.map(SubscriptionResponse::from),
            has_access: result.has_access,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Email, UserId};
    use crate::domain::subscription::PaymentActivation;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user-1").unwrap(), Email::parse("a@b.com").unwrap())
    }

    #[test]
    fn sign_up_response_without_session_serializes_null() {
        let response = SignUpResponse::from(Registration {
            user: user(),
            session: None,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["user"]["email"], "a@b.com");
        assert!(json["session"].is_null());
    }

    #[test]
    fn subscription_response_uses_wire_names() {
        let subscription = Subscription::from_activation(&PaymentActivation::new(
            Email::parse("a@b.com").unwrap(),
            None,
            Some("tx-1".to_string()),
            Timestamp::now(),
        ));

        let json = serde_json::to_value(SubscriptionResponse::from(subscription)).unwrap();
        assert_eq!(json["plan"], "premium");
        assert_eq!(json["status"], "active");
        assert_eq!(json["payment_status"], "completed");
        assert_eq!(json["payment_amount"], "29.90");
        assert_eq!(json["linked"], false);
    }

    #[test]
    fn log_action_request_defaults_optional_fields() {
        let request: LogActionRequest =
            serde_json::from_str(r#"{"action": "content_viewed"}"#).unwrap();
        assert!(request.page.is_none());
        assert!(request.metadata.is_none());
    }
}
