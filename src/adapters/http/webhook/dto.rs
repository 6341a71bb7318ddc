//! Webhook response bodies.
//!
//! Kirvano shows these bodies in its delivery log, so the text stays in
//! Portuguese to match the dashboard the merchant reads.

use serde::Serialize;

use crate::domain::subscription::SubscriptionPlan;

pub const METHOD_NOT_ALLOWED: &str = "Método não permitido";
pub const PAYMENT_PENDING: &str = "Pagamento não aprovado ainda";
pub const ACCESS_GRANTED: &str = "Acesso liberado com sucesso";

/// `{error, details?}`
#[derive(Debug, Clone, Serialize)]
pub struct WebhookErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl WebhookErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// `{message}` for events acknowledged without a write.
#[derive(Debug, Clone, Serialize)]
pub struct PendingBody {
    pub message: &'static str,
}

/// Body returned once access was granted.
#[derive(Debug, Clone, Serialize)]
pub struct ActivatedBody {
    pub success: bool,
    pub message: &'static str,
    pub email: String,
    pub plan: SubscriptionPlan,
}
