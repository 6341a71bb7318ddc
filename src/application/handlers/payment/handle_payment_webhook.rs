//! HandlePaymentWebhookHandler - Command handler for Kirvano checkout webhooks.
//!
//! Checks run in a fixed order and the store is only reached once the shared
//! secret matched and the event is paid:
//!
//! 1. shared secret configured, then constant-time token comparison
//! 2. JSON body
//! 3. `payment_status == "paid"`, otherwise acknowledged without writing
//! 4. store configured, buyer e-mail and amount valid
//! 5. one atomic upsert keyed by e-mail

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::domain::foundation::{Email, Timestamp};
use crate::domain::subscription::{
    KirvanoEvent, PaymentActivation, SubscriptionError, SubscriptionPlan, UpsertOutcome,
};
use crate::ports::SubscriptionStore;

pub const TOKEN_NOT_CONFIGURED: &str = "Token não configurado no servidor";
pub const INVALID_TOKEN: &str = "Token inválido";
pub const INVALID_JSON: &str = "JSON inválido";
pub const STORE_NOT_CONFIGURED: &str = "Supabase não configurado";
pub const INVALID_EMAIL: &str = "Email inválido";
pub const INVALID_AMOUNT: &str = "Valor inválido";
pub const STORE_WRITE_FAILED: &str = "Erro ao salvar assinatura";

/// Command carrying one webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Value of the `token` header, if sent.
    pub token: Option<String>,
    /// Raw request body.
    pub payload: Vec<u8>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlePaymentWebhookResult {
    /// Event acknowledged, payment not approved yet. Nothing was written.
    PaymentPending { payment_status: Option<String> },
    /// Subscription created or renewed.
    SubscriptionActivated {
        email: Email,
        /// Plan derived from this event's amount, even when the stored row
        /// kept an earlier plan.
        plan: SubscriptionPlan,
        outcome: UpsertOutcome,
    },
}

/// Handler for Kirvano payment webhooks.
///
/// Both the secret and the store are optional so a half-configured deployment
/// still answers with a configuration error instead of refusing to start.
pub struct HandlePaymentWebhookHandler {
    secret: Option<SecretString>,
    store: Option<Arc<dyn SubscriptionStore>>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(secret: Option<SecretString>, store: Option<Arc<dyn SubscriptionStore>>) -> Self {
        Self { secret, store }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, SubscriptionError> {
        // 1. Authenticate the caller
        self.verify_token(cmd.token.as_deref())?;

        // 2. Parse body
        let event = KirvanoEvent::from_slice(&cmd.payload).map_err(|e| {
            tracing::warn!("Webhook body is not a JSON object: {}", e);
            SubscriptionError::validation("body", INVALID_JSON)
        })?;

        // 3. Only approved payments change anything
        if !event.is_paid() {
            let payment_status = event.payment_status();
            tracing::info!(
                payment_status = ?payment_status,
                "Payment not approved yet, acknowledging"
            );
            return Ok(HandlePaymentWebhookResult::PaymentPending { payment_status });
        }

        let store = self.store.as_ref().ok_or_else(|| {
            tracing::error!("Subscription store not configured");
            SubscriptionError::configuration(STORE_NOT_CONFIGURED)
        })?;

        // 4. Validate what the activation needs
        let email = event
            .email()
            .map_err(|e| {
                tracing::warn!("Paid event without a usable e-mail: {}", e);
                SubscriptionError::validation("email", INVALID_EMAIL)
            })?;
        let amount = event.amount().map_err(|e| {
            tracing::warn!("Paid event with unusable amount: {}", e);
            SubscriptionError::validation("amount", INVALID_AMOUNT)
        })?;

        let activation =
            PaymentActivation::new(email, amount, event.transaction_id(), Timestamp::now());
        tracing::info!(
            email = %activation.email,
            plan = %activation.plan.as_str(),
            "Payment approved"
        );

        // 5. Insert or renew
        let outcome = store.upsert_payment(&activation).await.map_err(|e| {
            tracing::error!(email = %activation.email, "Failed to save subscription: {}", e);
            SubscriptionError::store(STORE_WRITE_FAILED)
        })?;

        tracing::info!(
            email = %activation.email,
            outcome = ?outcome,
            "Subscription activated"
        );

        Ok(HandlePaymentWebhookResult::SubscriptionActivated {
            email: activation.email,
            plan: activation.plan,
            outcome,
        })
    }

    fn verify_token(&self, received: Option<&str>) -> Result<(), SubscriptionError> {
        let expected = self.secret.as_ref().ok_or_else(|| {
            tracing::error!("Webhook token not configured");
            SubscriptionError::configuration(TOKEN_NOT_CONFIGURED)
        })?;

        let matches = received
            .map(|token| {
                bool::from(
                    token
                        .as_bytes()
                        .ct_eq(expected.expose_secret().as_bytes()),
                )
            })
            .unwrap_or(false);

        if !matches {
            tracing::warn!(token_present = received.is_some(), "Webhook token rejected");
            return Err(SubscriptionError::authorization(INVALID_TOKEN));
        }
        Ok(())
    }
}
