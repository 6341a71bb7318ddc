//! Subscription row and the activation written by a paid webhook event.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::foundation::{Email, SubscriptionId, Timestamp, UserId};

use super::{PaymentStatus, SubscriptionPlan, SubscriptionStatus};

/// Length of the access window bought by one payment.
pub const SUBSCRIPTION_PERIOD_DAYS: i64 = 30;

/// Amount recorded when the processor does not report one (R$ 29,90).
pub const DEFAULT_PAYMENT_AMOUNT: Decimal = Decimal::from_parts(2990, 0, 0, false, 2);

/// Prefix of payment ids generated for events without a transaction id.
pub const GENERATED_PAYMENT_ID_PREFIX: &str = "kirvano_";

/// One row of `user_subscriptions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    /// Unset until the buyer signs in with the same e-mail.
    pub user_id: Option<UserId>,
    pub email: Email,
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub payment_id: String,
    pub payment_status: PaymentStatus,
    pub payment_amount: Decimal,
    pub payment_date: Timestamp,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Builds the row a first payment inserts.
    pub fn from_activation(activation: &PaymentActivation) -> Self {
        Self {
            id: SubscriptionId::new(),
            user_id: None,
            email: activation.email.clone(),
            plan: activation.plan,
            status: SubscriptionStatus::Active,
            payment_id: activation.payment_id.clone(),
            payment_status: PaymentStatus::Completed,
            payment_amount: activation.payment_amount,
            payment_date: activation.paid_at,
            expires_at: activation.expires_at,
            created_at: activation.paid_at,
            updated_at: activation.paid_at,
        }
    }

    /// Refreshes the row for a repeat payment.
    ///
    /// Plan, amount and payment id keep the values of the first payment.
    pub fn renew(&mut self, activation: &PaymentActivation) {
        self.status = SubscriptionStatus::Active;
        self.payment_status = PaymentStatus::Completed;
        self.payment_date = activation.paid_at;
        self.expires_at = activation.expires_at;
        self.updated_at = activation.paid_at;
    }

    /// True once `expires_at` has passed. Advisory only: nothing sweeps rows.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        !now.is_before(&self.expires_at)
    }

    /// Whether this row should unlock subscriber content at `now`.
    pub fn grants_access_at(&self, now: Timestamp) -> bool {
        self.status.has_access() && !self.is_expired_at(now)
    }

    /// Whole days left before expiry, zero once expired.
    pub fn days_remaining_at(&self, now: Timestamp) -> i64 {
        self.expires_at.duration_since(&now).num_days().max(0)
    }

    pub fn is_linked(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Values a paid event writes to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentActivation {
    pub email: Email,
    pub plan: SubscriptionPlan,
    pub payment_id: String,
    /// Used only when a new row is inserted.
    pub payment_amount: Decimal,
    pub paid_at: Timestamp,
    pub expires_at: Timestamp,
}

impl PaymentActivation {
    /// Derives plan, payment id, amount and expiry for a paid event.
    pub fn new(
        email: Email,
        amount: Option<Decimal>,
        transaction_id: Option<String>,
        paid_at: Timestamp,
    ) -> Self {
        let payment_id = transaction_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| generated_payment_id(paid_at));

        Self {
            email,
            plan: SubscriptionPlan::resolve(amount),
            payment_id,
            payment_amount: amount.unwrap_or(DEFAULT_PAYMENT_AMOUNT),
            paid_at,
            expires_at: paid_at.add_days(SUBSCRIPTION_PERIOD_DAYS),
        }
    }
}

/// `kirvano_<unix millis>` id for events without a transaction id.
pub fn generated_payment_id(at: Timestamp) -> String {
    format!("{}{}", GENERATED_PAYMENT_ID_PREFIX, at.unix_millis())
}

/// Which branch of the upsert ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}
