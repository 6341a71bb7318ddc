//! Subscription store port.
//!
//! Defines the contract for reading and writing `user_subscriptions` rows.
//!
//! # Design
//!
//! - **"No rows" is not an error**: lookups return `Ok(None)`
//! - **One row per e-mail**: `upsert_payment` must insert-or-update atomically
//!   so concurrent deliveries for one buyer neither duplicate nor lose writes
//!
//! # Example
//!
//! ```ignore
//! async fn activate(store: &dyn SubscriptionStore, email: Email) -> Result<(), DomainError> {
//!     let activation = PaymentActivation::new(email, None, None, Timestamp::now());
//!     match store.upsert_payment(&activation).await? {
//!         UpsertOutcome::Inserted => tracing::info!("new subscriber"),
//!         UpsertOutcome::Updated => tracing::info!("renewed"),
//!     }
//!     Ok(())
//! }
//! ```

use crate::domain::foundation::{DomainError, Email, UserId};
use crate::domain::subscription::{PaymentActivation, Subscription, UpsertOutcome};
use async_trait::async_trait;

#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Active subscription already linked to `user_id`.
    async fn find_active_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, DomainError>;

    /// Active subscription for `email`, linked or not.
    async fn find_active_by_email(&self, email: &Email)
        -> Result<Option<Subscription>, DomainError>;

    /// Sets `user_id` on rows for `email` that have no user yet.
    ///
    /// Returns the number of rows changed; zero is not an error.
    async fn link_user(&self, email: &Email, user_id: &UserId) -> Result<u64, DomainError>;

    /// Inserts a subscription for the activation's e-mail, or renews the
    /// existing one.
    ///
    /// On update only the payment status, subscription status, payment date,
    /// expiry and `updated_at` change. Plan, amount and payment id keep the
    /// values written by the first payment.
    async fn upsert_payment(
        &self,
        activation: &PaymentActivation,
    ) -> Result<UpsertOutcome, DomainError>;
}
