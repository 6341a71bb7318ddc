//! In-memory subscription store for tests and local runs.
//!
//! # Security Note
//!
//! This adapter is for **testing only**. It uses `.expect()` on lock
//! operations which will panic if locks are poisoned.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, Email, UserId};
use crate::domain::subscription::{PaymentActivation, Subscription, UpsertOutcome};
use crate::ports::SubscriptionStore;

/// Subscription rows held in a `Vec`, unique by e-mail.
///
/// The write lock is held across the whole upsert, which gives the same
/// one-row-per-email guarantee as the database's `ON CONFLICT` clause.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemorySubscriptionStore::new());
/// handler.handle(cmd).await?;
/// assert_eq!(store.row_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemorySubscriptionStore {
    rows: RwLock<Vec<Subscription>>,
    failure: RwLock<Option<DomainError>>,
    calls: RwLock<usize>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing rows.
    pub fn with_rows(rows: Vec<Subscription>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Self::default()
        }
    }

    /// Makes every subsequent call fail with `error`.
    pub fn fail_with(&self, error: DomainError) {
        *self
            .failure
            .write()
            .expect("InMemorySubscriptionStore: failure lock poisoned") = Some(error);
    }

    // === Test Helpers ===

    /// Snapshot of all rows.
    pub fn rows(&self) -> Vec<Subscription> {
        self.rows
            .read()
            .expect("InMemorySubscriptionStore: rows lock poisoned")
            .clone()
    }

    pub fn row_count(&self) -> usize {
        self.rows
            .read()
            .expect("InMemorySubscriptionStore: rows lock poisoned")
            .len()
    }

    /// Number of port calls made, including failed ones.
    pub fn call_count(&self) -> usize {
        *self
            .calls
            .read()
            .expect("InMemorySubscriptionStore: calls lock poisoned")
    }

    fn enter(&self) -> Result<(), DomainError> {
        *self
            .calls
            .write()
            .expect("InMemorySubscriptionStore: calls lock poisoned") += 1;
        match self
            .failure
            .read()
            .expect("InMemorySubscriptionStore: failure lock poisoned")
            .as_ref()
        {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn find(&self, predicate: impl Fn(&Subscription) -> bool) -> Option<Subscription> {
        self.rows
            .read()
            .expect("InMemorySubscriptionStore: rows lock poisoned")
            .iter()
            .filter(|row| predicate(row))
            .max_by_key(|row| row.payment_date)
            .cloned()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn find_active_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, DomainError> {
        self.enter()?;
        Ok(self.find(|row| row.user_id.as_ref() == Some(user_id) && row.status.has_access()))
    }

    async fn find_active_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Subscription>, DomainError> {
        self.enter()?;
        Ok(self.find(|row| &row.email == email && row.status.has_access()))
    }

    async fn link_user(&self, email: &Email, user_id: &UserId) -> Result<u64, DomainError> {
        self.enter()?;
        let mut rows = self
            .rows
            .write()
            .expect("InMemorySubscriptionStore: rows lock poisoned");
        let mut changed = 0;
        for row in rows
            .iter_mut()
            .filter(|row| &row.email == email && row.user_id.is_none())
        {
            row.user_id = Some(user_id.clone());
            changed += 1;
        }
        Ok(changed)
    }

    async fn upsert_payment(
        &self,
        activation: &PaymentActivation,
    ) -> Result<UpsertOutcome, DomainError> {
        self.enter()?;
        let mut rows = self
            .rows
            .write()
            .expect("InMemorySubscriptionStore: rows lock poisoned");
        match rows.iter_mut().find(|row| row.email == activation.email) {
            Some(existing) => {
                existing.renew(activation);
                Ok(UpsertOutcome::Updated)
            }
            None => {
                rows.push(Subscription::from_activation(activation));
                Ok(UpsertOutcome::Inserted)
            }
        }
    }
}
