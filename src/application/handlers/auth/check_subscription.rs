//! CheckSubscriptionHandler - Query handler for a user's active subscription.
//!
//! Store errors other than "no rows" are logged and reported as no subscription.

use std::sync::Arc;

use crate::domain::foundation::{Email, UserId};
use crate::domain::subscription::Subscription;
use crate::ports::SubscriptionStore;

/// Which key to look the subscription up by.
#[derive(Debug, Clone)]
pub enum CheckSubscriptionQuery {
    ByUserId(UserId),
    ByEmail(Email),
}

/// Handler for active-subscription lookups.
#[derive(Clone)]
pub struct CheckSubscriptionHandler {
    store: Arc<dyn SubscriptionStore>,
}

impl CheckSubscriptionHandler {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    /// Returns the active subscription, or `None` when there is none or the
    /// store failed.
    pub async fn handle(&self, query: CheckSubscriptionQuery) -> Option<Subscription> {
        let result = match &query {
            CheckSubscriptionQuery::ByUserId(user_id) => {
                self.store.find_active_by_user_id(user_id).await
            }
            CheckSubscriptionQuery::ByEmail(email) => self.store.find_active_by_email(email).await,
        };

        match result {
            Ok(subscription) => subscription,
            Err(e) => {
                tracing::warn!(query = ?query, "Subscription lookup failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySubscriptionStore;
    use crate::domain::foundation::{DomainError, Timestamp};
    use crate::domain::subscription::PaymentActivation;

    fn email() -> Email {
        Email::parse("a@b.com").unwrap()
    }

    fn seeded() -> Arc<InMemorySubscriptionStore> {
        let mut row = Subscription::from_activation(&PaymentActivation::new(
            email(),
            None,
            None,
            Timestamp::now(),
        ));
        row.user_id = Some(UserId::new("user-1").unwrap());
        Arc::new(InMemorySubscriptionStore::with_rows(vec![row]))
    }

    #[tokio::test]
    async fn finds_by_user_id_and_email() {
        let handler = CheckSubscriptionHandler::new(seeded());

        assert!(handler
            .handle(CheckSubscriptionQuery::ByUserId(UserId::new("user-1").unwrap()))
            .await
            .is_some());
        assert!(handler
            .handle(CheckSubscriptionQuery::ByEmail(email()))
            .await
            .is_some());
    }

    #[tokio::test]
    async fn no_match_is_none() {
        let handler = CheckSubscriptionHandler::new(seeded());

        let result = handler
            .handle(CheckSubscriptionQuery::ByUserId(UserId::new("user-2").unwrap()))
            .await;

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn store_failure_is_none() {
        let store = seeded();
        store.fail_with(DomainError::database("connection reset"));
        let handler = CheckSubscriptionHandler::new(store.clone());

        let result = handler.handle(CheckSubscriptionQuery::ByEmail(email())).await;

        assert!(result.is_none());
        assert_eq!(store.call_count(), 1);
    }
}
