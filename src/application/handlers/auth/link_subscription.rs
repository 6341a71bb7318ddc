//! LinkSubscriptionHandler - Attach a webhook-created subscription to an account.

use std::sync::Arc;

use crate::domain::foundation::{Email, UserId};
use crate::ports::SubscriptionStore;

/// Command to link the unlinked subscription for `email` to `user_id`.
#[derive(Debug, Clone)]
pub struct LinkSubscriptionCommand {
    pub user_id: UserId,
    pub email: Email,
}

#[derive(Clone)]
pub struct LinkSubscriptionHandler {
    store: Arc<dyn SubscriptionStore>,
}

impl LinkSubscriptionHandler {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    /// Returns `true` when the update ran, even if no row needed linking.
    /// Never errors; failures are logged and reported as `false`.
    pub async fn handle(&self, cmd: LinkSubscriptionCommand) -> bool {
        match self.store.link_user(&cmd.email, &cmd.user_id).await {
            Ok(rows) => {
                if rows > 0 {
                    tracing::info!(
                        user_id = %cmd.user_id,
                        "Linked {} subscription(s) for {}",
                        rows,
                        cmd.email
                    );
                }
                true
            }
            Err(e) => {
                tracing::warn!(user_id = %cmd.user_id, "Failed to link subscription: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySubscriptionStore;
    use crate::domain::foundation::{DomainError, Timestamp};
    use crate::domain::subscription::{PaymentActivation, Subscription};

    fn cmd() -> LinkSubscriptionCommand {
        LinkSubscriptionCommand {
            user_id: UserId::new("user-1").unwrap(),
            email: Email::parse("a@b.com").unwrap(),
        }
    }

    #[tokio::test]
    async fn links_unlinked_row() {
        let row = Subscription::from_activation(&PaymentActivation::new(
            Email::parse("a@b.com").unwrap(),
            None,
            None,
            Timestamp::now(),
        ));
        let store = Arc::new(InMemorySubscriptionStore::with_rows(vec![row]));
        let handler = LinkSubscriptionHandler::new(store.clone());

        assert!(handler.handle(cmd()).await);
        assert_eq!(store.rows()[0].user_id, Some(UserId::new("user-1").unwrap()));
    }

    #[tokio::test]
    async fn nothing_to_link_is_still_success() {
        let handler = LinkSubscriptionHandler::new(Arc::new(InMemorySubscriptionStore::new()));
        assert!(handler.handle(cmd()).await);
    }

    #[tokio::test]
    async fn store_failure_is_false() {
        let store = Arc::new(InMemorySubscriptionStore::new());
        store.fail_with(DomainError::database("down"));
        let handler = LinkSubscriptionHandler::new(store);

        assert!(!handler.handle(cmd()).await);
    }
}
