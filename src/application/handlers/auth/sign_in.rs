//! SignInHandler - Command handler for password sign-in.
//!
//! After the provider accepts the credentials the handler reconciles the
//! account with any subscription the payment webhook created for its e-mail:
//!
//! 1. active subscription by user id
//! 2. otherwise active subscription by e-mail
//! 3. if found by e-mail only, link it to the user id
//! 4. dispatch `user_login` whatever the subscription state

use std::sync::Arc;

use crate::domain::analytics::AnalyticsEvent;
use crate::domain::foundation::{AuthSession, Email};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::IdentityProvider;

use super::{
    CheckSubscriptionHandler, CheckSubscriptionQuery, LinkSubscriptionCommand,
    LinkSubscriptionHandler, UserActionLogger,
};

/// Command to sign in with e-mail and password.
#[derive(Debug, Clone)]
pub struct SignInCommand {
    pub email: Email,
    pub password: String,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignInResult {
    pub session: AuthSession,
    /// Active subscription, if any.
    pub subscription: Option<Subscription>,
    /// Whether a webhook-created subscription was attached during this sign-in.
    pub linked: bool,
}

pub struct SignInHandler {
    provider: Arc<dyn IdentityProvider>,
    check_subscription: CheckSubscriptionHandler,
    link_subscription: LinkSubscriptionHandler,
    logger: UserActionLogger,
}

impl SignInHandler {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        check_subscription: CheckSubscriptionHandler,
        link_subscription: LinkSubscriptionHandler,
        logger: UserActionLogger,
    ) -> Self {
        Self {
            provider,
            check_subscription,
            link_subscription,
            logger,
        }
    }

    pub async fn handle(&self, cmd: SignInCommand) -> Result<SignInResult, SubscriptionError> {
        if cmd.password.is_empty() {
            return Err(SubscriptionError::validation("password", "Password is required"));
        }

        let session = self
            .provider
            .sign_in_with_password(&cmd.email, &cmd.password)
            .await?;
        let user = session.user.clone();

        let mut linked = false;
        let mut subscription = self
            .check_subscription
            .handle(CheckSubscriptionQuery::ByUserId(user.id.clone()))
            .await;

        if subscription.is_none() {
            subscription = self
                .check_subscription
                .handle(CheckSubscriptionQuery::ByEmail(user.email.clone()))
                .await;

            if let Some(found) = subscription.as_mut() {
                if found.user_id.is_none() {
                    linked = self
                        .link_subscription
                        .handle(LinkSubscriptionCommand {
                            user_id: user.id.clone(),
                            email: user.email.clone(),
                        })
                        .await;
                    if linked {
                        found.user_id = Some(user.id.clone());
                    }
                }
            }
        }

        tracing::info!(
            user_id = %user.id,
            has_subscription = subscription.is_some(),
            linked,
            "User signed in"
        );

        self.logger.dispatch(AnalyticsEvent::login(user.id.clone()));

        Ok(SignInResult {
            session,
            subscription,
            linked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockIdentityProvider;
    use crate::adapters::memory::{InMemoryAnalyticsSink, InMemorySubscriptionStore};
    use crate::domain::foundation::{AuthError, DomainError, Timestamp, UserId};
    use crate::domain::subscription::{PaymentActivation, SubscriptionStatus};

    // ════════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════════

    const USER_ID: &str = "7d3c0f4e-5b1a-4c55-9a43-0d1f1b0f2a11";

    fn email() -> Email {
        Email::parse("buyer@b.com").unwrap()
    }

    fn provider() -> Arc<MockIdentityProvider> {
        Arc::new(MockIdentityProvider::new().with_account(USER_ID, "buyer@b.com", "secret123"))
    }

    fn paid_row() -> Subscription {
        Subscription::from_activation(&PaymentActivation::new(email(), None, None, Timestamp::now()))
    }

    fn handler(
        store: Arc<InMemorySubscriptionStore>,
        sink: Arc<InMemoryAnalyticsSink>,
    ) -> SignInHandler {
        SignInHandler::new(
            provider(),
            CheckSubscriptionHandler::new(store.clone()),
            LinkSubscriptionHandler::new(store),
            UserActionLogger::new(sink),
        )
    }

    fn cmd(password: &str) -> SignInCommand {
        SignInCommand {
            email: email(),
            password: password.to_string(),
        }
    }

    async fn wait_for_events(sink: &InMemoryAnalyticsSink, count: usize) {
        for _ in 0..100 {
            if sink.event_count() >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn links_subscription_found_by_email() {
        let store = Arc::new(InMemorySubscriptionStore::with_rows(vec![paid_row()]));
        let sink = Arc::new(InMemoryAnalyticsSink::new());

        let result = handler(store.clone(), sink.clone())
            .handle(cmd("secret123"))
            .await
            .unwrap();

        assert!(result.linked);
        let expected = UserId::new(USER_ID).unwrap();
        assert_eq!(result.subscription.unwrap().user_id, Some(expected.clone()));
        assert_eq!(store.rows()[0].user_id, Some(expected));
    }

    #[tokio::test]
    async fn already_linked_subscription_is_not_relinked() {
        let mut row = paid_row();
        row.user_id = Some(UserId::new(USER_ID).unwrap());
        let store = Arc::new(InMemorySubscriptionStore::with_rows(vec![row]));

        let result = handler(store.clone(), Arc::new(InMemoryAnalyticsSink::new()))
            .handle(cmd("secret123"))
            .await
            .unwrap();

        assert!(!result.linked);
        assert!(result.subscription.is_some());
        // user id lookup hit first, no e-mail lookup or link
        assert_eq!(store.call_count(), 1);
    }

    #[tokio::test]
    async fn no_subscription_still_signs_in_and_logs() {
        let store = Arc::new(InMemorySubscriptionStore::new());
        let sink = Arc::new(InMemoryAnalyticsSink::new());

        let result = handler(store, sink.clone())
            .handle(cmd("secret123"))
            .await
            .unwrap();
        wait_for_events(&sink, 1).await;

        assert!(result.subscription.is_none());
        assert!(!result.linked);
        let events = sink.events();
        assert_eq!(events[0].action.as_str(), "user_login");
        assert_eq!(events[0].page.as_deref(), Some("/auth/signin"));
    }

    #[tokio::test]
    async fn inactive_subscription_is_ignored() {
        let mut row = paid_row();
        row.status = SubscriptionStatus::Expired;
        let store = Arc::new(InMemorySubscriptionStore::with_rows(vec![row]));

        let result = handler(store.clone(), Arc::new(InMemoryAnalyticsSink::new()))
            .handle(cmd("secret123"))
            .await
            .unwrap();

        assert!(result.subscription.is_none());
        assert!(store.rows()[0].user_id.is_none());
    }

    #[tokio::test]
    async fn store_outage_does_not_block_sign_in() {
        let store = Arc::new(InMemorySubscriptionStore::new());
        store.fail_with(DomainError::database("down"));
        let sink = Arc::new(InMemoryAnalyticsSink::new());

        let result = handler(store, sink.clone()).handle(cmd("secret123")).await;
        wait_for_events(&sink, 1).await;

        assert!(result.unwrap().subscription.is_none());
        assert!(sink.has_action("user_login"));
    }

    #[tokio::test]
    async fn bad_credentials_fail_without_store_access() {
        let store = Arc::new(InMemorySubscriptionStore::new());
        let sink = Arc::new(InMemoryAnalyticsSink::new());

        let err = handler(store.clone(), sink.clone())
            .handle(cmd("wrong"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SubscriptionError::Auth(AuthError::InvalidCredentials)
        ));
        assert_eq!(store.call_count(), 0);
        assert_eq!(sink.event_count(), 0);
    }
}
