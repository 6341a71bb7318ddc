//! SignUpHandler - Command handler for creating an account.

use std::sync::Arc;

use crate::domain::analytics::AnalyticsEvent;
use crate::domain::foundation::{Email, Registration};
use crate::domain::subscription::SubscriptionError;
use crate::ports::IdentityProvider;

use super::UserActionLogger;

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct SignUpCommand {
    pub email: Email,
    pub password: String,
}

/// Result of a successful sign-up.
pub type SignUpResult = Registration;

/// Handler for sign-up.
///
/// Delegates to the identity provider, then dispatches a `user_registered`
/// event without waiting for it.
pub struct SignUpHandler {
    provider: Arc<dyn IdentityProvider>,
    logger: UserActionLogger,
}

impl SignUpHandler {
    pub fn new(provider: Arc<dyn IdentityProvider>, logger: UserActionLogger) -> Self {
        Self { provider, logger }
    }

    pub async fn handle(&self, cmd: SignUpCommand) -> Result<SignUpResult, SubscriptionError> {
        if cmd.password.is_empty() {
            return Err(SubscriptionError::validation("password", "Password is required"));
        }

        let registration = self.provider.sign_up(&cmd.email, &cmd.password).await?;
        tracing::info!(user_id = %registration.user.id, "User registered");

        self.logger
            .dispatch(AnalyticsEvent::registered(registration.user.id.clone()));

        Ok(registration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockIdentityProvider;
    use crate::adapters::memory::InMemoryAnalyticsSink;
    use crate::domain::foundation::{AuthError, DomainError};

    async fn wait_for_events(sink: &InMemoryAnalyticsSink, count: usize) {
        for _ in 0..100 {
            if sink.event_count() >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
    }

    fn cmd(password: &str) -> SignUpCommand {
        SignUpCommand {
            email: Email::parse("new@b.com").unwrap(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn sign_up_records_registration_event() {
        let sink = Arc::new(InMemoryAnalyticsSink::new());
        let handler = SignUpHandler::new(
            Arc::new(MockIdentityProvider::new()),
            UserActionLogger::new(sink.clone()),
        );

        let registration = handler.handle(cmd("secret123")).await.unwrap();
        wait_for_events(&sink, 1).await;

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action.as_str(), "user_registered");
        assert_eq!(events[0].page.as_deref(), Some("/auth/signup"));
        assert_eq!(events[0].user_id, registration.user.id);
    }

    #[tokio::test]
    async fn provider_rejection_propagates() {
        let sink = Arc::new(InMemoryAnalyticsSink::new());
        let handler = SignUpHandler::new(
            Arc::new(MockIdentityProvider::new().with_account("u1", "new@b.com", "secret123")),
            UserActionLogger::new(sink.clone()),
        );

        let err = handler.handle(cmd("secret123")).await.unwrap_err();

        assert!(matches!(err, SubscriptionError::Auth(AuthError::Rejected(_))));
        assert_eq!(sink.event_count(), 0);
    }

    #[tokio::test]
    async fn empty_password_is_validation_error() {
        let handler = SignUpHandler::new(
            Arc::new(MockIdentityProvider::new()),
            UserActionLogger::new(Arc::new(InMemoryAnalyticsSink::new())),
        );

        let err = handler.handle(cmd("")).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::Validation { .. }));
    }

    #[tokio::test]
    async fn analytics_failure_does_not_fail_sign_up() {
        let handler = SignUpHandler::new(
            Arc::new(MockIdentityProvider::new()),
            UserActionLogger::new(Arc::new(InMemoryAnalyticsSink::failing(
                DomainError::database("down"),
            ))),
        );

        assert!(handler.handle(cmd("secret123")).await.is_ok());
    }
}
