//! AuthGateway - one entry point for account and subscription operations.
//!
//! Built from explicit components; there is no process-wide client. Adapters
//! that need credentials are constructed by the caller and fail there.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::analytics::UserAction;
use crate::domain::foundation::{AuthenticatedUser, Email, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::{AnalyticsSink, IdentityProvider, SubscriptionStore};

use super::handlers::{
    CheckSubscriptionHandler, CheckSubscriptionQuery, GetCurrentSubscriptionHandler,
    GetCurrentSubscriptionQuery, GetCurrentSubscriptionResult, LinkSubscriptionCommand,
    LinkSubscriptionHandler, LogUserActionCommand, SignInCommand, SignInHandler, SignInResult,
    SignOutCommand, SignOutHandler, SignUpCommand, SignUpHandler, SignUpResult, UserActionLogger,
};

pub struct AuthGateway {
    provider: Arc<dyn IdentityProvider>,
    sign_up: SignUpHandler,
    sign_in: SignInHandler,
    sign_out: SignOutHandler,
    check_subscription: CheckSubscriptionHandler,
    link_subscription: LinkSubscriptionHandler,
    current_subscription: GetCurrentSubscriptionHandler,
    logger: UserActionLogger,
}

impl AuthGateway {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn SubscriptionStore>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        let logger = UserActionLogger::new(analytics);
        let check_subscription = CheckSubscriptionHandler::new(store.clone());
        let link_subscription = LinkSubscriptionHandler::new(store);

        Self {
            sign_up: SignUpHandler::new(provider.clone(), logger.clone()),
            sign_in: SignInHandler::new(
                provider.clone(),
                check_subscription.clone(),
                link_subscription.clone(),
                logger.clone(),
            ),
            sign_out: SignOutHandler::new(provider.clone()),
            current_subscription: GetCurrentSubscriptionHandler::new(
                provider.clone(),
                check_subscription.clone(),
            ),
            check_subscription,
            link_subscription,
            logger,
            provider,
        }
    }

    /// Resolves an access token to its user.
    pub async fn authenticate(
        &self,
        access_token: &str,
    ) -> Result<AuthenticatedUser, SubscriptionError> {
        Ok(self.provider.get_user(access_token).await?)
    }

    pub async fn sign_up(
        &self,
        email: Email,
        password: impl Into<String>,
    ) -> Result<SignUpResult, SubscriptionError> {
        self.sign_up
            .handle(SignUpCommand {
                email,
                password: password.into(),
            })
            .await
    }

    pub async fn sign_in(
        &self,
        email: Email,
        password: impl Into<String>,
    ) -> Result<SignInResult, SubscriptionError> {
        self.sign_in
            .handle(SignInCommand {
                email,
                password: password.into(),
            })
            .await
    }

    pub async fn sign_out(&self, access_token: impl Into<String>) -> Result<(), SubscriptionError> {
        self.sign_out
            .handle(SignOutCommand {
                access_token: access_token.into(),
            })
            .await
    }

    pub async fn check_user_subscription(&self, user_id: &UserId) -> Option<Subscription> {
        self.check_subscription
            .handle(CheckSubscriptionQuery::ByUserId(user_id.clone()))
            .await
    }

    pub async fn check_subscription_by_email(&self, email: &Email) -> Option<Subscription> {
        self.check_subscription
            .handle(CheckSubscriptionQuery::ByEmail(email.clone()))
            .await
    }

    pub async fn link_subscription_to_user(&self, user_id: &UserId, email: &Email) -> bool {
        self.link_subscription
            .handle(LinkSubscriptionCommand {
                user_id: user_id.clone(),
                email: email.clone(),
            })
            .await
    }

    /// Records the action on a detached task.
    pub fn log_user_action(
        &self,
        user_id: UserId,
        action: UserAction,
        page: Option<String>,
        metadata: Option<serde_json::Value>,
    ) -> JoinHandle<()> {
        self.logger.dispatch(
            LogUserActionCommand {
                user_id,
                action,
                page,
                metadata,
            }
            .into(),
        )
    }

    pub async fn current_subscription(
        &self,
        access_token: impl Into<String>,
    ) -> Result<GetCurrentSubscriptionResult, SubscriptionError> {
        self.current_subscription
            .handle(GetCurrentSubscriptionQuery {
                access_token: access_token.into(),
            })
            .await
    }
}
