//! GetCurrentSubscriptionHandler - Query handler for the signed-in user's access.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, Timestamp};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::IdentityProvider;

use super::{CheckSubscriptionHandler, CheckSubscriptionQuery};

/// Query for the subscription behind an access token.
#[derive(Debug, Clone)]
pub struct GetCurrentSubscriptionQuery {
    pub access_token: String,
}

#[derive(Debug, Clone)]
pub struct GetCurrentSubscriptionResult {
    pub user: AuthenticatedUser,
    pub subscription: Option<Subscription>,
    /// Active and not yet past `expires_at`.
    pub has_access: bool,
}

/// Resolves the token to a user, then looks up by user id and falls back to
/// e-mail for rows the webhook created before the account was linked.
pub struct GetCurrentSubscriptionHandler {
    provider: Arc<dyn IdentityProvider>,
    check_subscription: CheckSubscriptionHandler,
}

impl GetCurrentSubscriptionHandler {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        check_subscription: CheckSubscriptionHandler,
    ) -> Self {
        Self {
            provider,
            check_subscription,
        }
    }

    pub async fn handle(
        &self,
        query: GetCurrentSubscriptionQuery,
    ) -> Result<GetCurrentSubscriptionResult, SubscriptionError> {
        let user = self.provider.get_user(&query.access_token).await?;

        let subscription = match self
            .check_subscription
            .handle(CheckSubscriptionQuery::ByUserId(user.id.clone()))
            .await
        {
            Some(found) => Some(found),
            None => {
                self.check_subscription
                    .handle(CheckSubscriptionQuery::ByEmail(user.email.clone()))
                    .await
            }
        };

        let now = Timestamp::now();
        let has_access = subscription
            .as_ref()
            .map(|s| s.grants_access_at(now))
            .unwrap_or(false);

        Ok(GetCurrentSubscriptionResult {
            user,
            subscription,
            has_access,
        })
    }
}
