//! SignOutHandler - Command handler for revoking a session.

use std::sync::Arc;

use crate::domain::subscription::SubscriptionError;
use crate::ports::IdentityProvider;

/// Command to end the session behind an access token.
#[derive(Debug, Clone)]
pub struct SignOutCommand {
    pub access_token: String,
}

pub struct SignOutHandler {
    provider: Arc<dyn IdentityProvider>,
}

impl SignOutHandler {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, cmd: SignOutCommand) -> Result<(), SubscriptionError> {
        self.provider.sign_out(&cmd.access_token).await?;
        tracing::info!("User signed out");
        Ok(())
    }
}
