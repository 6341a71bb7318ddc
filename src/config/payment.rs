//! Payment configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Kirvano webhook)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentConfig {
    /// Shared secret the processor sends in the `token` header
    #[serde(default)]
    pub kirvano_token: Option<String>,
}

impl PaymentConfig {
    /// Webhook token, if one is set and non-empty
    pub fn kirvano_token(&self) -> Option<&str> {
        self.kirvano_token.as_deref().filter(|t| !t.is_empty())
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(token) = self.kirvano_token() {
            // The token is compared byte for byte, so padding would never match
            if token.trim() != token {
                return Err(ValidationError::InvalidWebhookToken);
            }
        }
        Ok(())
    }
}
