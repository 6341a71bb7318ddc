//! Subscription store connection settings

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const POOL_CEILING: u32 = 100;

/// PostgreSQL settings for the `user_subscriptions` and `user_analytics` tables.
///
/// Without a URL the store is reported as not configured at request time
/// instead of aborting start-up.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,

    /// Pool size; webhook and auth traffic share it
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection before the request fails
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Apply `migrations/` when the pool is created
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Connection URL, if one was supplied and is not blank
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    pub fn is_configured(&self) -> bool {
        self.url().is_some()
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Checks the URL scheme (when a URL is present) and the pool bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let scheme_ok = self
            .url()
            .map_or(true, |url| url.starts_with("postgres://") || url.starts_with("postgresql://"));
        if !scheme_ok {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        match self.max_connections {
            0 => Err(ValidationError::InvalidPoolSize),
            n if n > POOL_CEILING => Err(ValidationError::PoolSizeTooLarge),
            _ => Ok(()),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: false,
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    5
}
