//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MEMBER_PORTAL` prefix and nested values are separated by double underscores.
//!
//! Every credential is optional at load time. A missing database URL, identity
//! provider key or webhook token is reported when the affected operation runs,
//! so the server still starts and answers with a configuration error.
//!
//! # Example
//!
//! ```no_run
//! use member_portal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod auth;
mod database;
mod error;
mod payment;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (subscription store)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Identity provider configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Payment webhook configuration
    #[serde(default)]
    pub payment: PaymentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MEMBER_PORTAL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MEMBER_PORTAL__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `MEMBER_PORTAL__PAYMENT__KIRVANO_TOKEN=...` -> `payment.kirvano_token = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEMBER_PORTAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Only the format of values that are present is checked.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.payment.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Names of the optional sections that are not configured
    pub fn missing_sections(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.database.is_configured() {
            missing.push("database.url");
        }
        if !self.auth.is_configured() {
            missing.push("auth.supabase_url/auth.supabase_anon_key");
        }
        if self.payment.kirvano_token().is_none() {
            missing.push("payment.kirvano_token");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "MEMBER_PORTAL__DATABASE__URL",
        "MEMBER_PORTAL__AUTH__SUPABASE_URL",
        "MEMBER_PORTAL__AUTH__SUPABASE_ANON_KEY",
        "MEMBER_PORTAL__PAYMENT__KIRVANO_TOKEN",
        "MEMBER_PORTAL__SERVER__PORT",
        "MEMBER_PORTAL__SERVER__ENVIRONMENT",
    ];

    fn set_full_env() {
        env::set_var("MEMBER_PORTAL__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("MEMBER_PORTAL__AUTH__SUPABASE_URL", "https://abc.supabase.co");
        env::set_var("MEMBER_PORTAL__AUTH__SUPABASE_ANON_KEY", "anon-key");
        env::set_var("MEMBER_PORTAL__PAYMENT__KIRVANO_TOKEN", "kv-secret");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_full_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url(), Some("postgresql://test@localhost/test"));
        assert_eq!(config.auth.supabase_url(), Some("https://abc.supabase.co"));
        assert_eq!(config.payment.kirvano_token(), Some("kv-secret"));
        assert!(config.missing_sections().is_empty());
    }

    #[test]
    fn test_load_without_credentials() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.missing_sections().len(), 3);
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_full_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_full_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_full_env();
        env::set_var("MEMBER_PORTAL__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_full_env();
        env::set_var("MEMBER_PORTAL__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }
}
