//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Identity provider configuration (Supabase GoTrue compatible)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    #[serde(default)]
    pub supabase_url: Option<String>,

    /// Public anon key sent as the `apikey` header
    #[serde(default)]
    pub supabase_anon_key: Option<String>,

    /// HTTP timeout for identity provider calls in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl AuthConfig {
    /// Project URL without trailing slash, if set
    pub fn supabase_url(&self) -> Option<&str> {
        self.supabase_url
            .as_deref()
            .map(|u| u.trim().trim_end_matches('/'))
            .filter(|u| !u.is_empty())
    }

    /// Anon key, if set
    pub fn supabase_anon_key(&self) -> Option<&str> {
        self.supabase_anon_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Whether both the URL and the key are present
    pub fn is_configured(&self) -> bool {
        self.supabase_url().is_some() && self.supabase_anon_key().is_some()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate authentication configuration
    ///
    /// Absent credentials are accepted; the gateway reports them when used.
    /// Half a configuration is rejected, and production requires HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match (self.supabase_url(), self.supabase_anon_key()) {
            (None, None) => Ok(()),
            (Some(url), Some(_)) => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ValidationError::InvalidSupabaseUrl);
                }
                if *environment == Environment::Production && !url.starts_with("https://") {
                    return Err(ValidationError::SupabaseUrlMustBeHttps);
                }
                if self.request_timeout_secs == 0 {
                    return Err(ValidationError::InvalidTimeout);
                }
                Ok(())
            }
            _ => Err(ValidationError::IncompleteAuthConfig),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_anon_key: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_request_timeout() -> u64 {
    10
}
