//! Identity provider port.
//!
//! Abstracts the managed authentication service. The gateway never sees
//! provider URLs, keys or wire formats; adapters translate those into the
//! domain's [`AuthError`].
//!
//! # Implementations
//!
//! - `SupabaseIdentityProvider` - GoTrue REST API
//! - `MockIdentityProvider` - in-memory accounts for tests

use crate::domain::foundation::{AuthError, AuthSession, AuthenticatedUser, Email, Registration};
use async_trait::async_trait;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an account.
    ///
    /// # Errors
    ///
    /// - `Rejected` for duplicate e-mail or weak password
    /// - `ServiceUnavailable` if the provider cannot be reached
    async fn sign_up(&self, email: &Email, password: &str) -> Result<Registration, AuthError>;

    /// Exchanges e-mail and password for a session.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` for a wrong pair
    /// - `ServiceUnavailable` if the provider cannot be reached
    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    /// Revokes the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    /// Resolves the user behind `access_token`.
    ///
    /// # Errors
    ///
    /// - `SessionInvalid` if the token is unknown or expired
    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError>;
}
