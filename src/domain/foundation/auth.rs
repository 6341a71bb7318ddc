//! Authentication types for the domain layer.
//!
//! These types describe the outcome of talking to the identity provider. They
//! carry no provider-specific fields: any adapter behind the `IdentityProvider`
//! port (Supabase GoTrue, a mock) populates them.

use serde::Serialize;
use thiserror::Error;

use super::{Email, UserId};

/// A user known to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    /// The provider's identifier for the account.
    pub id: UserId,

    /// The e-mail the account signed up with.
    pub email: Email,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: Email) -> Self {
        Self { id, email }
    }
}

/// Tokens issued by the identity provider after a successful sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    pub expires_in: Option<u64>,
    pub user: AuthenticatedUser,
}

/// Result of a sign-up. Providers that require e-mail confirmation return
/// the user without a session.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub user: AuthenticatedUser,
    pub session: Option<AuthSession>,
}

/// Identity provider failures.
///
/// These errors are **domain-centric**: they describe what went wrong from the
/// application's perspective, not the provider's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Email/password pair was not accepted.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// The access token is missing, expired or unknown to the provider.
    #[error("Invalid or expired session")]
    SessionInvalid,

    /// The provider refused the request (duplicate e-mail, weak password, ...).
    #[error("Rejected by identity provider: {0}")]
    Rejected(String),

    /// The identity provider could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a rejection error with the provider's message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the caller should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidCredentials | AuthError::SessionInvalid)
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
