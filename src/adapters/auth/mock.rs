//! Mock identity provider for testing.
//!
//! Keeps accounts and issued tokens in memory so gateway and HTTP tests can
//! exercise sign-up, sign-in and sign-out without a real provider.
//!
//! # Example
//!
//! ```ignore
//! use member_portal::adapters::auth::MockIdentityProvider;
//!
//! let provider = MockIdentityProvider::new()
//!     .with_account("user-123", "test@example.com", "secret123");
//!
//! let session = provider.sign_in_with_password(&email, "secret123").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::{
    AuthError, AuthSession, AuthenticatedUser, Email, Registration, UserId,
};
use crate::ports::IdentityProvider;

/// Shortest password the mock accepts, mirroring GoTrue's default.
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    user: AuthenticatedUser,
    password: String,
}

/// In-memory identity provider.
///
/// Sign-up creates a session immediately (auto-confirm) unless built with
/// [`MockIdentityProvider::requiring_confirmation`].
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    sessions: RwLock<HashMap<String, AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
    confirm_email: bool,
}

impl MockIdentityProvider {
    /// Creates a new provider with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign-up returns no session, as with e-mail confirmation enabled.
    pub fn requiring_confirmation() -> Self {
        Self {
            confirm_email: true,
            ..Self::default()
        }
    }

    /// Registers an account.
    ///
    /// # Panics
    ///
    /// Panics on an empty user id or malformed e-mail. Test setup only.
    pub fn with_account(
        self,
        user_id: impl Into<String>,
        email: &str,
        password: impl Into<String>,
    ) -> Self {
        let user = AuthenticatedUser::new(
            UserId::new(user_id).expect("mock user id"),
            Email::parse(email).expect("mock e-mail"),
        );
        self.accounts.write().expect("accounts lock poisoned").insert(
            user.email.as_str().to_string(),
            Account {
                user,
                password: password.into(),
            },
        );
        self
    }

    /// Registers a token that resolves to `user` without signing in.
    pub fn with_session(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.sessions
            .write()
            .expect("sessions lock poisoned")
            .insert(token.into(), user);
        self
    }

    /// Forces every call to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().expect("error lock poisoned") = Some(error);
        self
    }

    /// Returns the number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.read().expect("sessions lock poisoned").len()
    }

    fn check_forced(&self) -> Result<(), AuthError> {
        match self.force_error.read().expect("error lock poisoned").as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn issue_session(&self, user: AuthenticatedUser) -> AuthSession {
        let token = format!("mock-access-{}", Uuid::new_v4());
        self.sessions
            .write()
            .expect("sessions lock poisoned")
            .insert(token.clone(), user.clone());
        AuthSession {
            access_token: token,
            refresh_token: Some(format!("mock-refresh-{}", Uuid::new_v4())),
            expires_in: Some(3600),
            user,
        }
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_up(&self, email: &Email, password: &str) -> Result<Registration, AuthError> {
        self.check_forced()?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::rejected(format!(
                "Password should be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let user = {
            let mut accounts = self.accounts.write().expect("accounts lock poisoned");
            if accounts.contains_key(email.as_str()) {
                return Err(AuthError::rejected("User already registered"));
            }
            let user = AuthenticatedUser::new(
                UserId::new(Uuid::new_v4().to_string())
                    .map_err(|e| AuthError::service_unavailable(e.to_string()))?,
                email.clone(),
            );
            accounts.insert(
                email.as_str().to_string(),
                Account {
                    user: user.clone(),
                    password: password.to_string(),
                },
            );
            user
        };

        let session = if self.confirm_email {
            None
        } else {
            Some(self.issue_session(user.clone()))
        };
        Ok(Registration { user, session })
    }

    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        self.check_forced()?;
        let account = self
            .accounts
            .read()
            .expect("accounts lock poisoned")
            .get(email.as_str())
            .cloned();

        match account {
            Some(account) if account.password == password => Ok(self.issue_session(account.user)),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.check_forced()?;
        self.sessions
            .write()
            .expect("sessions lock poisoned")
            .remove(access_token)
            .map(|_| ())
            .ok_or(AuthError::SessionInvalid)
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.check_forced()?;
        self.sessions
            .read()
            .expect("sessions lock poisoned")
            .get(access_token)
            .cloned()
            .ok_or(AuthError::SessionInvalid)
    }
}
