//! Supabase GoTrue identity provider adapter.
//!
//! Implements `IdentityProvider` over the GoTrue REST API:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | sign up | `POST /auth/v1/signup` |
//! | sign in | `POST /auth/v1/token?grant_type=password` |
//! | sign out | `POST /auth/v1/logout` (Bearer) |
//! | get user | `GET /auth/v1/user` (Bearer) |
//!
//! Every request carries the project's anon key in the `apikey` header.

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::config::AuthConfig;
use crate::domain::foundation::{
    AuthError, AuthSession, AuthenticatedUser, Email, Registration, UserId,
};
use crate::domain::subscription::SubscriptionError;
use crate::ports::IdentityProvider;

/// GoTrue client bound to one project.
pub struct SupabaseIdentityProvider {
    base_url: String,
    anon_key: SecretString,
    http_client: reqwest::Client,
}

impl std::fmt::Debug for SupabaseIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseIdentityProvider")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SupabaseIdentityProvider {
    /// Builds a client from configuration.
    ///
    /// # Errors
    ///
    /// `Configuration` when the project URL or anon key is missing.
    pub fn from_config(config: &AuthConfig) -> Result<Self, SubscriptionError> {
        let base_url = config
            .supabase_url()
            .ok_or_else(|| SubscriptionError::configuration("auth.supabase_url"))?;
        let anon_key = config
            .supabase_anon_key()
            .ok_or_else(|| SubscriptionError::configuration("auth.supabase_anon_key"))?;

        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| SubscriptionError::configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.to_string(),
            anon_key: SecretString::new(anon_key.to_string()),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, self.url(path))
            .header("apikey", self.anon_key.expose_secret())
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, AuthError> {
        request.send().await.map_err(|e| {
            tracing::warn!("Identity provider unreachable: {}", e);
            AuthError::service_unavailable(e.to_string())
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoTrueSession {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    user: GoTrueUser,
}

/// Sign-up answers with a session when auto-confirm is on, otherwise with
/// the bare user awaiting e-mail confirmation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(GoTrueSession),
    User(GoTrueUser),
}

/// Error body. Older GoTrue releases use `error_description`, newer `msg`.
#[derive(Debug, Default, Deserialize)]
struct GoTrueError {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl GoTrueError {
    fn into_message(self) -> String {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

impl TryFrom<GoTrueUser> for AuthenticatedUser {
    type Error = AuthError;

    fn try_from(user: GoTrueUser) -> Result<Self, Self::Error> {
        let id = UserId::new(user.id)
            .map_err(|e| AuthError::service_unavailable(format!("malformed user: {}", e)))?;
        let email = user
            .email
            .as_deref()
            .map(Email::parse)
            .transpose()
            .map_err(|e| AuthError::service_unavailable(format!("malformed user: {}", e)))?
            .ok_or_else(|| AuthError::service_unavailable("user has no e-mail"))?;
        Ok(AuthenticatedUser::new(id, email))
    }
}

impl TryFrom<GoTrueSession> for AuthSession {
    type Error = AuthError;

    fn try_from(session: GoTrueSession) -> Result<Self, Self::Error> {
        Ok(AuthSession {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_in: session.expires_in,
            user: session.user.try_into()?,
        })
    }
}

async fn error_message(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<GoTrueError>(&text)
        .map(GoTrueError::into_message)
        .unwrap_or(text)
}

async fn parse_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AuthError> {
    response
        .json::<T>()
        .await
        .map_err(|e| AuthError::service_unavailable(format!("unexpected response: {}", e)))
}

/// Maps a non-success status that every endpoint shares.
fn server_failure(status: StatusCode, message: String) -> Option<AuthError> {
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        Some(AuthError::service_unavailable(format!("{}: {}", status, message)))
    } else {
        None
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn sign_up(&self, email: &Email, password: &str) -> Result<Registration, AuthError> {
        let response = self
            .send(
                self.request(reqwest::Method::POST, "signup")
                    .json(&json!({ "email": email.as_str(), "password": password })),
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(server_failure(status, message.clone())
                .unwrap_or_else(|| AuthError::rejected(message)));
        }

        match parse_body::<SignUpResponse>(response).await? {
            SignUpResponse::Session(session) => {
                let session = AuthSession::try_from(session)?;
                Ok(Registration {
                    user: session.user.clone(),
                    session: Some(session),
                })
            }
            SignUpResponse::User(user) => Ok(Registration {
                user: user.try_into()?,
                session: None,
            }),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let response = self
            .send(
                self.request(reqwest::Method::POST, "token?grant_type=password")
                    .json(&json!({ "email": email.as_str(), "password": password })),
            )
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            if let Some(err) = server_failure(status, message.clone()) {
                return Err(err);
            }
            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                    AuthError::InvalidCredentials
                }
                _ => AuthError::rejected(message),
            });
        }

        parse_body::<GoTrueSession>(response).await?.try_into()
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .send(self.request(reqwest::Method::POST, "logout").bearer_auth(access_token))
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = error_message(response).await;
        Err(server_failure(status, message.clone()).unwrap_or(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                AuthError::SessionInvalid
            }
            _ => AuthError::rejected(message),
        }))
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthenticatedUser, AuthError> {
        let response = self
            .send(self.request(reqwest::Method::GET, "user").bearer_auth(access_token))
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(server_failure(status, message).unwrap_or(AuthError::SessionInvalid));
        }

        parse_body::<GoTrueUser>(response).await?.try_into()
    }
}
