//! User activity event recorded in `user_analytics`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Page reported with `user_registered`.
pub const SIGN_UP_PAGE: &str = "/auth/signup";

/// Page reported with `user_login`.
pub const SIGN_IN_PAGE: &str = "/auth/signin";

/// Longest accepted custom action name.
const MAX_ACTION_LEN: usize = 64;

/// What the user did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum UserAction {
    UserRegistered,
    UserLogin,
    /// Client-reported action such as `content_viewed`.
    Custom(String),
}

impl UserAction {
    /// Parses an action name: lowercase ASCII letters, digits and underscores.
    pub fn parse(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("action"));
        }
        if name.len() > MAX_ACTION_LEN {
            return Err(ValidationError::invalid_format(
                "action",
                format!("longer than {} characters", MAX_ACTION_LEN),
            ));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(ValidationError::invalid_format(
                "action",
                "only lowercase letters, digits and '_' are allowed",
            ));
        }
        Ok(match name {
            "user_registered" => UserAction::UserRegistered,
            "user_login" => UserAction::UserLogin,
            other => UserAction::Custom(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            UserAction::UserRegistered => "user_registered",
            UserAction::UserLogin => "user_login",
            UserAction::Custom(name) => name,
        }
    }
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserAction> for String {
    fn from(action: UserAction) -> Self {
        action.as_str().to_string()
    }
}

impl TryFrom<String> for UserAction {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserAction::parse(value)
    }
}

/// One row of `user_analytics`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub user_id: UserId,
    pub action: UserAction,
    pub page: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub occurred_at: Timestamp,
}

impl AnalyticsEvent {
    pub fn new(user_id: UserId, action: UserAction) -> Self {
        Self {
            user_id,
            action,
            page: None,
            metadata: None,
            occurred_at: Timestamp::now(),
        }
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// `user_registered` on the sign-up page.
    pub fn registered(user_id: UserId) -> Self {
        Self::new(user_id, UserAction::UserRegistered).with_page(SIGN_UP_PAGE)
    }

    /// `user_login` on the sign-in page.
    pub fn login(user_id: UserId) -> Self {
        Self::new(user_id, UserAction::UserLogin).with_page(SIGN_IN_PAGE)
    }
}
