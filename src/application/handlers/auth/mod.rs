//! Auth handlers.
//!
//! Account operations backed by the identity provider, plus the subscription
//! lookups and linking that tie an account to what the payment webhook wrote.
//!
//! ## Commands
//! - Sign up, sign in, sign out
//! - Link a webhook-created subscription to an account
//! - Log a user action (best effort)
//!
//! ## Queries
//! - Active subscription by user id or e-mail
//! - Current subscription for an access token

mod check_subscription;
mod get_current_subscription;
mod link_subscription;
mod log_user_action;
mod sign_in;
mod sign_out;
mod sign_up;

// Commands
pub use link_subscription::{LinkSubscriptionCommand, LinkSubscriptionHandler};
pub use log_user_action::{LogUserActionCommand, UserActionLogger};
pub use sign_in::{SignInCommand, SignInHandler, SignInResult};
pub use sign_out::{SignOutCommand, SignOutHandler};
pub use sign_up::{SignUpCommand, SignUpHandler, SignUpResult};

// Queries
pub use check_subscription::{CheckSubscriptionHandler, CheckSubscriptionQuery};
pub use get_current_subscription::{
    GetCurrentSubscriptionHandler, GetCurrentSubscriptionQuery, GetCurrentSubscriptionResult,
};
