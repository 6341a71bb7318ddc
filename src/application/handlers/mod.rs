//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod auth;
pub mod dashboard;
pub mod payment;

pub use auth::{
    CheckSubscriptionHandler, CheckSubscriptionQuery, GetCurrentSubscriptionHandler,
    GetCurrentSubscriptionQuery, GetCurrentSubscriptionResult, LinkSubscriptionCommand,
    LinkSubscriptionHandler, LogUserActionCommand, SignInCommand, SignInHandler, SignInResult,
    SignOutCommand, SignOutHandler, SignUpCommand, SignUpHandler, SignUpResult, UserActionLogger,
};
pub use dashboard::{
    GetDashboardOverviewHandler, GetDashboardOverviewQuery, GetDashboardOverviewResult,
};
pub use payment::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
