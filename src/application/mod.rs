//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).
//! [`AuthGateway`] bundles the auth handlers behind one object for callers
//! that want the whole account surface.

mod auth_gateway;
pub mod handlers;

pub use auth_gateway::AuthGateway;
pub use handlers::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
