//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SubscriptionStore` - `user_subscriptions` reads, linking and the payment upsert
//! - `AnalyticsSink` - append-only `user_analytics` writes
//! - `IdentityProvider` - sign-up, sign-in, sign-out and token lookup

mod analytics_sink;
mod identity_provider;
mod subscription_store;

pub use analytics_sink::AnalyticsSink;
pub use identity_provider::IdentityProvider;
pub use subscription_store::SubscriptionStore;
