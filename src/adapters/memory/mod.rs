//! In-memory adapters used by tests and the integration suite.

mod analytics_sink;
mod subscription_store;

pub use analytics_sink::InMemoryAnalyticsSink;
pub use subscription_store::InMemorySubscriptionStore;
