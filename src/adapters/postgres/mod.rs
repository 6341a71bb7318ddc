//! PostgreSQL adapters - Database implementations for store ports.
//!
//! - `PostgresSubscriptionStore` - `user_subscriptions` lookups, linking and upsert
//! - `PostgresAnalyticsSink` - append-only `user_analytics`
//!
//! [`connect`] builds the shared pool from [`DatabaseConfig`] and applies the
//! bundled migrations when asked to.

mod analytics_sink;
mod subscription_store;

pub use analytics_sink::PostgresAnalyticsSink;
pub use subscription_store::PostgresSubscriptionStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Opens a connection pool, or `Ok(None)` when no URL is configured.
///
/// The pool connects lazily, so an unreachable database surfaces as store
/// errors on first use instead of blocking start-up.
pub async fn connect(config: &DatabaseConfig) -> Result<Option<PgPool>, DomainError> {
    let url = match config.url() {
        Some(url) => url,
        None => return Ok(None),
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_lazy(url)
        .map_err(|e| {
            DomainError::new(ErrorCode::NotConfigured, format!("Invalid database URL: {}", e))
        })?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DomainError::database(format!("Migration failed: {}", e)))?;
        tracing::info!("Database migrations applied");
    }

    Ok(Some(pool))
}
