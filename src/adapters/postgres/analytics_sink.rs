//! PostgreSQL implementation of AnalyticsSink.

use crate::domain::analytics::AnalyticsEvent;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::AnalyticsSink;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Appends rows to `user_analytics`.
pub struct PostgresAnalyticsSink {
    pool: PgPool,
}

impl PostgresAnalyticsSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_user_id_as_uuid(user_id: &UserId) -> Result<Uuid, DomainError> {
    Uuid::parse_str(user_id.as_str()).map_err(|e| {
        DomainError::validation("user_id", format!("User ID must be a valid UUID: {}", e))
    })
}

#[async_trait]
impl AnalyticsSink for PostgresAnalyticsSink {
    async fn record(&self, event: &AnalyticsEvent) -> Result<(), DomainError> {
        let user_uuid = parse_user_id_as_uuid(&event.user_id)?;

        sqlx::query(
            r#"
            INSERT INTO user_analytics (id, user_id, action, page, metadata, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_uuid)
        .bind(event.action.as_str())
        .bind(event.page.as_deref())
        .bind(event.metadata.as_ref().map(sqlx::types::Json))
        .bind(*event.occurred_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to record analytics event: {}", e)))?;

        Ok(())
    }
}
