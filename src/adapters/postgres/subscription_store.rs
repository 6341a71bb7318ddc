//! PostgreSQL implementation of SubscriptionStore.
//!
//! Backs `user_subscriptions`. The payment upsert is a single
//! `INSERT ... ON CONFLICT (email) DO UPDATE`, so concurrent deliveries for
//! the same buyer serialize on the unique index.

use crate::domain::foundation::{DomainError, Email, ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{
    PaymentActivation, PaymentStatus, Subscription, SubscriptionPlan, SubscriptionStatus,
    UpsertOutcome,
};
use crate::ports::SubscriptionStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, email, subscription_plan, subscription_status, payment_id,
           payment_status, payment_amount, payment_date, expires_at, created_at, updated_at
    FROM user_subscriptions
"#;

/// PostgreSQL implementation of the SubscriptionStore port.
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    user_id: Option<Uuid>,
    email: String,
    subscription_plan: String,
    subscription_status: String,
    payment_id: String,
    payment_status: String,
    payment_amount: Decimal,
    payment_date: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let corrupt = |e: crate::domain::foundation::ValidationError| {
            DomainError::new(ErrorCode::DatabaseError, format!("Corrupt subscription row: {}", e))
                .with_detail("id", row.id.to_string())
        };

        let user_id = row
            .user_id
            .map(|id| UserId::new(id.to_string()))
            .transpose()
            .map_err(corrupt)?;

        Ok(Subscription {
            id: SubscriptionId::from_uuid(row.id),
            user_id,
            email: Email::parse(&row.email).map_err(corrupt)?,
            plan: SubscriptionPlan::parse(&row.subscription_plan).map_err(corrupt)?,
            status: SubscriptionStatus::parse(&row.subscription_status).map_err(corrupt)?,
            payment_id: row.payment_id,
            payment_status: PaymentStatus::parse(&row.payment_status).map_err(corrupt)?,
            payment_amount: row.payment_amount,
            payment_date: Timestamp::from_datetime(row.payment_date),
            expires_at: Timestamp::from_datetime(row.expires_at),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_user_id_as_uuid(user_id: &UserId) -> Result<Uuid, DomainError> {
    Uuid::parse_str(user_id.as_str()).map_err(|e| {
        DomainError::validation("user_id", format!("User ID must be a valid UUID: {}", e))
    })
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to {}: {}", context, e))
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn find_active_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, DomainError> {
        let user_uuid = parse_user_id_as_uuid(user_id)?;

        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 AND subscription_status = 'active' \
             ORDER BY payment_date DESC LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(user_uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find subscription by user", e))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn find_active_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "{} WHERE email = $1 AND subscription_status = 'active' \
             ORDER BY payment_date DESC LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find subscription by email", e))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn link_user(&self, email: &Email, user_id: &UserId) -> Result<u64, DomainError> {
        let user_uuid = parse_user_id_as_uuid(user_id)?;

        let result = sqlx::query(
            r#"
            UPDATE user_subscriptions
            SET user_id = $1, updated_at = now()
            WHERE email = $2 AND user_id IS NULL
            "#,
        )
        .bind(user_uuid)
        .bind(email.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("link subscription", e))?;

        Ok(result.rows_affected())
    }

    async fn upsert_payment(
        &self,
        activation: &PaymentActivation,
    ) -> Result<UpsertOutcome, DomainError> {
        // xmax is zero only for a freshly inserted tuple
        let inserted: bool = sqlx::query_scalar(
            r#"
            INSERT INTO user_subscriptions (
                id, email, subscription_plan, subscription_status, payment_id,
                payment_status, payment_amount, payment_date, expires_at, created_at, updated_at
            ) VALUES ($1, $2, $3, 'active', $4, 'completed', $5, $6, $7, $6, $6)
            ON CONFLICT (email) DO UPDATE SET
                payment_status = 'completed',
                subscription_status = 'active',
                payment_date = EXCLUDED.payment_date,
                expires_at = EXCLUDED.expires_at,
                updated_at = EXCLUDED.updated_at
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(*SubscriptionId::new().as_uuid())
        .bind(activation.email.as_str())
        .bind(activation.plan.as_str())
        .bind(&activation.payment_id)
        .bind(activation.payment_amount)
        .bind(*activation.paid_at.as_datetime())
        .bind(*activation.expires_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("upsert subscription", e))?;

        Ok(if inserted {
            UpsertOutcome::Inserted
        } else {
            UpsertOutcome::Updated
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> SubscriptionRow {
        let now = Utc::now();
        SubscriptionRow {
            id: Uuid::new_v4(),
            user_id: None,
            email: "a@b.com".to_string(),
            subscription_plan: "premium".to_string(),
            subscription_status: "active".to_string(),
            payment_id: "tx-1".to_string(),
            payment_status: "completed".to_string(),
            payment_amount: Decimal::new(2990, 2),
            payment_date: now,
            expires_at: now + chrono::Duration::days(30),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_converts_to_subscription() {
        let sub = Subscription::try_from(row()).unwrap();
        assert_eq!(sub.plan, SubscriptionPlan::Premium);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.payment_status, PaymentStatus::Completed);
        assert!(sub.user_id.is_none());
    }

    #[test]
    fn row_with_user_id_is_linked() {
        let user = Uuid::new_v4();
        let sub = Subscription::try_from(SubscriptionRow {
            user_id: Some(user),
            ..row()
        })
        .unwrap();
        assert_eq!(sub.user_id.unwrap().as_str(), user.to_string());
    }

    #[test]
    fn unknown_plan_is_a_database_error() {
        let err = Subscription::try_from(SubscriptionRow {
            subscription_plan: "gold".to_string(),
            ..row()
        })
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn non_uuid_user_id_is_rejected() {
        let err = parse_user_id_as_uuid(&UserId::new("not-a-uuid").unwrap()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
