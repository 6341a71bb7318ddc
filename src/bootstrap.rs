//! Wiring from configuration to application state.

use std::sync::Arc;

use secrecy::SecretString;

use crate::adapters::auth::SupabaseIdentityProvider;
use crate::adapters::http::AppState;
use crate::adapters::postgres::{self, PostgresAnalyticsSink, PostgresSubscriptionStore};
use crate::application::handlers::GetDashboardOverviewHandler;
use crate::application::{AuthGateway, HandlePaymentWebhookHandler};
use crate::config::AppConfig;
use crate::domain::subscription::SubscriptionError;
use crate::ports::{AnalyticsSink, SubscriptionStore};

/// Builds the shared state from configuration.
///
/// Missing sections leave the affected component unset instead of failing;
/// each is logged once here. Values that are present but unusable fail.
pub async fn build_state(config: &AppConfig) -> Result<AppState, SubscriptionError> {
    for section in config.missing_sections() {
        tracing::warn!(section, "Configuration missing, dependent endpoints will return 500");
    }

    let pool = postgres::connect(&config.database).await?;
    let store: Option<Arc<dyn SubscriptionStore>> = pool
        .clone()
        .map(|pool| Arc::new(PostgresSubscriptionStore::new(pool)) as Arc<dyn SubscriptionStore>);
    let analytics: Option<Arc<dyn AnalyticsSink>> =
        pool.map(|pool| Arc::new(PostgresAnalyticsSink::new(pool)) as Arc<dyn AnalyticsSink>);

    let auth_gateway = match (config.auth.is_configured(), &store, &analytics) {
        (true, Some(store), Some(analytics)) => {
            let provider = SupabaseIdentityProvider::from_config(&config.auth)?;
            Some(Arc::new(AuthGateway::new(
                Arc::new(provider),
                store.clone(),
                analytics.clone(),
            )))
        }
        (true, _, _) => {
            tracing::warn!("Identity provider configured without a database, auth disabled");
            None
        }
        (false, _, _) => None,
    };

    let webhook_secret = config
        .payment
        .kirvano_token()
        .map(|token| SecretString::new(token.to_string()));

    Ok(AppState {
        auth_gateway,
        webhook_handler: Arc::new(HandlePaymentWebhookHandler::new(webhook_secret, store)),
        dashboard_handler: GetDashboardOverviewHandler::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_config_builds_degraded_state() {
        let state = build_state(&AppConfig::default()).await.unwrap();
        assert!(state.auth_gateway.is_none());
    }

    #[tokio::test]
    async fn auth_without_database_leaves_gateway_unset() {
        let mut config = AppConfig::default();
        config.auth.supabase_url = Some("https://project.supabase.co".to_string());
        config.auth.supabase_anon_key = Some("anon".to_string());

        let state = build_state(&config).await.unwrap();
        assert!(state.auth_gateway.is_none());
    }
}
