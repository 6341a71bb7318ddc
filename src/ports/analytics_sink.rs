//! Analytics sink port.
//!
//! Write-only destination for user activity events. Callers treat every
//! failure as non-fatal.

use crate::domain::analytics::AnalyticsEvent;
use crate::domain::foundation::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    /// Appends one event.
    async fn record(&self, event: &AnalyticsEvent) -> Result<(), DomainError>;
}
