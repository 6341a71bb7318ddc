//! In-memory analytics sink for tests.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::analytics::AnalyticsEvent;
use crate::domain::foundation::DomainError;
use crate::ports::AnalyticsSink;

/// Captures recorded events for assertions. Can be switched to fail.
#[derive(Debug, Default)]
pub struct InMemoryAnalyticsSink {
    events: RwLock<Vec<AnalyticsEvent>>,
    failure: RwLock<Option<DomainError>>,
}

impl InMemoryAnalyticsSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every write fails.
    pub fn failing(error: DomainError) -> Self {
        Self {
            events: RwLock::new(Vec::new()),
            failure: RwLock::new(Some(error)),
        }
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .read()
            .expect("InMemoryAnalyticsSink: events lock poisoned")
            .clone()
    }

    pub fn event_count(&self) -> usize {
        self.events
            .read()
            .expect("InMemoryAnalyticsSink: events lock poisoned")
            .len()
    }

    /// Checks if an event with `action` was recorded.
    pub fn has_action(&self, action: &str) -> bool {
        self.events
            .read()
            .expect("InMemoryAnalyticsSink: events lock poisoned")
            .iter()
            .any(|event| event.action.as_str() == action)
    }
}

#[async_trait]
impl AnalyticsSink for InMemoryAnalyticsSink {
    async fn record(&self, event: &AnalyticsEvent) -> Result<(), DomainError> {
        if let Some(error) = self
            .failure
            .read()
            .expect("InMemoryAnalyticsSink: failure lock poisoned")
            .as_ref()
        {
            return Err(error.clone());
        }
        self.events
            .write()
            .expect("InMemoryAnalyticsSink: events lock poisoned")
            .push(event.clone());
        Ok(())
    }
}
