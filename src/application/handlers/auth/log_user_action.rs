//! UserActionLogger - Best-effort analytics writes.
//!
//! Analytics never affects the outcome of the action being logged: failures
//! are logged with `tracing::warn!` and dropped.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::analytics::{AnalyticsEvent, UserAction};
use crate::domain::foundation::UserId;
use crate::ports::AnalyticsSink;

/// Command to log a user action.
#[derive(Debug, Clone)]
pub struct LogUserActionCommand {
    pub user_id: UserId,
    pub action: UserAction,
    pub page: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

impl From<LogUserActionCommand> for AnalyticsEvent {
    fn from(cmd: LogUserActionCommand) -> Self {
        let mut event = AnalyticsEvent::new(cmd.user_id, cmd.action);
        event.page = cmd.page;
        event.metadata = cmd.metadata;
        event
    }
}

/// Writes analytics events without ever failing the caller.
#[derive(Clone)]
pub struct UserActionLogger {
    sink: Arc<dyn AnalyticsSink>,
}

impl UserActionLogger {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self { sink }
    }

    /// Writes the event and waits for the outcome, swallowing any failure.
    pub async fn record(&self, event: AnalyticsEvent) {
        if let Err(e) = self.sink.record(&event).await {
            tracing::warn!(
                action = %event.action,
                user_id = %event.user_id,
                "Failed to record analytics event: {}",
                e
            );
        }
    }

    /// Writes the event on a detached task. The caller does not wait.
    ///
    /// The handle is returned for tests and shutdown paths that want to join.
    pub fn dispatch(&self, event: AnalyticsEvent) -> JoinHandle<()> {
        let logger = self.clone();
        tokio::spawn(async move { logger.record(event).await })
    }
}
