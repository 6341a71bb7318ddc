//! GetDashboardOverviewHandler - Query handler for the subscriber dashboard.
//!
//! Returns engagement stats and the featured content list. The content is a
//! fixed showcase; it is not read from the subscription store.

use crate::domain::dashboard::DashboardOverview;

/// Query for the dashboard overview.
#[derive(Debug, Clone, Default)]
pub struct GetDashboardOverviewQuery;

/// Result of successful dashboard overview query.
pub type GetDashboardOverviewResult = DashboardOverview;

/// Handler for retrieving dashboard overview.
#[derive(Debug, Clone, Default)]
pub struct GetDashboardOverviewHandler;

impl GetDashboardOverviewHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(&self, _query: GetDashboardOverviewQuery) -> GetDashboardOverviewResult {
        DashboardOverview::showcase().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_showcase() {
        let overview = GetDashboardOverviewHandler::new()
            .handle(GetDashboardOverviewQuery)
            .await;

        assert_eq!(overview.stats.total_views, 8547);
        assert_eq!(overview.featured.len(), 3);
        assert_eq!(overview.new_items().count(), 2);
    }
}
