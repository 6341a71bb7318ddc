//! HTTP handlers for dashboard endpoints.

use axum::{extract::State, response::IntoResponse, Json};

use crate::adapters::http::router::AppState;
use crate::application::handlers::GetDashboardOverviewQuery;

/// GET /api/dashboard - Engagement stats and featured content
pub async fn get_dashboard_overview(State(state): State<AppState>) -> impl IntoResponse {
    let overview = state
        .dashboard_handler
        .handle(GetDashboardOverviewQuery)
        .await;
    Json(overview)
}
