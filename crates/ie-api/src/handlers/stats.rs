//! Dashboard statistics

use axum::{extract::State, Json};
use ie_models::DashboardStats;
use ie_services::queries::dashboard_stats;

use crate::error::ApiResult;
use crate::extractors::AppState;

/// GET /api/v1/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<DashboardStats>> {
    let stats = dashboard_stats(state.store.as_ref(), state.today()).await?;
    Ok(Json(stats))
}
