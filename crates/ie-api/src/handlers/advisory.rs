//! Model-backed commentary and reports
//!
//! Responses always carry text; a failed model call yields fallback text
//! with status `fallback`. A call for a record or region that is already in
//! flight is answered with 409.

use axum::{
    extract::{Path, State},
    Json,
};
use ie_advisory::AdvisoryReply;
use ie_models::Project;
use ie_services::queries::projects_in_region;
use serde::Deserialize;

use super::projects::find;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, JsonBody};

fn reply(reply: AdvisoryReply) -> ApiResult<Json<AdvisoryReply>> {
    if reply.is_busy() {
        return Err(ApiError::conflict(
            "An advisory request for this item is already in progress",
        ));
    }
    Ok(Json(reply))
}

/// POST /api/v1/projects/:id/advisory/risk
pub async fn analyze_risk(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AdvisoryReply>> {
    let project = find(&state, &id).await?;
    reply(state.advisory.analyze_risk(&project, state.today()).await)
}

/// POST /api/v1/advisory/remarks
///
/// Takes the draft being edited, saved or not.
pub async fn smart_remarks(
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<Project>,
) -> ApiResult<Json<AdvisoryReply>> {
    reply(state.advisory.smart_remarks(&draft).await)
}

#[derive(Debug, Deserialize)]
pub struct RegionalReportBody {
    pub region: String,
}

/// POST /api/v1/reports/regional
pub async fn regional_report(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegionalReportBody>,
) -> ApiResult<Json<AdvisoryReply>> {
    let region = body.region.trim();
    if region.is_empty() {
        return Err(ApiError::bad_request("region is required"));
    }

    let projects = projects_in_region(state.store.as_ref(), region).await?;
    reply(
        state
            .advisory
            .regional_report(region, &projects, state.today())
            .await,
    )
}
