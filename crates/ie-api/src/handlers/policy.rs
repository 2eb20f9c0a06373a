//! Status policy lookup for editing surfaces

use axum::{
    extract::{Path, Query},
    Json,
};
use ie_contracts::{visibility_profile, EditMode, VisibilityProfile};
use ie_models::ProjectStatus;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct PolicyParams {
    #[serde(default)]
    pub realigning: bool,
}

#[derive(Debug, Serialize)]
pub struct PolicyResponse {
    pub status: ProjectStatus,
    pub realigning: bool,
    pub profile: VisibilityProfile,
}

/// GET /api/v1/policy/:status
pub async fn get_policy(
    Path(status): Path<String>,
    Query(params): Query<PolicyParams>,
) -> ApiResult<Json<PolicyResponse>> {
    let status: ProjectStatus = status
        .parse()
        .map_err(|e: ie_models::ParseStatusError| ApiError::bad_request(e.to_string()))?;
    let mode = EditMode {
        realigning: params.realigning,
    };

    Ok(Json(PolicyResponse {
        status,
        realigning: mode.realigning,
        profile: visibility_profile(status, mode),
    }))
}
