//! API handlers

pub mod advisory;
pub mod export;
pub mod policy;
pub mod projects;
pub mod stats;

use ie_services::ServiceResult;

use crate::error::{ApiError, ApiResult};

/// Value and message of a successful service call; contract failures become 422
pub(crate) fn service_outcome<T>(result: ServiceResult<T>) -> ApiResult<(T, Option<String>)> {
    let (outcome, message) = result.into_parts();
    outcome
        .map(|value| (value, message))
        .map_err(ApiError::Validation)
}
