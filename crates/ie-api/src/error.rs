//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ie_core::error::ValidationErrors;
use ie_core::IeError;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::error;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound { resource: &'static str, id: String },
    Validation(ValidationErrors),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ApiError::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn identifier(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NotFound",
            ApiError::Validation(_) => "PropertyConstraintViolation",
            ApiError::BadRequest(_) => "InvalidRequestBody",
            ApiError::Conflict(_) => "Conflict",
            ApiError::Internal(_) => "InternalError",
        }
    }
}

impl From<IeError> for ApiError {
    fn from(err: IeError) -> Self {
        match err {
            IeError::NotFound { entity, value, .. } => ApiError::NotFound {
                resource: entity,
                id: value,
            },
            IeError::Validation(errors) => ApiError::Validation(errors),
            IeError::Conflict { message } => ApiError::Conflict(message),
            other => {
                error!(code = other.error_code(), error = %other, "Request failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error_identifier: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_identifier = format!("insighted:errors:{}", self.identifier());
        let body = match self {
            ApiError::NotFound { resource, id } => ErrorBody {
                error_identifier,
                message: format!("{} with id {} not found", resource, id),
                errors: None,
            },
            ApiError::Validation(errors) => ErrorBody {
                error_identifier,
                message: errors.full_messages().join(", "),
                errors: Some(errors.errors),
            },
            ApiError::BadRequest(message)
            | ApiError::Conflict(message)
            | ApiError::Internal(message) => ErrorBody {
                error_identifier,
                message,
                errors: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ie_error_mapping() {
        let err: ApiError = IeError::not_found("Project", "abc").into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let mut errors = ValidationErrors::new();
        errors.add("year", "must be between 1900 and 2200");
        let err: ApiError = IeError::Validation(errors).into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let err: ApiError = IeError::Storage("disk full".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
