//! Shared state and request extractors

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use chrono::{NaiveDate, Utc};
use ie_advisory::AdvisoryService;
use ie_store::ProjectRepository;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProjectRepository>,
    pub advisory: Arc<AdvisoryService>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProjectRepository>, advisory: Arc<AdvisoryService>) -> Self {
        Self { store, advisory }
    }

    /// Calendar date used for status-as-of defaults, delay checks, and export names
    pub fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// JSON body whose rejections use the API error shape
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}
