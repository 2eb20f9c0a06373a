//! Project API handlers

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use ie_contracts::{visibility_profile, EditMode, VisibilityProfile};
use ie_models::{Coordinates, Entity, Project};
use ie_services::projects::{
    realign, set_attributes::apply_patch, AttachProjectFileService, AttachmentKind,
    CaptureLocationService, LocationCapture, SaveProjectService, SavedProject,
    UpdateProjectService,
};
use ie_services::queries::{list_projects as query_projects, ProjectFilter};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::service_outcome;
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AppState, JsonBody};

/// GET /api/v1/projects
pub async fn list_projects(
    State(state): State<AppState>,
    filter: Result<Query<ProjectFilter>, QueryRejection>,
) -> ApiResult<Json<ProjectCollection>> {
    let Query(filter) = filter.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let total = state.store.count().await.map_err(ie_core::IeError::from)?;
    let elements = query_projects(state.store.as_ref(), &filter).await?;

    Ok(Json(ProjectCollection {
        total,
        count: elements.len(),
        elements,
    }))
}

/// GET /api/v1/projects/:id
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = find(&state, &id).await?;
    Ok(Json(ProjectResponse::new(project, EditMode::default())))
}

/// POST /api/v1/projects
///
/// Saves a draft: an empty id creates a record, an existing id replaces it.
/// `?realigning=true` marks a draft produced by the realign endpoint.
pub async fn save_project(
    State(state): State<AppState>,
    Query(params): Query<SaveParams>,
    JsonBody(draft): JsonBody<Project>,
) -> ApiResult<impl IntoResponse> {
    let mode = EditMode {
        realigning: params.realigning,
    };
    let result = SaveProjectService::new(state.store.as_ref())
        .with_mode(mode)
        .call(draft)
        .await?;
    let (saved, message) = service_outcome(result)?;

    let status = if saved.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(SaveResponse { saved, message })))
}

/// PATCH /api/v1/projects/:id
///
/// Attributes the project's status does not allow are kept at their stored
/// values and listed under `ignored`.
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<Value>,
) -> ApiResult<Json<SaveResponse>> {
    let stored = find(&state, &id).await?;
    let draft = apply_patch(&stored, &patch)?;

    let result = UpdateProjectService::new(state.store.as_ref())
        .call(draft)
        .await?;
    let (saved, message) = service_outcome(result)?;
    Ok(Json(SaveResponse { saved, message }))
}

/// POST /api/v1/projects/:id/realign
///
/// Returns an unsaved draft; nothing is stored.
pub async fn realign_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectResponse>> {
    let source = find(&state, &id).await?;
    let draft = realign(&source, state.today());
    Ok(Json(ProjectResponse::new(draft, EditMode::realigning())))
}

/// POST /api/v1/projects/:id/location
pub async fn capture_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<LocationBody>,
) -> ApiResult<Json<Project>> {
    let capture = match body {
        LocationBody::Granted {
            latitude,
            longitude,
            accuracy,
            captured_at,
        } => LocationCapture::Granted(Coordinates {
            latitude,
            longitude,
            accuracy,
            captured_at: captured_at.unwrap_or_else(Utc::now),
        }),
        LocationBody::Denied { reason } => LocationCapture::Denied {
            reason: reason.unwrap_or_else(|| "permission denied".to_string()),
        },
    };

    let result = CaptureLocationService::new(state.store.as_ref())
        .call(&id, capture)
        .await?;
    let (project, _) = service_outcome(result)?;
    Ok(Json(project))
}

/// POST /api/v1/projects/:id/attachments
pub async fn attach_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<AttachmentBody>,
) -> ApiResult<Json<Project>> {
    let result = AttachProjectFileService::new(state.store.as_ref())
        .call(&id, body.kind, &body.name)
        .await?;
    let (project, _) = service_outcome(result)?;
    Ok(Json(project))
}

pub(crate) async fn find(state: &AppState, id: &str) -> ApiResult<Project> {
    state
        .store
        .find_by_id(id)
        .await
        .map_err(ie_core::IeError::from)?
        .ok_or_else(|| ApiError::not_found(Project::TYPE_NAME, id))
}

// DTOs

#[derive(Debug, Serialize)]
pub struct ProjectCollection {
    /// Records in the store, before filtering
    pub total: usize,
    pub count: usize,
    pub elements: Vec<Project>,
}

/// A project with the field access its status allows
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub project: Project,
    #[serde(rename = "_visibility")]
    pub visibility: VisibilityProfile,
}

impl ProjectResponse {
    fn new(project: Project, mode: EditMode) -> Self {
        let visibility = visibility_profile(project.status, mode);
        Self {
            project,
            visibility,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    #[serde(flatten)]
    pub saved: SavedProject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveParams {
    #[serde(default)]
    pub realigning: bool,
}

/// Result of the host's location prompt
#[derive(Debug, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum LocationBody {
    Granted {
        latitude: f64,
        longitude: f64,
        accuracy: f64,
        #[serde(default, rename = "capturedAt")]
        captured_at: Option<DateTime<Utc>>,
    },
    Denied {
        #[serde(default)]
        reason: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
pub struct AttachmentBody {
    pub kind: AttachmentKind,
    pub name: String,
}
