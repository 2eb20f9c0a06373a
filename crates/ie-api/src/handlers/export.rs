//! CSV download

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use ie_export::{export_filename, export_projects};
use tracing::info;

use crate::error::ApiResult;
use crate::extractors::AppState;

/// GET /api/v1/projects/export.csv
///
/// Every record in store order; list filters do not apply.
pub async fn export_csv(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let projects = state.store.list().await.map_err(ie_core::IeError::from)?;
    let body = export_projects(&projects);
    let filename = export_filename(state.today());

    info!(count = projects.len(), filename = %filename, "Exported projects");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    ))
}
