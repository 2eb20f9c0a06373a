//! API routes

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::extractors::AppState;
use crate::handlers::{advisory, export, policy, projects, stats};

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_router())
}

fn api_v1_router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_root))
        .nest("/projects", projects_router())
        .route("/policy/:status", get(policy::get_policy))
        .route("/stats", get(stats::get_stats))
        .route("/advisory/remarks", post(advisory::smart_remarks))
        .route("/reports/regional", post(advisory::regional_report))
}

fn projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list_projects).post(projects::save_project))
        .route("/export.csv", get(export::export_csv))
        .route(
            "/:id",
            get(projects::get_project).patch(projects::update_project),
        )
        .route("/:id/realign", post(projects::realign_project))
        .route("/:id/location", post(projects::capture_location))
        .route("/:id/attachments", post(projects::attach_file))
        .route("/:id/advisory/risk", post(advisory::analyze_risk))
}

async fn api_root() -> axum::Json<ApiRoot> {
    axum::Json(ApiRoot {
        type_name: "Root".into(),
        instance_name: "InsightEd RS".into(),
    })
}

#[derive(Serialize)]
struct ApiRoot {
    #[serde(rename = "_type")]
    type_name: String,
    #[serde(rename = "instanceName")]
    instance_name: String,
}
