//! Seed data loading
//!
//! A seed file is a JSON array of projects in the same shape the API accepts.
//! Records without an id get a fresh one.

use ie_models::Project;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

use crate::repository::RepositoryResult;

/// Read a seed file, assigning ids where missing
pub async fn load_seed_file(path: impl AsRef<Path>) -> RepositoryResult<Vec<Project>> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let projects = parse_seed(&bytes)?;
    info!(path = %path.display(), count = projects.len(), "Loaded seed projects");
    Ok(projects)
}

pub fn parse_seed(bytes: &[u8]) -> RepositoryResult<Vec<Project>> {
    let mut projects: Vec<Project> = serde_json::from_slice(bytes)?;
    for project in &mut projects {
        if project.id.trim().is_empty() {
            project.id = Uuid::new_v4().to_string();
        }
    }
    Ok(projects)
}
