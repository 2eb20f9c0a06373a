//! In-memory project store

use async_trait::async_trait;
use ie_models::Project;
use tokio::sync::RwLock;

use crate::repository::{ProjectMutation, ProjectRepository, RepositoryResult};
use crate::table;

/// In-memory project store
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    projects: RwLock<Vec<Project>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `projects`, in the given order
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: RwLock::new(projects),
        }
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjectStore {
    async fn list(&self) -> RepositoryResult<Vec<Project>> {
        Ok(self.projects.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Project>> {
        let projects = self.projects.read().await;
        Ok(projects.iter().find(|p| p.id == id).cloned())
    }

    async fn count(&self) -> RepositoryResult<usize> {
        Ok(self.projects.read().await.len())
    }

    async fn insert(&self, project: Project) -> RepositoryResult<Project> {
        let mut projects = self.projects.write().await;
        table::insert(&mut projects, project.clone())?;
        Ok(project)
    }

    async fn update(&self, id: &str, mutate: ProjectMutation<'_>) -> RepositoryResult<Project> {
        let mut projects = self.projects.write().await;
        table::update(&mut projects, id, mutate)
    }

    async fn seed(&self, projects: Vec<Project>) -> RepositoryResult<usize> {
        let mut rows = self.projects.write().await;
        table::seed(&mut rows, projects)
    }
}
