//! JSON-file backed project store
//!
//! The whole list is written after each mutation: serialized to a sibling
//! temp file, then renamed over the snapshot. A failed write leaves both the
//! file and the in-memory list unchanged.

use async_trait::async_trait;
use ie_models::Project;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::repository::{ProjectMutation, ProjectRepository, RepositoryResult};
use crate::table;

pub struct JsonFileProjectStore {
    path: PathBuf,
    projects: RwLock<Vec<Project>>,
}

impl JsonFileProjectStore {
    /// Open the snapshot at `path`; a missing file starts an empty store
    pub async fn open(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let path = path.into();
        let projects = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<Project>>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        info!(path = %path.display(), count = projects.len(), "Opened project snapshot");

        Ok(Self {
            path,
            projects: RwLock::new(projects),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "projects.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn persist(&self, projects: &[Project]) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(projects)?;
        let temp = self.temp_path();
        fs::write(&temp, &bytes).await?;
        fs::rename(&temp, &self.path).await?;

        debug!(path = %self.path.display(), count = projects.len(), "Wrote project snapshot");
        Ok(())
    }
}

#[async_trait]
impl ProjectRepository for JsonFileProjectStore {
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
        let mut next = projects.clone();
        table::insert(&mut next, project.clone())?;
        self.persist(&next).await?;
        *projects = next;
        Ok(project)
    }

    async fn update(&self, id: &str, mutate: ProjectMutation<'_>) -> RepositoryResult<Project> {
        let mut projects = self.projects.write().await;
        let mut next = projects.clone();
        let updated = table::update(&mut next, id, mutate)?;
        self.persist(&next).await?;
        *projects = next;
        Ok(updated)
    }

    async fn seed(&self, projects: Vec<Project>) -> RepositoryResult<usize> {
        let mut rows = self.projects.write().await;
        let mut next = rows.clone();
        let added = table::seed(&mut next, projects)?;
        if added > 0 {
            self.persist(&next).await?;
            *rows = next;
        }
        Ok(added)
    }
}
