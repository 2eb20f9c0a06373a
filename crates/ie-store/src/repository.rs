//! Repository trait and errors

use async_trait::async_trait;
use ie_core::{IeError, IeResult};
use ie_models::{Entity, Project};

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The mutation itself refused the change
    #[error(transparent)]
    Rejected(#[from] IeError),
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<RepositoryError> for IeError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => IeError::not_found(Project::TYPE_NAME, id),
            RepositoryError::Conflict(message) => IeError::Conflict { message },
            RepositoryError::Rejected(inner) => inner,
            other => IeError::Storage(other.to_string()),
        }
    }
}

/// Computes the replacement for a stored record
///
/// Runs while the store's write lock is held.
pub type ProjectMutation<'a> = Box<dyn FnOnce(&Project) -> IeResult<Project> + Send + 'a>;

/// Store of project records
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All records in display order
    async fn list(&self) -> RepositoryResult<Vec<Project>>;

    /// Find a record by its internal id
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Project>>;

    /// Number of records
    async fn count(&self) -> RepositoryResult<usize>;

    /// Prepend a record. Its id must be non-empty and unused.
    async fn insert(&self, project: Project) -> RepositoryResult<Project>;

    /// Replace record `id` with `mutate(stored)`, keeping its position
    async fn update(&self, id: &str, mutate: ProjectMutation<'_>) -> RepositoryResult<Project>;

    /// Load initial records, in order, when the store is empty.
    /// Returns the number of records added.
    async fn seed(&self, projects: Vec<Project>) -> RepositoryResult<usize>;
}
