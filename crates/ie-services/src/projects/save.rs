//! Save dispatch: create when the draft has no id, update otherwise

use ie_contracts::EditMode;
use ie_core::IeResult;
use ie_models::Project;
use ie_store::ProjectRepository;

use super::{CreateProjectService, SavedProject, UpdateProjectService};
use crate::result::ServiceResult;

pub struct SaveProjectService<'a> {
    store: &'a dyn ProjectRepository,
    mode: EditMode,
}

impl<'a> SaveProjectService<'a> {
    pub fn new(store: &'a dyn ProjectRepository) -> Self {
        Self {
            store,
            mode: EditMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: EditMode) -> Self {
        self.mode = mode;
        self
    }

    /// A realigning save must produce a new record; one with an id is rejected
    pub async fn call(&self, draft: Project) -> IeResult<ServiceResult<SavedProject>> {
        if draft.id.is_empty() {
            CreateProjectService::new(self.store).call(draft).await
        } else {
            UpdateProjectService::with_mode(self.store, self.mode)
                .call(draft)
                .await
        }
    }
}
