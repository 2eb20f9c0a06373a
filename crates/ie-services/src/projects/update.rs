//! Update service for projects

use ie_contracts::base::Contract;
use ie_contracts::projects::UpdateProjectContract;
use ie_contracts::EditMode;
use ie_core::{IeError, IeResult};
use ie_models::Project;
use ie_store::ProjectRepository;
use tracing::info;

use super::{consistency_warning, SavedProject};
use crate::result::ServiceResult;

/// Service for replacing a stored project with an edited draft
///
/// Runs entirely under the store's write lock: the stored record is read,
/// attributes the status policy does not allow are restored from it, the
/// result is validated, and the record is replaced in place.
pub struct UpdateProjectService<'a> {
    store: &'a dyn ProjectRepository,
    mode: EditMode,
}

impl<'a> UpdateProjectService<'a> {
    pub fn new(store: &'a dyn ProjectRepository) -> Self {
        Self {
            store,
            mode: EditMode::default(),
        }
    }

    pub fn with_mode(store: &'a dyn ProjectRepository, mode: EditMode) -> Self {
        Self { store, mode }
    }

    pub async fn call(&self, draft: Project) -> IeResult<ServiceResult<SavedProject>> {
        if draft.id.is_empty() {
            return Ok(ServiceResult::failure_with_base_error(
                "Cannot update a new project",
            ));
        }

        let id = draft.id.clone();
        let mode = self.mode;
        let mut ignored = Vec::new();

        let outcome = self
            .store
            .update(
                &id,
                Box::new(|stored: &Project| {
                    let mut draft = draft;
                    let contract = UpdateProjectContract::new(stored, &draft, mode);
                    ignored = contract.restore_unwritable(&mut draft);
                    contract.validate(&draft)?;
                    Ok(draft)
                }),
            )
            .await;

        let project = match outcome.map_err(IeError::from) {
            Ok(project) => project,
            Err(IeError::Validation(errors)) => return Ok(ServiceResult::failure(errors)),
            Err(e) => return Err(e),
        };

        info!(project_id = %project.id, ignored = ignored.len(), "Project updated");

        let warning = consistency_warning(&project);
        let mut result = ServiceResult::success(SavedProject {
            project,
            created: false,
            ignored,
        });
        if let Some(warning) = warning {
            result = result.with_message(warning);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projects::CreateProjectService;
    use chrono::NaiveDate;
    use ie_models::ProjectStatus;
    use ie_store::MemoryProjectStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn create(store: &MemoryProjectStore, status: ProjectStatus) -> Project {
        let mut draft = Project::new_draft(date(2025, 1, 1));
        draft.school_name = "Mabolo ES".into();
        draft.region = "Region VII".into();
        draft.project_allocation = 4_000_000.0;
        draft.target_completion_date = Some(date(2025, 9, 30));
        draft.status = status;
        if status == ProjectStatus::Completed {
            draft.accomplishment_percentage = 100;
        }
        let result = CreateProjectService::new(store).call(draft).await.unwrap();
        result.result().unwrap().project.clone()
    }

    #[tokio::test]
    async fn test_update_with_unchanged_draft_is_idempotent() {
        let store = MemoryProjectStore::new();
        let created = create(&store, ProjectStatus::NotYetStarted).await;

        let result = UpdateProjectService::new(&store)
            .call(created.clone())
            .await
            .unwrap();
        let saved = result.result().unwrap();
        assert_eq!(saved.project, created);
        assert!(saved.ignored.is_empty());
        assert_eq!(store.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_completed_ignores_basic_info() {
        let store = MemoryProjectStore::new();
        let created = create(&store, ProjectStatus::Completed).await;

        let mut draft = created.clone();
        draft.school_name = "Renamed ES".into();
        draft.region = "Region VIII".into();
        draft.actual_completion_date = Some(date(2025, 9, 1));

        let result = UpdateProjectService::new(&store).call(draft).await.unwrap();
        let saved = result.result().unwrap();
        assert_eq!(saved.ignored, vec!["region".to_string(), "schoolName".to_string()]);
        assert_eq!(saved.project.school_name, "Mabolo ES");
        assert_eq!(saved.project.actual_completion_date, Some(date(2025, 9, 1)));

        let stored = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.region, "Region VII");
    }

    #[tokio::test]
    async fn test_reopening_completed_keeps_basic_info() {
        let store = MemoryProjectStore::new();
        let created = create(&store, ProjectStatus::Completed).await;

        let mut draft = created.clone();
        draft.status = ProjectStatus::Ongoing;
        draft.school_name = "Renamed ES".into();

        let result = UpdateProjectService::new(&store).call(draft).await.unwrap();
        let saved = result.result().unwrap();
        assert_eq!(saved.ignored, vec!["schoolName".to_string()]);
        assert_eq!(saved.project.status, ProjectStatus::Ongoing);
        assert_eq!(saved.project.school_name, "Mabolo ES");
    }

    #[tokio::test]
    async fn test_close_out_from_ongoing() {
        let store = MemoryProjectStore::new();
        let mut created = create(&store, ProjectStatus::Ongoing).await;
        created.accomplishment_percentage = 95;
        UpdateProjectService::new(&store).call(created.clone()).await.unwrap();

        let mut draft = created.clone();
        draft.status = ProjectStatus::Completed;
        draft.accomplishment_percentage = 100;

        let result = UpdateProjectService::new(&store).call(draft).await.unwrap();
        assert!(result.message().is_none());
        let saved = result.result().unwrap();
        assert!(saved.ignored.is_empty());
        assert_eq!(saved.project.status, ProjectStatus::Completed);
        assert_eq!(saved.project.accomplishment_percentage, 100);
    }

    #[tokio::test]
    async fn test_update_keeps_position() {
        let store = MemoryProjectStore::new();
        let older = create(&store, ProjectStatus::NotYetStarted).await;
        create(&store, ProjectStatus::NotYetStarted).await;

        let mut draft = older.clone();
        draft.contractor_name = "New Contractor".into();
        UpdateProjectService::new(&store).call(draft).await.unwrap();

        let list = store.list().await.unwrap();
        assert_eq!(list[1].id, older.id);
        assert_eq!(list[1].contractor_name, "New Contractor");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let store = MemoryProjectStore::new();
        let mut draft = Project::new_draft(date(2025, 1, 1));
        draft.id = "missing".into();

        let err = UpdateProjectService::new(&store).call(draft).await.unwrap_err();
        assert!(matches!(err, IeError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_record() {
        let store = MemoryProjectStore::new();
        let created = create(&store, ProjectStatus::Ongoing).await;

        let mut draft = created.clone();
        draft.accomplishment_percentage = 140;

        let result = UpdateProjectService::new(&store).call(draft).await.unwrap();
        assert!(result.is_failure());
        assert!(result.errors().has_error("accomplishmentPercentage"));
        assert_eq!(store.find_by_id(&created.id).await.unwrap().unwrap(), created);
    }
}
