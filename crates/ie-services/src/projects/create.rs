//! Create service for projects

use ie_contracts::base::Contract;
use ie_contracts::projects::CreateProjectContract;
use ie_core::IeResult;
use ie_models::Project;
use ie_store::ProjectRepository;
use tracing::info;
use uuid::Uuid;

use super::{consistency_warning, SavedProject};
use crate::result::ServiceResult;

/// Service for creating projects
///
/// The draft must have an empty id. On success the record gets a fresh
/// UUID and is placed first in the store.
pub struct CreateProjectService<'a> {
    store: &'a dyn ProjectRepository,
}

impl<'a> CreateProjectService<'a> {
    pub fn new(store: &'a dyn ProjectRepository) -> Self {
        Self { store }
    }

    pub async fn call(&self, draft: Project) -> IeResult<ServiceResult<SavedProject>> {
        if let Err(errors) = CreateProjectContract::new().validate(&draft) {
            return Ok(ServiceResult::failure(errors));
        }

        let mut project = draft;
        project.id = Uuid::new_v4().to_string();
        let project = self.store.insert(project).await?;

        info!(project_id = %project.id, school = %project.school_name, "Project created");

        let warning = consistency_warning(&project);
        let mut result = ServiceResult::success(SavedProject {
            project,
            created: true,
            ignored: Vec::new(),
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
    use chrono::NaiveDate;
    use ie_models::ProjectStatus;
    use ie_store::MemoryProjectStore;

    fn draft(school: &str) -> Project {
        let mut p = Project::new_draft(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        p.school_name = school.into();
        p
    }

    #[tokio::test]
    async fn test_create_assigns_uuid_and_prepends() {
        let store = MemoryProjectStore::new();
        let service = CreateProjectService::new(&store);

        let first = service.call(draft("First")).await.unwrap();
        let second = service.call(draft("Second")).await.unwrap();
        assert!(first.is_success());

        let saved = second.result().unwrap();
        assert!(saved.created);
        assert!(Uuid::parse_str(&saved.project.id).is_ok());

        let list = store.list().await.unwrap();
        assert_eq!(list[0].school_name, "Second");
        assert_eq!(list[1].school_name, "First");
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_values() {
        let store = MemoryProjectStore::new();
        let mut p = draft("Bad");
        p.accomplishment_percentage = 120;

        let result = CreateProjectService::new(&store).call(p).await.unwrap();
        assert!(result.is_failure());
        assert!(result.errors().has_error("accomplishmentPercentage"));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_inconsistent_status_is_saved_with_warning() {
        let store = MemoryProjectStore::new();
        let mut p = draft("Warned");
        p.status = ProjectStatus::Ongoing;
        p.accomplishment_percentage = 100;

        let result = CreateProjectService::new(&store).call(p).await.unwrap();
        assert!(result.is_success());
        assert!(result.message().unwrap().contains("100%"));
    }
}
