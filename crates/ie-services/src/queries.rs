//! Read-side queries over the project store

use chrono::NaiveDate;
use ie_core::IeResult;
use ie_models::{DashboardStats, Project, ProjectStatus};
use ie_store::ProjectRepository;
use serde::Deserialize;

/// Search and status filter for the project list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    /// Case-insensitive text matched against names, ids, region, division, and contractor
    #[serde(default, alias = "q")]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        let status_ok = self.status.map_or(true, |s| project.status == s);
        let search_ok = self
            .search
            .as_deref()
            .map_or(true, |needle| project.matches_search(needle));
        status_ok && search_ok
    }

    pub fn apply(&self, projects: Vec<Project>) -> Vec<Project> {
        projects.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Projects in store order, filtered
pub async fn list_projects(
    store: &dyn ProjectRepository,
    filter: &ProjectFilter,
) -> IeResult<Vec<Project>> {
    Ok(filter.apply(store.list().await?))
}

/// Projects whose region matches, ignoring case and surrounding whitespace
pub async fn projects_in_region(
    store: &dyn ProjectRepository,
    region: &str,
) -> IeResult<Vec<Project>> {
    let region = region.trim();
    Ok(store
        .list()
        .await?
        .into_iter()
        .filter(|p| p.region.trim().eq_ignore_ascii_case(region))
        .collect())
}

pub async fn dashboard_stats(
    store: &dyn ProjectRepository,
    today: NaiveDate,
) -> IeResult<DashboardStats> {
    let projects = store.list().await?;
    Ok(DashboardStats::compute(&projects, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ie_store::MemoryProjectStore;

    fn project(id: &str, region: &str, school: &str, status: ProjectStatus) -> Project {
        let mut p = Project::new_draft(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        p.id = id.into();
        p.region = region.into();
        p.school_name = school.into();
        p.status = status;
        p
    }

    fn store() -> MemoryProjectStore {
        MemoryProjectStore::with_projects(vec![
            project("1", "Region VII", "Lahug ES", ProjectStatus::Ongoing),
            project("2", "Region VII", "Talamban NHS", ProjectStatus::Completed),
            project("3", "NCR", "Quezon City HS", ProjectStatus::Ongoing),
        ])
    }

    #[tokio::test]
    async fn test_filter_by_search_and_status() {
        let store = store();
        let filter = ProjectFilter {
            search: Some("region vii".into()),
            status: Some(ProjectStatus::Ongoing),
        };
        let ids: Vec<String> = list_projects(&store, &filter)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[tokio::test]
    async fn test_empty_filter_keeps_order() {
        let store = store();
        let all = list_projects(&store, &ProjectFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].id, "3");
    }

    #[tokio::test]
    async fn test_projects_in_region() {
        let store = store();
        assert_eq!(projects_in_region(&store, " region vii ").await.unwrap().len(), 2);
        assert!(projects_in_region(&store, "CAR").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_stats() {
        let store = store();
        let stats = dashboard_stats(&store, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.ongoing, 2);
        assert_eq!(stats.completed, 1);
    }
}
