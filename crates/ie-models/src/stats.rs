//! Dashboard statistics over a set of projects

use chrono::NaiveDate;
use serde::Serialize;

use crate::project::Project;
use crate::status::ProjectStatus;

/// Summary figures shown above the project table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub ongoing: usize,
    pub delayed: usize,
    /// `total - (completed + ongoing + delayed)`, floored at zero. A delayed
    /// ongoing project is counted in both `ongoing` and `delayed`, so this can
    /// come out lower than the number of projects outside those buckets.
    pub others: usize,
    pub total_allocation: f64,
}

impl DashboardStats {
    pub fn compute(projects: &[Project], today: NaiveDate) -> Self {
        let completed = projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Completed)
            .count();
        let ongoing = projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Ongoing)
            .count();
        let delayed = projects.iter().filter(|p| p.is_delayed(today)).count();

        Self {
            total: projects.len(),
            completed,
            ongoing,
            delayed,
            others: projects.len().saturating_sub(completed + ongoing + delayed),
            total_allocation: projects.iter().map(|p| p.project_allocation).sum(),
        }
    }
}
