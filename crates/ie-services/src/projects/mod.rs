//! Project services

mod attachments;
mod create;
mod location;
mod realign;
mod save;
pub mod set_attributes;
mod update;

pub use attachments::{AttachProjectFileService, AttachmentKind};
pub use create::CreateProjectService;
pub use location::{CaptureLocationService, LocationCapture};
pub use realign::realign;
pub use save::SaveProjectService;
pub use update::UpdateProjectService;

use ie_models::Project;
use serde::Serialize;
use tracing::warn;

/// A persisted project and what the save did with the draft
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProject {
    pub project: Project,
    /// True when the draft became a new record
    pub created: bool,
    /// Attributes the status policy did not allow; their stored values were kept
    pub ignored: Vec<String>,
}

/// Advisory warning when accomplishment and status disagree. Never blocks a save.
pub(crate) fn consistency_warning(project: &Project) -> Option<String> {
    if project.accomplishment_consistent() {
        return None;
    }
    warn!(
        project_id = %project.id,
        status = %project.status,
        accomplishment = project.accomplishment_percentage,
        "Accomplishment and status disagree"
    );
    Some(format!(
        "Accomplishment is {}% while status is {}",
        project.accomplishment_percentage, project.status
    ))
}
