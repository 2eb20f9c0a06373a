//! Update contract for projects
//!
//! Writability follows the status policy for the stored record's status in
//! normal mode, so changing `status` never unlocks other fields in the same
//! save. Attributes the policy does not allow are restored from the stored
//! record rather than rejected.

use ie_core::error::ValidationErrors;
use ie_models::Project;
use tracing::debug;

use super::attributes;
use super::base::ProjectBaseContract;
use crate::base::{ChangeTracker, Contract, ValidationResult};
use crate::policy::{visibility_profile, EditMode, VisibilityProfile};

/// Contract for a draft replacing a stored record
pub struct UpdateProjectContract<'a> {
    base: ProjectBaseContract,
    stored: &'a Project,
    mode: EditMode,
    profile: VisibilityProfile,
    changes: ChangeTracker,
}

impl<'a> UpdateProjectContract<'a> {
    pub fn new(stored: &'a Project, draft: &Project, mode: EditMode) -> Self {
        Self {
            base: ProjectBaseContract::new(),
            stored,
            mode,
            profile: visibility_profile(stored.status, EditMode::default()),
            changes: attributes::diff(stored, draft),
        }
    }

    /// Restore every changed attribute the policy does not allow, returning their names
    pub fn restore_unwritable(&self, draft: &mut Project) -> Vec<String> {
        let ignored: Vec<String> = self
            .changes
            .changed_attributes()
            .filter(|attribute| !self.is_writable(attribute))
            .map(str::to_string)
            .collect();

        for attribute in &ignored {
            attributes::restore(draft, self.stored, attribute);
        }

        if !ignored.is_empty() {
            debug!(
                project_id = %self.stored.id,
                status = %self.stored.status,
                ignored = ?ignored,
                "Ignoring changes to non-editable attributes"
            );
        }

        ignored
    }

    fn validate_identity(&self, project: &Project, errors: &mut ValidationErrors) {
        if project.id != self.stored.id {
            errors.add("id", "does not match the stored project");
        }
    }

    fn validate_mode(&self, errors: &mut ValidationErrors) {
        if self.mode.realigning {
            errors.add_base("A realigned project must be saved as a new project");
        }
    }
}

impl<'a> Contract<Project> for UpdateProjectContract<'a> {
    fn validate(&self, entity: &Project) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_identity(entity, &mut errors);
        self.validate_mode(&mut errors);
        if let Err(base_errors) = self.base.validate(entity) {
            errors.merge(base_errors);
        }

        errors.into_result()
    }

    fn is_writable(&self, attribute: &str) -> bool {
        attribute != "id" && self.profile.is_writable(attribute)
    }
}
