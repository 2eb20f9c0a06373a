//! Create contract for projects

use ie_core::error::ValidationErrors;
use ie_models::Project;

use super::base::ProjectBaseContract;
use crate::base::{Contract, ValidationResult};

/// Contract for a draft that becomes a new record
///
/// All attributes are writable: a new record has no stored values to protect.
#[derive(Debug, Default)]
pub struct CreateProjectContract {
    base: ProjectBaseContract,
}

impl CreateProjectContract {
    pub fn new() -> Self {
        Self::default()
    }

    fn validate_unsaved(&self, project: &Project, errors: &mut ValidationErrors) {
        if !project.id.is_empty() {
            errors.add("id", "must be blank for a new project");
        }
    }
}

impl Contract<Project> for CreateProjectContract {
    fn validate(&self, entity: &Project) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_unsaved(entity, &mut errors);
        if let Err(base_errors) = self.base.validate(entity) {
            errors.merge(base_errors);
        }

        errors.into_result()
    }
}
