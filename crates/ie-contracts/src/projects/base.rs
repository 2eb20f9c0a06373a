//! Base contract for projects

use ie_core::error::ValidationErrors;
use ie_models::{Coordinates, Project};
use validator::Validate;

use crate::base::{Contract, ValidationResult};

const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 2200;

/// Range checks shared by every project save
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectBaseContract;

impl ProjectBaseContract {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_accomplishment(&self, percentage: i32, errors: &mut ValidationErrors) {
        if !(0..=100).contains(&percentage) {
            errors.add("accomplishmentPercentage", "must be between 0 and 100");
        }
    }

    pub fn validate_allocation(&self, allocation: f64, errors: &mut ValidationErrors) {
        if !allocation.is_finite() || allocation < 0.0 {
            errors.add("projectAllocation", "must be greater than or equal to 0");
        }
    }

    /// Zero means "not entered" and is accepted
    pub fn validate_year(&self, year: i32, errors: &mut ValidationErrors) {
        if year != 0 && !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            errors.add(
                "year",
                format!("must be between {} and {}", MIN_YEAR, MAX_YEAR),
            );
        }
    }

    pub fn validate_coordinates(
        &self,
        coordinates: Option<&Coordinates>,
        errors: &mut ValidationErrors,
    ) {
        let Some(coordinates) = coordinates else {
            return;
        };
        if let Err(field_errors) = coordinates.validate() {
            for field in field_errors.field_errors().keys() {
                errors.add("coordinates", format!("{} is out of range", field));
            }
        }
    }
}

impl Contract<Project> for ProjectBaseContract {
    fn validate(&self, entity: &Project) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        self.validate_accomplishment(entity.accomplishment_percentage, &mut errors);
        self.validate_allocation(entity.project_allocation, &mut errors);
        self.validate_year(entity.year, &mut errors);
        self.validate_coordinates(entity.coordinates.as_ref(), &mut errors);

        errors.into_result()
    }
}
