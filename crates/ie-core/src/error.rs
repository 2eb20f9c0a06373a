//! Core error types for InsightEd RS
//!
//! Field-level validation errors are collected the same way for every layer, so
//! the API can report all problems with a draft in one response.

use std::collections::BTreeMap;
use thiserror::Error;

/// Core error type for all InsightEd operations
#[derive(Error, Debug)]
pub enum IeError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Conflict: {message}")]
    Conflict { message: String },
}

/// Validation errors collection
///
/// Field errors are kept in a sorted map so `full_messages` is deterministic.
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("Validation errors: {}", self.full_messages().join(", "))]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: BTreeMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// HTTP status code mapping for errors
impl IeError {
    pub fn not_found(entity: &'static str, value: impl Into<String>) -> Self {
        IeError::NotFound {
            entity,
            field: "id",
            value: value.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            IeError::NotFound { .. } => 404,
            IeError::Validation(_) => 422,
            IeError::Conflict { .. } => 409,
            IeError::Storage(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            IeError::NotFound { .. } => "not_found",
            IeError::Validation(_) => "validation_failed",
            IeError::Storage(_) => "storage_error",
            IeError::Conflict { .. } => "conflict",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_messages_are_sorted_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("projectAllocation", "must not be negative");
        errors.add("accomplishmentPercentage", "must be between 0 and 100");
        errors.add_base("draft is invalid");

        assert_eq!(
            errors.full_messages(),
            vec![
                "draft is invalid".to_string(),
                "accomplishmentPercentage must be between 0 and 100".to_string(),
                "projectAllocation must not be negative".to_string(),
            ]
        );
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationErrors::new();
        a.add("year", "is invalid");
        let mut b = ValidationErrors::new();
        b.add("year", "is too small");
        b.add_base("oops");

        a.merge(b);
        assert_eq!(a.get("year").map(Vec::len), Some(2));
        assert_eq!(a.base_errors, vec!["oops".to_string()]);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(IeError::not_found("Project", "abc").status_code(), 404);
        assert_eq!(
            IeError::Validation(ValidationErrors::new()).status_code(),
            422
        );
        assert_eq!(
            IeError::Conflict {
                message: "busy".into()
            }
            .error_code(),
            "conflict"
        );
    }
}
