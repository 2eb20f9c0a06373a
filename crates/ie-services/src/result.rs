//! Service result type

use ie_core::error::ValidationErrors;

/// Outcome of a service call that passed the storage layer
///
/// A failure carries contract errors. A success may carry a message for the
/// caller, such as a consistency warning.
#[derive(Debug, Clone)]
pub struct ServiceResult<T> {
    success: bool,
    result: Option<T>,
    errors: ValidationErrors,
    message: Option<String>,
}

impl<T> ServiceResult<T> {
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            errors: ValidationErrors::new(),
            message: None,
        }
    }

    pub fn failure(errors: ValidationErrors) -> Self {
        Self {
            success: false,
            result: None,
            errors,
            message: None,
        }
    }

    /// Failure with a single field error
    pub fn failure_with_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        Self::failure(errors)
    }

    pub fn failure_with_base_error(message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add_base(message);
        Self::failure(errors)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Split into the value (or errors) and the message
    pub fn into_parts(self) -> (Result<T, ValidationErrors>, Option<String>) {
        let outcome = match (self.success, self.result) {
            (true, Some(value)) => Ok(value),
            (true, None) => {
                let mut errors = ValidationErrors::new();
                errors.add_base("Service succeeded but no result was returned");
                Err(errors)
            }
            (false, _) => Err(self.errors),
        };
        (outcome, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_result() {
        let result = ServiceResult::success(42).with_message("saved");
        assert!(result.is_success());
        assert_eq!(result.result(), Some(&42));
        assert_eq!(result.message(), Some("saved"));
    }

    #[test]
    fn test_failure_result() {
        let result: ServiceResult<i32> =
            ServiceResult::failure_with_error("accomplishmentPercentage", "must be between 0 and 100");
        assert!(result.is_failure());
        assert!(result.result().is_none());
        assert!(result.errors().has_error("accomplishmentPercentage"));
        assert_eq!(
            result.errors().full_messages(),
            vec!["accomplishmentPercentage must be between 0 and 100".to_string()]
        );
    }

    #[test]
    fn test_into_parts() {
        let (value, message) = ServiceResult::success("x").into_parts();
        assert_eq!(value, Ok("x"));
        assert!(message.is_none());

        let (value, _) = ServiceResult::<i32>::failure_with_base_error("nope").into_parts();
        assert_eq!(value.unwrap_err().base_errors, vec!["nope".to_string()]);
    }
}
