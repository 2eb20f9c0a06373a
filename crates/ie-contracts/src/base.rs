//! Base contract system

use ie_core::error::ValidationErrors;
use std::collections::BTreeSet;

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;

    /// Check if an attribute is writable
    fn is_writable(&self, _attribute: &str) -> bool {
        true
    }
}

/// Change tracking for update contracts
#[derive(Debug, Default, Clone)]
pub struct ChangeTracker {
    changed_attributes: BTreeSet<String>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_changed(&mut self, attribute: impl Into<String>) {
        self.changed_attributes.insert(attribute.into());
    }

    pub fn is_changed(&self, attribute: &str) -> bool {
        self.changed_attributes.contains(attribute)
    }

    pub fn is_empty(&self) -> bool {
        self.changed_attributes.is_empty()
    }

    /// Changed attributes in name order
    pub fn changed_attributes(&self) -> impl Iterator<Item = &str> {
        self.changed_attributes.iter().map(String::as_str)
    }
}
