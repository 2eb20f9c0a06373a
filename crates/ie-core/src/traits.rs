//! Core traits shared by models, contracts, and services

/// Trait for entities that carry an opaque string identifier
///
/// An empty identifier means the entity has not been persisted yet.
pub trait Identifiable {
    fn id(&self) -> &str;

    fn is_persisted(&self) -> bool {
        !self.id().is_empty()
    }

    fn is_new_record(&self) -> bool {
        !self.is_persisted()
    }
}

/// Base trait for all domain entities
pub trait Entity: Identifiable + Send + Sync {
    /// Human-readable type name for error messages
    const TYPE_NAME: &'static str;
}
