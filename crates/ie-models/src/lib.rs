//! # ie-models
//!
//! Domain models for InsightEd RS.
//!
//! The central entity is [`Project`], one school-infrastructure construction
//! project. Every model implements the core traits from `ie-core`.

pub use ie_core::traits::{Entity, Identifiable};

pub mod lenient;
pub mod project;
pub mod stats;
pub mod status;

// Re-exports for convenience
pub use project::{Coordinates, FileRef, Project};
pub use stats::DashboardStats;
pub use status::{ParseStatusError, ProjectStatus};
