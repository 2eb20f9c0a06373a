//! # ie-store
//!
//! Owned project store behind the [`ProjectRepository`] trait.
//!
//! Records are kept in display order, newest first. Every mutation runs
//! under a single write lock, so two saves never interleave.
//!
//! Two implementations are provided:
//! - [`MemoryProjectStore`]: in-process only, used by tests and ephemeral runs
//! - [`JsonFileProjectStore`]: same semantics, snapshotting to a JSON file after each mutation

mod file;
mod memory;
mod repository;
pub mod seed;
mod table;

pub use file::JsonFileProjectStore;
pub use memory::MemoryProjectStore;
pub use repository::{ProjectMutation, ProjectRepository, RepositoryError, RepositoryResult};
