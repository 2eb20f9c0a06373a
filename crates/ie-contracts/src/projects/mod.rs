//! Project contracts
//!
//! - [`ProjectBaseContract`]: range checks shared by create and update
//! - [`CreateProjectContract`]: drafts that become new records
//! - [`UpdateProjectContract`]: drafts replacing a stored record, filtered by the status policy

pub mod attributes;
mod base;
mod create;
mod update;

pub use base::ProjectBaseContract;
pub use create::CreateProjectContract;
pub use update::UpdateProjectContract;
