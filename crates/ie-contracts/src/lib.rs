//! # ie-contracts
//!
//! Status policy and contract validation for InsightEd RS.
//!
//! The [`policy`] module decides, per project status, which field groups are
//! shown and which are editable. Contracts in [`projects`] validate drafts
//! before they are saved and use the policy to decide which attributes an
//! update may write.

pub mod base;
pub mod policy;
pub mod projects;

pub use base::*;
pub use policy::{visibility_profile, EditMode, FieldGroup, GroupAccess, VisibilityProfile};
