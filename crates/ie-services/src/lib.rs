//! # ie-services
//!
//! Project lifecycle services: create, update, save, realign, location
//! capture, and attachments, plus list queries and dashboard statistics.
//!
//! Services validate through `ie-contracts` and persist through an
//! [`ie_store::ProjectRepository`]. Contract failures come back as a failed
//! [`ServiceResult`]; missing records and storage faults are `IeError`s.

pub mod projects;
pub mod queries;
pub mod result;

pub use result::ServiceResult;
