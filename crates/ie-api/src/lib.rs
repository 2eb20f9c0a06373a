//! # ie-api
//!
//! REST API for InsightEd RS, mounted under `/api/v1`.
//!
//! Handlers are thin: they extract input, call `ie-services`, `ie-export`, or
//! `ie-advisory`, and map results to JSON. All error bodies share the shape
//! produced by [`error::ApiError`].

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
