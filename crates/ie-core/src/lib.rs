//! # ie-core
//!
//! Core types, traits, and utilities for InsightEd RS.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - Common error types (`IeError`, `ValidationErrors`)
//! - Result type alias
//! - Core traits (`Identifiable`)
//! - Application configuration

pub mod config;
pub mod error;
pub mod traits;

pub use error::*;
pub use traits::*;

/// Standard Result type for InsightEd operations
pub type IeResult<T> = Result<T, IeError>;
