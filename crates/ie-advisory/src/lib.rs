//! # ie-advisory
//!
//! Risk commentary, remark suggestions, and regional reports from a hosted
//! text-generation model.
//!
//! The model is an external collaborator: a prompt goes in, free text comes
//! back. [`AdvisoryService`] never returns an error. Failures, timeouts, and a
//! missing API key all turn into fixed fallback text, and concurrent calls
//! for the same record or region are refused with [`AdvisoryStatus::Busy`].

pub mod error;
pub mod gemini;
pub mod generator;
pub mod prompts;
pub mod service;

pub use error::AdvisoryError;
pub use gemini::GeminiClient;
pub use generator::TextGenerator;
pub use service::{AdvisoryReply, AdvisoryService, AdvisoryStatus};
