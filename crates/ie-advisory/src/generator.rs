//! Text generation seam

use async_trait::async_trait;

use crate::error::AdvisoryError;

/// Prompt in, free text out
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`. An empty string is a valid answer.
    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError>;
}
