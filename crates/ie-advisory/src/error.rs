//! Advisory client errors

/// Why a generation call produced no text
///
/// These never leave the crate's service layer; they are logged and replaced
/// by fallback text.
#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Timed out after {0} seconds")]
    Timeout(u64),
}
