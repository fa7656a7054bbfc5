//! LLM gateway error taxonomy

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a single gateway call
///
/// The gateway never retries; orchestration layers convert every variant
/// into a deterministic fallback instead of propagating it to the caller.
#[derive(Debug, Error)]
pub enum LlmError {
    /// API key environment variable is missing or empty.
    /// Raised at client construction, before any network attempt.
    #[error("Missing API key: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("Unauthorized: the endpoint rejected the API key")]
    Unauthorized,

    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Configuration errors must be surfaced, not converted into fallbacks
    pub fn is_configuration(&self) -> bool {
        matches!(self, LlmError::MissingApiKey(_))
    }

    /// Whether a caller could reasonably try again later
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::RateLimited { .. } => true,
            LlmError::Server { .. } => true,
            LlmError::Timeout(_) => true,
            LlmError::Network(_) => true,
            LlmError::MissingApiKey(_) => false,
            LlmError::Unauthorized => false,
            LlmError::Api { .. } => false,
            LlmError::Protocol(_) => false,
            LlmError::Json(_) => false,
        }
    }

    /// Get the retry duration if this is a rate limit error
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LlmError::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}
