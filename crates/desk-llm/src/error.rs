//! Error types for completion operations

use thiserror::Error;

/// Result type for completion operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while talking to a completion provider
#[derive(Error, Debug)]
pub enum LlmError {
    /// API request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Invalid API key or authentication failed
    #[error("invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Rate limit exceeded
    #[error("rate limit exceeded: {0}")]
    RateLimited(String),

    /// Invalid request
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Model not found
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Unexpected response format
    #[error("unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}
