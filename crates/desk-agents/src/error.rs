//! Error types for the analyst-desk pipeline

use thiserror::Error;

/// Errors surfaced by the pipeline components.
///
/// These are caught at operation boundaries: tools fold them into
/// error-flagged results, agents fold them into failed replies, and the
/// coordinator never lets one escape past a report's success flag.
#[derive(Debug, Error)]
pub enum DeskError {
    /// Data not available for the requested symbol
    #[error("data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Indicator or statistics computation failed
    #[error("computation error: {0}")]
    Computation(String),

    /// A required sub-agent was never initialized
    #[error("{0} agent not initialized")]
    UninitializedAgent(String),

    /// Upstream data or model service failed
    #[error("external service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded for an upstream provider
    #[error("rate limit exceeded for {provider}")]
    RateLimited { provider: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Network or HTTP error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, DeskError>;

impl From<DeskError> for desk_core::Error {
    fn from(err: DeskError) -> Self {
        desk_core::Error::Invocation(err.to_string())
    }
}

impl From<desk_core::Error> for DeskError {
    fn from(err: desk_core::Error) -> Self {
        DeskError::Other(err.to_string())
    }
}

impl From<desk_llm::LlmError> for DeskError {
    fn from(err: desk_llm::LlmError) -> Self {
        DeskError::ExternalService(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DeskError::DataUnavailable {
            symbol: "AAPL".to_string(),
            reason: "no quotes returned".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "data not available for AAPL: no quotes returned"
        );

        let err = DeskError::UninitializedAgent("Junior".to_string());
        assert_eq!(err.to_string(), "Junior agent not initialized");
    }

    #[test]
    fn test_conversion_to_core() {
        let err = DeskError::Computation("too few observations".to_string());
        let core: desk_core::Error = err.into();
        match core {
            desk_core::Error::Invocation(msg) => assert!(msg.contains("computation error")),
            _ => panic!("expected Invocation variant"),
        }
    }
}
