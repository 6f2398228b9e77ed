//! Error types for desk-core

use thiserror::Error;

/// Result type alias for desk-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for agent and tool operations
#[derive(Error, Debug)]
pub enum Error {
    /// Agent or registry setup failed
    #[error("setup failed: {0}")]
    Setup(String),

    /// Agent invocation failed
    #[error("invocation failed: {0}")]
    Invocation(String),

    /// A tool rejected its input or failed during execution
    #[error("tool '{name}' failed: {reason}")]
    Tool { name: String, reason: String },

    /// Generic error message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a [`Error::Tool`] from a tool name and any displayable reason
    pub fn tool(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Tool {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Invocation("model unreachable".to_string());
        assert_eq!(err.to_string(), "invocation failed: model unreachable");

        let err = Error::tool("get_stock_price", "missing symbol");
        assert_eq!(
            err.to_string(),
            "tool 'get_stock_price' failed: missing symbol"
        );
    }
}
