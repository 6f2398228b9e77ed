//! Core Agent trait definition

use crate::Result;
use async_trait::async_trait;

/// Core trait implemented by every agent in the system.
///
/// Input and output are kept as plain strings for maximum flexibility;
/// concrete implementations parse and format as needed. Agents that keep
/// conversation memory do so internally, which is why `handle` takes `&self`.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process a request and return the agent's textual response
    async fn handle(&self, input: &str) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;
}
