//! Completion provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// Trait for chat-completion backends.
///
/// Implementations provide access to a concrete service (OpenAI-compatible
/// HTTP endpoints, or a scripted double in tests).
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Provider name (e.g. "openai")
    fn name(&self) -> &str;
}
