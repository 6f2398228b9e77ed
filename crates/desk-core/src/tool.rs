//! Tool trait definition

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools the model can call.
///
/// Each tool carries a unique name, a description the model uses to decide
/// when to call it, and a JSON schema for its parameters.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with the given parameters
    ///
    /// `params` is the JSON object produced by the model and should match
    /// [`Tool::input_schema`]. The output is a JSON value; callers decide
    /// how to render it.
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name (unique within a registry)
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    fn input_schema(&self) -> Value;
}
