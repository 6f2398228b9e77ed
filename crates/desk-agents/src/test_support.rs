//! Shared test doubles for executor, agent, and coordinator tests

use async_trait::async_trait;
use desk_core::Tool;
use desk_llm::{CompletionProvider, CompletionRequest, CompletionResponse, LlmError};
use serde_json::{Value, json};
use std::sync::Mutex;

/// Completion provider replaying a fixed script of responses.
///
/// Records every request it receives; `request(n)` retrieves the nth one
/// for assertions on what the executor actually sent.
pub struct ScriptedProvider {
    responses: Mutex<Vec<CompletionResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<CompletionResponse>) -> Self {
        let mut responses = responses;
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of completion calls made so far
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The nth request received, panicking when out of range
    pub fn request(&self, n: usize) -> CompletionRequest {
        self.requests.lock().unwrap()[n].clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| LlmError::RequestFailed("script exhausted".to_string()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Completion provider that always fails
pub struct FailingProvider;

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, LlmError> {
        Err(LlmError::RequestFailed("provider unavailable".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Trivial tool echoing the requested symbol back as a quote
pub struct EchoQuoteTool;

#[async_trait]
impl Tool for EchoQuoteTool {
    async fn execute(&self, params: Value) -> desk_core::Result<Value> {
        let symbol = params
            .get("symbol")
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN");
        Ok(json!({"symbol": symbol, "price": 100.0}))
    }

    fn name(&self) -> &str {
        "echo_quote"
    }

    fn description(&self) -> &str {
        "Echo a fixed quote for a symbol"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {"type": "string"}
            },
            "required": ["symbol"]
        })
    }
}
