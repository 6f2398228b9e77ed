//! Agent execution loop.
//!
//! The executor drives the conversation with the completion provider:
//! 1. Call the model with the conversation and available tool definitions
//! 2. Check the stop reason
//! 3. On tool use, dispatch each call against the registry and loop back
//! 4. On completion, return the final text

use crate::error::Result;
use desk_core::ToolRegistry;
use desk_llm::{
    CompletionProvider, CompletionRequest, ContentBlock, Message, StopReason, ToolDefinition,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for one executor
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Model to use
    pub model: String,

    /// Role instructions sent as the system prompt
    pub system_prompt: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum loop iterations, guarding against runaway tool use
    pub max_iterations: usize,
}

/// Drives the model → tool call → model loop for one role
pub struct AgentExecutor {
    provider: Arc<dyn CompletionProvider>,
    registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    /// Create a new executor
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            registry,
            config,
        }
    }

    /// Run the loop for a single user message
    pub async fn run(&self, user_message: impl Into<String>) -> Result<String> {
        let conversation = vec![Message::user(user_message.into())];
        let (text, _) = self.run_conversation(conversation).await?;
        Ok(text)
    }

    /// Run the loop with prior conversation history.
    ///
    /// Returns the final text together with the full conversation, so callers
    /// retaining memory can carry it into the next request.
    pub async fn run_with_history(
        &self,
        user_message: impl Into<String>,
        history: Vec<Message>,
    ) -> Result<(String, Vec<Message>)> {
        let mut conversation = history;
        conversation.push(Message::user(user_message.into()));
        self.run_conversation(conversation).await
    }

    async fn run_conversation(
        &self,
        initial_conversation: Vec<Message>,
    ) -> Result<(String, Vec<Message>)> {
        let mut conversation = initial_conversation;
        let mut iteration = 0;

        loop {
            iteration += 1;
            if iteration > self.config.max_iterations {
                warn!(
                    max_iterations = self.config.max_iterations,
                    "Max iterations reached, stopping"
                );
                return Ok((
                    "Max iterations reached without completion".to_string(),
                    conversation,
                ));
            }

            let tools = self.build_tool_definitions();
            info!(
                iteration,
                model = %self.config.model,
                tool_count = tools.len(),
                "Agent iteration started"
            );

            let mut request_builder = CompletionRequest::builder(&self.config.model)
                .messages(conversation.clone())
                .system(self.config.system_prompt.clone())
                .max_tokens(self.config.max_tokens)
                .temperature(self.config.temperature);

            if !tools.is_empty() {
                request_builder = request_builder.tools(tools);
            }

            let response = self.provider.complete(request_builder.build()).await?;

            info!(
                stop_reason = ?response.stop_reason,
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "Model response received"
            );

            conversation.push(response.message.clone());

            match response.stop_reason {
                StopReason::EndTurn => {
                    let text = response.message.text().unwrap_or("No response").to_string();
                    info!(iteration, response_length = text.len(), "Agent completed");
                    return Ok((text, conversation));
                }

                StopReason::ToolUse => {
                    let tool_results = self.execute_tools(&response.message).await;

                    if tool_results.is_empty() {
                        warn!("No tool results despite ToolUse stop reason");
                        return Ok(("Tool execution failed".to_string(), conversation));
                    }

                    for result in tool_results {
                        conversation.push(result);
                    }
                }

                StopReason::MaxTokens => {
                    warn!("Hit max tokens in model response");
                    return Ok((
                        "Response truncated due to token limit".to_string(),
                        conversation,
                    ));
                }

                StopReason::StopSequence => {
                    let text = response.message.text().unwrap_or("No response").to_string();
                    return Ok((text, conversation));
                }
            }
        }
    }

    fn build_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.registry
            .list()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Execute every tool call in an assistant message.
    ///
    /// Failures, including calls to names missing from the registry, come
    /// back as error-flagged tool results so the model can react to them.
    async fn execute_tools(&self, message: &Message) -> Vec<Message> {
        let mut results = Vec::new();

        for tool_use in message.tool_uses() {
            if let ContentBlock::ToolUse { id, name, input } = tool_use {
                debug!(tool_name = %name, tool_id = %id, "Executing tool");

                let Some(tool) = self.registry.get(name) else {
                    warn!(tool_name = %name, "Tool not found in registry");
                    results.push(Message::tool_error(
                        id.clone(),
                        format!("Error: tool not found: {name}"),
                    ));
                    continue;
                };

                match tool.execute(input.clone()).await {
                    Ok(result) => {
                        let result_str =
                            serde_json::to_string(&result).unwrap_or_else(|_| result.to_string());
                        info!(
                            tool_name = %name,
                            result_length = result_str.len(),
                            "Tool execution succeeded"
                        );
                        results.push(Message::tool_result(id.clone(), result_str));
                    }
                    Err(e) => {
                        warn!(tool_name = %name, error = %e, "Tool execution failed");
                        results.push(Message::tool_error(id.clone(), format!("Error: {e}")));
                    }
                }
            }
        }

        results
    }
}
