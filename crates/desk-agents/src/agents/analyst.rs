//! The concrete analyst agent type.
//!
//! One struct covers both roles; the [`RoleProfile`] decides the
//! instructions, temperature, and whether memory is retained.

use crate::agents::profile::RoleProfile;
use crate::cache::CacheTiers;
use crate::config::DeskConfig;
use crate::executor::{AgentExecutor, ExecutorConfig};
use crate::prompts;
use crate::report::AgentReply;
use crate::tools::market_toolset;
use async_trait::async_trait;
use desk_core::ToolRegistry;
use desk_llm::{CompletionProvider, Message};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// A role-configured agent wrapping the executor loop
pub struct AnalystAgent {
    profile: RoleProfile,
    executor: AgentExecutor,
    tool_count: usize,
    memory: Option<Mutex<Vec<Message>>>,
}

impl AnalystAgent {
    /// Create an agent from a profile, a provider, and a tool registry
    pub fn new(
        profile: RoleProfile,
        provider: Arc<dyn CompletionProvider>,
        registry: Arc<ToolRegistry>,
        config: &DeskConfig,
    ) -> Self {
        let executor_config = ExecutorConfig {
            model: config.model.clone(),
            system_prompt: profile.instructions.clone(),
            max_tokens: config.max_tokens,
            temperature: profile.temperature,
            max_iterations: profile.max_iterations,
        };

        let tool_count = registry.len();
        let memory = profile.retain_memory.then(|| Mutex::new(Vec::new()));

        Self {
            profile,
            executor: AgentExecutor::new(provider, registry, executor_config),
            tool_count,
            memory,
        }
    }

    /// Create the Junior data-gathering agent with the standard market tools
    pub fn junior(
        provider: Arc<dyn CompletionProvider>,
        config: &DeskConfig,
        tiers: &CacheTiers,
    ) -> Self {
        let profile = RoleProfile::new(
            "Junior",
            prompts::JUNIOR_INSTRUCTIONS,
            config.junior_temperature,
            config.max_iterations,
        );
        let registry = Arc::new(ToolRegistry::with_tools(market_toolset(config, tiers)));
        Self::new(profile, provider, registry, config)
    }

    /// Create the Master analysis agent with the standard market tools
    pub fn master(
        provider: Arc<dyn CompletionProvider>,
        config: &DeskConfig,
        tiers: &CacheTiers,
    ) -> Self {
        let profile = RoleProfile::new(
            "Master",
            prompts::MASTER_INSTRUCTIONS,
            config.master_temperature,
            config.max_iterations,
        );
        let registry = Arc::new(ToolRegistry::with_tools(market_toolset(config, tiers)));
        Self::new(profile, provider, registry, config)
    }

    /// The agent's role name
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Number of tools this agent can call
    pub fn tool_count(&self) -> usize {
        self.tool_count
    }

    /// Run one request, never propagating an error.
    ///
    /// Failures come back as a failed [`AgentReply`] whose output carries an
    /// explanatory message, so callers can synthesize partial results.
    pub async fn run(&self, request: &str) -> AgentReply {
        info!(agent = %self.profile.name, request_length = request.len(), "Agent run started");

        let outcome = match &self.memory {
            Some(memory) => {
                let mut history = memory.lock().await;
                match self
                    .executor
                    .run_with_history(request, history.clone())
                    .await
                {
                    Ok((text, conversation)) => {
                        *history = conversation;
                        Ok(text)
                    }
                    Err(e) => Err(e),
                }
            }
            None => self.executor.run(request).await,
        };

        match outcome {
            Ok(output) => AgentReply::ok(&self.profile.name, request, output),
            Err(e) => {
                error!(agent = %self.profile.name, error = %e, "Agent run failed");
                AgentReply::failed(
                    &self.profile.name,
                    request,
                    format!("Error processing request: {e}"),
                )
            }
        }
    }

    /// Forget any retained conversation memory
    pub async fn clear_memory(&self) {
        if let Some(memory) = &self.memory {
            memory.lock().await.clear();
        }
    }
}

#[async_trait]
impl desk_core::Agent for AnalystAgent {
    async fn handle(&self, input: &str) -> desk_core::Result<String> {
        let reply = self.run(input).await;
        if reply.success {
            Ok(reply.output)
        } else {
            Err(desk_core::Error::Invocation(reply.output))
        }
    }

    fn name(&self) -> &str {
        &self.profile.name
    }
}
