//! Provider-agnostic chat-completion layer for analyst-desk.
//!
//! This crate defines the neutral message and completion types the agents
//! speak, the [`CompletionProvider`] trait, and a concrete client for
//! OpenAI-compatible chat-completions APIs (including local deployments).

pub mod completion;
pub mod error;
pub mod messages;
pub mod openai;
pub mod provider;
pub mod tools;

pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LlmError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use provider::CompletionProvider;
pub use tools::ToolDefinition;
