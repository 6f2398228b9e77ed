//! Multi-agent financial query pipeline.
//!
//! Queries are classified by keyword complexity and routed by the
//! [`Coordinator`] to a Junior data-gathering agent, a Master analysis
//! agent, or both. Agents drive an LLM tool-use loop over market data
//! tools backed by Yahoo Finance (and optionally Alpha Vantage), with a
//! TTL cache in front of the providers.
//!
//! # Example
//!
//! ```no_run
//! use desk_agents::{Coordinator, DeskConfig};
//! use desk_llm::OpenAiProvider;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DeskConfig::from_env()?;
//! let provider = Arc::new(OpenAiProvider::from_env()?);
//! let coordinator = Coordinator::setup(provider, &config);
//!
//! let report = coordinator.orchestrate("comprehensive analysis of AAPL").await;
//! println!("{}", report.output);
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod api;
pub mod cache;
pub mod classifier;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod executor;
pub mod indicators;
pub mod prompts;
pub mod report;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_support;

pub use agents::{AnalystAgent, RoleProfile};
pub use cache::{CacheKey, CacheTiers, MarketCache};
pub use classifier::{Complexity, classify, extract_symbols};
pub use config::{DeskConfig, DeskConfigBuilder};
pub use coordinator::{Coordinator, DeskStatus};
pub use error::{DeskError, Result};
pub use executor::{AgentExecutor, ExecutorConfig};
pub use indicators::{Candle, TechnicalReport, Trend};
pub use report::{AgentReply, DeskReport};
