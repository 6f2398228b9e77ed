//! Configuration for the analyst desk

use crate::error::{DeskError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_MODEL: &str = "gpt-4";

/// Configuration shared across agents, tools, and the coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Model identifier passed to the completion provider
    pub model: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Maximum agent loop iterations
    pub max_iterations: usize,

    /// Junior agent sampling temperature
    pub junior_temperature: f32,

    /// Master agent sampling temperature
    pub master_temperature: f32,

    /// Cache TTL for real-time data (quotes, history)
    pub cache_ttl_realtime: Duration,

    /// Cache TTL for fundamental data (company info)
    pub cache_ttl_fundamental: Duration,

    /// Request timeout duration for data providers
    pub request_timeout: Duration,

    /// Alpha Vantage API key (optional; enables the auxiliary quote tool)
    pub alpha_vantage_api_key: Option<String>,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 4096,
            max_iterations: 10,
            junior_temperature: 0.5,
            master_temperature: 0.7,
            cache_ttl_realtime: Duration::from_secs(60),
            cache_ttl_fundamental: Duration::from_secs(3600),
            request_timeout: Duration::from_secs(30),
            alpha_vantage_api_key: None,
        }
    }
}

impl DeskConfig {
    /// Create a new configuration builder
    pub fn builder() -> DeskConfigBuilder {
        DeskConfigBuilder::default()
    }

    /// Build a configuration from environment variables.
    ///
    /// Reads `OPENAI_MODEL`, `JUNIOR_AGENT_TEMPERATURE`,
    /// `MASTER_AGENT_TEMPERATURE`, `MAX_ITERATIONS`, and
    /// `ALPHA_VANTAGE_API_KEY`. Unset or unparsable variables keep their
    /// defaults.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder().with_env_api_key();

        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            builder = builder.model(model);
        }
        if let Some(temp) = env_f32("JUNIOR_AGENT_TEMPERATURE") {
            builder = builder.junior_temperature(temp);
        }
        if let Some(temp) = env_f32("MASTER_AGENT_TEMPERATURE") {
            builder = builder.master_temperature(temp);
        }
        if let Ok(max) = std::env::var("MAX_ITERATIONS") {
            if let Ok(max) = max.parse() {
                builder = builder.max_iterations(max);
            }
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(DeskError::Config("model must not be empty".to_string()));
        }
        if self.max_iterations == 0 {
            return Err(DeskError::Config(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        for (name, temp) in [
            ("junior_temperature", self.junior_temperature),
            ("master_temperature", self.master_temperature),
        ] {
            if !(0.0..=2.0).contains(&temp) {
                return Err(DeskError::Config(format!(
                    "{name} must be between 0.0 and 2.0, got {temp}"
                )));
            }
        }
        Ok(())
    }
}

fn env_f32(name: &str) -> Option<f32> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Builder for [`DeskConfig`]
#[derive(Debug, Default)]
pub struct DeskConfigBuilder {
    model: Option<String>,
    max_tokens: Option<usize>,
    max_iterations: Option<usize>,
    junior_temperature: Option<f32>,
    master_temperature: Option<f32>,
    cache_ttl_realtime: Option<Duration>,
    cache_ttl_fundamental: Option<Duration>,
    request_timeout: Option<Duration>,
    alpha_vantage_api_key: Option<String>,
}

impl DeskConfigBuilder {
    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the maximum agent loop iterations
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the Junior agent temperature
    pub fn junior_temperature(mut self, temperature: f32) -> Self {
        self.junior_temperature = Some(temperature);
        self
    }

    /// Set the Master agent temperature
    pub fn master_temperature(mut self, temperature: f32) -> Self {
        self.master_temperature = Some(temperature);
        self
    }

    /// Set cache TTL for real-time data
    pub fn cache_ttl_realtime(mut self, duration: Duration) -> Self {
        self.cache_ttl_realtime = Some(duration);
        self
    }

    /// Set cache TTL for fundamental data
    pub fn cache_ttl_fundamental(mut self, duration: Duration) -> Self {
        self.cache_ttl_fundamental = Some(duration);
        self
    }

    /// Set the request timeout for data providers
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Load the Alpha Vantage API key from `ALPHA_VANTAGE_API_KEY` when set
    pub fn with_env_api_key(mut self) -> Self {
        if let Ok(key) = std::env::var("ALPHA_VANTAGE_API_KEY") {
            self.alpha_vantage_api_key = Some(key);
        }
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<DeskConfig> {
        let defaults = DeskConfig::default();

        let config = DeskConfig {
            model: self.model.unwrap_or(defaults.model),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            max_iterations: self.max_iterations.unwrap_or(defaults.max_iterations),
            junior_temperature: self
                .junior_temperature
                .unwrap_or(defaults.junior_temperature),
            master_temperature: self
                .master_temperature
                .unwrap_or(defaults.master_temperature),
            cache_ttl_realtime: self.cache_ttl_realtime.unwrap_or(defaults.cache_ttl_realtime),
            cache_ttl_fundamental: self
                .cache_ttl_fundamental
                .unwrap_or(defaults.cache_ttl_fundamental),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            alpha_vantage_api_key: self.alpha_vantage_api_key,
        };

        config.validate()?;
        Ok(config)
    }
}
