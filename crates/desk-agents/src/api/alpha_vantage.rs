//! Alpha Vantage client, an auxiliary quote source.
//!
//! Only the GLOBAL_QUOTE endpoint is used. The free tier allows five
//! requests per minute, enforced here with a direct rate limiter.

use crate::error::{DeskError, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

const BASE_URL: &str = "https://www.alphavantage.co/query";

const DEFAULT_RATE_LIMIT: u32 = 5;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Alpha Vantage client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

impl AlphaVantageClient {
    /// Create a new client with an API key, a requests-per-minute limit,
    /// and an HTTP request timeout
    pub fn new(api_key: impl Into<String>, rate_limit: u32, timeout: Duration) -> Self {
        let per_minute = NonZeroU32::new(rate_limit)
            .or(NonZeroU32::new(DEFAULT_RATE_LIMIT))
            .unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.into(),
            rate_limiter,
        }
    }

    /// Create from the `ALPHA_VANTAGE_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ALPHA_VANTAGE_API_KEY").map_err(|_| {
            DeskError::Config("ALPHA_VANTAGE_API_KEY environment variable not set".to_string())
        })?;

        Ok(Self::new(api_key, DEFAULT_RATE_LIMIT, DEFAULT_TIMEOUT))
    }

    /// Fetch the GLOBAL_QUOTE payload for a symbol.
    ///
    /// Waits on the rate limiter before sending. A "Note" field in the
    /// response body means the upstream quota was hit; an "Error Message"
    /// field means the request itself was bad.
    pub async fn get_global_quote(&self, symbol: &str) -> Result<serde_json::Value> {
        self.rate_limiter.until_ready().await;

        let mut params = HashMap::new();
        params.insert("function", "GLOBAL_QUOTE");
        params.insert("symbol", symbol);
        params.insert("apikey", &self.api_key);

        let response = self.client.get(BASE_URL).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(DeskError::ExternalService(format!(
                "Alpha Vantage HTTP error: {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response.json().await?;

        if let Some(error) = data.get("Error Message") {
            return Err(DeskError::ExternalService(error.to_string()));
        }

        if data.get("Note").is_some() {
            return Err(DeskError::RateLimited {
                provider: "Alpha Vantage".to_string(),
            });
        }

        Ok(data)
    }
}
