//! Auxiliary quote tool backed by Alpha Vantage.
//!
//! Registered only when an API key is configured.

use async_trait::async_trait;
use desk_core::Result as CoreResult;
use desk_core::Tool;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::AlphaVantageClient;
use crate::cache::{CacheKey, MarketCache};
use crate::error::Result;

/// Tool querying the Alpha Vantage GLOBAL_QUOTE endpoint
pub struct QuoteLookupTool {
    client: AlphaVantageClient,
    cache: MarketCache,
}

#[derive(Debug, Deserialize)]
struct QuoteLookupParams {
    symbol: String,
}

fn field<'a>(quote: &'a Value, key: &str) -> &'a str {
    quote.get(key).and_then(Value::as_str).unwrap_or("N/A")
}

impl QuoteLookupTool {
    /// Create a new quote lookup tool backed by the realtime cache tier
    pub fn new(client: AlphaVantageClient, cache: MarketCache) -> Self {
        Self { client, cache }
    }

    async fn fetch_quote(&self, params: QuoteLookupParams) -> Result<Value> {
        let symbol = params.symbol.to_uppercase();

        let cache_key = CacheKey::new(&symbol, "global_quote", json!({}));

        self.cache
            .get_or_fetch(cache_key, || async {
                let data = self.client.get_global_quote(&symbol).await?;
                let quote = data.get("Global Quote").cloned().unwrap_or(Value::Null);

                let report = format!(
                    "Alternative quote for {symbol}:\nPrice: {}\nChange: {}\nChange Percent: {}\nPrevious Close: {}\nLatest Trading Day: {}",
                    field(&quote, "05. price"),
                    field(&quote, "09. change"),
                    field(&quote, "10. change percent"),
                    field(&quote, "08. previous close"),
                    field(&quote, "07. latest trading day"),
                );

                Ok(json!({
                    "symbol": symbol,
                    "quote": quote,
                    "report": report,
                }))
            })
            .await
    }
}

#[async_trait]
impl Tool for QuoteLookupTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: QuoteLookupParams = serde_json::from_value(params)
            .map_err(|e| desk_core::Error::tool("quote_lookup", format!("invalid parameters: {e}")))?;

        let symbol = params.symbol.clone();
        self.fetch_quote(params)
            .await
            .map_err(|e| desk_core::Error::tool("quote_lookup", format!("{symbol}: {e}")))
    }

    fn name(&self) -> &str {
        "quote_lookup"
    }

    fn description(&self) -> &str {
        "Look up a quote for a ticker symbol from a secondary data provider. \
         Useful for cross-checking prices."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Stock ticker symbol (e.g., 'AAPL', 'GOOGL')"
                }
            },
            "required": ["symbol"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_tool_metadata() {
        let tool = QuoteLookupTool::new(
            AlphaVantageClient::new("test_key", 5, Duration::from_secs(30)),
            MarketCache::new(Duration::from_secs(60)),
        );

        assert_eq!(tool.name(), "quote_lookup");
        assert!(!tool.description().is_empty());
    }

    #[test]
    fn test_missing_quote_fields_render_as_na() {
        let quote = json!({"05. price": "191.50"});
        assert_eq!(field(&quote, "05. price"), "191.50");
        assert_eq!(field(&quote, "09. change"), "N/A");
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_execute() {
        let client = AlphaVantageClient::from_env().unwrap();
        let tool = QuoteLookupTool::new(client, MarketCache::new(Duration::from_secs(60)));
        let data = tool.execute(json!({"symbol": "AAPL"})).await.unwrap();
        assert_eq!(data["symbol"], "AAPL");
    }
}
