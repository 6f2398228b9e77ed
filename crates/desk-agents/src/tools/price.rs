//! Tool for looking up the current price of a symbol

use async_trait::async_trait;
use desk_core::Result as CoreResult;
use desk_core::Tool;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::YahooFinanceClient;
use crate::cache::{CacheKey, MarketCache};
use crate::error::{DeskError, Result};

/// Tool returning the latest quote for a ticker symbol
pub struct StockPriceTool {
    yahoo_client: YahooFinanceClient,
    cache: MarketCache,
}

#[derive(Debug, Deserialize)]
struct StockPriceParams {
    symbol: String,
}

impl StockPriceTool {
    /// Create a new price tool backed by the realtime cache tier
    pub fn new(cache: MarketCache) -> Self {
        Self {
            yahoo_client: YahooFinanceClient::new(),
            cache,
        }
    }

    async fn fetch_price(&self, params: StockPriceParams) -> Result<Value> {
        let symbol = params.symbol.to_uppercase();

        let cache_key = CacheKey::new(&symbol, "price", json!({}));

        self.cache
            .get_or_fetch(cache_key, || async {
                let quote = self.yahoo_client.get_quote(&symbol).await?;

                let report = format!(
                    "Current price for {}: ${:.2} (as of {})\nDay range: ${:.2} - ${:.2}\nVolume: {}",
                    symbol,
                    quote.close,
                    quote.timestamp.to_rfc3339(),
                    quote.low,
                    quote.high,
                    quote.volume,
                );

                Ok::<_, DeskError>(json!({
                    "symbol": symbol,
                    "price": quote.close,
                    "timestamp": quote.timestamp.to_rfc3339(),
                    "report": report,
                }))
            })
            .await
    }
}

#[async_trait]
impl Tool for StockPriceTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: StockPriceParams = serde_json::from_value(params)
            .map_err(|e| desk_core::Error::tool("get_stock_price", format!("invalid parameters: {e}")))?;

        let symbol = params.symbol.clone();
        self.fetch_price(params)
            .await
            .map_err(|e| desk_core::Error::tool("get_stock_price", format!("{symbol}: {e}")))
    }

    fn name(&self) -> &str {
        "get_stock_price"
    }

    fn description(&self) -> &str {
        "Get the current stock price and latest quote for a ticker symbol."
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
        let tool = StockPriceTool::new(MarketCache::new(Duration::from_secs(60)));

        assert_eq!(tool.name(), "get_stock_price");
        assert!(!tool.description().is_empty());

        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["symbol"].is_object());
    }

    #[tokio::test]
    async fn test_rejects_missing_symbol() {
        let tool = StockPriceTool::new(MarketCache::new(Duration::from_secs(60)));
        let result = tool.execute(json!({})).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_execute() {
        let tool = StockPriceTool::new(MarketCache::new(Duration::from_secs(60)));
        let data = tool.execute(json!({"symbol": "AAPL"})).await.unwrap();
        assert_eq!(data["symbol"], "AAPL");
        assert!(data["price"].as_f64().unwrap() > 0.0);
    }
}
