//! Tool for summarizing price history over a period

use async_trait::async_trait;
use desk_core::Result as CoreResult;
use desk_core::Tool;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::YahooFinanceClient;
use crate::cache::{CacheKey, MarketCache};
use crate::error::{DeskError, Result};

/// Tool summarizing historical prices for a ticker symbol over a period
pub struct StockHistoryTool {
    yahoo_client: YahooFinanceClient,
    cache: MarketCache,
}

#[derive(Debug, Deserialize)]
struct StockHistoryParams {
    symbol: String,
    #[serde(default)]
    period: Option<String>,
}

impl StockHistoryTool {
    /// Create a new history tool backed by the realtime cache tier
    pub fn new(cache: MarketCache) -> Self {
        Self {
            yahoo_client: YahooFinanceClient::new(),
            cache,
        }
    }

    async fn fetch_history(&self, params: StockHistoryParams) -> Result<Value> {
        let symbol = params.symbol.to_uppercase();
        let period = params.period.unwrap_or_else(|| "1mo".to_string());

        let cache_key = CacheKey::new(&symbol, "history", json!({ "period": &period }));

        self.cache
            .get_or_fetch(cache_key, || async {
                let candles = self.yahoo_client.get_history(&symbol, &period).await?;

                if candles.is_empty() {
                    return Err(DeskError::DataUnavailable {
                        symbol: symbol.clone(),
                        reason: format!("no history returned for period {period}"),
                    });
                }

                let first = &candles[0];
                let last = &candles[candles.len() - 1];
                let period_high = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
                let period_low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
                let change = last.close - first.close;
                let change_pct = if first.close == 0.0 {
                    0.0
                } else {
                    change / first.close * 100.0
                };

                let report = format!(
                    "History for {symbol} over {period}:\nLatest Close: ${:.2}\nLatest Volume: {}\nPeriod High: ${:.2}\nPeriod Low: ${:.2}\nPrice Change: ${:.2}\nPercent Change: {:.2}%",
                    last.close, last.volume, period_high, period_low, change, change_pct,
                );

                Ok(json!({
                    "symbol": symbol,
                    "period": period,
                    "latest_close": last.close,
                    "latest_volume": last.volume,
                    "period_high": period_high,
                    "period_low": period_low,
                    "change": change,
                    "change_pct": change_pct,
                    "data_points": candles.len(),
                    "report": report,
                }))
            })
            .await
    }
}

#[async_trait]
impl Tool for StockHistoryTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: StockHistoryParams = serde_json::from_value(params)
            .map_err(|e| desk_core::Error::tool("get_stock_history", format!("invalid parameters: {e}")))?;

        let symbol = params.symbol.clone();
        self.fetch_history(params)
            .await
            .map_err(|e| desk_core::Error::tool("get_stock_history", format!("{symbol}: {e}")))
    }

    fn name(&self) -> &str {
        "get_stock_history"
    }

    fn description(&self) -> &str {
        "Summarize historical price data for a ticker symbol over a period: \
         latest close and volume, period high and low, and absolute and \
         percentage price change."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Stock ticker symbol (e.g., 'AAPL', 'GOOGL')"
                },
                "period": {
                    "type": "string",
                    "description": "History period",
                    "enum": ["1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max"],
                    "default": "1mo"
                }
            },
            "required": ["symbol"]
        })
    }
}
