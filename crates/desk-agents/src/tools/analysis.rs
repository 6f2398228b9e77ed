//! Tool running the technical analysis over three months of history

use async_trait::async_trait;
use desk_core::Result as CoreResult;
use desk_core::Tool;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::YahooFinanceClient;
use crate::cache::{CacheKey, MarketCache};
use crate::error::{DeskError, Result};
use crate::indicators::{self, Trend};

const ANALYSIS_PERIOD: &str = "3mo";

/// Tool computing moving averages, trend, volatility, and support/resistance
pub struct StockAnalysisTool {
    yahoo_client: YahooFinanceClient,
    cache: MarketCache,
}

#[derive(Debug, Deserialize)]
struct StockAnalysisParams {
    symbol: String,
}

fn ma_line(label: &str, value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{label}: ${v:.2}"),
        None => format!("{label}: insufficient data"),
    }
}

fn trend_reason(trend: Trend) -> &'static str {
    match trend {
        Trend::Bullish => "price above 20-day average, which is above the 50-day average",
        Trend::Bearish => "price below 20-day average, which is below the 50-day average",
        Trend::MixedNeutral => "moving averages give no clear direction",
    }
}

impl StockAnalysisTool {
    /// Create a new analysis tool backed by the realtime cache tier
    pub fn new(cache: MarketCache) -> Self {
        Self {
            yahoo_client: YahooFinanceClient::new(),
            cache,
        }
    }

    async fn run_analysis(&self, params: StockAnalysisParams) -> Result<Value> {
        let symbol = params.symbol.to_uppercase();

        let cache_key = CacheKey::new(&symbol, "analysis", json!({ "period": ANALYSIS_PERIOD }));

        self.cache
            .get_or_fetch(cache_key, || async {
                let candles = self
                    .yahoo_client
                    .get_history(&symbol, ANALYSIS_PERIOD)
                    .await?;

                let report = indicators::analyze(&symbol, &candles)?;

                let text = format!(
                    "Technical analysis for {} (based on {} trading days):\nCurrent Price: ${:.2}\n{}\n{}\nTrend: {} ({})\nVolatility (3-month): {:.2}%\nRecent Support: ${:.2}\nRecent Resistance: ${:.2}",
                    symbol,
                    report.observations,
                    report.close,
                    ma_line("20-Day Moving Average", report.ma20),
                    ma_line("50-Day Moving Average", report.ma50),
                    report.trend,
                    trend_reason(report.trend),
                    report.volatility_pct,
                    report.support,
                    report.resistance,
                );

                Ok::<_, DeskError>(json!({
                    "symbol": symbol,
                    "analysis": report,
                    "report": text,
                }))
            })
            .await
    }
}

#[async_trait]
impl Tool for StockAnalysisTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: StockAnalysisParams = serde_json::from_value(params)
            .map_err(|e| desk_core::Error::tool("analyze_stock", format!("invalid parameters: {e}")))?;

        let symbol = params.symbol.clone();
        self.run_analysis(params)
            .await
            .map_err(|e| desk_core::Error::tool("analyze_stock", format!("{symbol}: {e}")))
    }

    fn name(&self) -> &str {
        "analyze_stock"
    }

    fn description(&self) -> &str {
        "Run technical analysis on three months of price history for a ticker \
         symbol: 20 and 50-day moving averages, trend classification, \
         volatility, and recent support and resistance levels."
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
