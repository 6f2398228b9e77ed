//! Tool for fetching a company profile

use async_trait::async_trait;
use desk_core::Result as CoreResult;
use desk_core::Tool;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::YahooFinanceClient;
use crate::cache::{CacheKey, MarketCache};
use crate::error::{DeskError, Result};

/// Tool returning company profile fields for a ticker symbol.
///
/// Fields the data source cannot provide render as "N/A".
pub struct StockInfoTool {
    yahoo_client: YahooFinanceClient,
    cache: MarketCache,
}

#[derive(Debug, Deserialize)]
struct StockInfoParams {
    symbol: String,
}

fn field_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("${v:.2}"))
}

fn text_or_na(value: Option<&String>) -> String {
    value.cloned().unwrap_or_else(|| "N/A".to_string())
}

impl StockInfoTool {
    /// Create a new info tool backed by the fundamental cache tier
    pub fn new(cache: MarketCache) -> Self {
        Self {
            yahoo_client: YahooFinanceClient::new(),
            cache,
        }
    }

    async fn fetch_info(&self, params: StockInfoParams) -> Result<Value> {
        let symbol = params.symbol.to_uppercase();

        let cache_key = CacheKey::new(&symbol, "info", json!({}));

        self.cache
            .get_or_fetch(cache_key, || async {
                let info = self.yahoo_client.get_company_info(&symbol).await?;

                let report = format!(
                    "Company Name: {}\nSector: {}\nIndustry: {}\nMarket Cap: {}\nCurrent Price: {}\n52 Week High: {}\n52 Week Low: {}\nP/E Ratio: {}\nDividend Yield: {}",
                    text_or_na(info.name.as_ref()),
                    text_or_na(info.sector.as_ref()),
                    text_or_na(info.industry.as_ref()),
                    field_or_na(info.market_cap),
                    field_or_na(info.current_price),
                    field_or_na(info.week52_high),
                    field_or_na(info.week52_low),
                    info.pe_ratio
                        .map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}")),
                    info.dividend_yield
                        .map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}%")),
                );

                Ok::<_, DeskError>(json!({
                    "symbol": symbol,
                    "info": info,
                    "report": report,
                }))
            })
            .await
    }
}

#[async_trait]
impl Tool for StockInfoTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: StockInfoParams = serde_json::from_value(params)
            .map_err(|e| desk_core::Error::tool("get_stock_info", format!("invalid parameters: {e}")))?;

        let symbol = params.symbol.clone();
        self.fetch_info(params)
            .await
            .map_err(|e| desk_core::Error::tool("get_stock_info", format!("{symbol}: {e}")))
    }

    fn name(&self) -> &str {
        "get_stock_info"
    }

    fn description(&self) -> &str {
        "Get company profile information for a ticker symbol: name, sector, \
         industry, market cap, current price, 52-week range, P/E ratio, and \
         dividend yield. Missing fields are reported as N/A."
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
