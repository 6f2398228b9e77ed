//! Market data tools exposed to the agents

pub mod analysis;
pub mod history;
pub mod info;
pub mod price;
pub mod quote_lookup;

pub use analysis::StockAnalysisTool;
pub use history::StockHistoryTool;
pub use info::StockInfoTool;
pub use price::StockPriceTool;
pub use quote_lookup::QuoteLookupTool;

use crate::api::AlphaVantageClient;
use crate::cache::CacheTiers;
use crate::config::DeskConfig;
use desk_core::Tool;
use std::sync::Arc;

/// Build the standard market toolset.
///
/// Always includes the four Yahoo-backed tools; adds the auxiliary
/// Alpha Vantage quote tool only when the config carries an API key.
pub fn market_toolset(config: &DeskConfig, tiers: &CacheTiers) -> Vec<Arc<dyn Tool>> {
    let mut tools: Vec<Arc<dyn Tool>> = vec![
        Arc::new(StockPriceTool::new(tiers.realtime.clone())),
        Arc::new(StockInfoTool::new(tiers.fundamental.clone())),
        Arc::new(StockHistoryTool::new(tiers.realtime.clone())),
        Arc::new(StockAnalysisTool::new(tiers.realtime.clone())),
    ];

    if let Some(key) = &config.alpha_vantage_api_key {
        let client = AlphaVantageClient::new(key.clone(), 5, config.request_timeout);
        tools.push(Arc::new(QuoteLookupTool::new(
            client,
            tiers.realtime.clone(),
        )));
    }

    tools
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers() -> CacheTiers {
        let config = DeskConfig::default();
        CacheTiers::new(config.cache_ttl_realtime, config.cache_ttl_fundamental)
    }

    #[test]
    fn test_toolset_without_key() {
        let config = DeskConfig::default();
        let tools = market_toolset(&config, &tiers());

        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "get_stock_price",
                "get_stock_info",
                "get_stock_history",
                "analyze_stock"
            ]
        );
    }

    #[test]
    fn test_toolset_with_key_adds_quote_lookup() {
        let config = DeskConfig::builder()
            .alpha_vantage_api_key("test_key")
            .request_timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("valid config");
        let tools = market_toolset(&config, &tiers());

        assert_eq!(tools.len(), 5);
        assert_eq!(tools[4].name(), "quote_lookup");
    }
}
