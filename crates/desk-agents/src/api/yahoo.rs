//! Yahoo Finance client, the primary market data source

use crate::error::{DeskError, Result};
use crate::indicators::Candle;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

/// Yahoo Finance client
pub struct YahooFinanceClient {}

/// Latest quote for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adjclose: f64,
}

/// Company information assembled from quote and history data.
///
/// The Yahoo history endpoint carries no fundamentals, so sector, industry,
/// market cap, P/E and dividend yield stay `None` here; formatters render
/// missing fields as "N/A".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub symbol: String,
    pub name: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market_cap: Option<f64>,
    pub current_price: Option<f64>,
    pub week52_high: Option<f64>,
    pub week52_low: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    /// Get the latest quote for a symbol
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| DeskError::ExternalService(e.to_string()))?;

        let response = provider
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| DeskError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            })?;

        let quote = response
            .last_quote()
            .map_err(|e| DeskError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Quote {
            symbol: symbol.to_string(),
            timestamp: DateTime::from_timestamp(quote.timestamp as i64, 0)
                .unwrap_or_else(Utc::now),
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            volume: quote.volume,
            adjclose: quote.adjclose,
        })
    }

    /// Get historical candles between two instants, ascending by timestamp
    pub async fn get_candles(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| DeskError::ExternalService(e.to_string()))?;

        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| DeskError::Computation(format!("invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| DeskError::Computation(format!("invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| DeskError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: e.to_string(),
            })?;

        let quotes = response.quotes().map_err(|e| DeskError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: e.to_string(),
        })?;

        Ok(quotes
            .iter()
            .map(|q| Candle {
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
            })
            .collect())
    }

    /// Get historical candles for a named period, e.g. "1mo", "3mo", "1y"
    pub async fn get_history(&self, symbol: &str, period: &str) -> Result<Vec<Candle>> {
        let end = Utc::now();
        let start = match period {
            "1d" => end - chrono::Duration::days(1),
            "5d" => end - chrono::Duration::days(5),
            "1mo" => end - chrono::Duration::days(30),
            "3mo" => end - chrono::Duration::days(90),
            "6mo" => end - chrono::Duration::days(180),
            "1y" => end - chrono::Duration::days(365),
            "2y" => end - chrono::Duration::days(730),
            "5y" => end - chrono::Duration::days(1825),
            "10y" => end - chrono::Duration::days(3650),
            "ytd" => {
                let year = end.year();
                chrono::NaiveDate::from_ymd_opt(year, 1, 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc())
                    .unwrap_or(end)
            }
            "max" => end - chrono::Duration::days(36500),
            _ => {
                return Err(DeskError::Config(format!("invalid period: {period}")));
            }
        };

        self.get_candles(symbol, start, end).await
    }

    /// Get best-effort company information.
    ///
    /// Assembled from the latest quote and a year of history (for the 52-week
    /// range). Fundamentals Yahoo does not expose stay `None`.
    pub async fn get_company_info(&self, symbol: &str) -> Result<CompanyInfo> {
        let quote = self.get_quote(symbol).await?;

        let (week52_high, week52_low) = match self.get_history(symbol, "1y").await {
            Ok(candles) if !candles.is_empty() => {
                let high = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
                let low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
                (Some(high), Some(low))
            }
            _ => (None, None),
        };

        Ok(CompanyInfo {
            symbol: symbol.to_string(),
            name: None,
            sector: None,
            industry: None,
            market_cap: None,
            current_price: Some(quote.close),
            week52_high,
            week52_low,
            pe_ratio: None,
            dividend_yield: None,
        })
    }
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for YahooFinanceClient {
    fn clone(&self) -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_quote() {
        let client = YahooFinanceClient::new();
        let quote = client.get_quote("AAPL").await;
        assert!(quote.is_ok());

        let quote = quote.unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert!(quote.close > 0.0);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_get_history() {
        let client = YahooFinanceClient::new();
        let candles = client.get_history("AAPL", "1mo").await;
        assert!(candles.is_ok());
        assert!(!candles.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_period_is_rejected() {
        let client = YahooFinanceClient::new();
        let err = client.get_history("AAPL", "7w").await.unwrap_err();
        assert!(matches!(err, DeskError::Config(_)));
    }
}
