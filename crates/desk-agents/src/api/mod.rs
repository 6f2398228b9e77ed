//! Market data provider clients

pub mod alpha_vantage;
pub mod yahoo;

pub use alpha_vantage::AlphaVantageClient;
pub use yahoo::{CompanyInfo, Quote, YahooFinanceClient};
