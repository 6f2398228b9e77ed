//! Technical indicator calculator.
//!
//! Pure arithmetic over a price series: trailing moving averages, a strict
//! trend partition, percentage-change volatility, and trailing
//! support/resistance levels. No I/O; callers fetch the candles.

use crate::error::{DeskError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ta::Next;
use ta::indicators::SimpleMovingAverage;

/// One bar of price data, ascending by timestamp within a series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Trend classification from the moving-average chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    /// Close above MA20 and MA20 above MA50, both strict
    Bullish,
    /// Close below MA20 and MA20 below MA50, both strict
    Bearish,
    /// Everything else, including any equality or a missing average
    MixedNeutral,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bullish => write!(f, "Bullish"),
            Trend::Bearish => write!(f, "Bearish"),
            Trend::MixedNeutral => write!(f, "Mixed/Neutral"),
        }
    }
}

/// Result of analyzing a price series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalReport {
    pub symbol: String,
    /// Latest close
    pub close: f64,
    /// Trailing 20-period mean of closes; None with fewer than 20 observations
    pub ma20: Option<f64>,
    /// Trailing 50-period mean of closes; None with fewer than 50 observations
    pub ma50: Option<f64>,
    pub trend: Trend,
    /// Sample standard deviation of period-over-period close changes, in percent
    pub volatility_pct: f64,
    /// Minimum low over the trailing 20 (or fewer) bars
    pub support: f64,
    /// Maximum high over the trailing 20 (or fewer) bars
    pub resistance: f64,
    /// Close change over the whole series, absolute
    pub change: f64,
    /// Close change over the whole series, percent of the first close
    pub change_pct: f64,
    /// Number of bars analyzed
    pub observations: usize,
}

/// Analyze a price series.
///
/// The series must be non-empty and ascending by timestamp; an empty series
/// is a [`DeskError::DataUnavailable`]. Missing averages and short windows
/// degrade (None / smaller window) rather than fail.
pub fn analyze(symbol: &str, candles: &[Candle]) -> Result<TechnicalReport> {
    if candles.is_empty() {
        return Err(DeskError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "no price data available".to_string(),
        });
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let close = *closes.last().unwrap_or(&0.0);
    let first_close = closes[0];

    let ma20 = trailing_mean(&closes, 20)?;
    let ma50 = trailing_mean(&closes, 50)?;

    let trend = match (ma20, ma50) {
        (Some(ma20), Some(ma50)) if close > ma20 && ma20 > ma50 => Trend::Bullish,
        (Some(ma20), Some(ma50)) if close < ma20 && ma20 < ma50 => Trend::Bearish,
        _ => Trend::MixedNeutral,
    };

    let window = candles.len().min(20);
    let tail = &candles[candles.len() - window..];
    let support = tail.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let resistance = tail
        .iter()
        .map(|c| c.high)
        .fold(f64::NEG_INFINITY, f64::max);

    let change = close - first_close;
    let change_pct = if first_close == 0.0 {
        0.0
    } else {
        change / first_close * 100.0
    };

    Ok(TechnicalReport {
        symbol: symbol.to_string(),
        close,
        ma20,
        ma50,
        trend,
        volatility_pct: pct_change_volatility(&closes),
        support,
        resistance,
        change,
        change_pct,
        observations: candles.len(),
    })
}

/// Trailing mean of the last `window` values; None when the series is shorter.
fn trailing_mean(values: &[f64], window: usize) -> Result<Option<f64>> {
    if values.len() < window {
        return Ok(None);
    }

    let mut sma =
        SimpleMovingAverage::new(window).map_err(|e| DeskError::Computation(e.to_string()))?;
    let mut current = 0.0;
    for &value in values {
        current = sma.next(value);
    }
    Ok(Some(current))
}

/// Sample standard deviation of period-over-period close changes, in percent.
///
/// Returns 0.0 with fewer than two changes (no defined sample deviation).
fn pct_change_volatility(closes: &[f64]) -> f64 {
    let changes: Vec<f64> = closes
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();

    if changes.len() < 2 {
        return 0.0;
    }

    let mean = changes.iter().sum::<f64>() / changes.len() as f64;
    let variance = changes.iter().map(|c| (c - mean).powi(2)).sum::<f64>()
        / (changes.len() - 1) as f64;

    variance.sqrt() * 100.0
}
