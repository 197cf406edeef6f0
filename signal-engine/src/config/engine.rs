//! Engine configuration
//!
//! Loaded once at process start and passed by value into the engine; nothing
//! in the engine mutates it afterwards.

use crate::config::{IndicatorConfig, Timeframe};
use crate::{EngineError, Result};
use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Instruments tracked when no list is configured
pub const DEFAULT_INSTRUMENTS: [&str; 12] = [
    "EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF",
    "BTC/USD", "ETH/USD", "LTC/USD", "XRP/USD",
    "AUD/USD", "USD/CAD", "NZD/USD", "BCH/USD",
];

/// Smallest series the classifier can work with: nine closes for the short
/// moving average plus the signal candle.
const MIN_CLASSIFIABLE_CANDLES: usize = 10;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Instrument ids in evaluation order (e.g. "BTC/USD")
    pub instruments: Vec<String>,
    /// Candle interval
    pub timeframe: Timeframe,
    /// Series shorter than this yield NO DATA
    pub min_candles: usize,
    /// Number of candles requested per fetch
    pub fetch_limit: usize,
    /// Delay between consecutive instrument fetches (milliseconds)
    pub pacing_delay_ms: u64,
    /// Market data provider base URL
    pub api_base_url: String,
    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,
    /// Indicator periods and thresholds
    pub indicators: IndicatorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            instruments: DEFAULT_INSTRUMENTS.iter().map(|s| s.to_string()).collect(),
            timeframe: Timeframe::M5,
            min_candles: 30,
            fetch_limit: 100,
            pacing_delay_ms: 150,
            api_base_url: "https://api.binance.com".to_string(),
            request_timeout_secs: 10,
            indicators: IndicatorConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Build configuration from the process environment (and `.env` if present).
    ///
    /// Every field falls back to its default when the matching `SIGNAL_*`
    /// variable is unset.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let instruments = match lookup("SIGNAL_INSTRUMENTS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.instruments,
        };

        let config = Self {
            instruments,
            timeframe: parse_or(&lookup, "SIGNAL_INTERVAL", defaults.timeframe)?,
            min_candles: parse_or(&lookup, "SIGNAL_MIN_CANDLES", defaults.min_candles)?,
            fetch_limit: parse_or(&lookup, "SIGNAL_FETCH_LIMIT", defaults.fetch_limit)?,
            pacing_delay_ms: parse_or(&lookup, "SIGNAL_PACING_MS", defaults.pacing_delay_ms)?,
            api_base_url: lookup("SIGNAL_API_URL").unwrap_or(defaults.api_base_url),
            request_timeout_secs: parse_or(
                &lookup,
                "SIGNAL_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            indicators: IndicatorConfig {
                rsi_period: parse_or(&lookup, "SIGNAL_RSI_PERIOD", defaults.indicators.rsi_period)?,
                macd_fast: parse_or(&lookup, "SIGNAL_MACD_FAST", defaults.indicators.macd_fast)?,
                macd_slow: parse_or(&lookup, "SIGNAL_MACD_SLOW", defaults.indicators.macd_slow)?,
                macd_signal: parse_or(&lookup, "SIGNAL_MACD_SIGNAL", defaults.indicators.macd_signal)?,
                rsi_overbought: parse_or(
                    &lookup,
                    "SIGNAL_RSI_OVERBOUGHT",
                    defaults.indicators.rsi_overbought,
                )?,
                rsi_oversold: parse_or(
                    &lookup,
                    "SIGNAL_RSI_OVERSOLD",
                    defaults.indicators.rsi_oversold,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.instruments.is_empty() {
            return Err(EngineError::InvalidConfig(
                "at least one instrument is required".to_string(),
            ));
        }
        if self.min_candles < MIN_CLASSIFIABLE_CANDLES {
            return Err(EngineError::InvalidConfig(format!(
                "min_candles must be at least {}, got {}",
                MIN_CLASSIFIABLE_CANDLES, self.min_candles
            )));
        }
        if self.fetch_limit < self.min_candles {
            return Err(EngineError::InvalidConfig(format!(
                "fetch_limit ({}) is below min_candles ({})",
                self.fetch_limit, self.min_candles
            )));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(EngineError::InvalidConfig("api_base_url is empty".to_string()));
        }
        self.indicators.validate()
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            EngineError::InvalidConfig(format!("{}={:?}: {}", key, raw, e))
        }),
        None => Ok(default),
    }
}
