//! Indicator and threshold configuration

use crate::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Indicator periods and RSI thresholds used by the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// RSI period (Wilder smoothing factor is 1/period)
    pub rsi_period: usize,
    /// MACD fast EMA span
    pub macd_fast: usize,
    /// MACD slow EMA span
    pub macd_slow: usize,
    /// MACD signal line EMA span
    pub macd_signal: usize,
    /// RSI above this qualifies for SELL
    pub rsi_overbought: f64,
    /// RSI below this qualifies for BUY
    pub rsi_oversold: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_overbought: 68.0,
            rsi_oversold: 32.0,
        }
    }
}

impl IndicatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rsi_period == 0 || self.macd_fast == 0 || self.macd_slow == 0 || self.macd_signal == 0 {
            return Err(EngineError::InvalidConfig(
                "indicator periods must be greater than zero".to_string(),
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(EngineError::InvalidConfig(format!(
                "MACD fast span ({}) must be shorter than slow span ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        for (name, value) in [
            ("rsi_oversold", self.rsi_oversold),
            ("rsi_overbought", self.rsi_overbought),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(EngineError::InvalidConfig(format!(
                    "{} must be within [0, 100], got {}",
                    name, value
                )));
            }
        }
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(EngineError::InvalidConfig(format!(
                "rsi_oversold ({}) must be below rsi_overbought ({})",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        Ok(())
    }
}
