//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::{Indicator, EMA};
use crate::{EngineError, Result};

/// MACD built from three [`EMA`]s
///
/// All three EMAs are seeded from the first input; there is no warm-up gate.
#[derive(Debug, Clone)]
pub struct MACD {
    fast: EMA,
    slow: EMA,
    signal: EMA,
    last_output: Option<MACDResult>,
}

impl MACD {
    /// Create new MACD indicator
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Result<Self> {
        let span = |period: usize| {
            EMA::new(period).map_err(|e| {
                EngineError::Indicator(format!(
                    "MACD({}, {}, {}): {}",
                    fast_period, slow_period, signal_period, e
                ))
            })
        };
        Ok(Self {
            fast: span(fast_period)?,
            slow: span(slow_period)?,
            signal: span(signal_period)?,
            last_output: None,
        })
    }

    pub fn output(&self) -> Option<MACDResult> {
        self.last_output
    }
}

impl Indicator for MACD {
    fn name(&self) -> &str {
        "MACD"
    }

    fn update(&mut self, value: f64) {
        self.fast.update(value);
        self.slow.update(value);
        let (Some(fast), Some(slow)) = (self.fast.value(), self.slow.value()) else {
            return;
        };

        let macd = fast - slow;
        self.signal.update(macd);
        if let Some(signal) = self.signal.value() {
            self.last_output = Some(MACDResult {
                macd,
                signal,
                histogram: macd - signal,
            });
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_output.map(|o| o.macd)
    }

    fn is_ready(&self) -> bool {
        self.last_output.is_some()
    }
}

/// MACD result structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MACDResult {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Calculate MACD line, signal line and histogram for a series of values
pub fn calculate_macd(
    values: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<Vec<MACDResult>> {
    let mut macd = MACD::new(fast_period, slow_period, signal_period)?;
    let mut results = Vec::with_capacity(values.len());

    for &value in values {
        macd.update(value);
        if let Some(output) = macd.output() {
            results.push(output);
        }
    }

    Ok(results)
}
