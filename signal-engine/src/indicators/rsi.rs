//! RSI (Relative Strength Index) indicator with Wilder smoothing

use crate::indicators::Indicator;
use crate::{EngineError, Result};

/// Wilder RSI
///
/// Average gain/loss follow `avg = avg·(1−α) + x·α` with `α = 1/period`,
/// starting from the first delta. A value is exposed once `period` deltas
/// have been consumed.
#[derive(Debug, Clone)]
pub struct RSI {
    period: usize,
    alpha: f64,
    prev_close: Option<f64>,
    avg_gain: f64,
    avg_loss: f64,
    deltas: usize,
    last_value: Option<f64>,
}

impl RSI {
    /// Create new RSI indicator
    pub fn new(period: usize) -> Result<Self> {
        if period == 0 {
            return Err(EngineError::Indicator("RSI period must be greater than zero".to_string()));
        }
        Ok(Self {
            period,
            alpha: 1.0 / period as f64,
            prev_close: None,
            avg_gain: 0.0,
            avg_loss: 0.0,
            deltas: 0,
            last_value: None,
        })
    }

    /// Get RSI period
    pub fn period(&self) -> usize {
        self.period
    }

    fn current(&self) -> f64 {
        if self.avg_loss == 0.0 {
            return 100.0;
        }
        let rs = self.avg_gain / self.avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }
}

impl Indicator for RSI {
    fn name(&self) -> &str {
        "RSI"
    }

    fn update(&mut self, value: f64) {
        let Some(prev) = self.prev_close.replace(value) else {
            return;
        };

        let delta = value - prev;
        let gain = delta.max(0.0);
        let loss = (-delta).max(0.0);

        if self.deltas == 0 {
            self.avg_gain = gain;
            self.avg_loss = loss;
        } else {
            self.avg_gain = self.avg_gain * (1.0 - self.alpha) + gain * self.alpha;
            self.avg_loss = self.avg_loss * (1.0 - self.alpha) + loss * self.alpha;
        }
        self.deltas += 1;

        if self.deltas >= self.period {
            self.last_value = Some(self.current());
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.deltas >= self.period
    }
}

/// Calculate RSI from a series of values
pub fn calculate_rsi(values: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    let mut rsi = RSI::new(period)?;
    let mut results = Vec::with_capacity(values.len());

    for &value in values {
        rsi.update(value);
        results.push(rsi.value());
    }

    Ok(results)
}
