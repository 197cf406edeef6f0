//! SMA (Simple Moving Average) indicator

use crate::indicators::Indicator;
use crate::{EngineError, Result};
use ta::indicators::SimpleMovingAverage;
use ta::Next;

/// SMA indicator wrapper
#[derive(Debug, Clone)]
pub struct SMA {
    inner: SimpleMovingAverage,
    period: usize,
    update_count: usize,
    last_value: Option<f64>,
}

impl SMA {
    /// Create new SMA indicator
    pub fn new(period: usize) -> Result<Self> {
        let inner = SimpleMovingAverage::new(period)
            .map_err(|e| EngineError::Indicator(format!("SMA({}): {:?}", period, e)))?;
        Ok(Self {
            inner,
            period,
            update_count: 0,
            last_value: None,
        })
    }

    /// Get SMA period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for SMA {
    fn name(&self) -> &str {
        "SMA"
    }

    fn update(&mut self, value: f64) {
        let sma_value = self.inner.next(value);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_value = Some(sma_value);
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.update_count >= self.period
    }
}

/// Mean of the `window` values ending just before `end` (exclusive).
///
/// Returns `None` when fewer than `window` values precede `end`.
pub fn trailing_mean(values: &[f64], end: usize, window: usize) -> Result<Option<f64>> {
    if window == 0 || end > values.len() || end < window {
        return Ok(None);
    }
    let mut sma = SMA::new(window)?;
    for &value in &values[end - window..end] {
        sma.update(value);
    }
    Ok(sma.value())
}
