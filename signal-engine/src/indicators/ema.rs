//! EMA (Exponential Moving Average) indicator

use crate::indicators::Indicator;
use crate::{EngineError, Result};
use ta::indicators::ExponentialMovingAverage;
use ta::Next;

/// EMA indicator wrapper
///
/// Seeded with the first input (`α = 2/(span+1)`), so a value exists from
/// the first update onward.
#[derive(Debug, Clone)]
pub struct EMA {
    inner: ExponentialMovingAverage,
    last_value: Option<f64>,
}

impl EMA {
    /// Create new EMA indicator
    pub fn new(period: usize) -> Result<Self> {
        let inner = ExponentialMovingAverage::new(period)
            .map_err(|e| EngineError::Indicator(format!("EMA({}): {:?}", period, e)))?;
        Ok(Self {
            inner,
            last_value: None,
        })
    }
}

impl Indicator for EMA {
    fn name(&self) -> &str {
        "EMA"
    }

    fn update(&mut self, value: f64) {
        self.last_value = Some(self.inner.next(value));
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.last_value.is_some()
    }
}
