//! Index-aligned indicator values for a candle series

use crate::config::IndicatorConfig;
use crate::data::CandleSeries;
use crate::indicators::{calculate_macd, calculate_rsi};
use crate::{EngineError, Result};
use tracing::debug;

/// Indicator values for one candle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorRow {
    /// `None` until the RSI has seen `rsi_period` deltas
    pub rsi: Option<f64>,
    pub macd: f64,
    pub signal_line: f64,
    pub histogram: f64,
}

/// Indicator rows aligned index-for-index with a [`CandleSeries`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorFrame {
    rows: Vec<IndicatorRow>,
}

impl IndicatorFrame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&IndicatorRow> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }
}

/// Computes RSI and MACD over whole candle series
#[derive(Debug, Clone)]
pub struct IndicatorCalculator {
    config: IndicatorConfig,
}

impl IndicatorCalculator {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// RSI and MACD over the closes, zipped into aligned rows. Pure and
    /// deterministic.
    pub fn compute(&self, series: &CandleSeries) -> Result<IndicatorFrame> {
        let closes = series.closes();
        let rsi = calculate_rsi(&closes, self.config.rsi_period)?;
        let macd = calculate_macd(
            &closes,
            self.config.macd_fast,
            self.config.macd_slow,
            self.config.macd_signal,
        )?;

        if rsi.len() != closes.len() || macd.len() != closes.len() {
            return Err(EngineError::Computation(format!(
                "indicator lengths differ: {} closes, {} rsi, {} macd",
                closes.len(),
                rsi.len(),
                macd.len()
            )));
        }

        let rows: Vec<IndicatorRow> = rsi
            .into_iter()
            .zip(macd)
            .map(|(rsi, out)| IndicatorRow {
                rsi,
                macd: out.macd,
                signal_line: out.signal,
                histogram: out.histogram,
            })
            .collect();

        debug!(
            instrument = series.instrument(),
            rows = rows.len(),
            "computed indicator frame"
        );

        Ok(IndicatorFrame { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Candle;
    use chrono::{Duration, TimeZone, Utc};

    fn series_from_closes(closes: &[f64]) -> CandleSeries {
        let start = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(start + Duration::minutes(5 * i as i64), c, c, c, c, 1.0))
            .collect();
        CandleSeries::new("TEST/USD", candles)
    }

    #[test]
    fn test_frame_is_aligned() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.5).cos()).collect();
        let series = series_from_closes(&closes);
        let frame = IndicatorCalculator::new(IndicatorConfig::default())
            .compute(&series)
            .unwrap();

        assert_eq!(frame.len(), series.len());
        assert!(frame.rows()[..14].iter().all(|r| r.rsi.is_none()));
        assert!(frame.rows()[14..].iter().all(|r| r.rsi.is_some()));
        for row in frame.rows() {
            assert_eq!(row.histogram, row.macd - row.signal_line);
        }
    }

    #[test]
    fn test_constant_closes_flat_macd() {
        let series = series_from_closes(&[42.0; 40]);
        let frame = IndicatorCalculator::new(IndicatorConfig::default())
            .compute(&series)
            .unwrap();

        for row in frame.rows() {
            assert!(row.macd.abs() < 1e-9);
            assert!(row.histogram.abs() < 1e-9);
        }
        assert_eq!(frame.get(39).and_then(|r| r.rsi), Some(100.0));
    }

    #[test]
    fn test_empty_series() {
        let frame = IndicatorCalculator::new(IndicatorConfig::default())
            .compute(&series_from_closes(&[]))
            .unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_invalid_periods_rejected() {
        let config = IndicatorConfig {
            macd_signal: 0,
            ..Default::default()
        };
        let result = IndicatorCalculator::new(config).compute(&series_from_closes(&[1.0, 2.0]));
        assert!(result.is_err());
    }
}
