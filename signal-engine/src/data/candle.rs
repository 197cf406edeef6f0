//! OHLCV candle data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV candle data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Candle open time (UTC)
    pub open_time: DateTime<Utc>,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume
    pub volume: f64,
}

impl Candle {
    /// Create a new candle
    pub fn new(
        open_time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check if candle is bullish
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if candle is bearish
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// All price and volume fields are finite numbers
    pub fn is_finite(&self) -> bool {
        [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Chronologically ordered candles for one instrument
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    instrument: String,
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Create from an instrument id and candles in chronological order
    pub fn new(instrument: impl Into<String>, candles: Vec<Candle>) -> Self {
        Self {
            instrument: instrument.into(),
            candles,
        }
    }

    /// Instrument id this series belongs to
    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    /// Get number of candles
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if series is empty
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Get candle at index
    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Get last candle
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Index of the last candle, if any
    pub fn last_index(&self) -> Option<usize> {
        self.candles.len().checked_sub(1)
    }

    /// Get all candles
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Get close prices as vector
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    /// Iterate close prices without allocating
    pub fn iter_closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.candles.iter().map(|c| c.close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn candle(open: f64, close: f64) -> Candle {
        Candle::new(
            Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            open,
            open.max(close) + 1.0,
            open.min(close) - 1.0,
            close,
            1000.0,
        )
    }

    #[test]
    fn test_candle_direction() {
        assert!(candle(100.0, 105.0).is_bullish());
        assert!(candle(105.0, 100.0).is_bearish());

        let doji = candle(100.0, 100.0);
        assert!(!doji.is_bullish());
        assert!(!doji.is_bearish());
    }

    #[test]
    fn test_candle_finite() {
        assert!(candle(100.0, 101.0).is_finite());
        assert!(!candle(f64::NAN, 101.0).is_finite());
    }

    #[test]
    fn test_series_accessors() {
        let series = CandleSeries::new("BTC/USD", vec![candle(1.0, 2.0), candle(2.0, 3.0)]);
        assert_eq!(series.instrument(), "BTC/USD");
        assert_eq!(series.len(), 2);
        assert_eq!(series.last_index(), Some(1));
        assert_eq!(series.closes(), vec![2.0, 3.0]);
        assert_eq!(series.last().map(|c| c.close), Some(3.0));

        let empty = CandleSeries::new("ETH/USD", Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.last_index(), None);
    }
}
