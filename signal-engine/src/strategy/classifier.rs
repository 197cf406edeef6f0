//! MACD crossover + RSI extreme classifier
//!
//! Looks at the last three candles of a series. BUY needs an oversold RSI,
//! a fresh bullish MACD cross, a bullish body and a close above the short
//! moving average; SELL is the exact mirror.

use crate::config::IndicatorConfig;
use crate::data::{Candle, CandleSeries};
use crate::indicators::{trailing_mean, IndicatorFrame, IndicatorRow};
use crate::strategy::SignalType;
use crate::{EngineError, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Number of closes (before the signal candle) in the short moving average
pub const SHORT_MA_WINDOW: usize = 9;

/// Outcome of one rule-set evaluation, one flag per condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEvaluation {
    pub buy: [bool; 7],
    pub sell: [bool; 7],
}

impl RuleEvaluation {
    /// Evaluate both rule sets independently.
    pub fn evaluate(
        last: &IndicatorRow,
        prev: &IndicatorRow,
        prev2: &IndicatorRow,
        candle: &Candle,
        short_ma: f64,
        thresholds: &IndicatorConfig,
    ) -> Self {
        let buy = [
            last.rsi.map_or(false, |rsi| rsi < thresholds.rsi_oversold),
            last.macd > last.signal_line,
            prev.macd <= prev.signal_line,
            prev2.macd < prev2.signal_line,
            last.histogram > 0.0,
            candle.is_bullish(),
            candle.close > short_ma,
        ];
        let sell = [
            last.rsi.map_or(false, |rsi| rsi > thresholds.rsi_overbought),
            last.macd < last.signal_line,
            prev.macd >= prev.signal_line,
            prev2.macd > prev2.signal_line,
            last.histogram < 0.0,
            candle.is_bearish(),
            candle.close < short_ma,
        ];
        Self { buy, sell }
    }

    pub fn buy_satisfied(&self) -> bool {
        self.buy.iter().all(|&c| c)
    }

    pub fn sell_satisfied(&self) -> bool {
        self.sell.iter().all(|&c| c)
    }
}

/// Result of classifying a series
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub signal_type: SignalType,
    /// Open time of the last candle, BUY/SELL only
    pub signal_time: Option<DateTime<Utc>>,
    /// Index of the classified candle, absent for NO DATA
    pub signal_index: Option<usize>,
    /// Absent for NO DATA
    pub rules: Option<RuleEvaluation>,
}

impl Classification {
    fn no_data() -> Self {
        Self {
            signal_type: SignalType::NoData,
            signal_time: None,
            signal_index: None,
            rules: None,
        }
    }
}

/// Classifies the latest candle of a series as BUY, SELL or HOLD
#[derive(Debug, Clone)]
pub struct SignalClassifier {
    thresholds: IndicatorConfig,
    min_candles: usize,
}

impl SignalClassifier {
    pub fn new(thresholds: IndicatorConfig, min_candles: usize) -> Self {
        Self {
            thresholds,
            min_candles,
        }
    }

    pub fn classify(&self, series: &CandleSeries, frame: &IndicatorFrame) -> Result<Classification> {
        if series.len() < self.min_candles || series.len() < SHORT_MA_WINDOW + 1 {
            return Ok(Classification::no_data());
        }
        if frame.len() != series.len() {
            return Err(EngineError::Computation(format!(
                "indicator frame has {} rows for {} candles",
                frame.len(),
                series.len()
            )));
        }

        let i = series.len() - 1;
        let row = |idx: usize| {
            frame
                .get(idx)
                .ok_or_else(|| EngineError::Computation(format!("missing indicator row {}", idx)))
        };
        let (last, prev, prev2) = (row(i)?, row(i - 1)?, row(i - 2)?);
        let candle = series
            .get(i)
            .ok_or_else(|| EngineError::Computation(format!("missing candle {}", i)))?;

        for r in [last, prev, prev2] {
            ensure_finite(r)?;
        }
        if !candle.open.is_finite() || !candle.close.is_finite() {
            return Err(EngineError::Computation(format!(
                "non-finite prices on candle {}",
                i
            )));
        }

        let closes = series.closes();
        let short_ma = trailing_mean(&closes, i, SHORT_MA_WINDOW)?.ok_or_else(|| {
            EngineError::Computation("not enough closes for short moving average".to_string())
        })?;

        let rules = RuleEvaluation::evaluate(last, prev, prev2, candle, short_ma, &self.thresholds);

        debug!(
            instrument = series.instrument(),
            rsi = ?last.rsi,
            macd = last.macd,
            signal_line = last.signal_line,
            histogram = last.histogram,
            short_ma,
            buy = ?rules.buy,
            sell = ?rules.sell,
            "evaluated rule sets"
        );

        let signal_type = match (rules.buy_satisfied(), rules.sell_satisfied()) {
            (true, false) => SignalType::Buy,
            (false, true) => SignalType::Sell,
            (false, false) => SignalType::Hold,
            (true, true) => {
                return Err(EngineError::Computation(
                    "BUY and SELL rule sets both satisfied".to_string(),
                ))
            }
        };

        Ok(Classification {
            signal_type,
            signal_time: signal_type.is_directional().then_some(candle.open_time),
            signal_index: Some(i),
            rules: Some(rules),
        })
    }
}

fn ensure_finite(row: &IndicatorRow) -> Result<()> {
    let rsi_ok = row.rsi.map_or(true, f64::is_finite);
    if rsi_ok && row.macd.is_finite() && row.signal_line.is_finite() && row.histogram.is_finite() {
        Ok(())
    } else {
        Err(EngineError::Indicator(format!("non-finite indicator row: {:?}", row)))
    }
}
