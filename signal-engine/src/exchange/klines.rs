//! Kline (candlestick) row decoding
//!
//! Providers return klines as fixed-width arrays:
//! `[open_time_ms, open, high, low, close, volume, ...]`, with prices as
//! numbers or numeric strings. Rows that fail conversion are dropped.

use crate::data::{Candle, CandleSeries};
use crate::{EngineError, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

/// Minimum fields per row: open time plus OHLCV
const KLINE_FIELDS: usize = 6;

/// Decode a raw JSON body into a candle series, dropping unusable rows
pub fn decode_klines(instrument: &str, body: &str) -> Result<CandleSeries> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(body)
        .map_err(|e| EngineError::Decode(format!("{}: {}", instrument, e)))?;
    Ok(parse_kline_rows(instrument, &rows))
}

/// Convert kline rows into a candle series, keeping provider order
pub fn parse_kline_rows(instrument: &str, rows: &[Vec<Value>]) -> CandleSeries {
    let candles: Vec<Candle> = rows.iter().filter_map(|row| parse_kline_row(row)).collect();

    let dropped = rows.len() - candles.len();
    if dropped > 0 {
        debug!(instrument, dropped, kept = candles.len(), "dropped malformed kline rows");
    }

    CandleSeries::new(instrument, candles)
}

fn parse_kline_row(row: &[Value]) -> Option<Candle> {
    if row.len() < KLINE_FIELDS {
        return None;
    }
    let open_time = timestamp_millis(&row[0])?;
    let candle = Candle::new(
        open_time,
        number(&row[1])?,
        number(&row[2])?,
        number(&row[3])?,
        number(&row[4])?,
        number(&row[5])?,
    );
    candle.is_finite().then_some(candle)
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn timestamp_millis(value: &Value) -> Option<DateTime<Utc>> {
    let millis = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    DateTime::from_timestamp_millis(millis)
}
