//! Exchange integration module
//!
//! The market data contract plus a Binance REST implementation.

pub mod client;
pub mod klines;

pub use client::*;
pub use klines::*;

use crate::config::Timeframe;
use crate::data::CandleSeries;
use crate::Result;
use async_trait::async_trait;

/// Source of candle series for an instrument
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch up to `limit` most recent candles, oldest first.
    ///
    /// Malformed rows are dropped; the returned series may be shorter than
    /// `limit`.
    async fn fetch_candles(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries>;
}
