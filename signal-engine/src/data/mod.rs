//! Data module
//!
//! OHLCV candle and per-instrument candle series types.

pub mod candle;

pub use candle::*;
