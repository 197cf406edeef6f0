//! Technical indicators module
//!
//! EMA and SMA wrap the `ta` crate and MACD is built from three EMAs. RSI
//! uses Wilder smoothing, which `ta`'s RSI does not.

pub mod ema;
pub mod frame;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::*;
pub use frame::*;
pub use macd::*;
pub use rsi::*;
pub use sma::*;

/// Indicator trait for all indicators
pub trait Indicator {
    /// Get the name of the indicator
    fn name(&self) -> &str;

    /// Update indicator with new value
    fn update(&mut self, value: f64);

    /// Get current indicator value
    fn value(&self) -> Option<f64>;

    /// Check if indicator is ready (has enough data)
    fn is_ready(&self) -> bool;
}
