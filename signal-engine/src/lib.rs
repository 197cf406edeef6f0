//! Signal-Engine: RSI/MACD crossover signals over exchange candle data
//!
//! This crate turns OHLCV candle series into per-instrument trading signals:
//!
//! - **Data**: candle and candle-series types
//! - **Indicators**: Wilder RSI, EMA and MACD (via [ta-rs](https://github.com/greyblake/ta-rs))
//!   collected into an index-aligned [`IndicatorFrame`](indicators::IndicatorFrame)
//! - **Strategy**: the seven-condition BUY/SELL classifier and the
//!   next-candle confirmation / survival analysis
//! - **Exchange**: the market data contract and a Binance klines client
//! - **Orchestrator**: sequential, paced, cancellable batch over an instrument list
//!
//! # Example
//!
//! ```no_run
//! use signal_engine::prelude::*;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = EngineConfig::from_env()?;
//!     let client = BinanceClient::new(&config)?;
//!     let engine = SignalEngine::new(config, client)?;
//!     let batch = engine.generate_configured(&CancellationToken::new()).await;
//!     for signal in batch.iter() {
//!         println!("{:?}", signal.to_row());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod exchange;
pub mod indicators;
pub mod orchestrator;
pub mod strategy;

// Re-export commonly used types
pub mod prelude {
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::error::*;
    pub use crate::exchange::*;
    pub use crate::indicators::*;
    pub use crate::orchestrator::*;
    pub use crate::strategy::*;

    pub use crate::Result;
}

pub use error::EngineError;

/// Result type alias
pub type Result<T> = std::result::Result<T, EngineError>;
