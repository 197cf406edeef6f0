//! Engine error types
//!
//! Every failure is localized to one instrument by the orchestrator. The
//! variants split into two families: the market data could not be obtained
//! (reported as `NO DATA`), or the computation itself faulted (reported as
//! `ERROR`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Transport-level failure talking to the market data provider
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("provider returned status {status} for {symbol}")]
    Status { symbol: String, status: u16 },

    /// Provider body could not be decoded into kline rows
    #[error("failed to decode market data: {0}")]
    Decode(String),

    /// Fewer usable candles than the classifier needs
    #[error("insufficient data: {available} usable candles, {required} required")]
    InsufficientData { available: usize, required: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Indicator could not be constructed or produced a non-finite value
    #[error("indicator error: {0}")]
    Indicator(String),

    /// Unexpected numeric or indexing fault during classification/confirmation
    #[error("computation fault: {0}")]
    Computation(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl EngineError {
    /// True when the failure means "no usable market data" rather than a
    /// fault in the engine's own computation.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            EngineError::Http(_)
                | EngineError::Status { .. }
                | EngineError::Decode(_)
                | EngineError::InsufficientData { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_taxonomy() {
        assert!(EngineError::Decode("bad".into()).is_data_unavailable());
        assert!(EngineError::InsufficientData { available: 10, required: 30 }.is_data_unavailable());
        assert!(EngineError::Status { symbol: "BTCUSDT".into(), status: 429 }.is_data_unavailable());

        assert!(!EngineError::Computation("index".into()).is_data_unavailable());
        assert!(!EngineError::Indicator("nan".into()).is_data_unavailable());
        assert!(!EngineError::InvalidConfig("period".into()).is_data_unavailable());
    }

    #[test]
    fn test_error_messages() {
        let err = EngineError::InsufficientData { available: 10, required: 30 };
        assert_eq!(err.to_string(), "insufficient data: 10 usable candles, 30 required");
    }
}
