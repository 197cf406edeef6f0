//! Per-instrument signal record and validation

use crate::strategy::{Confirmation, ConfirmationResult, SignalDuration, SignalType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trading signal for one instrument, produced fresh each cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub instrument: String,
    pub signal_type: SignalType,
    /// Open time of the classified candle (BUY/SELL only)
    pub signal_time: Option<DateTime<Utc>>,
    /// BUY/SELL only
    pub confirmation: Option<Confirmation>,
    /// BUY/SELL only
    pub duration: Option<SignalDuration>,
}

impl Signal {
    /// Create a BUY/SELL signal with its confirmation analysis
    pub fn directional(
        instrument: impl Into<String>,
        signal_type: SignalType,
        signal_time: DateTime<Utc>,
        confirmation: ConfirmationResult,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            signal_type,
            signal_time: Some(signal_time),
            confirmation: Some(confirmation.confirmation),
            duration: Some(confirmation.duration),
        }
    }

    /// Create hold signal
    pub fn hold(instrument: impl Into<String>) -> Self {
        Self::bare(instrument, SignalType::Hold)
    }

    pub fn no_data(instrument: impl Into<String>) -> Self {
        Self::bare(instrument, SignalType::NoData)
    }

    pub fn error(instrument: impl Into<String>) -> Self {
        Self::bare(instrument, SignalType::Error)
    }

    fn bare(instrument: impl Into<String>, signal_type: SignalType) -> Self {
        Self {
            instrument: instrument.into(),
            signal_type,
            signal_time: None,
            confirmation: None,
            duration: None,
        }
    }

    /// Outbound 4-tuple view consumed by presentation/execution layers
    pub fn to_row(&self) -> SignalRow {
        SignalRow {
            signal: self.signal_type.label(),
            signal_time: self.signal_time,
            confirmation: self.confirmation.map(|c| c.label()),
            duration: self.duration.map(|d| d.to_string()),
        }
    }
}

/// (signal type, signal time, confirmation label, duration label)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalRow {
    pub signal: &'static str,
    pub signal_time: Option<DateTime<Utc>>,
    pub confirmation: Option<&'static str>,
    pub duration: Option<String>,
}

/// Signal validator
pub struct SignalValidator;

impl SignalValidator {
    /// Time, confirmation and duration are present exactly for BUY/SELL
    pub fn validate(signal: &Signal) -> bool {
        let directional = signal.signal_type.is_directional();
        signal.signal_time.is_some() == directional
            && signal.confirmation.is_some() == directional
            && signal.duration.is_some() == directional
    }
}
