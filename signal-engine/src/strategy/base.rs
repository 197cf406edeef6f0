//! Signal, confirmation and duration vocabularies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signal type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalType {
    /// Buy/Long signal
    Buy,
    /// Sell/Short signal
    Sell,
    /// Neither rule set fully satisfied
    Hold,
    /// Market data missing or too short
    NoData,
    /// Computation faulted for this instrument
    Error,
}

impl SignalType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
            Self::NoData => "NO DATA",
            Self::Error => "ERROR",
        }
    }

    /// BUY or SELL
    pub fn is_directional(&self) -> bool {
        matches!(self, Self::Buy | Self::Sell)
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the candle after a signal moved in the signalled direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confirmation {
    Confirmed,
    Reversed,
    /// Series too short to judge
    NotAvailable,
}

impl Confirmation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Reversed => "REVERSED",
            Self::NotAvailable => "N/A",
        }
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How long a signal survived before price reversed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalDuration {
    /// Reversed on the very next candle
    Immediate,
    /// Survived this many minutes
    Minutes(u32),
    NotAvailable,
}

impl fmt::Display for SignalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => f.write_str("Immediate"),
            Self::Minutes(m) => write!(f, "{} mins", m),
            Self::NotAvailable => f.write_str("N/A"),
        }
    }
}
