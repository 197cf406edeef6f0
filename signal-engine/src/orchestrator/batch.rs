//! Per-instrument outcomes and the aggregated batch

use crate::strategy::{Signal, SignalRow, SignalType};
use crate::EngineError;

/// What happened to one instrument during a cycle
#[derive(Debug)]
pub enum InstrumentOutcome {
    /// Classified as BUY, SELL or HOLD
    Signal(Signal),
    /// Market data missing or too short
    NoData { instrument: String, reason: EngineError },
    /// Computation faulted
    Error { instrument: String, reason: EngineError },
}

impl InstrumentOutcome {
    /// Sort a pipeline result into the outcome taxonomy
    pub fn from_result(instrument: &str, result: crate::Result<Signal>) -> Self {
        match result {
            Ok(signal) => Self::Signal(signal),
            Err(reason) if reason.is_data_unavailable() => Self::NoData {
                instrument: instrument.to_string(),
                reason,
            },
            Err(reason) => Self::Error {
                instrument: instrument.to_string(),
                reason,
            },
        }
    }

    pub fn instrument(&self) -> &str {
        match self {
            Self::Signal(signal) => &signal.instrument,
            Self::NoData { instrument, .. } | Self::Error { instrument, .. } => instrument,
        }
    }

    pub fn into_signal(self) -> Signal {
        match self {
            Self::Signal(signal) => signal,
            Self::NoData { instrument, .. } => Signal::no_data(instrument),
            Self::Error { instrument, .. } => Signal::error(instrument),
        }
    }
}

/// Signals for one cycle, one per instrument, in first-requested order
///
/// An instrument listed more than once keeps its first position and its
/// latest signal.
#[derive(Debug, Clone, Default)]
pub struct SignalBatch {
    signals: Vec<Signal>,
    requested: usize,
    processed: usize,
}

impl SignalBatch {
    pub(crate) fn with_capacity(requested: usize) -> Self {
        Self {
            signals: Vec::with_capacity(requested),
            requested,
            processed: 0,
        }
    }

    pub(crate) fn push(&mut self, signal: Signal) {
        self.processed += 1;
        match self
            .signals
            .iter_mut()
            .find(|s| s.instrument == signal.instrument)
        {
            Some(existing) => *existing = signal,
            None => self.signals.push(signal),
        }
    }

    /// Signal for an instrument id
    pub fn get(&self, instrument: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.instrument == instrument)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.signals.iter()
    }

    /// Number of distinct instruments
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// False when the cycle was cancelled before every instrument ran
    pub fn is_complete(&self) -> bool {
        self.processed == self.requested
    }

    /// Number of signals of the given type
    pub fn count(&self, signal_type: SignalType) -> usize {
        self.signals
            .iter()
            .filter(|s| s.signal_type == signal_type)
            .count()
    }

    /// Outbound mapping: instrument id to its 4-tuple row
    pub fn rows(&self) -> Vec<(String, SignalRow)> {
        self.signals
            .iter()
            .map(|s| (s.instrument.clone(), s.to_row()))
            .collect()
    }
}

impl IntoIterator for SignalBatch {
    type Item = Signal;
    type IntoIter = std::vec::IntoIter<Signal>;

    fn into_iter(self) -> Self::IntoIter {
        self.signals.into_iter()
    }
}
