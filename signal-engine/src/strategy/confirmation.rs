//! Post-signal confirmation and survival analysis

use crate::data::CandleSeries;
use crate::strategy::{Confirmation, SignalDuration, SignalType};
use crate::{EngineError, Result};

/// Candles scanned after the confirmation candle before giving up
pub const CONFIRMATION_LOOKAHEAD: usize = 8;

/// Confirmation label and survival duration for a BUY/SELL signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationResult {
    pub confirmation: Confirmation,
    pub duration: SignalDuration,
}

impl ConfirmationResult {
    fn not_available() -> Self {
        Self {
            confirmation: Confirmation::NotAvailable,
            duration: SignalDuration::NotAvailable,
        }
    }
}

/// Checks whether the candle after a signal confirms it and how many
/// candles the move survives before reversing
#[derive(Debug, Clone)]
pub struct ConfirmationAnalyzer {
    candle_minutes: u32,
}

impl ConfirmationAnalyzer {
    pub fn new(candle_minutes: u32) -> Self {
        Self { candle_minutes }
    }

    pub fn confirm(
        &self,
        series: &CandleSeries,
        signal_type: SignalType,
        signal_index: usize,
    ) -> Result<ConfirmationResult> {
        if !signal_type.is_directional() {
            return Err(EngineError::Computation(format!(
                "cannot confirm a {} signal",
                signal_type
            )));
        }
        let Some(last_index) = series.last_index() else {
            return Ok(ConfirmationResult::not_available());
        };
        if series.len() < 3 {
            return Ok(ConfirmationResult::not_available());
        }
        if signal_index > last_index {
            return Err(EngineError::Computation(format!(
                "signal index {} outside series of {} candles",
                signal_index,
                series.len()
            )));
        }

        let close_at = |idx: usize| {
            series
                .get(idx)
                .map(|c| c.close)
                .ok_or_else(|| EngineError::Computation(format!("missing candle {}", idx)))
        };
        let is_buy = signal_type == SignalType::Buy;

        let signal_close = close_at(signal_index)?;
        let next_close = close_at((signal_index + 1).min(last_index))?;
        let confirmed = if is_buy {
            next_close > signal_close
        } else {
            next_close < signal_close
        };
        if !confirmed {
            return Ok(ConfirmationResult {
                confirmation: Confirmation::Reversed,
                duration: SignalDuration::Immediate,
            });
        }

        let mut survived: u32 = 1;
        let scan_end = (signal_index + 2 + CONFIRMATION_LOOKAHEAD).min(series.len());
        for i in (signal_index + 2)..scan_end {
            let current = close_at(i)?;
            let previous = close_at(i - 1)?;
            let reversed = if is_buy {
                current < previous
            } else {
                current > previous
            };
            if reversed {
                break;
            }
            survived += 1;
        }

        Ok(ConfirmationResult {
            confirmation: Confirmation::Confirmed,
            duration: SignalDuration::Minutes(survived * self.candle_minutes),
        })
    }
}
