//! Signal engine: fetch, compute, classify and confirm per instrument

use crate::config::EngineConfig;
use crate::data::CandleSeries;
use crate::exchange::MarketDataSource;
use crate::indicators::IndicatorCalculator;
use crate::orchestrator::{InstrumentOutcome, SignalBatch};
use crate::strategy::{ConfirmationAnalyzer, Signal, SignalClassifier, SignalType, SignalValidator};
use crate::{EngineError, Result};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Runs the signal pipeline over a list of instruments
///
/// Instruments are processed strictly one after another, with the configured
/// pacing delay between fetches. A failure for one instrument never aborts
/// the batch.
pub struct SignalEngine<S> {
    config: EngineConfig,
    source: S,
    calculator: IndicatorCalculator,
    classifier: SignalClassifier,
    analyzer: ConfirmationAnalyzer,
}

impl<S: MarketDataSource> SignalEngine<S> {
    pub fn new(config: EngineConfig, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            calculator: IndicatorCalculator::new(config.indicators.clone()),
            classifier: SignalClassifier::new(config.indicators.clone(), config.min_candles),
            analyzer: ConfirmationAnalyzer::new(config.timeframe.minutes()),
            config,
            source,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the cycle over the configured instrument list
    pub async fn generate_configured(&self, cancel: &CancellationToken) -> SignalBatch {
        self.generate_all(&self.config.instruments, cancel).await
    }

    /// Produce one signal per instrument, in order.
    ///
    /// If `cancel` fires, the batch holds the instruments finished so far and
    /// [`SignalBatch::is_complete`] is false.
    pub async fn generate_all<I>(&self, instruments: &[I], cancel: &CancellationToken) -> SignalBatch
    where
        I: AsRef<str>,
    {
        let mut batch = SignalBatch::with_capacity(instruments.len());
        let delay = self.config.pacing_delay();

        for (position, instrument) in instruments.iter().enumerate() {
            let instrument = instrument.as_ref();

            if position > 0 && !delay.is_zero() {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            if cancel.is_cancelled() {
                break;
            }

            let result = self.evaluate_instrument(instrument, cancel).await;
            if matches!(result, Err(EngineError::Cancelled)) {
                break;
            }

            let outcome = InstrumentOutcome::from_result(instrument, result);
            log_outcome(&outcome);
            batch.push(outcome.into_signal());
        }

        if batch.is_complete() {
            info!(
                instruments = batch.len(),
                buy = batch.count(SignalType::Buy),
                sell = batch.count(SignalType::Sell),
                hold = batch.count(SignalType::Hold),
                no_data = batch.count(SignalType::NoData),
                error = batch.count(SignalType::Error),
                "signal cycle complete"
            );
        } else {
            warn!(
                completed = batch.len(),
                requested = instruments.len(),
                "signal cycle cancelled"
            );
        }

        batch
    }

    /// Fetch one instrument and run it through the pipeline
    pub async fn evaluate_instrument(
        &self,
        instrument: &str,
        cancel: &CancellationToken,
    ) -> Result<Signal> {
        let series = tokio::select! {
            _ = cancel.cancelled() => return Err(EngineError::Cancelled),
            fetched = self.source.fetch_candles(
                instrument,
                self.config.timeframe,
                self.config.fetch_limit,
            ) => fetched?,
        };

        if series.len() < self.config.min_candles {
            return Err(EngineError::InsufficientData {
                available: series.len(),
                required: self.config.min_candles,
            });
        }

        self.evaluate_series(&series)
    }

    /// Compute, classify and confirm an already-fetched series
    pub fn evaluate_series(&self, series: &CandleSeries) -> Result<Signal> {
        let frame = self.calculator.compute(series)?;
        let classification = self.classifier.classify(series, &frame)?;
        let instrument = series.instrument();

        let signal = match (classification.signal_type, classification.signal_index) {
            (SignalType::Buy | SignalType::Sell, Some(index)) => {
                let signal_time = classification.signal_time.ok_or_else(|| {
                    EngineError::Computation("directional signal without time".to_string())
                })?;
                let confirmation = self
                    .analyzer
                    .confirm(series, classification.signal_type, index)?;
                Signal::directional(instrument, classification.signal_type, signal_time, confirmation)
            }
            (SignalType::NoData, _) => Signal::no_data(instrument),
            _ => Signal::hold(instrument),
        };

        debug_assert!(SignalValidator::validate(&signal));
        Ok(signal)
    }
}

fn log_outcome(outcome: &InstrumentOutcome) {
    match outcome {
        InstrumentOutcome::Signal(signal) if signal.signal_type.is_directional() => {
            info!(
                instrument = %signal.instrument,
                signal = %signal.signal_type,
                time = ?signal.signal_time,
                confirmation = ?signal.confirmation,
                duration = ?signal.duration,
                "signal generated"
            );
        }
        InstrumentOutcome::Signal(signal) => {
            debug!(instrument = %signal.instrument, signal = %signal.signal_type, "no signal");
        }
        InstrumentOutcome::NoData { instrument, reason } => {
            warn!(instrument = %instrument, error = %reason, "no usable market data");
        }
        InstrumentOutcome::Error { instrument, reason } => {
            warn!(instrument = %instrument, error = %reason, "signal computation failed");
        }
    }
}
