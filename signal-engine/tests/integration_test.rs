//! Integration tests for signal-engine

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};
use signal_engine::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Helper function to create candles from closes and opens
fn create_candles(closes: &[f64], opens: &[f64]) -> Vec<Candle> {
    let base_time = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    closes
        .iter()
        .zip(opens)
        .enumerate()
        .map(|(i, (&close, &open))| {
            Candle::new(
                base_time + Duration::minutes(5 * i as i64),
                open,
                open.max(close) + 0.5,
                open.min(close) - 0.5,
                close,
                1000.0,
            )
        })
        .collect()
}

/// Steady decline followed by a strong bullish candle: classifies BUY
fn bullish_reversal() -> Vec<Candle> {
    let mut closes: Vec<f64> = (0..39).map(|i| 200.0 - i as f64).collect();
    let mut opens: Vec<f64> = closes.iter().map(|c| c + 1.0).collect();
    let prev = closes[38];
    closes.push(prev + 5.5);
    opens.push(prev);
    create_candles(&closes, &opens)
}

/// Steady rise followed by a strong bearish candle: classifies SELL
fn bearish_reversal() -> Vec<Candle> {
    let mut closes: Vec<f64> = (0..39).map(|i| 100.0 + i as f64).collect();
    let mut opens: Vec<f64> = closes.iter().map(|c| c - 1.0).collect();
    let prev = closes[38];
    closes.push(prev - 5.5);
    opens.push(prev);
    create_candles(&closes, &opens)
}

fn flat(count: usize) -> Vec<Candle> {
    create_candles(&vec![50.0; count], &vec![50.0; count])
}

/// In-memory market data; unknown instruments fail like a rejected request
#[derive(Default)]
struct MemorySource {
    series: HashMap<String, Vec<Candle>>,
    fetches: AtomicUsize,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl MemorySource {
    fn with(mut self, instrument: &str, candles: Vec<Candle>) -> Self {
        self.series.insert(instrument.to_string(), candles);
        self
    }
}

#[async_trait]
impl MarketDataSource for MemorySource {
    async fn fetch_candles(
        &self,
        instrument: &str,
        _timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries> {
        let fetched = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((after, token)) = &self.cancel_after {
            if fetched >= *after {
                token.cancel();
            }
        }

        match self.series.get(instrument) {
            Some(candles) => {
                let start = candles.len().saturating_sub(limit);
                Ok(CandleSeries::new(instrument, candles[start..].to_vec()))
            }
            None => Err(EngineError::Status {
                symbol: provider_symbol(instrument),
                status: 400,
            }),
        }
    }
}

/// Never answers; only cancellation gets the engine out
struct HangingSource;

#[async_trait]
impl MarketDataSource for HangingSource {
    async fn fetch_candles(&self, _: &str, _: Timeframe, _: usize) -> Result<CandleSeries> {
        std::future::pending().await
    }
}

fn test_config() -> EngineConfig {
    EngineConfig {
        pacing_delay_ms: 0,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_generate_all_classifies_every_instrument() {
    let mut nan_tail = bullish_reversal();
    if let Some(last) = nan_tail.last_mut() {
        last.close = f64::NAN;
    }

    let source = MemorySource::default()
        .with("BTC/USD", bullish_reversal())
        .with("ETH/USD", bearish_reversal())
        .with("EUR/USD", flat(40))
        .with("GBP/USD", flat(10))
        .with("LTC/USD", nan_tail);
    let engine = SignalEngine::new(test_config(), source).unwrap();

    let instruments = ["BTC/USD", "ETH/USD", "EUR/USD", "GBP/USD", "XRP/USD", "LTC/USD"];
    let batch = engine.generate_all(&instruments, &CancellationToken::new()).await;

    assert!(batch.is_complete());
    assert_eq!(batch.len(), instruments.len());

    let kinds: Vec<SignalType> = batch.iter().map(|s| s.signal_type).collect();
    assert_eq!(
        kinds,
        vec![
            SignalType::Buy,
            SignalType::Sell,
            SignalType::Hold,
            SignalType::NoData,
            SignalType::NoData,
            SignalType::Error,
        ]
    );

    // The signal sits on the newest candle, so the next-candle check clamps
    // onto itself and reports an immediate reversal.
    let buy = batch.get("BTC/USD").unwrap();
    assert_eq!(buy.signal_time, bullish_reversal().last().map(|c| c.open_time));
    assert_eq!(buy.confirmation, Some(Confirmation::Reversed));
    assert_eq!(buy.duration, Some(SignalDuration::Immediate));

    for signal in batch.iter() {
        assert!(SignalValidator::validate(signal));
    }
}

#[tokio::test]
async fn test_single_fetch_failure_is_isolated() {
    let source = MemorySource::default()
        .with("EUR/USD", flat(40))
        .with("GBP/USD", flat(40))
        .with("USD/JPY", flat(40));
    let engine = SignalEngine::new(test_config(), source).unwrap();

    let instruments = ["EUR/USD", "BTC/USD", "GBP/USD", "USD/JPY"];
    let batch = engine.generate_all(&instruments, &CancellationToken::new()).await;

    assert_eq!(batch.len(), 4);
    assert_eq!(batch.count(SignalType::NoData), 1);
    assert_eq!(batch.count(SignalType::Hold), 3);
    assert_eq!(batch.get("BTC/USD").unwrap().signal_type, SignalType::NoData);
}

#[tokio::test]
async fn test_repeated_instrument_yields_one_entry() {
    let source = MemorySource::default()
        .with("EUR/USD", flat(40))
        .with("BTC/USD", bullish_reversal());
    let engine = SignalEngine::new(test_config(), source).unwrap();

    let instruments = ["EUR/USD", "BTC/USD", "EUR/USD"];
    let batch = engine.generate_all(&instruments, &CancellationToken::new()).await;

    assert!(batch.is_complete());
    assert_eq!(batch.len(), 2);
    let rows = batch.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0, "EUR/USD");
    assert_eq!(rows[0].1.signal, "HOLD");
    assert_eq!(rows[1].0, "BTC/USD");
    assert_eq!(rows[1].1.signal, "BUY");
}

#[tokio::test]
async fn test_short_series_yields_bare_no_data() {
    let source = MemorySource::default().with("EUR/USD", flat(10));
    let engine = SignalEngine::new(test_config(), source).unwrap();

    let batch = engine.generate_all(&["EUR/USD"], &CancellationToken::new()).await;
    let row = batch.get("EUR/USD").unwrap().to_row();
    assert_eq!(row.signal, "NO DATA");
    assert_eq!(row.signal_time, None);
    assert_eq!(row.confirmation, None);
    assert_eq!(row.duration, None);
}

#[tokio::test]
async fn test_generate_configured_uses_config_order() {
    let config = EngineConfig {
        instruments: vec!["ETH/USD".to_string(), "BTC/USD".to_string()],
        ..test_config()
    };
    let source = MemorySource::default()
        .with("BTC/USD", bullish_reversal())
        .with("ETH/USD", bearish_reversal());
    let engine = SignalEngine::new(config, source).unwrap();

    let batch = engine.generate_configured(&CancellationToken::new()).await;
    let rows = batch.rows();
    assert_eq!(rows[0].0, "ETH/USD");
    assert_eq!(rows[0].1.signal, "SELL");
    assert_eq!(rows[1].0, "BTC/USD");
    assert_eq!(rows[1].1.signal, "BUY");
}

#[tokio::test]
async fn test_cancellation_between_instruments() {
    let token = CancellationToken::new();
    let source = MemorySource {
        cancel_after: Some((2, token.clone())),
        ..Default::default()
    }
    .with("EUR/USD", flat(40))
    .with("GBP/USD", flat(40))
    .with("USD/JPY", flat(40))
    .with("USD/CHF", flat(40));
    let engine = SignalEngine::new(test_config(), source).unwrap();

    let instruments = ["EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF"];
    let batch = engine.generate_all(&instruments, &token).await;

    assert!(!batch.is_complete());
    assert_eq!(batch.len(), 2);
    assert!(batch.get("USD/JPY").is_none());
}

#[tokio::test]
async fn test_cancellation_interrupts_fetch() {
    let engine = SignalEngine::new(test_config(), HangingSource).unwrap();
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let batch = engine.generate_all(&["EUR/USD", "GBP/USD"], &token).await;
    assert!(batch.is_empty());
    assert!(!batch.is_complete());
}

#[tokio::test]
async fn test_pacing_between_instruments() {
    let config = EngineConfig {
        pacing_delay_ms: 30,
        ..Default::default()
    };
    let source = MemorySource::default()
        .with("EUR/USD", flat(40))
        .with("GBP/USD", flat(40))
        .with("USD/JPY", flat(40));
    let engine = SignalEngine::new(config, source).unwrap();

    let started = Instant::now();
    let batch = engine
        .generate_all(&["EUR/USD", "GBP/USD", "USD/JPY"], &CancellationToken::new())
        .await;

    assert_eq!(batch.len(), 3);
    // two gaps, none after the last instrument
    assert!(started.elapsed() >= std::time::Duration::from_millis(60));
}

#[test]
fn test_engine_rejects_invalid_config() {
    let config = EngineConfig {
        instruments: Vec::new(),
        ..Default::default()
    };
    assert!(SignalEngine::new(config, MemorySource::default()).is_err());
}

#[test]
fn test_decoded_klines_flow_through_pipeline() {
    let rows: Vec<Value> = bullish_reversal()
        .iter()
        .map(|c| {
            json!([
                c.open_time.timestamp_millis(),
                c.open.to_string(),
                c.high.to_string(),
                c.low.to_string(),
                c.close.to_string(),
                c.volume.to_string(),
                c.open_time.timestamp_millis() + 299_999,
                "0", 0, "0", "0", "0"
            ])
        })
        .chain(std::iter::once(json!([1, "bad", "1", "1", "1", "1"])))
        .collect();
    let body = serde_json::to_string(&rows).unwrap();

    let series = decode_klines("BTC/USD", &body).unwrap();
    // the malformed trailing row is dropped
    assert_eq!(series.len(), 40);

    let engine = SignalEngine::new(test_config(), MemorySource::default()).unwrap();
    let signal = engine.evaluate_series(&series).unwrap();
    assert_eq!(signal.signal_type, SignalType::Buy);
    assert_eq!(signal.instrument, "BTC/USD");
}
