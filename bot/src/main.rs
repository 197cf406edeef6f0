use anyhow::{Context, Result};
use signal_engine::prelude::*;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

const SIGNAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Host loop settings, separate from the engine's own configuration
struct RunSettings {
    refresh: Duration,
    run_once: bool,
}

impl RunSettings {
    fn from_env() -> Result<Self> {
        let refresh_secs = match std::env::var("SIGNAL_REFRESH_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SIGNAL_REFRESH_SECS: invalid value {:?}", raw))?,
            Err(_) => 30,
        };
        if refresh_secs == 0 {
            anyhow::bail!("SIGNAL_REFRESH_SECS must be greater than zero");
        }

        let run_once = std::env::var("SIGNAL_RUN_ONCE")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            refresh: Duration::from_secs(refresh_secs),
            run_once,
        })
    }
}

fn report(batch: &SignalBatch) {
    for (instrument, row) in batch.rows() {
        let time = row
            .signal_time
            .map(|t| t.format(SIGNAL_TIME_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string());
        tracing::info!(
            %instrument,
            signal = row.signal,
            %time,
            confirmation = row.confirmation.unwrap_or("-"),
            duration = row.duration.as_deref().unwrap_or("-"),
            "signal"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git = option_env!("GIT_HASH").unwrap_or("unknown"),
        built = option_env!("BUILD_TIME").unwrap_or("unknown"),
        "Starting signal bot..."
    );

    let settings = RunSettings::from_env()?;
    let config = EngineConfig::from_env().context("loading engine configuration")?;
    tracing::info!(
        instruments = config.instruments.len(),
        interval = %config.timeframe,
        refresh_secs = settings.refresh.as_secs(),
        "Configuration loaded"
    );

    let client = BinanceClient::new(&config)?;
    tracing::info!(api = client.base_url(), "Market data client created");
    let engine = SignalEngine::new(config, client)?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            ctrl_c.cancel();
        }
    });

    if settings.run_once {
        let batch = engine.generate_configured(&cancel).await;
        report(&batch);
        return Ok(());
    }

    let mut ticker = tokio::time::interval(settings.refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let batch = engine.generate_configured(&cancel).await;
        if !batch.is_complete() {
            break;
        }
        report(&batch);
    }

    tracing::info!("Signal bot stopped");
    Ok(())
}
