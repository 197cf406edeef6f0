//! Binance REST klines client

use crate::config::{EngineConfig, Timeframe};
use crate::data::CandleSeries;
use crate::exchange::{decode_klines, MarketDataSource};
use crate::{EngineError, Result};
use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use tracing::{debug, warn};

/// Separator between base and quote in instrument ids ("BTC/USD")
const PAIR_SEPARATOR: char = '/';
/// Appended to separated pairs so USD quotes resolve to USDT markets
const PROVIDER_SUFFIX: &str = "T";

/// Map an instrument id onto the provider's symbol.
///
/// `"BTC/USD"` becomes `"BTCUSDT"`; ids without a separator are passed
/// through uppercased.
pub fn provider_symbol(instrument: &str) -> String {
    let trimmed = instrument.trim();
    let mut symbol: String = trimmed
        .chars()
        .filter(|&c| c != PAIR_SEPARATOR)
        .collect::<String>()
        .to_uppercase();
    if trimmed.contains(PAIR_SEPARATOR) {
        symbol.push_str(PROVIDER_SUFFIX);
    }
    symbol
}

/// Binance spot klines client
#[derive(Debug, Clone)]
pub struct BinanceClient {
    base_url: String,
    client: reqwest::Client,
}

impl BinanceClient {
    /// Create a client from engine configuration (base URL and timeout)
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn klines_url(&self) -> String {
        format!("{}/api/v3/klines", self.base_url)
    }
}

#[async_trait]
impl MarketDataSource for BinanceClient {
    async fn fetch_candles(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries> {
        let symbol = provider_symbol(instrument);
        let limit_param = limit.to_string();
        debug!(instrument, %symbol, %timeframe, limit, "fetching klines");

        let response = self
            .client
            .get(self.klines_url())
            .header(CACHE_CONTROL, "no-cache")
            .query(&[
                ("symbol", symbol.as_str()),
                ("interval", timeframe.as_str()),
                ("limit", limit_param.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(instrument, %symbol, status = status.as_u16(), "klines request rejected");
            return Err(EngineError::Status {
                symbol,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        decode_klines(instrument, &body)
    }
}
