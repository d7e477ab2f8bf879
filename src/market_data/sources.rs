use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::config::ResolvedConfig;
use crate::credentials::QuoteToken;

use super::providers::{ErApiRateSource, FinnhubQuoteSource, TencentQuoteSource};

/// Latest-price source queried one symbol at a time.
#[async_trait::async_trait]
pub trait EquityQuoteSource: Send + Sync {
    /// Latest trade price for `symbol`, or `None` when the source has no
    /// usable quote for it.
    async fn latest(&self, symbol: &str) -> Result<Option<Decimal>>;

    fn name(&self) -> &str;
}

/// Latest-price source that answers for many symbols in one request.
#[async_trait::async_trait]
pub trait BatchQuoteSource: Send + Sync {
    /// Latest prices keyed by symbol as passed in. Symbols missing from the
    /// map had no usable quote in the response.
    async fn latest_batch(&self, symbols: &[String]) -> Result<HashMap<String, Decimal>>;

    fn name(&self) -> &str;
}

/// Foreign-exchange rate source.
#[async_trait::async_trait]
pub trait FxRateSource: Send + Sync {
    /// Units of `quote` per one unit of `base`, or `None` when unavailable.
    async fn latest_rate(&self, base: &str, quote: &str) -> Result<Option<Decimal>>;

    fn name(&self) -> &str;
}

/// The set of sources one update run draws from.
pub struct MarketDataSources {
    pub fx: Arc<dyn FxRateSource>,
    /// Absent when no API token is configured; the foreign-holdings refresh
    /// is then skipped entirely.
    pub equities: Option<Arc<dyn EquityQuoteSource>>,
    pub batch: Arc<dyn BatchQuoteSource>,
}

impl MarketDataSources {
    /// Wire up the live providers for a run.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let equities = QuoteToken::from_env(&config.providers.finnhub_token_env)
            .map(|token| Arc::new(FinnhubQuoteSource::new(token)) as Arc<dyn EquityQuoteSource>);

        Self {
            fx: Arc::new(ErApiRateSource::new()),
            equities,
            batch: Arc::new(TencentQuoteSource::new()),
        }
    }
}
