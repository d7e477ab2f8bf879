#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use snapfolio::clock::FixedClock;
use snapfolio::config::{ProviderConfig, ResolvedConfig};
use snapfolio::market_data::{
    BatchQuoteSource, EquityQuoteSource, FxRateSource, MarketDataSources,
};
use snapfolio::models::{CashPosition, Holding};

/// FX source that always answers with the same rate (or nothing).
pub struct FixedFx(pub Option<Decimal>);

#[async_trait::async_trait]
impl FxRateSource for FixedFx {
    async fn latest_rate(&self, _base: &str, _quote: &str) -> Result<Option<Decimal>> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "fixed-fx"
    }
}

/// FX source whose fetch always fails.
pub struct FailingFx;

#[async_trait::async_trait]
impl FxRateSource for FailingFx {
    async fn latest_rate(&self, _base: &str, _quote: &str) -> Result<Option<Decimal>> {
        anyhow::bail!("connection refused")
    }

    fn name(&self) -> &str {
        "failing-fx"
    }
}

/// Per-symbol quote source backed by a fixed table.
pub struct TableQuotes(pub HashMap<String, Decimal>);

impl TableQuotes {
    pub fn of(entries: &[(&str, Decimal)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(symbol, price)| (symbol.to_string(), *price))
                .collect(),
        )
    }
}

#[async_trait::async_trait]
impl EquityQuoteSource for TableQuotes {
    async fn latest(&self, symbol: &str) -> Result<Option<Decimal>> {
        Ok(self.0.get(symbol).copied())
    }

    fn name(&self) -> &str {
        "table"
    }
}

/// Batch quote source backed by a fixed table.
pub struct TableBatch(pub HashMap<String, Decimal>);

impl TableBatch {
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn of(entries: &[(&str, Decimal)]) -> Self {
        Self(
            entries
                .iter()
                .map(|(symbol, price)| (symbol.to_string(), *price))
                .collect(),
        )
    }
}

#[async_trait::async_trait]
impl BatchQuoteSource for TableBatch {
    async fn latest_batch(&self, symbols: &[String]) -> Result<HashMap<String, Decimal>> {
        Ok(symbols
            .iter()
            .filter_map(|symbol| self.0.get(symbol).map(|price| (symbol.clone(), *price)))
            .collect())
    }

    fn name(&self) -> &str {
        "table-batch"
    }
}

/// Equity source whose fetch always fails.
pub struct FailingQuotes;

#[async_trait::async_trait]
impl EquityQuoteSource for FailingQuotes {
    async fn latest(&self, _symbol: &str) -> Result<Option<Decimal>> {
        anyhow::bail!("gateway timeout")
    }

    fn name(&self) -> &str {
        "failing-quotes"
    }
}

/// Batch source whose fetch always fails.
pub struct FailingBatch;

#[async_trait::async_trait]
impl BatchQuoteSource for FailingBatch {
    async fn latest_batch(&self, _symbols: &[String]) -> Result<HashMap<String, Decimal>> {
        anyhow::bail!("gateway timeout")
    }

    fn name(&self) -> &str {
        "failing-batch"
    }
}

pub fn sources(
    fx: Arc<dyn FxRateSource>,
    equities: Option<Arc<dyn EquityQuoteSource>>,
    batch: Arc<dyn BatchQuoteSource>,
) -> MarketDataSources {
    MarketDataSources {
        fx,
        equities,
        batch,
    }
}

/// Config with the default currency pair, pointing nowhere on disk.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        state_file: "unused.json".into(),
        reporting_currency: "CNY".to_string(),
        foreign_currency: "USD".to_string(),
        reporting_timezone: chrono_tz::Asia::Shanghai,
        default_fx_rate: dec!(7.25),
        providers: ProviderConfig::default(),
    }
}

/// Noon in the reporting timezone on the given day.
pub fn clock_on(year: i32, month: u32, day: u32) -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(year, month, day, 4, 0, 0).unwrap())
}

pub fn holding(symbol: &str, shares: Decimal, cost: Option<Decimal>, price: Option<Decimal>) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        shares,
        cost,
        price,
    }
}

pub fn cash(amount: Decimal, currency: &str) -> CashPosition {
    CashPosition {
        amount,
        currency: currency.to_string(),
    }
}
