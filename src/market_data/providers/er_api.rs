//! Open ER-API FX rate provider (open.er-api.com).
//!
//! Free daily reference rates keyed by base currency. No API key is
//! required. Rates are quoted to four decimal places before use.

use std::collections::HashMap;

use anyhow::{Context, Result};
use reqwest::Client;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::market_data::FxRateSource;

const BASE_URL: &str = "https://open.er-api.com";

/// Decimal places kept on a fetched rate.
const RATE_PRECISION: u32 = 4;

/// Response from `/v6/latest/{base}`.
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    /// Map of currency codes to rates against the base.
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// Open ER-API FX rate provider.
#[derive(Debug, Clone)]
pub struct ErApiRateSource {
    client: Client,
    base_url: String,
}

impl ErApiRateSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Creates a new rate source with a custom reqwest client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Overrides the endpoint, mainly so tests can point at a local mock.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for ErApiRateSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FxRateSource for ErApiRateSource {
    async fn latest_rate(&self, base: &str, quote: &str) -> Result<Option<Decimal>> {
        let base_upper = base.to_uppercase();
        let quote_upper = quote.to_uppercase();

        if base_upper == quote_upper {
            return Ok(Some(Decimal::ONE));
        }

        let url = format!("{}/v6/latest/{}", self.base_url, base_upper);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request to ER-API")?
            .error_for_status()
            .context("ER-API returned an error status")?
            .json::<LatestRatesResponse>()
            .await
            .context("Failed to parse ER-API response")?;

        let Some(rate) = response.rates.get(&quote_upper) else {
            return Ok(None);
        };

        let rate = Decimal::try_from(*rate)
            .with_context(|| format!("ER-API rate for {quote_upper} is not a valid number"))?
            .round_dp_with_strategy(RATE_PRECISION, RoundingStrategy::MidpointAwayFromZero);

        Ok(Some(rate))
    }

    fn name(&self) -> &str {
        "er-api"
    }
}
