//! Finnhub latest-quote provider.
//!
//! Uses the `/api/v1/quote` endpoint, which reports the current price in the
//! `c` field. The free tier covers US equities. Requires an API token.

use anyhow::{Context, Result};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::credentials::QuoteToken;
use crate::market_data::EquityQuoteSource;

const BASE_URL: &str = "https://finnhub.io";

/// Quote response from `/api/v1/quote`.
///
/// Finnhub answers HTTP 200 with `c = 0` for symbols it does not know, so a
/// non-positive price means "no usable quote" rather than an error.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price.
    #[serde(default, with = "rust_decimal::serde::float")]
    c: Decimal,
}

pub struct FinnhubQuoteSource {
    token: QuoteToken,
    client: Client,
    base_url: String,
}

impl FinnhubQuoteSource {
    /// Creates a new Finnhub quote source with the given API token.
    pub fn new(token: QuoteToken) -> Self {
        Self {
            token,
            client: Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Creates a new quote source with a custom reqwest client.
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

#[async_trait::async_trait]
impl EquityQuoteSource for FinnhubQuoteSource {
    async fn latest(&self, symbol: &str) -> Result<Option<Decimal>> {
        let url = format!(
            "{}/api/v1/quote?symbol={}&token={}",
            self.base_url,
            symbol.trim().to_uppercase(),
            self.token.expose()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request to Finnhub")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Finnhub API error: status={status}, body={body}");
        }

        let quote: QuoteResponse = response
            .json()
            .await
            .context("Failed to parse Finnhub quote response")?;

        if quote.c <= Decimal::ZERO {
            return Ok(None);
        }

        Ok(Some(quote.c))
    }

    fn name(&self) -> &str {
        "finnhub"
    }
}
