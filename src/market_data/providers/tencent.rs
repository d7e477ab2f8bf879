//! Tencent quote provider for domestic A-share symbols.
//!
//! `qt.gtimg.cn` answers a whole batch of symbols in one request with a line
//! of `v_<symbol>="field0~field1~...";` per symbol; the current price sits at
//! tilde-separated field 3. Symbols are sent lowercased (`sh600519`,
//! `sz000001`). No API key is required.

use std::collections::HashMap;

use anyhow::{Context, Result};
use regex::Regex;
use reqwest::Client;
use rust_decimal::Decimal;

use crate::market_data::BatchQuoteSource;

const BASE_URL: &str = "https://qt.gtimg.cn";

/// Index of the current price within a quote line's tilde-separated fields.
const PRICE_FIELD: usize = 3;

pub struct TencentQuoteSource {
    client: Client,
    base_url: String,
}

impl TencentQuoteSource {
    pub fn new() -> Self {
        Self {
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

impl Default for TencentQuoteSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts prices for the requested symbols from a response body.
///
/// Symbols the response does not cover, and quotes without a positive price
/// at the price field, are left out of the map. Keys are the symbols exactly
/// as requested, whatever their case.
fn parse_batch(body: &str, symbols: &[String]) -> HashMap<String, Decimal> {
    let line = Regex::new(r#"v_([A-Za-z0-9]+)="([^"]*)""#).expect("quote line pattern");

    let mut quoted: HashMap<String, &str> = HashMap::new();
    for caps in line.captures_iter(body) {
        if let (Some(symbol), Some(fields)) = (caps.get(1), caps.get(2)) {
            quoted.insert(symbol.as_str().to_lowercase(), fields.as_str());
        }
    }

    let mut prices = HashMap::new();
    for symbol in symbols {
        let Some(fields) = quoted.get(&symbol.trim().to_lowercase()) else {
            continue;
        };
        let Some(raw) = fields.split('~').nth(PRICE_FIELD) else {
            continue;
        };
        match raw.trim().parse::<Decimal>() {
            Ok(price) if price > Decimal::ZERO => {
                prices.insert(symbol.clone(), price);
            }
            _ => {}
        }
    }

    prices
}

#[async_trait::async_trait]
impl BatchQuoteSource for TencentQuoteSource {
    async fn latest_batch(&self, symbols: &[String]) -> Result<HashMap<String, Decimal>> {
        if symbols.is_empty() {
            return Ok(HashMap::new());
        }

        let query: Vec<String> = symbols
            .iter()
            .map(|symbol| symbol.trim().to_lowercase())
            .collect();
        let url = format!("{}/q={}", self.base_url, query.join(","));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send request to Tencent quotes")?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("Tencent quote API error: status={status}");
        }

        let body = response
            .text()
            .await
            .context("Failed to read Tencent quote response")?;

        Ok(parse_batch(&body, symbols))
    }

    fn name(&self) -> &str {
        "tencent"
    }
}
