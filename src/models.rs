use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single equity position.
///
/// `cost` and `price` may be missing on rows imported from older data files;
/// valuation substitutes zero for whichever is absent rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub shares: Decimal,
    /// Per-share acquisition cost in the holding's own currency.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost: Option<Decimal>,
    /// Last known per-share price, updated by quote refresh.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
}

impl Holding {
    /// Rows that have not been assigned a real symbol yet.
    ///
    /// Quote refresh skips them without a fetch attempt; valuation still
    /// counts whatever cost/price they already carry.
    pub fn is_placeholder(&self) -> bool {
        let symbol = self.symbol.trim();
        symbol.is_empty() || symbol.eq_ignore_ascii_case("new")
    }
}

/// A cash balance tagged with its currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashPosition {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
}

impl CashPosition {
    pub fn is_in(&self, currency: &str) -> bool {
        self.currency.trim().eq_ignore_ascii_case(currency)
    }
}

/// One day's valuation snapshot.
///
/// `total` and `cost` are optional because records written by earlier
/// versions may lack them; the baseline resolver migrates such records when
/// it reads them. `value` is the legacy alias that older chart readers used
/// for `total` and is still mirrored on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date: NaiveDate,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub pl: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub net_flow: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Decimal>,
}

impl DailyRecord {
    /// The prior total this record represents when used as a baseline.
    ///
    /// Falls back to the legacy `value` field for records written before
    /// `total` existed.
    pub fn baseline_total(&self) -> Option<Decimal> {
        self.total.or(self.value)
    }
}

/// First-run baseline captured when no prior history exists.
///
/// Equal to day one's own totals so that day-one P&L is exactly zero.
/// Retained until a real prior record exists, then discarded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineSeed {
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
}

/// Aggregate root for the persisted portfolio data file.
///
/// Every collection field defaults to empty on load, so the rest of the
/// crate never deals with absent lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioState {
    /// Holdings denominated in the foreign currency.
    #[serde(default)]
    pub foreign: Vec<Holding>,
    /// Holdings denominated in the reporting (domestic) currency.
    #[serde(default)]
    pub domestic: Vec<Holding>,
    #[serde(default)]
    pub cash: Vec<CashPosition>,
    /// Reporting-currency units per foreign unit; survives runs where the
    /// FX fetch fails.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub fx_rate: Option<Decimal>,
    #[serde(default)]
    pub history: Vec<DailyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day1_baseline: Option<BaselineSeed>,
}
