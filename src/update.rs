use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::clock::Clock;
use crate::config::ResolvedConfig;
use crate::market_data::{refresh_market_data, MarketDataSources, RefreshReport};
use crate::models::DailyRecord;
use crate::portfolio::{profit_loss, record_snapshot, resolve_baseline, value_portfolio};
use crate::storage::StateStore;

/// Outcome of one update-and-persist cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSummary {
    pub date: NaiveDate,
    pub grand_total: Decimal,
    pub total_cost: Decimal,
    pub pl: Decimal,
    pub rate: Decimal,
    pub net_flow: Decimal,
    pub refresh: RefreshReport,
}

/// Runs one full cycle: load, refresh quotes, value, measure against the
/// baseline, record today's snapshot, persist.
///
/// Quote and FX failures are recovered per item inside the refresh; only the
/// initial load and the final save are fatal. Re-running within the same
/// reporting-timezone day recomputes and overwrites today's record, so the
/// cycle is safe to schedule repeatedly.
pub async fn run_update(
    store: &dyn StateStore,
    sources: &MarketDataSources,
    clock: &dyn Clock,
    config: &ResolvedConfig,
) -> Result<UpdateSummary> {
    let mut state = store
        .load()
        .await
        .context("Cannot establish a starting state")?;

    // Normalize before fetching: a state that has never seen an FX quote
    // starts from the configured default, and keeps it if the fetch fails.
    let fx_rate = *state.fx_rate.get_or_insert(config.default_fx_rate);

    let refresh = refresh_market_data(
        &mut state,
        sources,
        &config.foreign_currency,
        &config.reporting_currency,
    )
    .await;

    let fx_rate = state.fx_rate.unwrap_or(fx_rate);
    let valuation = value_portfolio(
        &state.foreign,
        &state.domestic,
        &state.cash,
        fx_rate,
        &config.foreign_currency,
    );

    let today = clock.today_in(config.reporting_timezone);
    let baseline = resolve_baseline(
        &mut state.history,
        &mut state.day1_baseline,
        today,
        &valuation,
    );
    let result = profit_loss(&valuation, baseline);

    record_snapshot(
        &mut state.history,
        DailyRecord {
            date: today,
            total: Some(valuation.grand_total),
            cost: Some(valuation.total_cost),
            pl: result.pl,
            rate: result.rate,
            net_flow: result.net_flow,
            value: Some(valuation.grand_total),
        },
    );

    store
        .save(&state)
        .await
        .context("Failed to persist updated state")?;

    let summary = UpdateSummary {
        date: today,
        grand_total: valuation.grand_total,
        total_cost: valuation.total_cost,
        pl: result.pl,
        rate: result.rate,
        net_flow: result.net_flow,
        refresh,
    };

    info!(
        date = %summary.date,
        total = %summary.grand_total,
        cost = %summary.total_cost,
        net_flow = %summary.net_flow,
        pl = %summary.pl,
        "update cycle complete"
    );

    Ok(summary)
}
