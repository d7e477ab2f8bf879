use tracing::{debug, info, warn};

use crate::models::PortfolioState;

use super::MarketDataSources;

/// Per-category outcome of one refresh pass.
///
/// Failures here are never fatal; the counts exist so the run summary can
/// say how stale the valuation inputs are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub fx_updated: bool,
    pub foreign_updated: usize,
    pub foreign_failed: usize,
    pub domestic_updated: usize,
    pub domestic_failed: usize,
}

/// Best-effort refresh of the FX rate and holding prices in `state`.
///
/// Fetches run sequentially: FX first, then each foreign holding through the
/// per-symbol source, then all domestic holdings in one batch. Every failure
/// is isolated: it is logged, the last-known value stays in place, and the
/// pass continues with the next item.
pub async fn refresh_market_data(
    state: &mut PortfolioState,
    sources: &MarketDataSources,
    foreign_currency: &str,
    reporting_currency: &str,
) -> RefreshReport {
    let mut report = RefreshReport::default();

    match sources
        .fx
        .latest_rate(foreign_currency, reporting_currency)
        .await
    {
        Ok(Some(rate)) => {
            state.fx_rate = Some(rate);
            report.fx_updated = true;
            info!(source = sources.fx.name(), rate = %rate, "FX rate updated");
        }
        Ok(None) => {
            warn!(
                source = sources.fx.name(),
                "FX rate unavailable, keeping last-known rate"
            );
        }
        Err(error) => {
            warn!(
                source = sources.fx.name(),
                error = %error,
                "FX rate fetch failed, keeping last-known rate"
            );
        }
    }

    match &sources.equities {
        Some(source) => {
            for holding in state.foreign.iter_mut() {
                if holding.is_placeholder() {
                    continue;
                }
                match source.latest(&holding.symbol).await {
                    Ok(Some(price)) => {
                        holding.price = Some(price);
                        report.foreign_updated += 1;
                        debug!(
                            source = source.name(),
                            symbol = %holding.symbol,
                            price = %price,
                            "price updated"
                        );
                    }
                    Ok(None) => {
                        report.foreign_failed += 1;
                        warn!(
                            source = source.name(),
                            symbol = %holding.symbol,
                            "no usable quote, keeping last-known price"
                        );
                    }
                    Err(error) => {
                        report.foreign_failed += 1;
                        warn!(
                            source = source.name(),
                            symbol = %holding.symbol,
                            error = %error,
                            "price fetch failed, keeping last-known price"
                        );
                    }
                }
            }
        }
        None => {
            debug!("No equity quote token configured, skipping foreign price refresh");
        }
    }

    let symbols: Vec<String> = state
        .domestic
        .iter()
        .filter(|holding| !holding.is_placeholder())
        .map(|holding| holding.symbol.clone())
        .collect();

    if !symbols.is_empty() {
        match sources.batch.latest_batch(&symbols).await {
            Ok(prices) => {
                for holding in state.domestic.iter_mut() {
                    if holding.is_placeholder() {
                        continue;
                    }
                    match prices.get(&holding.symbol) {
                        Some(price) => {
                            holding.price = Some(*price);
                            report.domestic_updated += 1;
                            debug!(
                                source = sources.batch.name(),
                                symbol = %holding.symbol,
                                price = %price,
                                "price updated"
                            );
                        }
                        None => {
                            report.domestic_failed += 1;
                            warn!(
                                source = sources.batch.name(),
                                symbol = %holding.symbol,
                                "no usable quote in batch response, keeping last-known price"
                            );
                        }
                    }
                }
            }
            Err(error) => {
                report.domestic_failed = symbols.len();
                warn!(
                    source = sources.batch.name(),
                    error = %error,
                    "batch quote fetch failed, keeping last-known prices"
                );
            }
        }
    }

    report
}
