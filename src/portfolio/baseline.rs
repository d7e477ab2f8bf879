use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{BaselineSeed, DailyRecord};

use super::Valuation;

/// Reference point today's run is measured against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub prev_total: Decimal,
    pub prev_cost: Decimal,
}

/// Selects the baseline for `today` and keeps the persisted seed consistent.
///
/// The most recent record for a prior date wins. When no prior record exists
/// (first ever run), a seed equal to today's own totals is captured once so
/// day-one P&L comes out exactly zero; same-day re-runs reuse the seed
/// without overwriting it, and the seed is dropped as soon as real prior
/// history exists.
///
/// Records written by earlier versions are migrated while resolving: one
/// carrying only the old `value` field is read as `total`, and one with no
/// cost basis gets today's cost written back in place so that transition
/// shows a zero net flow.
pub fn resolve_baseline(
    history: &mut [DailyRecord],
    seed: &mut Option<BaselineSeed>,
    today: NaiveDate,
    valuation: &Valuation,
) -> Option<Baseline> {
    let prior = history.iter_mut().filter(|r| r.date != today).last();

    match prior {
        Some(record) => {
            // Real history exists; the first-run seed has served its purpose.
            *seed = None;

            let prev_cost = match record.cost {
                Some(cost) => cost,
                None => {
                    record.cost = Some(valuation.total_cost);
                    valuation.total_cost
                }
            };
            let prev_total = record.baseline_total().unwrap_or(valuation.grand_total);

            Some(Baseline {
                prev_total,
                prev_cost,
            })
        }
        None => {
            let seed = seed.get_or_insert(BaselineSeed {
                total: valuation.grand_total,
                cost: valuation.total_cost,
            });

            Some(Baseline {
                prev_total: seed.total,
                prev_cost: seed.cost,
            })
        }
    }
}

/// Today's change split into capital flow and market movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitLoss {
    /// Market-driven profit or loss since the baseline.
    pub pl: Decimal,
    /// `pl` as a percentage of the baseline total; zero when the baseline
    /// total is zero or negative.
    pub rate: Decimal,
    /// Change in cost basis since the baseline: deposits and withdrawals,
    /// not market performance.
    pub net_flow: Decimal,
}

impl ProfitLoss {
    const ZERO: ProfitLoss = ProfitLoss {
        pl: Decimal::ZERO,
        rate: Decimal::ZERO,
        net_flow: Decimal::ZERO,
    };
}

/// Measures today's valuation against the baseline.
///
/// The cost-basis delta is taken out of the raw total change first, so `pl`
/// reflects market movement alone. Without a baseline all three components
/// are zero.
pub fn profit_loss(valuation: &Valuation, baseline: Option<Baseline>) -> ProfitLoss {
    let Some(baseline) = baseline else {
        return ProfitLoss::ZERO;
    };

    let net_flow = valuation.total_cost - baseline.prev_cost;
    let pl = valuation.grand_total - baseline.prev_total - net_flow;
    let rate = if baseline.prev_total > Decimal::ZERO {
        pl / baseline.prev_total * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    ProfitLoss { pl, rate, net_flow }
}
