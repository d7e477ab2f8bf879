mod baseline;
mod snapshot;
mod valuation;

pub use baseline::{profit_loss, resolve_baseline, Baseline, ProfitLoss};
pub use snapshot::{record_snapshot, HISTORY_CAPACITY};
pub use valuation::{value_portfolio, Valuation};
