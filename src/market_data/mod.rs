pub mod providers;
mod refresh;
mod sources;

pub use refresh::{refresh_market_data, RefreshReport};
pub use sources::{BatchQuoteSource, EquityQuoteSource, FxRateSource, MarketDataSources};
