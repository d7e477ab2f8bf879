pub mod er_api;
pub mod finnhub;
pub mod tencent;

pub use er_api::ErApiRateSource;
pub use finnhub::FinnhubQuoteSource;
pub use tencent::TencentQuoteSource;
