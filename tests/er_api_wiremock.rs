use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use snapfolio::market_data::providers::er_api::ErApiRateSource;
use snapfolio::market_data::FxRateSource;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn er_api_fetches_and_quantizes_rate() -> Result<()> {
    let server = MockServer::start().await;

    let body = r#"{
        "result": "success",
        "base_code": "USD",
        "rates": {"USD": 1, "CNY": 7.12345678, "EUR": 0.9128}
    }"#;
    Mock::given(method("GET"))
        .and(path("/v6/latest/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let provider = ErApiRateSource::new().with_base_url(server.uri());
    let rate = provider.latest_rate("usd", "cny").await?;

    // Quoted to four decimal places.
    assert_eq!(rate, Some(dec!(7.1235)));
    Ok(())
}

#[tokio::test]
async fn er_api_missing_quote_currency_returns_none() -> Result<()> {
    let server = MockServer::start().await;

    let body = r#"{"result": "success", "base_code": "USD", "rates": {"EUR": 0.9128}}"#;
    Mock::given(method("GET"))
        .and(path("/v6/latest/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let provider = ErApiRateSource::new().with_base_url(server.uri());
    let rate = provider.latest_rate("USD", "CNY").await?;

    assert_eq!(rate, None);
    Ok(())
}

#[tokio::test]
async fn er_api_same_currency_skips_http() -> Result<()> {
    let server = MockServer::start().await;

    let provider = ErApiRateSource::new().with_base_url(server.uri());
    let rate = provider.latest_rate("CNY", "cny").await?;

    assert_eq!(rate, Some(Decimal::ONE));
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "expected no HTTP requests");
    Ok(())
}

#[tokio::test]
async fn er_api_error_status_is_an_error() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v6/latest/USD"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = ErApiRateSource::new().with_base_url(server.uri());
    let result = provider.latest_rate("USD", "CNY").await;

    assert!(result.is_err());
    Ok(())
}
