use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use snapfolio::models::{BaselineSeed, CashPosition, DailyRecord, Holding, PortfolioState};
use snapfolio::storage::{JsonStateStore, StateStore, StateStoreError};
use tempfile::TempDir;

fn sample_state() -> PortfolioState {
    PortfolioState {
        foreign: vec![Holding {
            symbol: "AAPL".to_string(),
            shares: dec!(10),
            cost: Some(dec!(100)),
            price: Some(dec!(110)),
        }],
        domestic: vec![Holding {
            symbol: "sh600519".to_string(),
            shares: dec!(5),
            cost: Some(dec!(1600)),
            price: None,
        }],
        cash: vec![CashPosition {
            amount: dec!(500),
            currency: "USD".to_string(),
        }],
        fx_rate: Some(dec!(7.1883)),
        history: vec![DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(),
            total: Some(dec!(11200)),
            cost: Some(dec!(10500)),
            pl: dec!(120),
            rate: dec!(1.08),
            net_flow: Decimal::ZERO,
            value: Some(dec!(11200)),
        }],
        day1_baseline: Some(BaselineSeed {
            total: dec!(11080),
            cost: dec!(10500),
        }),
    }
}

#[tokio::test]
async fn save_then_load_round_trips() -> Result<()> {
    let dir = TempDir::new()?;
    let store = JsonStateStore::new(dir.path().join("portfolio.json"));

    let state = sample_state();
    store.save(&state).await?;
    let loaded = store.load().await?;

    assert_eq!(loaded, state);
    Ok(())
}

#[tokio::test]
async fn missing_state_file_is_fatal_not_found() -> Result<()> {
    let dir = TempDir::new()?;
    let store = JsonStateStore::new(dir.path().join("portfolio.json"));

    let err = store.load().await.expect_err("expected load failure");
    assert!(matches!(err, StateStoreError::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn corrupt_state_file_is_fatal() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("portfolio.json");
    std::fs::write(&path, "{ not json")?;

    let store = JsonStateStore::new(&path);
    let err = store.load().await.expect_err("expected load failure");
    assert!(matches!(err, StateStoreError::Corrupt { .. }));
    Ok(())
}

#[tokio::test]
async fn sparse_document_loads_with_normalized_collections() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("portfolio.json");
    std::fs::write(&path, r#"{"fxRate": 7.25}"#)?;

    let store = JsonStateStore::new(&path);
    let state = store.load().await?;

    assert!(state.foreign.is_empty());
    assert!(state.domestic.is_empty());
    assert!(state.cash.is_empty());
    assert!(state.history.is_empty());
    assert_eq!(state.fx_rate, Some(dec!(7.25)));
    Ok(())
}

#[tokio::test]
async fn save_replaces_existing_file_without_leftovers() -> Result<()> {
    let dir = TempDir::new()?;
    let store = JsonStateStore::new(dir.path().join("portfolio.json"));

    store.save(&sample_state()).await?;

    let mut updated = sample_state();
    updated.fx_rate = Some(dec!(7.30));
    store.save(&updated).await?;

    let loaded = store.load().await?;
    assert_eq!(loaded.fx_rate, Some(dec!(7.30)));

    // The temp file used for the atomic swap must not linger.
    let entries: Vec<_> = std::fs::read_dir(dir.path())?.collect();
    assert_eq!(entries.len(), 1);
    Ok(())
}

#[tokio::test]
async fn save_creates_missing_parent_directories() -> Result<()> {
    let dir = TempDir::new()?;
    let store = JsonStateStore::new(dir.path().join("nested/data/portfolio.json"));

    store.save(&sample_state()).await?;
    let loaded = store.load().await?;

    assert_eq!(loaded, sample_state());
    Ok(())
}
