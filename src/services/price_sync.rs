//! Daily price collection: fetch four quotes, upsert one record.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::upsert;
use crate::services::{PriceStore, QuoteClient};
use crate::utils::time::format_date;

/// Run one price collection pass for `today`.
///
/// All-or-nothing: the store is only written when every source resolved,
/// so a partially failed run leaves the file byte-identical. Re-running on
/// the same day replaces that day's record in place. The store is read
/// before any fetch; an unreadable store aborts without network activity.
pub async fn run_price_sync(
    client: &QuoteClient,
    store: &PriceStore,
    today: NaiveDate,
) -> Result<()> {
    let mut history = store.load()?;
    let date = format_date(today);
    info!(date = %date, store = %store.path().display(), "Starting price sync");

    let quotes = client.fetch_all().await;
    let missing = quotes.missing_sources();
    if !missing.is_empty() {
        warn!(missing = %missing.join(", "), "Aborting price sync without writing");
        return Err(Error::MissingData(format!(
            "quote sources unresolved: {}",
            missing.join(", ")
        )));
    }

    let record = quotes
        .into_record(&date)
        .ok_or_else(|| Error::MissingData("quote set incomplete".to_string()))?;

    upsert(&mut history, record);
    store.save(&history)?;
    info!(date = %date, records = history.len(), "Price sync completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceRecord;
    use crate::services::QuoteEndpoints;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use std::fs;

    fn today() -> NaiveDate {
        NaiveDate::parse_from_str("2024-10-01", "%Y-%m-%d").unwrap()
    }

    fn test_client(server: &MockServer) -> QuoteClient {
        QuoteClient::with_endpoints(QuoteEndpoints {
            bitcoin_url: format!("{}/v1/bpi/currentprice.json", server.base_url()),
            quote_url: format!("{}/v7/finance/quote", server.base_url()),
            fx_url: format!("{}/v4/latest/USD", server.base_url()),
        })
        .unwrap()
    }

    fn mock_indices_and_bitcoin(server: &MockServer, bitcoin: f64) {
        server.mock(|when, then| {
            when.method(GET)
                .path("/v7/finance/quote")
                .query_param("symbols", "^IXIC");
            then.status(200).json_body(serde_json::json!({
                "quoteResponse": { "result": [ { "regularMarketPrice": 18000.1 } ] }
            }));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/v7/finance/quote")
                .query_param("symbols", "^KS11");
            then.status(200).json_body(serde_json::json!({
                "quoteResponse": { "result": [ { "regularMarketPrice": 2600.5 } ] }
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/v1/bpi/currentprice.json");
            then.status(200).json_body(serde_json::json!({
                "bpi": { "USD": { "rate_float": bitcoin } }
            }));
        });
    }

    fn mock_all_sources(server: &MockServer, bitcoin: f64) {
        mock_indices_and_bitcoin(server, bitcoin);
        server.mock(|when, then| {
            when.method(GET).path("/v4/latest/USD");
            then.status(200)
                .json_body(serde_json::json!({ "rates": { "KRW": 1330.2 } }));
        });
    }

    fn other_day_record() -> PriceRecord {
        PriceRecord {
            date: "2024-09-30".to_string(),
            nasdaq: 17900.0,
            kospi: 2590.0,
            bitcoin: 62000.0,
            usd_krw: 1325.0,
        }
    }

    #[tokio::test]
    async fn test_first_run_appends_todays_record() {
        let server = MockServer::start();
        mock_all_sources(&server, 63000.0);
        let dir = tempfile::tempdir().unwrap();
        let store = PriceStore::new(dir.path().join("chartData.json"));

        run_price_sync(&test_client(&server), &store, today())
            .await
            .unwrap();

        let history = store.load().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].date, "2024-10-01");
        assert_eq!(history[0].bitcoin, 63000.0);
    }

    #[tokio::test]
    async fn test_same_day_rerun_replaces_in_place() {
        let server = MockServer::start();
        mock_all_sources(&server, 64000.0);
        let dir = tempfile::tempdir().unwrap();
        let store = PriceStore::new(dir.path().join("chartData.json"));
        store
            .save(&[
                other_day_record(),
                PriceRecord {
                    date: "2024-10-01".to_string(),
                    nasdaq: 1.0,
                    kospi: 1.0,
                    bitcoin: 1.0,
                    usd_krw: 1.0,
                },
            ])
            .unwrap();

        run_price_sync(&test_client(&server), &store, today())
            .await
            .unwrap();

        let history = store.load().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], other_day_record());
        assert_eq!(history[1].date, "2024-10-01");
        assert_eq!(history[1].bitcoin, 64000.0);
    }

    #[tokio::test]
    async fn test_one_failed_source_leaves_store_byte_identical() {
        let server = MockServer::start();
        mock_indices_and_bitcoin(&server, 63000.0);
        server.mock(|when, then| {
            when.method(GET).path("/v4/latest/USD");
            then.status(500);
        });

        let dir = tempfile::tempdir().unwrap();
        let store = PriceStore::new(dir.path().join("chartData.json"));
        store.save(&[other_day_record()]).unwrap();
        let before = fs::read(store.path()).unwrap();

        let err = run_price_sync(&test_client(&server), &store, today())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingData(_)), "got {:?}", err);
        assert!(err.to_string().contains("usd_krw"));

        let after = fs::read(store.path()).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_unreadable_store_aborts_before_any_fetch() {
        let server = MockServer::start();
        let quote_mock = server.mock(|when, then| {
            when.method(GET).path("/v7/finance/quote");
            then.status(200).json_body(serde_json::json!({}));
        });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chartData.json");
        fs::write(&path, "[{corrupt").unwrap();

        let err = run_price_sync(&test_client(&server), &PriceStore::new(path), today())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {:?}", err);
        quote_mock.assert_hits(0);
    }
}
