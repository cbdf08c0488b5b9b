//! Market quote clients for the price collector.
//!
//! Four independent sources feed one daily record: the NASDAQ and KOSPI
//! indices from the Yahoo quote endpoint, Bitcoin spot from CoinDesk, and
//! the USD/KRW rate from exchangerate-api. Sources fail independently; a
//! failed source surfaces as `None` in [`FetchedQuotes`] and the caller
//! decides whether the set is complete enough to persist.

use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use crate::constants::{
    COINDESK_BPI_URL, EXCHANGE_RATE_URL, FETCH_TIMEOUT_SECS, KOSPI_SYMBOL, NASDAQ_SYMBOL,
    YAHOO_QUOTE_URL,
};
use crate::error::{Error, Result};
use crate::models::PriceRecord;

/// Source URLs for the four quote fetches.
///
/// Tests point these at a mock server; production uses the defaults.
#[derive(Debug, Clone)]
pub struct QuoteEndpoints {
    /// CoinDesk BPI current price (JSON, `bpi.USD.rate_float`)
    pub bitcoin_url: String,
    /// Yahoo v7 quote endpoint, `?symbols=` appended per request
    pub quote_url: String,
    /// Exchange rate feed, USD base (`rates.KRW`)
    pub fx_url: String,
}

impl Default for QuoteEndpoints {
    fn default() -> Self {
        Self {
            bitcoin_url: COINDESK_BPI_URL.to_string(),
            quote_url: YAHOO_QUOTE_URL.to_string(),
            fx_url: EXCHANGE_RATE_URL.to_string(),
        }
    }
}

/// Result of one collection pass; `None` marks a source that failed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedQuotes {
    pub nasdaq: Option<f64>,
    pub kospi: Option<f64>,
    pub bitcoin: Option<f64>,
    pub usd_krw: Option<f64>,
}

impl FetchedQuotes {
    /// Names of the sources that did not resolve, in record-field order
    pub fn missing_sources(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.nasdaq.is_none() {
            missing.push("nasdaq");
        }
        if self.kospi.is_none() {
            missing.push("kospi");
        }
        if self.bitcoin.is_none() {
            missing.push("bitcoin");
        }
        if self.usd_krw.is_none() {
            missing.push("usd_krw");
        }
        missing
    }

    /// Build the daily record, or `None` unless every source resolved
    pub fn into_record(self, date: &str) -> Option<PriceRecord> {
        Some(PriceRecord {
            date: date.to_string(),
            nasdaq: self.nasdaq?,
            kospi: self.kospi?,
            bitcoin: self.bitcoin?,
            usd_krw: self.usd_krw?,
        })
    }
}

/// HTTP client for the four quote sources
pub struct QuoteClient {
    client: reqwest::Client,
    endpoints: QuoteEndpoints,
}

impl QuoteClient {
    pub fn new() -> Result<Self> {
        Self::with_endpoints(QuoteEndpoints::default())
    }

    pub fn with_endpoints(endpoints: QuoteEndpoints) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, endpoints })
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request failed: {} (url: {})", e, url)))?;

        if !response.status().is_success() {
            return Err(Error::Network(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::Parse(format!("Invalid JSON from {}: {}", url, e)))
    }

    /// Bitcoin USD spot price
    pub async fn fetch_bitcoin(&self) -> Result<f64> {
        let body = self.get_json(&self.endpoints.bitcoin_url).await?;
        body["bpi"]["USD"]["rate_float"].as_f64().ok_or_else(|| {
            Error::Parse("bpi.USD.rate_float missing from CoinDesk response".to_string())
        })
    }

    /// Regular market price for an index symbol (`^IXIC`, `^KS11`)
    pub async fn fetch_index(&self, symbol: &str) -> Result<f64> {
        let url = format!("{}?symbols={}", self.endpoints.quote_url, symbol);
        let body = self.get_json(&url).await?;
        body["quoteResponse"]["result"][0]["regularMarketPrice"]
            .as_f64()
            .ok_or_else(|| Error::Parse(format!("regularMarketPrice missing for {}", symbol)))
    }

    /// KRW per USD
    pub async fn fetch_usd_krw(&self) -> Result<f64> {
        let body = self.get_json(&self.endpoints.fx_url).await?;
        body["rates"]["KRW"]
            .as_f64()
            .ok_or_else(|| Error::Parse("rates.KRW missing from exchange rate response".to_string()))
    }

    /// Fetch all four quotes concurrently.
    ///
    /// There is no dependency between the sources; each failure is logged
    /// here and reported as `None` rather than raised.
    pub async fn fetch_all(&self) -> FetchedQuotes {
        let (nasdaq, kospi, bitcoin, usd_krw) = tokio::join!(
            self.fetch_index(NASDAQ_SYMBOL),
            self.fetch_index(KOSPI_SYMBOL),
            self.fetch_bitcoin(),
            self.fetch_usd_krw(),
        );

        FetchedQuotes {
            nasdaq: ok_or_log("nasdaq", nasdaq),
            kospi: ok_or_log("kospi", kospi),
            bitcoin: ok_or_log("bitcoin", bitcoin),
            usd_krw: ok_or_log("usd_krw", usd_krw),
        }
    }
}

fn ok_or_log(source: &'static str, result: Result<f64>) -> Option<f64> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(source, error = %e, "Quote fetch failed");
            None
        }
    }
}
