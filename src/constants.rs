//! Shared constants: quote sources, meta-tag identifiers, fetch limits.

/// Yahoo Finance symbol for the NASDAQ Composite index
pub const NASDAQ_SYMBOL: &str = "^IXIC";

/// Yahoo Finance symbol for the KOSPI index
pub const KOSPI_SYMBOL: &str = "^KS11";

/// Yahoo Finance v7 quote endpoint (symbol appended as `?symbols=`)
pub const YAHOO_QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";

/// CoinDesk BPI current price endpoint (USD spot price)
pub const COINDESK_BPI_URL: &str = "https://api.coindesk.com/v1/bpi/currentprice.json";

/// Exchange rate endpoint, USD base (KRW read from the `rates` map)
pub const EXCHANGE_RATE_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// Open Graph meta-tag identifiers read from article pages.
///
/// `AUTHOR` is pinned to `article:author`; some pages also expose
/// `og:article:author` for the same field, which is not read.
pub mod meta_tag {
    pub const TITLE: &str = "og:title";
    pub const DESCRIPTION: &str = "og:description";
    pub const IMAGE: &str = "og:image";
    pub const AUTHOR: &str = "article:author";
}

/// Per-request timeout for all outbound HTTP calls
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Maximum in-flight article fetches; results are re-ordered to the
/// configured URL order regardless of completion order
pub const NEWS_FETCH_CONCURRENCY: usize = 4;

/// Price store filename inside the data directory
pub const PRICE_STORE_FILE: &str = "chartData.json";

/// News root directory name inside the data directory
pub const NEWS_DIR: &str = "news";

/// Notify worker state filename inside the data directory
pub const NOTIFY_STATE_FILE: &str = "notify_state.json";

/// Maximum number of dates kept in the notify history (oldest evicted)
pub const NOTIFY_HISTORY_CAP: usize = 3;

/// Default notify worker polling period in seconds
pub const NOTIFY_INTERVAL_SECS: u64 = 3600;
