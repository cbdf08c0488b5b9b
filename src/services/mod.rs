mod news_fetcher;
mod news_store;
mod news_sync;
mod price_store;
mod price_sync;
mod quotes;

pub use news_fetcher::{extract_page_meta, NewsFetcher, PageMeta};
pub use news_store::NewsStore;
pub use news_sync::{run_news_sync, NewsSyncStats};
pub use price_store::PriceStore;
pub use price_sync::run_price_sync;
pub use quotes::{FetchedQuotes, QuoteClient, QuoteEndpoints};
