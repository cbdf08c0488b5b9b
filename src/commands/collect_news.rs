use std::path::PathBuf;

use crate::constants::NEWS_DIR;
use crate::error::{Error, Result};
use crate::models::SourceConfig;
use crate::services::{run_news_sync, NewsFetcher, NewsStore, NewsSyncStats};
use crate::utils::get_data_dir;
use crate::utils::time::today_seoul;

pub fn run(sources: PathBuf, news_root: Option<PathBuf>) {
    let root = news_root.unwrap_or_else(|| get_data_dir().join(NEWS_DIR));
    println!("📰 Collecting news into {}", root.display());

    match collect(sources, root) {
        Ok(stats) => {
            println!(
                "✅ News sync completed: {} scraped, {} new, {} skipped",
                stats.scraped, stats.appended, stats.skipped
            );
        }
        Err(e) => {
            eprintln!("❌ News sync failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn collect(sources_path: PathBuf, root: PathBuf) -> Result<NewsSyncStats> {
    let sources = SourceConfig::load(&sources_path)?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Io(format!("Failed to create runtime: {}", e)))?;

    runtime.block_on(async {
        let fetcher = NewsFetcher::new()?;
        let store = NewsStore::new(root);
        run_news_sync(&fetcher, &store, &sources, today_seoul()).await
    })
}
