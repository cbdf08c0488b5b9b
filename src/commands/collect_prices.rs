use std::path::PathBuf;

use crate::constants::PRICE_STORE_FILE;
use crate::error::{Error, Result};
use crate::services::{run_price_sync, PriceStore, QuoteClient};
use crate::utils::get_data_dir;
use crate::utils::time::{format_date, today_seoul};

pub fn run(store: Option<PathBuf>) {
    let path = store.unwrap_or_else(|| get_data_dir().join(PRICE_STORE_FILE));
    println!("📈 Collecting daily prices into {}", path.display());

    match collect(path) {
        Ok(date) => {
            println!("✅ Price record saved for {}", date);
        }
        Err(e) => {
            eprintln!("❌ Price sync failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn collect(path: PathBuf) -> Result<String> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Io(format!("Failed to create runtime: {}", e)))?;

    runtime.block_on(async {
        let client = QuoteClient::new()?;
        let store = PriceStore::new(path);
        let today = today_seoul();
        run_price_sync(&client, &store, today).await?;
        Ok(format_date(today))
    })
}
