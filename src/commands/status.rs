use std::path::PathBuf;

use crate::constants::{NEWS_DIR, PRICE_STORE_FILE};
use crate::models::Tier;
use crate::services::{NewsStore, PriceStore};
use crate::utils::get_data_dir;
use crate::utils::time::{format_date, today_seoul, week_start};

pub fn run(store: Option<PathBuf>, news_root: Option<PathBuf>) {
    println!("📊 Dashboard Data Status\n");

    let store_path = store.unwrap_or_else(|| get_data_dir().join(PRICE_STORE_FILE));
    let root = news_root.unwrap_or_else(|| get_data_dir().join(NEWS_DIR));

    show_prices(&PriceStore::new(store_path));
    println!();
    show_news(&NewsStore::new(root));
}

fn show_prices(store: &PriceStore) {
    println!("🔹 Prices ({})", store.path().display());
    match store.load() {
        Ok(history) if history.is_empty() => {
            println!("   No price records yet. Run 'collect-prices' first.");
        }
        Ok(history) => {
            println!("   {} records", history.len());
            if let Some(latest) = history.last() {
                println!(
                    "   Latest {}: nasdaq {:.1}, kospi {:.1}, bitcoin {:.1}, usd_krw {:.1}",
                    latest.date, latest.nasdaq, latest.kospi, latest.bitcoin, latest.usd_krw
                );
            }
        }
        Err(e) => {
            eprintln!("   ⚠️  Could not read price store: {}", e);
        }
    }
}

fn show_news(store: &NewsStore) {
    let today = today_seoul();
    let week = week_start(today);
    let date = format_date(today);
    println!("🔹 News ({})", store.week_file(week).display());

    match store.load_week(week) {
        Ok(weekly) => match weekly.get(&date) {
            Some(bucket) => {
                for tier in Tier::ALL {
                    println!(
                        "   {} {}: {} items",
                        date,
                        tier.as_str(),
                        bucket.items(tier).len()
                    );
                }
            }
            None => {
                println!("   No news for {} yet. Run 'collect-news' first.", date);
            }
        },
        Err(e) => {
            eprintln!("   ⚠️  Could not read weekly news file: {}", e);
        }
    }
}
