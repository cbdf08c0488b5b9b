use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{NEWS_DIR, NOTIFY_STATE_FILE};
use crate::services::NewsStore;
use crate::utils::get_data_dir;
use crate::worker;

pub fn run(news_root: Option<PathBuf>, state: Option<PathBuf>, interval_secs: u64) {
    let root = news_root.unwrap_or_else(|| get_data_dir().join(NEWS_DIR));
    let state_path = state.unwrap_or_else(|| get_data_dir().join(NOTIFY_STATE_FILE));
    println!(
        "👀 Watching {} every {}s (Ctrl-C to stop)",
        root.display(),
        interval_secs
    );

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Failed to create runtime: {}", e);
            std::process::exit(1);
        }
    };

    runtime.block_on(worker::run_notify_worker(
        NewsStore::new(root),
        state_path,
        Duration::from_secs(interval_secs),
    ));
}
