use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands;
use crate::constants::NOTIFY_INTERVAL_SECS;

#[derive(Parser)]
#[command(name = "stock-news")]
#[command(about = "Stock news & market price collector", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect today's four market quotes into the price store
    CollectPrices {
        /// Path to the price store JSON file
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Scrape configured article URLs into this week's news file
    CollectNews {
        /// Path to the source URL config file
        #[arg(long, default_value = "input.json")]
        sources: PathBuf,
        /// Root directory for weekly news files
        #[arg(long)]
        news_root: Option<PathBuf>,
    },
    /// Show current store state
    Status {
        /// Path to the price store JSON file
        #[arg(long)]
        store: Option<PathBuf>,
        /// Root directory for weekly news files
        #[arg(long)]
        news_root: Option<PathBuf>,
    },
    /// Watch for new daily content and announce it at most once per day
    Watch {
        /// Root directory for weekly news files
        #[arg(long)]
        news_root: Option<PathBuf>,
        /// Path to the notify state file
        #[arg(long)]
        state: Option<PathBuf>,
        /// Polling period in seconds
        #[arg(long, default_value_t = NOTIFY_INTERVAL_SECS)]
        interval_secs: u64,
    },
}

pub fn run() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("stock_news={}", cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::CollectPrices { store } => {
            commands::collect_prices::run(store);
        }
        Commands::CollectNews { sources, news_root } => {
            commands::collect_news::run(sources, news_root);
        }
        Commands::Status { store, news_root } => {
            commands::status::run(store, news_root);
        }
        Commands::Watch {
            news_root,
            state,
            interval_secs,
        } => {
            commands::watch::run(news_root, state, interval_secs);
        }
    }
}
