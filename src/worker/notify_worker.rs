//! New-content notifier - announces fresh daily news at most once per day.
//!
//! Polls the weekly news store and, when a non-empty bucket for today
//! appears, emits one notification and records the date in a small state
//! file so restarts do not re-announce the same day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::constants::NOTIFY_HISTORY_CAP;
use crate::error::{Error, Result};
use crate::services::NewsStore;
use crate::utils::time::{format_date, today_seoul, week_start};

/// Dates already announced, newest last, capped at [`NOTIFY_HISTORY_CAP`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifyState {
    #[serde(default)]
    pub notified_dates: Vec<String>,
}

impl NotifyState {
    /// Load state from file, or start fresh if missing or unreadable
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<NotifyState>(&contents) {
                Ok(state) => {
                    debug!(path = %path.display(), "Loaded notify state");
                    state
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse notify state; starting fresh");
                    NotifyState::default()
                }
            },
            Err(_) => NotifyState::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Io(format!("Failed to create {}: {}", parent.display(), e)))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .map_err(|e| Error::Io(format!("Failed to write {}: {}", path.display(), e)))
    }

    pub fn already_notified(&self, date: &str) -> bool {
        self.notified_dates.iter().any(|d| d == date)
    }

    /// Record a date, evicting the oldest entries beyond the cap
    pub fn record(&mut self, date: &str) {
        self.notified_dates.push(date.to_string());
        while self.notified_dates.len() > NOTIFY_HISTORY_CAP {
            self.notified_dates.remove(0);
        }
    }
}

/// True when the weekly file holds a non-empty bucket for `today`
pub fn has_news_for(store: &NewsStore, today: NaiveDate) -> Result<bool> {
    let weekly = store.load_week(week_start(today))?;
    Ok(weekly
        .get(&format_date(today))
        .map(|bucket| !bucket.is_empty())
        .unwrap_or(false))
}

/// One poll step; returns true when a notification was emitted
pub fn check_and_notify(
    store: &NewsStore,
    state: &mut NotifyState,
    state_path: &Path,
    today: NaiveDate,
) -> Result<bool> {
    let date = format_date(today);
    if state.already_notified(&date) {
        return Ok(false);
    }
    if !has_news_for(store, today)? {
        return Ok(false);
    }

    println!("🔔 New articles available for {}", date);
    info!(date = %date, "New content notification emitted");
    state.record(&date);
    state.save(state_path)?;
    Ok(true)
}

/// Long-lived polling loop; iteration errors are logged and the loop continues
pub async fn run(store: NewsStore, state_path: PathBuf, interval: Duration) {
    info!(
        news_root = %store.root().display(),
        state = %state_path.display(),
        interval_secs = interval.as_secs(),
        "Starting notify worker"
    );

    let mut state = NotifyState::load(&state_path);
    loop {
        let today = today_seoul();
        match check_and_notify(&store, &mut state, &state_path, today) {
            Ok(true) => {}
            Ok(false) => debug!(date = %format_date(today), "No unannounced content"),
            Err(e) => warn!(error = %e, "Notify check failed"),
        }
        tokio::time::sleep(interval).await;
    }
}
