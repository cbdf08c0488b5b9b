//! Weekly news files under `<root>/<year>/<weekStart>.json`.

use chrono::{Datelike, NaiveDate};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::WeeklyNews;
use crate::utils::time::format_date;

/// Store for Monday-anchored weekly news files.
///
/// The year directory comes from the calendar year of the week's Monday,
/// so a week spanning New Year files under the Monday's year.
pub struct NewsStore {
    root: PathBuf,
}

impl NewsStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding the week starting at `week_start`
    pub fn week_file(&self, week_start: NaiveDate) -> PathBuf {
        self.root
            .join(week_start.year().to_string())
            .join(format!("{}.json", format_date(week_start)))
    }

    /// Load one week; a file that does not exist yet is an empty map
    pub fn load_week(&self, week_start: NaiveDate) -> Result<WeeklyNews> {
        let path = self.week_file(week_start);
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| Error::Parse(format!("Failed to parse {}: {}", path.display(), e))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(WeeklyNews::new()),
            Err(e) => Err(Error::Io(format!("Failed to read {}: {}", path.display(), e))),
        }
    }

    /// Write one week back, creating the year directory if needed
    pub fn save_week(&self, week_start: NaiveDate, weekly: &WeeklyNews) -> Result<()> {
        let year_dir = self.root.join(week_start.year().to_string());
        fs::create_dir_all(&year_dir)
            .map_err(|e| Error::Io(format!("Failed to create {}: {}", year_dir.display(), e)))?;

        let path = self.week_file(week_start);

        let json = serde_json::to_string_pretty(weekly)?;
        fs::write(&path, json)
            .map_err(|e| Error::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}
