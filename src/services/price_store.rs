//! Flat-file JSON store for the daily price history.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::PriceRecord;

/// Ordered price history persisted as one pretty-printed JSON array.
///
/// The whole sequence is rewritten on every save; there are no
/// incremental writes, so a failed run never leaves partial JSON behind.
pub struct PriceStore {
    path: PathBuf,
}

impl PriceStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the history; a store that does not exist yet is empty
    pub fn load(&self) -> Result<Vec<PriceRecord>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| Error::Parse(format!("Failed to parse {}: {}", self.path.display(), e))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(Error::Io(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// Write the full history back, creating the parent directory if needed
    pub fn save(&self, history: &[PriceRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(history)?;
        fs::write(&self.path, json)
            .map_err(|e| Error::Io(format!("Failed to write {}: {}", self.path.display(), e)))
    }
}
