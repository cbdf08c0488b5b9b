//! News source configuration loaded from `input.json`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::Tier;

/// Two tiers of article URLs to scrape, in fetch order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub important_urls: Vec<String>,
    #[serde(default)]
    pub general_urls: Vec<String>,
}

impl SourceConfig {
    /// Load source URLs from a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: SourceConfig = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Reject a config with no URLs at all; one empty tier is fine
    pub fn validate(&self) -> Result<()> {
        if self.important_urls.is_empty() && self.general_urls.is_empty() {
            return Err(Error::InvalidInput(
                "no source URLs configured (important_urls and general_urls are both empty)"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn urls(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Important => &self.important_urls,
            Tier::General => &self.general_urls,
        }
    }

    pub fn total_urls(&self) -> usize {
        self.important_urls.len() + self.general_urls.len()
    }
}
