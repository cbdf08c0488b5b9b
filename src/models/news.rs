//! News data model: tiered daily buckets grouped into weekly files.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Priority classification of a news source URL.
///
/// Each tier is its own de-duplication scope: the same title may appear
/// under both tiers of the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Important,
    General,
}

impl Tier {
    /// Collection order: important sources are fetched first
    pub const ALL: [Tier; 2] = [Tier::Important, Tier::General];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Important => "important",
            Tier::General => "general",
        }
    }
}

/// One scraped article.
///
/// `url` identifies where the item was fetched from; de-duplication is by
/// exact `title` within (date, tier). Missing optionals serialize as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: Option<String>,
    pub author: Option<String>,
}

/// Articles collected for a single date, split by tier.
///
/// Insertion order within a tier follows the configured URL order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsBucket {
    #[serde(default)]
    pub important: Vec<NewsItem>,
    #[serde(default)]
    pub general: Vec<NewsItem>,
}

impl NewsBucket {
    pub fn items(&self, tier: Tier) -> &[NewsItem] {
        match tier {
            Tier::Important => &self.important,
            Tier::General => &self.general,
        }
    }

    pub fn items_mut(&mut self, tier: Tier) -> &mut Vec<NewsItem> {
        match tier {
            Tier::Important => &mut self.important,
            Tier::General => &mut self.general,
        }
    }

    pub fn len(&self) -> usize {
        self.important.len() + self.general.len()
    }

    pub fn is_empty(&self) -> bool {
        self.important.is_empty() && self.general.is_empty()
    }
}

/// Contents of one weekly file: date key -> bucket.
///
/// BTreeMap keeps the written file's date keys sorted, so repeated runs
/// produce stable output.
pub type WeeklyNews = BTreeMap<String, NewsBucket>;

/// Merge freshly scraped items into the bucket for `date`.
///
/// Per tier, an item is appended only when its title is not already
/// present for that (date, tier); duplicates inside the fresh batch
/// collapse as well. Buckets for other dates are never touched. Returns
/// the number of items actually appended.
pub fn merge_day(weekly: &mut WeeklyNews, date: &str, fresh: NewsBucket) -> usize {
    let NewsBucket { important, general } = fresh;
    let bucket = weekly.entry(date.to_string()).or_default();
    merge_tier(&mut bucket.important, important) + merge_tier(&mut bucket.general, general)
}

fn merge_tier(existing: &mut Vec<NewsItem>, fresh: Vec<NewsItem>) -> usize {
    let mut seen: HashSet<String> = existing.iter().map(|item| item.title.clone()).collect();
    let mut appended = 0;
    for item in fresh {
        if seen.insert(item.title.clone()) {
            existing.push(item);
            appended += 1;
        }
    }
    appended
}
