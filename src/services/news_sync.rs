//! News collection: scrape both tiers, merge into this week's file.

use chrono::NaiveDate;
use tracing::info;

use crate::error::Result;
use crate::models::{merge_day, NewsBucket, SourceConfig, Tier};
use crate::services::{NewsFetcher, NewsStore};
use crate::utils::time::{format_date, week_start};

/// Outcome of one news collection pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NewsSyncStats {
    /// Articles successfully scraped across both tiers
    pub scraped: usize,
    /// Articles actually appended after title de-duplication
    pub appended: usize,
    /// Configured URLs that failed to fetch or parse
    pub skipped: usize,
}

/// Run one news collection pass for `today`.
///
/// Validation happens before any network activity. Per-URL failures skip
/// that URL only. When nothing at all was scraped the filesystem is left
/// untouched: an existing weekly file keeps its bytes and a missing one is
/// not created. Items land in the bucket for `today` inside the file of
/// the week containing it; other dates in that file are never modified.
pub async fn run_news_sync(
    fetcher: &NewsFetcher,
    store: &NewsStore,
    sources: &SourceConfig,
    today: NaiveDate,
) -> Result<NewsSyncStats> {
    sources.validate()?;

    let date = format_date(today);
    let week = week_start(today);
    info!(
        date = %date,
        week = %format_date(week),
        urls = sources.total_urls(),
        "Starting news sync"
    );

    let mut fresh = NewsBucket::default();
    for tier in Tier::ALL {
        let urls = sources.urls(tier);
        if urls.is_empty() {
            continue;
        }
        let items = fetcher.fetch_tier(tier, urls).await;
        fresh.items_mut(tier).extend(items);
    }

    let scraped = fresh.len();
    let skipped = sources.total_urls() - scraped;

    if fresh.is_empty() {
        info!(skipped, "No articles scraped; news store left untouched");
        return Ok(NewsSyncStats {
            scraped: 0,
            appended: 0,
            skipped,
        });
    }

    let mut weekly = store.load_week(week)?;
    let appended = merge_day(&mut weekly, &date, fresh);
    store.save_week(week, &weekly)?;

    info!(scraped, appended, skipped, "News sync completed");
    Ok(NewsSyncStats {
        scraped,
        appended,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use std::fs;

    // Tuesday; its week files under <root>/2024/2024-09-30.json
    fn today() -> NaiveDate {
        NaiveDate::parse_from_str("2024-10-01", "%Y-%m-%d").unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::parse_from_str("2024-09-30", "%Y-%m-%d").unwrap()
    }

    fn article_page(server: &MockServer, path: &'static str, title: &str, description: &str) {
        let body = format!(
            concat!(
                "<html><head>",
                r#"<meta property="og:title" content="{}" />"#,
                r#"<meta property="og:description" content="{}" />"#,
                "</head></html>"
            ),
            title, description
        );
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body(body);
        });
    }

    fn sources_with(server: &MockServer, important: &[&str], general: &[&str]) -> SourceConfig {
        SourceConfig {
            important_urls: important
                .iter()
                .map(|p| format!("{}{}", server.base_url(), p))
                .collect(),
            general_urls: general
                .iter()
                .map(|p| format!("{}{}", server.base_url(), p))
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_scraped_item_lands_in_todays_tier_bucket() {
        let server = MockServer::start();
        article_page(&server, "/a", "T1", "D1");
        let dir = tempfile::tempdir().unwrap();
        let store = NewsStore::new(dir.path().join("news"));
        let sources = sources_with(&server, &["/a"], &[]);

        let fetcher = NewsFetcher::new().unwrap();
        let stats = run_news_sync(&fetcher, &store, &sources, today())
            .await
            .unwrap();

        assert_eq!(stats.scraped, 1);
        assert_eq!(stats.appended, 1);
        assert_eq!(stats.skipped, 0);

        let weekly = store.load_week(monday()).unwrap();
        let bucket = &weekly["2024-10-01"];
        assert_eq!(bucket.important.len(), 1);
        assert!(bucket.general.is_empty());

        let item = &bucket.important[0];
        assert_eq!(item.title, "T1");
        assert_eq!(item.description, "D1");
        assert_eq!(item.url, format!("{}/a", server.base_url()));
        assert_eq!(item.image, None);
        assert_eq!(item.author, None);
    }

    #[tokio::test]
    async fn test_all_urls_failing_creates_no_file() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404);
        });
        let dir = tempfile::tempdir().unwrap();
        let store = NewsStore::new(dir.path().join("news"));
        let sources = sources_with(&server, &["/gone"], &[]);

        let fetcher = NewsFetcher::new().unwrap();
        let stats = run_news_sync(&fetcher, &store, &sources, today())
            .await
            .unwrap();

        assert_eq!(stats.scraped, 0);
        assert_eq!(stats.skipped, 1);
        assert!(!store.week_file(monday()).exists());
        assert!(!dir.path().join("news").exists());
    }

    #[tokio::test]
    async fn test_all_urls_failing_leaves_existing_file_byte_identical() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404);
        });
        let dir = tempfile::tempdir().unwrap();
        let store = NewsStore::new(dir.path().join("news"));

        let mut weekly = crate::models::WeeklyNews::new();
        merge_day(
            &mut weekly,
            "2024-09-30",
            NewsBucket {
                important: vec![],
                general: vec![crate::models::NewsItem {
                    title: "old".to_string(),
                    description: "old".to_string(),
                    url: "http://old.test".to_string(),
                    image: None,
                    author: None,
                }],
            },
        );
        store.save_week(monday(), &weekly).unwrap();
        let before = fs::read(store.week_file(monday())).unwrap();

        let fetcher = NewsFetcher::new().unwrap();
        run_news_sync(
            &fetcher,
            &store,
            &sources_with(&server, &["/gone"], &[]),
            today(),
        )
        .await
        .unwrap();

        let after = fs::read(store.week_file(monday())).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_rerun_with_same_titles_appends_nothing() {
        let server = MockServer::start();
        article_page(&server, "/a", "T1", "D1");
        let dir = tempfile::tempdir().unwrap();
        let store = NewsStore::new(dir.path().join("news"));
        let sources = sources_with(&server, &["/a"], &[]);
        let fetcher = NewsFetcher::new().unwrap();

        run_news_sync(&fetcher, &store, &sources, today())
            .await
            .unwrap();
        let before = fs::read(store.week_file(monday())).unwrap();

        let stats = run_news_sync(&fetcher, &store, &sources, today())
            .await
            .unwrap();
        assert_eq!(stats.scraped, 1);
        assert_eq!(stats.appended, 0);

        let after = fs::read(store.week_file(monday())).unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_same_title_in_both_tiers_is_kept_twice() {
        let server = MockServer::start();
        article_page(&server, "/a", "T1", "D1");
        article_page(&server, "/b", "T1", "D1");
        let dir = tempfile::tempdir().unwrap();
        let store = NewsStore::new(dir.path().join("news"));
        let sources = sources_with(&server, &["/a"], &["/b"]);

        let fetcher = NewsFetcher::new().unwrap();
        let stats = run_news_sync(&fetcher, &store, &sources, today())
            .await
            .unwrap();
        assert_eq!(stats.appended, 2);

        let weekly = store.load_week(monday()).unwrap();
        assert_eq!(weekly["2024-10-01"].important.len(), 1);
        assert_eq!(weekly["2024-10-01"].general.len(), 1);
    }

    #[tokio::test]
    async fn test_merge_keeps_other_dates_in_week_untouched() {
        let server = MockServer::start();
        article_page(&server, "/a", "T1", "D1");
        let dir = tempfile::tempdir().unwrap();
        let store = NewsStore::new(dir.path().join("news"));

        let mut weekly = crate::models::WeeklyNews::new();
        merge_day(
            &mut weekly,
            "2024-09-30",
            NewsBucket {
                important: vec![crate::models::NewsItem {
                    title: "monday".to_string(),
                    description: "monday".to_string(),
                    url: "http://old.test".to_string(),
                    image: None,
                    author: None,
                }],
                general: vec![],
            },
        );
        store.save_week(monday(), &weekly).unwrap();

        let fetcher = NewsFetcher::new().unwrap();
        run_news_sync(
            &fetcher,
            &store,
            &sources_with(&server, &["/a"], &[]),
            today(),
        )
        .await
        .unwrap();

        let merged = store.load_week(monday()).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["2024-09-30"].important[0].title, "monday");
        assert_eq!(merged["2024-10-01"].important[0].title, "T1");
    }

    #[tokio::test]
    async fn test_empty_config_is_rejected_before_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let store = NewsStore::new(dir.path().join("news"));
        let fetcher = NewsFetcher::new().unwrap();

        let err = run_news_sync(&fetcher, &store, &SourceConfig::default(), today())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)), "got {:?}", err);
    }
}
