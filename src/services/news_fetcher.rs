//! Article page fetcher and Open Graph metadata extraction.
//!
//! Each configured URL is fetched with a bounded-concurrency fan-out and
//! its `<meta property="...">` tags are inspected for title, description,
//! image and author. Output order always follows the configured URL order,
//! whatever order the responses arrive in, so de-duplication downstream
//! stays deterministic.

use futures::stream::{self, StreamExt};
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::{meta_tag, FETCH_TIMEOUT_SECS, NEWS_FETCH_CONCURRENCY};
use crate::error::{Error, Result};
use crate::models::{NewsItem, Tier};

/// Metadata scraped from one article page; every field is best-effort
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub author: Option<String>,
}

/// Pull the known Open Graph fields out of an article page body.
///
/// Empty `content` attributes count as missing.
pub fn extract_page_meta(html: &str) -> PageMeta {
    let document = Html::parse_document(html);
    PageMeta {
        title: meta_content(&document, meta_tag::TITLE),
        description: meta_content(&document, meta_tag::DESCRIPTION),
        image: meta_content(&document, meta_tag::IMAGE),
        author: meta_content(&document, meta_tag::AUTHOR),
    }
}

fn meta_content(document: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{}"]"#, property)).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
        .filter(|content| !content.is_empty())
}

/// HTTP client for article pages
pub struct NewsFetcher {
    client: reqwest::Client,
}

impl NewsFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Fetch one page and extract its metadata
    pub async fn fetch_page(&self, url: &str) -> Result<PageMeta> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request failed: {} (url: {})", e, url)))?;

        if !response.status().is_success() {
            return Err(Error::Network(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read body from {}: {}", url, e)))?;

        Ok(extract_page_meta(&body))
    }

    /// Fetch one page into a [`NewsItem`]; title and description are required
    async fn scrape_article(&self, url: &str) -> Result<NewsItem> {
        let meta = self.fetch_page(url).await?;
        debug!(url, ?meta, "Scraped article page");

        let title = meta
            .title
            .ok_or_else(|| Error::Parse(format!("og:title missing from {}", url)))?;
        let description = meta
            .description
            .ok_or_else(|| Error::Parse(format!("og:description missing from {}", url)))?;

        Ok(NewsItem {
            title,
            description,
            url: url.to_string(),
            image: meta.image,
            author: meta.author,
        })
    }

    /// Scrape a tier's URLs with bounded concurrency.
    ///
    /// Up to [`NEWS_FETCH_CONCURRENCY`] requests are in flight at once; the
    /// buffered stream yields results in URL order. Failed URLs are logged
    /// and skipped, never fatal.
    pub async fn fetch_tier(&self, tier: Tier, urls: &[String]) -> Vec<NewsItem> {
        let results: Vec<(&String, Result<NewsItem>)> = stream::iter(urls)
            .map(|url| async move { (url, self.scrape_article(url).await) })
            .buffered(NEWS_FETCH_CONCURRENCY)
            .collect()
            .await;

        results
            .into_iter()
            .filter_map(|(url, result)| match result {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(tier = tier.as_str(), url = %url, error = %e, "Skipping article");
                    None
                }
            })
            .collect()
    }
}
