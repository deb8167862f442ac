//! Paged statistics fetch

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use super::types::{StatRecord, StatsPage};
use crate::Result;

/// Expand a base URL into its pages: `base&offset=0`, `base&offset=step`, …
/// up to and including `max_offset`.
pub fn page_urls(base_url: &str, step: u32, max_offset: u32) -> Vec<String> {
    let step = step.max(1) as usize;
    (0..=max_offset)
        .step_by(step)
        .map(|offset| format!("{base_url}&offset={offset}"))
        .collect()
}

/// GET one page and decode its `results`
pub async fn fetch_page(client: &Client, url: &str) -> Result<Vec<StatRecord>> {
    let page = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<StatsPage>()
        .await?;

    Ok(page.results)
}

/// Fetch pages one at a time, sleeping `delay` between requests.
///
/// A page that fails is logged and skipped; the others still count.
pub async fn fetch_all(client: &Client, urls: &[String], delay: Duration) -> Vec<StatRecord> {
    let mut records = Vec::new();
    let mut failed = 0usize;

    for (i, url) in urls.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        match fetch_page(client, url).await {
            Ok(page) => {
                debug!("Fetched {} records from {}", page.len(), url);
                records.extend(page);
            }
            Err(e) => {
                failed += 1;
                warn!("Error fetching {}: {}", url, e);
            }
        }
    }

    info!(
        "Fetched {} records from {} pages ({} failed)",
        records.len(),
        urls.len(),
        failed
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_urls_inclusive() {
        let urls = page_urls("https://stats.test/api?limit=20", 20, 60);
        assert_eq!(
            urls,
            vec![
                "https://stats.test/api?limit=20&offset=0",
                "https://stats.test/api?limit=20&offset=20",
                "https://stats.test/api?limit=20&offset=40",
                "https://stats.test/api?limit=20&offset=60",
            ]
        );
    }

    #[test]
    fn test_page_urls_default_range() {
        let urls = page_urls("b?x=1", 20, 460);
        assert_eq!(urls.len(), 24);
        assert!(urls.last().unwrap().ends_with("&offset=460"));
    }

    #[test]
    fn test_page_urls_uneven_max() {
        let urls = page_urls("b?x=1", 20, 50);
        assert_eq!(urls.len(), 3);
        assert!(urls.last().unwrap().ends_with("&offset=40"));
    }

    #[test]
    fn test_page_urls_zero_step_does_not_loop() {
        let urls = page_urls("b?x=1", 0, 2);
        assert_eq!(urls.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_pages_contribute_nothing() {
        let client = Client::new();
        // Nothing listens on the discard port
        let urls = vec![
            "http://127.0.0.1:9/stats?limit=20&offset=0".to_string(),
            "http://127.0.0.1:9/stats?limit=20&offset=20".to_string(),
        ];
        let records = fetch_all(&client, &urls, Duration::ZERO).await;
        assert!(records.is_empty());
    }
}
