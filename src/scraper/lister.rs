use crate::config::AppConfig;
use crate::model::ArticleRef;
use crate::parser::InvestingParser;
use crate::scraper::PageFetcher;
use crate::utils::resolve_url;

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Result of one listing crawl: discovered references plus the counts of
/// what was skipped along the way.
#[derive(Debug, Clone, Default)]
pub struct ListingCrawl {
    pub references: Vec<ArticleRef>,
    pub pages_failed: usize,
    pub promo_links_skipped: usize,
}

/// Walks listing pages 1..=max_pages and collects article references in
/// document order, ids assigned by discovery order starting at 1.
///
/// A page that fails to fetch or parse is treated as empty and the crawl
/// moves on; partial site availability must never kill the run. Links whose
/// path matches a configured promotional prefix are skipped and counted.
/// The cancel flag stops the crawl before the next page request.
pub async fn list_articles(
    fetcher: &dyn PageFetcher,
    parser: &InvestingParser,
    config: &AppConfig,
    cancel: &AtomicBool,
) -> ListingCrawl {
    let mut crawl = ListingCrawl::default();

    for page in 1..=config.max_pages {
        if cancel.load(Ordering::SeqCst) {
            warn!("Cancellation requested, stopping listing crawl at page {}", page);
            break;
        }

        let url = format!(
            "{}{}/{}",
            config.base_url.trim_end_matches('/'),
            config.news_path,
            page
        );

        let html = match fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Listing page {} failed: {}", page, e);
                crawl.pages_failed += 1;
                continue;
            }
        };

        let entries = match parser.parse_listing(&html) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Listing page {} unparseable: {}", page, e);
                crawl.pages_failed += 1;
                continue;
            }
        };

        debug!("Page {}: {} entries", page, entries.len());

        for entry in entries {
            let path = entry
                .href
                .strip_prefix(config.base_url.trim_end_matches('/'))
                .unwrap_or(&entry.href);
            if config
                .skip_link_prefixes
                .iter()
                .any(|prefix| path.starts_with(prefix.as_str()))
            {
                crawl.promo_links_skipped += 1;
                continue;
            }

            let id = crawl.references.len() as u32 + 1;
            crawl.references.push(ArticleRef {
                id,
                title: entry.title,
                url: resolve_url(&config.base_url, &entry.href),
            });
        }
    }

    crawl
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FetchError;
    use std::collections::HashMap;

    struct StubFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait::async_trait]
    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or(FetchError::Status(503))
        }
    }

    fn test_config(max_pages: u32) -> AppConfig {
        AppConfig {
            base_url: "https://www.investing.com".into(),
            news_path: "/equities/nvidia-corp-news".into(),
            max_pages,
            user_agent: "test".into(),
            retry_attempts: 1,
            retry_backoff_ms: 0,
            skip_link_prefixes: vec!["/pro/offers".into()],
            articles_csv: "news_data.csv".into(),
            market_csv: "NVDA.csv".into(),
            cache_db: ":memory:".into(),
        }
    }

    fn page_html(links: &[(&str, &str)]) -> String {
        let items: String = links
            .iter()
            .map(|(title, href)| {
                format!(
                    r#"<article class="flex py-6"><a class="inline-block" href="{href}">{title}</a></article>"#
                )
            })
            .collect();
        format!("<html><body>{items}</body></html>")
    }

    fn page_url(page: u32) -> String {
        format!("https://www.investing.com/equities/nvidia-corp-news/{page}")
    }

    #[tokio::test]
    async fn failed_page_does_not_stop_later_pages() {
        let mut pages = HashMap::new();
        for page in 1..=10u32 {
            if page == 7 {
                continue; // stub returns 503 for this one
            }
            let title = format!("story {page}");
            let href = format!("/news/story-{page}");
            pages.insert(page_url(page), page_html(&[(title.as_str(), href.as_str())]));
        }

        let fetcher = StubFetcher { pages };
        let parser = InvestingParser::new();
        let cancel = AtomicBool::new(false);
        let crawl = list_articles(&fetcher, &parser, &test_config(10), &cancel).await;

        assert_eq!(crawl.pages_failed, 1);
        assert_eq!(crawl.references.len(), 9);
        // ids stay dense and ordered even across the failed page
        let ids: Vec<u32> = crawl.references.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<u32>>());
        assert!(
            crawl
                .references
                .iter()
                .any(|r| r.url == "https://www.investing.com/news/story-8")
        );
    }

    #[tokio::test]
    async fn promo_links_are_skipped_and_counted() {
        let mut pages = HashMap::new();
        pages.insert(
            page_url(1),
            page_html(&[
                ("real story", "/news/real-story"),
                ("Unlock Pro", "/pro/offers/breaking-deal"),
                ("absolute promo", "https://www.investing.com/pro/offers/upsell"),
            ]),
        );

        let fetcher = StubFetcher { pages };
        let parser = InvestingParser::new();
        let cancel = AtomicBool::new(false);
        let crawl = list_articles(&fetcher, &parser, &test_config(1), &cancel).await;

        assert_eq!(crawl.promo_links_skipped, 2);
        assert_eq!(crawl.references.len(), 1);
        assert_eq!(crawl.references[0].id, 1);
        assert_eq!(
            crawl.references[0].url,
            "https://www.investing.com/news/real-story"
        );
    }

    #[tokio::test]
    async fn cancellation_stops_before_next_page() {
        let mut pages = HashMap::new();
        pages.insert(page_url(1), page_html(&[("one", "/news/one")]));

        let fetcher = StubFetcher { pages };
        let parser = InvestingParser::new();
        let cancel = AtomicBool::new(true);
        let crawl = list_articles(&fetcher, &parser, &test_config(5), &cancel).await;

        assert!(crawl.references.is_empty());
        assert_eq!(crawl.pages_failed, 0);
    }
}
