use crate::model::{Article, ArticleRef};
use crate::parser::{InvestingParser, parse_publication};
use crate::scraper::PageFetcher;

use tracing::warn;

/// One extracted article plus flags for what went wrong along the way.
/// Failures are recorded, never propagated; a bad article must not abort
/// the batch.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub article: Article,
    pub fetch_failed: bool,
    pub parse_failed: bool,
    pub date_parse_failed: bool,
}

impl Extraction {
    fn failed(reference: ArticleRef, fetch_failed: bool) -> Self {
        Self {
            article: Article::empty(reference),
            fetch_failed,
            parse_failed: !fetch_failed,
            date_parse_failed: false,
        }
    }
}

/// Fetches and parses one article page. A fetch or parse failure yields an
/// empty-bodied Article with no date; a date that will not parse leaves the
/// date unset but keeps whatever body text was found.
pub async fn extract(
    fetcher: &dyn PageFetcher,
    parser: &InvestingParser,
    reference: ArticleRef,
) -> Extraction {
    let html = match fetcher.fetch(&reference.url).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Article fetch failed for {}: {}", reference.url, e);
            return Extraction::failed(reference, true);
        }
    };

    let content = match parser.parse_article(&html) {
        Ok(content) => content,
        Err(e) => {
            warn!("Article parse failed for {}: {}", reference.url, e);
            return Extraction::failed(reference, false);
        }
    };

    let mut article = Article {
        reference,
        body: content.body,
        published: None,
        time: None,
    };
    let mut date_parse_failed = false;

    if let Some(metadata_text) = content.metadata_text {
        match parse_publication(&metadata_text) {
            Ok((date, time)) => {
                article.published = Some(date);
                article.time = time;
            }
            Err(e) => {
                warn!("{} for {}", e, article.reference.url);
                date_parse_failed = true;
            }
        }
    }

    Extraction {
        article,
        fetch_failed: false,
        parse_failed: false,
        date_parse_failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FetchError;
    use chrono::NaiveDate;

    struct OnePageFetcher {
        html: Option<String>,
    }

    #[async_trait::async_trait]
    impl PageFetcher for OnePageFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            self.html.clone().ok_or(FetchError::Status(500))
        }
    }

    fn reference() -> ArticleRef {
        ArticleRef {
            id: 1,
            title: "NVIDIA beats estimates".into(),
            url: "https://www.investing.com/news/nvidia-beats-estimates".into(),
        }
    }

    fn article_page(details: &str) -> String {
        format!(
            r#"<html><body>
              <div class="WYSIWYG articlePage"><p>Body text here.</p></div>
              {details}
            </body></html>"#
        )
    }

    #[tokio::test]
    async fn fetch_failure_yields_empty_article_not_error() {
        let fetcher = OnePageFetcher { html: None };
        let parser = InvestingParser::new();
        let extraction = extract(&fetcher, &parser, reference()).await;

        assert!(extraction.fetch_failed);
        assert!(extraction.article.body.is_empty());
        assert!(extraction.article.published.is_none());
        assert_eq!(extraction.article.reference.id, 1);
    }

    #[tokio::test]
    async fn dated_page_fills_body_date_and_time() {
        let html = article_page(
            r#"<div class="contentSectionDetails"><span>Published Feb 28, 2024 05:30AM ET</span></div>"#,
        );
        let fetcher = OnePageFetcher { html: Some(html) };
        let parser = InvestingParser::new();
        let extraction = extract(&fetcher, &parser, reference()).await;

        assert_eq!(extraction.article.body, "Body text here.");
        assert_eq!(
            extraction.article.published,
            Some(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap())
        );
        assert_eq!(extraction.article.time.as_deref(), Some("05:30AM"));
        assert!(!extraction.date_parse_failed);
    }

    #[tokio::test]
    async fn unparseable_date_keeps_body_and_flags_failure() {
        let html = article_page(
            r#"<div class="contentSectionDetails"><span>Updated moments ago</span></div>"#,
        );
        let fetcher = OnePageFetcher { html: Some(html) };
        let parser = InvestingParser::new();
        let extraction = extract(&fetcher, &parser, reference()).await;

        assert_eq!(extraction.article.body, "Body text here.");
        assert!(extraction.article.published.is_none());
        assert!(extraction.date_parse_failed);
    }

    #[tokio::test]
    async fn page_without_metadata_is_emitted_undated() {
        let html = article_page("");
        let fetcher = OnePageFetcher { html: Some(html) };
        let parser = InvestingParser::new();
        let extraction = extract(&fetcher, &parser, reference()).await;

        assert_eq!(extraction.article.body, "Body text here.");
        assert!(extraction.article.published.is_none());
        assert!(!extraction.date_parse_failed);
    }
}
