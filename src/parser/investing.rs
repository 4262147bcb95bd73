// Investing.com-specific HTML parsing
use crate::model::{DateParseError, ParseError};
use chrono::NaiveDate;
use scraper::{Html, Selector};

/// Paragraphs with exactly this text are portfolio-widget boilerplate that
/// the site injects into article bodies.
const BOILERPLATE_MARKER: &str = "Position added successfully to:";

/// A raw (title, href) pair from a listing page, href not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    pub title: String,
    pub href: String,
}

/// Body text plus the raw publication metadata line of one article page.
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    pub body: String,
    pub metadata_text: Option<String>,
}

pub struct InvestingParser;

impl InvestingParser {
    pub fn new() -> Self {
        Self
    }

    /// Pulls article entries out of a listing page in document order.
    /// Entries without an href are dropped; titles are whitespace-trimmed.
    pub fn parse_listing(&self, html: &str) -> Result<Vec<ListingEntry>, ParseError> {
        let document = Html::parse_document(html);

        let item_selector = Selector::parse("article.flex.py-6")
            .map_err(|e| ParseError::Selector(e.to_string()))?;
        let link_selector = Selector::parse("a.inline-block")
            .map_err(|e| ParseError::Selector(e.to_string()))?;

        let mut entries = Vec::new();

        for element in document.select(&item_selector) {
            let Some(link) = element.select(&link_selector).next() else {
                continue;
            };
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let title = link.text().collect::<String>().trim().to_string();
            entries.push(ListingEntry {
                title,
                href: href.to_string(),
            });
        }

        Ok(entries)
    }

    /// Extracts body text and the publication metadata line from an article
    /// page. The metadata container appears 0, 1 or 2 times; with 2 the
    /// second one holds the article's own date (the first belongs to a
    /// related-story stub).
    pub fn parse_article(&self, html: &str) -> Result<ExtractedContent, ParseError> {
        let document = Html::parse_document(html);

        let content_selector = Selector::parse("div.WYSIWYG.articlePage")
            .map_err(|e| ParseError::Selector(e.to_string()))?;
        let paragraph_selector =
            Selector::parse("p").map_err(|e| ParseError::Selector(e.to_string()))?;
        let details_selector = Selector::parse("div.contentSectionDetails")
            .map_err(|e| ParseError::Selector(e.to_string()))?;
        let span_selector =
            Selector::parse("span").map_err(|e| ParseError::Selector(e.to_string()))?;

        let mut paragraphs = Vec::new();
        for container in document.select(&content_selector) {
            for p in container.select(&paragraph_selector) {
                let text = p.text().collect::<String>();
                if text.trim() != BOILERPLATE_MARKER {
                    paragraphs.push(text);
                }
            }
        }

        let details: Vec<_> = document.select(&details_selector).collect();
        let chosen = match details.len() {
            0 => None,
            1 => Some(details[0]),
            _ => Some(details[1]),
        };
        let metadata_text = chosen
            .and_then(|d| d.select(&span_selector).next())
            .map(|span| span.text().collect::<String>().trim().to_string());

        Ok(ExtractedContent {
            body: paragraphs.join("\n"),
            metadata_text,
        })
    }
}

/// Parses the metadata line into (date, time). The line starts with a label
/// token ("Published ..."), tokens 1..=3 carry the `%b %d, %Y` date and
/// token 4, when present, is the time-of-day string.
pub fn parse_publication(text: &str) -> Result<(NaiveDate, Option<String>), DateParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(DateParseError {
            text: text.to_string(),
        });
    }

    let date_str = tokens[1..4].join(" ");
    let date = NaiveDate::parse_from_str(&date_str, "%b %d, %Y").map_err(|_| DateParseError {
        text: text.to_string(),
    })?;
    let time = tokens.get(4).map(|t| t.to_string());

    Ok((date, time))
}
