// Core structs: ArticleRef, Article, SentimentScore, daily rollups
use chrono::NaiveDate;
use thiserror::Error;

/// A discovered article link from the listing pages. The id follows
/// discovery order across pages, starting at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRef {
    pub id: u32,
    pub title: String,
    pub url: String,
}

/// An article after extraction. `body` may be empty and `published` unset
/// when the page fetch or the date parse failed; the batch carries on.
#[derive(Debug, Clone)]
pub struct Article {
    pub reference: ArticleRef,
    pub body: String,
    pub published: Option<NaiveDate>,
    pub time: Option<String>,
}

impl Article {
    pub fn empty(reference: ArticleRef) -> Self {
        Self {
            reference,
            body: String::new(),
            published: None,
            time: None,
        }
    }
}

/// VADER polarity scores. Invariant: negative + neutral + positive ≈ 1.0,
/// compound in [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

impl SentimentScore {
    /// Score for text the lexicon has nothing to say about.
    pub fn neutral() -> Self {
        Self {
            negative: 0.0,
            neutral: 1.0,
            positive: 0.0,
            compound: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoredArticle {
    pub article: Article,
    pub score: SentimentScore,
}

/// Mean polarity over all articles sharing one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub mean_negative: f64,
    pub mean_neutral: f64,
    pub mean_positive: f64,
    pub mean_compound: f64,
}

/// One trading day of the externally sourced price/volume series.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketBar {
    pub date: NaiveDate,
    pub adj_close: f64,
    pub volume: u64,
}

/// Inner join of DailyAggregate and MarketBar on date.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRecord {
    pub date: NaiveDate,
    pub mean_negative: f64,
    pub mean_neutral: f64,
    pub mean_positive: f64,
    pub mean_compound: f64,
    pub adj_close: f64,
    pub volume: u64,
}

/// Per-run counts of everything that was skipped, dropped or failed.
/// The pipeline never aborts on per-item failures, so these counts are the
/// only trace that data went missing.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub pages_failed: usize,
    pub promo_links_skipped: usize,
    pub fetch_failures: usize,
    pub parse_failures: usize,
    pub empty_bodies: usize,
    pub date_parse_failures: usize,
    pub undated_excluded: usize,
    pub duplicate_urls_dropped: usize,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(String),
    #[error("unexpected status: {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid selector: {0}")]
    Selector(String),
    #[error("missing field: {0}")]
    MissingField(String),
}

#[derive(Debug, Error)]
#[error("unparseable publication date: {text:?}")]
pub struct DateParseError {
    pub text: String,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
