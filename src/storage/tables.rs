use crate::model::{Article, ArticleRef, MarketBar, StorageError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// Row shape of the persisted article table. Content stays a plain string:
/// an article whose extraction failed round-trips as an empty field, never
/// a differently-typed hole.
#[derive(Debug, Serialize, Deserialize)]
struct ArticleRow {
    #[serde(rename = "TitleID")]
    title_id: u32,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Href")]
    href: String,
    #[serde(rename = "Content")]
    content: String,
    #[serde(rename = "Date")]
    date: Option<NaiveDate>,
    #[serde(rename = "Time")]
    time: Option<String>,
}

/// Row shape of the externally sourced market series. Extra columns in the
/// file (Open, High, Low, ...) are ignored.
#[derive(Debug, Deserialize)]
struct MarketRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Adj Close")]
    adj_close: f64,
    #[serde(rename = "Volume")]
    volume: u64,
}

/// Loaded article table plus the count of URL duplicates dropped while
/// reading it.
#[derive(Debug)]
pub struct ArticleTable {
    pub articles: Vec<Article>,
    pub duplicates_dropped: usize,
}

/// Writes the article table in TitleID order.
pub fn store_articles<P: AsRef<Path>>(path: P, articles: &[Article]) -> Result<(), StorageError> {
    let mut ordered: Vec<&Article> = articles.iter().collect();
    ordered.sort_by_key(|article| article.reference.id);

    let mut writer = csv::Writer::from_path(path)?;
    for article in ordered {
        writer.serialize(ArticleRow {
            title_id: article.reference.id,
            title: article.reference.title.clone(),
            href: article.reference.url.clone(),
            content: article.body.clone(),
            date: article.published,
            time: article.time.clone(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads the article table back, dropping rows whose Href was already seen.
/// Listing pages shift between runs, so the same article can be persisted
/// twice under different TitleIDs; the first occurrence wins.
pub fn load_articles<P: AsRef<Path>>(path: P) -> Result<ArticleTable, StorageError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut seen = HashSet::new();
    let mut articles = Vec::new();
    let mut duplicates_dropped = 0;

    for row in reader.deserialize() {
        let row: ArticleRow = row?;
        if !seen.insert(row.href.clone()) {
            duplicates_dropped += 1;
            continue;
        }
        articles.push(Article {
            reference: ArticleRef {
                id: row.title_id,
                title: row.title,
                url: row.href,
            },
            body: row.content,
            published: row.date,
            time: row.time,
        });
    }

    if duplicates_dropped > 0 {
        warn!("Dropped {} duplicate article URLs on load", duplicates_dropped);
    }

    Ok(ArticleTable {
        articles,
        duplicates_dropped,
    })
}

/// Loads the daily price/volume series. An unreadable or malformed file is
/// a configuration error and fails the run.
pub fn load_market_series<P: AsRef<Path>>(path: P) -> Result<Vec<MarketBar>, StorageError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut bars = Vec::new();

    for row in reader.deserialize() {
        let row: MarketRow = row?;
        bars.push(MarketBar {
            date: row.date,
            adj_close: row.adj_close,
            volume: row.volume,
        });
    }

    Ok(bars)
}
