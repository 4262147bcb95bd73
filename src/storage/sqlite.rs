use crate::model::{Article, StorageError};

use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};

/// Cached extraction result for one URL. The reference id is not stored:
/// ids are assigned per run by discovery order, so a cache hit is overlaid
/// onto the current run's reference.
#[derive(Debug, Clone)]
pub struct CachedPage {
    pub body: String,
    pub published: Option<NaiveDate>,
    pub time: Option<String>,
}

/// URL-keyed cache of extracted articles, so re-runs skip re-scraping
/// pages the site has already served once.
pub struct ArticleCache {
    conn: Connection,
}

impl ArticleCache {
    pub fn new(db_path: &str) -> Result<Self, StorageError> {
        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS articles (
                url TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                body TEXT NOT NULL DEFAULT '',
                published TEXT,
                time TEXT,
                fetched_at TEXT NOT NULL
            );
            ",
        )?;

        Ok(Self { conn })
    }

    pub fn get(&self, url: &str) -> Result<Option<CachedPage>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT body, published, time FROM articles WHERE url = ?1")?;

        let page = stmt
            .query_row(params![url], |row| {
                Ok(CachedPage {
                    body: row.get(0)?,
                    published: row.get(1)?,
                    time: row.get(2)?,
                })
            })
            .optional()?;

        Ok(page)
    }

    pub fn put(&self, article: &Article) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO articles (url, title, body, published, time, fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                &article.reference.url,
                &article.reference.title,
                &article.body,
                &article.published,
                &article.time,
                &Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}
