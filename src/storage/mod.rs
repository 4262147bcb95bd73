// Storage module: SQLite article cache and the tabular (CSV) interfaces.

pub mod sqlite;
pub mod tables;

pub use sqlite::{ArticleCache, CachedPage};
pub use tables::{ArticleTable, load_articles, load_market_series, store_articles};
