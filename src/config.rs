use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub base_url: String,
    /// Listing path under `base_url`, e.g. "/equities/nvidia-corp-news".
    /// The page number is appended as a trailing segment.
    pub news_path: String,
    pub max_pages: u32,
    pub user_agent: String,
    pub retry_attempts: u32,
    pub retry_backoff_ms: u64,
    /// Href prefixes (relative to `base_url`) that are promotional, not
    /// articles. Matching links are skipped at discovery time.
    pub skip_link_prefixes: Vec<String>,
    pub articles_csv: String,
    pub market_csv: String,
    pub cache_db: String,
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
