use crate::config::AppConfig;
use crate::model::FetchError;

use rand::Rng;
use reqwest::Client;
use tokio::time::{Duration, sleep};
use tracing::warn;

#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher with bounded retry. The listing site rate-limits
/// aggressively, so each retry backs off linearly with a little jitter.
pub struct HttpFetcher {
    client: Client,
    retry_attempts: u32,
    retry_backoff_ms: u64,
}

impl HttpFetcher {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self {
            client,
            retry_attempts: config.retry_attempts.max(1),
            retry_backoff_ms: config.retry_backoff_ms,
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Http(e.to_string()))
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.retry_attempts => {
                    let delay = {
                        let jitter: u64 = rand::rng().random_range(0..100);
                        self.retry_backoff_ms * u64::from(attempt) + jitter
                    };
                    warn!(
                        "Fetch attempt {}/{} failed for {}: {} — retrying in {}ms",
                        attempt, self.retry_attempts, url, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
