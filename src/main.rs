mod analyzer;
mod config;
mod model;
mod normalizer;
mod parser;
mod scraper;
mod sentiment;
mod storage;
mod utils;

use analyzer::{Column, aggregate_daily, correlation_matrix, join_market};
use config::load_config;
use model::{Article, RunSummary, ScoredArticle};
use normalizer::TextNormalizer;
use parser::InvestingParser;
use crate::scraper::{HttpFetcher, extract, list_articles};
use sentiment::SentimentScorer;
use storage::{ArticleCache, ArticleTable, load_articles, load_market_series, store_articles};

use futures::future::join_all;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

/// Article pages fetched concurrently per batch. The cancel flag is checked
/// between batches so a shutdown stops issuing new fetches while in-flight
/// ones finish.
const EXTRACTION_BATCH: usize = 8;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file
    let config = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let fetcher = match HttpFetcher::new(&config) {
        Ok(f) => f,
        Err(e) => {
            error!("HTTP client init error: {}", e);
            return;
        }
    };
    let parser = InvestingParser::new();

    let cache = match ArticleCache::new(&config.cache_db) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to initialize article cache: {:?}", e);
            return;
        }
    };

    // Run-level cancellation: ctrl-c stops issuing new fetches, partial
    // results stay valid.
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let flag = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received, finishing in-flight fetches...");
                flag.store(true, Ordering::SeqCst);
            }
        });
    }

    info!("🚀 MarketMood started");
    let mut summary = RunSummary::default();

    info!(
        "Discovering articles via {}{} ({} pages max)...",
        config.base_url, config.news_path, config.max_pages
    );
    let crawl = list_articles(&fetcher, &parser, &config, &cancel).await;
    summary.pages_failed = crawl.pages_failed;
    summary.promo_links_skipped = crawl.promo_links_skipped;
    info!(
        "Discovered {} article references ({} pages failed, {} promo links skipped)",
        crawl.references.len(),
        crawl.pages_failed,
        crawl.promo_links_skipped
    );

    // Cache hits are reused; everything else is fetched in batches.
    let mut articles: Vec<Article> = Vec::new();
    let mut to_fetch = Vec::new();
    for reference in &crawl.references {
        match cache.get(&reference.url) {
            Ok(Some(page)) if !page.body.is_empty() => {
                articles.push(Article {
                    reference: reference.clone(),
                    body: page.body,
                    published: page.published,
                    time: page.time,
                });
            }
            Ok(_) => to_fetch.push(reference.clone()),
            Err(e) => {
                warn!("Cache read failed for {}: {:?}", reference.url, e);
                to_fetch.push(reference.clone());
            }
        }
    }
    info!(
        "Extracting {} article pages ({} served from cache)...",
        to_fetch.len(),
        articles.len()
    );

    let mut extractions = Vec::new();
    for batch in to_fetch.chunks(EXTRACTION_BATCH) {
        if cancel.load(Ordering::SeqCst) {
            warn!(
                "Cancellation requested, skipping {} remaining article fetches",
                to_fetch.len() - extractions.len()
            );
            break;
        }
        let tasks: Vec<_> = batch
            .iter()
            .map(|reference| extract(&fetcher, &parser, reference.clone()))
            .collect();
        extractions.extend(join_all(tasks).await);
    }

    for extraction in extractions {
        if extraction.fetch_failed {
            summary.fetch_failures += 1;
        }
        if extraction.parse_failed {
            summary.parse_failures += 1;
        }
        if extraction.date_parse_failed {
            summary.date_parse_failures += 1;
        }
        if !extraction.fetch_failed && !extraction.parse_failed {
            if let Err(e) = cache.put(&extraction.article) {
                warn!("Cache write failed: {:?}", e);
            }
        }
        articles.push(extraction.article);
    }
    // recombine deterministically by discovery id
    articles.sort_by_key(|article| article.reference.id);
    summary.empty_bodies = articles.iter().filter(|a| a.body.is_empty()).count();

    info!("Persisting article table to {}...", config.articles_csv);
    if let Err(e) = store_articles(&config.articles_csv, &articles) {
        warn!("Article table write failed: {:?}", e);
    }

    // Reload the persisted table; URL duplicates from shifted listing pages
    // are dropped here.
    let table = match load_articles(&config.articles_csv) {
        Ok(table) => table,
        Err(e) => {
            warn!("Article table reload failed ({:?}), using in-memory set", e);
            ArticleTable {
                articles,
                duplicates_dropped: 0,
            }
        }
    };
    summary.duplicate_urls_dropped = table.duplicates_dropped;
    let articles = table.articles;

    // Cleaned token stream is a side view; the scorer gets the raw bodies.
    let normalizer = TextNormalizer::new();
    let raw_tokens: usize = articles
        .iter()
        .map(|a| a.body.split_whitespace().count())
        .sum();
    let cleaned_tokens: usize = articles
        .iter()
        .map(|a| normalizer.normalize(&a.body).split_whitespace().count())
        .sum();
    info!(
        "Normalized {} bodies: {} raw tokens, {} after cleanup",
        articles.len(),
        raw_tokens,
        cleaned_tokens
    );

    info!("Scoring sentiment...");
    let scorer = SentimentScorer::new();
    let scored: Vec<ScoredArticle> = articles
        .iter()
        .map(|article| ScoredArticle {
            article: article.clone(),
            score: scorer.score(&article.body),
        })
        .collect();

    let aggregation = aggregate_daily(&scored);
    summary.undated_excluded = aggregation.undated_excluded;
    info!(
        "Aggregated {} articles into {} daily buckets ({} undated excluded)",
        scored.len(),
        aggregation.aggregates.len(),
        aggregation.undated_excluded
    );

    let bars = match load_market_series(&config.market_csv) {
        Ok(bars) => bars,
        Err(e) => {
            error!("Market series load error: {:?}", e);
            return;
        }
    };
    info!("Loaded {} market bars from {}", bars.len(), config.market_csv);

    let joined = join_market(&aggregation.aggregates, &bars);
    info!(
        "Inner join kept {} of {} sentiment days",
        joined.len(),
        aggregation.aggregates.len()
    );

    let mut price_columns = vec![Column::AdjClose];
    price_columns.extend(Column::SENTIMENT);
    let price_matrix = correlation_matrix(&joined, &price_columns, &price_columns);
    info!("Correlation, Adj Close vs sentiment:\n{}", price_matrix);

    let mut volume_columns = vec![Column::Volume];
    volume_columns.extend(Column::SENTIMENT);
    let volume_matrix = correlation_matrix(&joined, &volume_columns, &volume_columns);
    info!("Correlation, Volume vs sentiment:\n{}", volume_matrix);

    info!(
        "Run summary: {} pages failed, {} promo links skipped, {} fetch failures, \
         {} parse failures, {} date parse failures, {} empty bodies, \
         {} undated excluded, {} duplicate URLs dropped",
        summary.pages_failed,
        summary.promo_links_skipped,
        summary.fetch_failures,
        summary.parse_failures,
        summary.date_parse_failures,
        summary.empty_bodies,
        summary.undated_excluded,
        summary.duplicate_urls_dropped
    );
    info!("Finished");
}
