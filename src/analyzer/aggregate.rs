use crate::model::{DailyAggregate, ScoredArticle, SentimentScore};

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Aggregation output: one entry per distinct date, ascending, plus the
/// count of articles that had no date and could not be bucketed.
#[derive(Debug, Clone)]
pub struct DailyAggregation {
    pub aggregates: Vec<DailyAggregate>,
    pub undated_excluded: usize,
}

/// Groups scored articles by calendar date and takes the arithmetic mean of
/// every polarity dimension per bucket. Undated articles are excluded from
/// aggregation but counted, never silently dropped.
pub fn aggregate_daily(scored: &[ScoredArticle]) -> DailyAggregation {
    let mut buckets: BTreeMap<NaiveDate, Vec<SentimentScore>> = BTreeMap::new();
    let mut undated_excluded = 0;

    for item in scored {
        match item.article.published {
            Some(date) => buckets.entry(date).or_default().push(item.score),
            None => undated_excluded += 1,
        }
    }

    let aggregates = buckets
        .into_iter()
        .map(|(date, scores)| {
            let n = scores.len() as f64;
            DailyAggregate {
                date,
                mean_negative: scores.iter().map(|s| s.negative).sum::<f64>() / n,
                mean_neutral: scores.iter().map(|s| s.neutral).sum::<f64>() / n,
                mean_positive: scores.iter().map(|s| s.positive).sum::<f64>() / n,
                mean_compound: scores.iter().map(|s| s.compound).sum::<f64>() / n,
            }
        })
        .collect();

    DailyAggregation {
        aggregates,
        undated_excluded,
    }
}
