use crate::model::{DailyAggregate, JoinedRecord, MarketBar};

use chrono::NaiveDate;
use std::collections::HashMap;

/// Strict inner join of daily sentiment and market bars on exact date
/// equality, sorted by date ascending. A date missing from either side
/// produces no record; sentiment on non-trading days is dropped.
pub fn join_market(aggregates: &[DailyAggregate], bars: &[MarketBar]) -> Vec<JoinedRecord> {
    let by_date: HashMap<NaiveDate, &MarketBar> = bars.iter().map(|bar| (bar.date, bar)).collect();

    let mut records: Vec<JoinedRecord> = aggregates
        .iter()
        .filter_map(|agg| {
            by_date.get(&agg.date).map(|bar| JoinedRecord {
                date: agg.date,
                mean_negative: agg.mean_negative,
                mean_neutral: agg.mean_neutral,
                mean_positive: agg.mean_positive,
                mean_compound: agg.mean_compound,
                adj_close: bar.adj_close,
                volume: bar.volume,
            })
        })
        .collect();

    records.sort_by_key(|record| record.date);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn aggregate(date: NaiveDate, compound: f64) -> DailyAggregate {
        DailyAggregate {
            date,
            mean_negative: 0.1,
            mean_neutral: 0.7,
            mean_positive: 0.2,
            mean_compound: compound,
        }
    }

    fn bar(date: NaiveDate, close: f64) -> MarketBar {
        MarketBar {
            date,
            adj_close: close,
            volume: 1_000,
        }
    }

    #[test]
    fn dates_missing_on_either_side_are_dropped() {
        let aggregates = vec![
            aggregate(d(1), 0.1),
            aggregate(d(2), 0.2),
            aggregate(d(3), 0.3),
        ];
        let bars = vec![bar(d(1), 100.0), bar(d(3), 102.0), bar(d(4), 103.0)];

        let records = join_market(&aggregates, &bars);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, d(1));
        assert_eq!(records[1].date, d(3));
        assert_eq!(records[1].adj_close, 102.0);
    }

    #[test]
    fn output_is_sorted_ascending_regardless_of_input_order() {
        let aggregates = vec![aggregate(d(9), 0.9), aggregate(d(2), 0.2)];
        let bars = vec![bar(d(2), 101.0), bar(d(9), 109.0)];

        let records = join_market(&aggregates, &bars);
        assert_eq!(records[0].date, d(2));
        assert_eq!(records[1].date, d(9));
    }

    #[test]
    fn input_order_does_not_change_result_content() {
        let mut aggregates = vec![aggregate(d(1), 0.1), aggregate(d(3), 0.3)];
        let mut bars = vec![bar(d(1), 100.0), bar(d(3), 102.0)];

        let forward = join_market(&aggregates, &bars);
        aggregates.reverse();
        bars.reverse();
        let reversed = join_market(&aggregates, &bars);

        assert_eq!(forward, reversed);
    }

    #[test]
    fn empty_sides_join_to_nothing() {
        assert!(join_market(&[], &[bar(d(1), 100.0)]).is_empty());
        assert!(join_market(&[aggregate(d(1), 0.1)], &[]).is_empty());
    }
}
