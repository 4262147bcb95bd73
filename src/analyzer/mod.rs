// Analyzer module: aggregates submodules for the statistics stages.

pub mod aggregate;
pub mod correlation;
pub mod join;

pub use aggregate::{DailyAggregation, aggregate_daily};
pub use correlation::{Column, CorrelationMatrix, correlation_matrix};
pub use join::join_market;
