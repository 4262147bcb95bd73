// Parser module: Investing.com-specific DOM extraction.

pub mod investing;

pub use investing::{InvestingParser, parse_publication};
