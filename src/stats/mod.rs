//! Stats module - forecast error and price statistics

mod calculator;

pub use calculator::{format_currency, SeriesSummary, StatsCalculator};
