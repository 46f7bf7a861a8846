//! Data module - CSV loading and processing

mod loader;
mod processor;
mod series;

pub use loader::{parse_date, DataLoader, CLOSE_COL, DATE_COL, PREDICTED_CLOSE_COL, REAL_CLOSE_COL};
pub use processor::DataProcessor;
pub use series::{
    DateRange, ForecastRecord, ForecastRow, LongPoint, PricePoint, PriceSeries, SeriesLabel,
    TableData,
};
