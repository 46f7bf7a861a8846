//! CSV Data Loader Module
//! Reads entity price files and forecast files with Polars and validates
//! them into typed series.

use crate::config::Entity;
use crate::data::series::{ForecastRecord, ForecastRow, PricePoint, PriceSeries, TableData};
use crate::error::{DashboardError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DATE_COL: &str = "date";
pub const CLOSE_COL: &str = "close";
pub const REAL_CLOSE_COL: &str = "real_close";
pub const PREDICTED_CLOSE_COL: &str = "predicted_close";

const FORECAST_COLUMNS: [&str; 3] = [DATE_COL, REAL_CLOSE_COL, PREDICTED_CLOSE_COL];

/// Resolves entity files inside a data directory and parses them.
#[derive(Debug, Clone)]
pub struct DataLoader {
    data_dir: PathBuf,
}

impl DataLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Read a CSV file and normalize its column labels (trim + lowercase).
    pub fn read_csv(path: &Path) -> Result<DataFrame> {
        if !path.is_file() {
            return Err(DashboardError::FileNotFound(path.display().to_string()));
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let df = Self::normalize_columns(&df)?;
        debug!(
            "Read {} ({} rows, columns {:?})",
            path.display(),
            df.height(),
            Self::column_names(&df)
        );
        Ok(df)
    }

    /// Lowercase and trim every column label. When two labels collapse to the
    /// same name the first one wins.
    pub fn normalize_columns(df: &DataFrame) -> Result<DataFrame> {
        let mut seen = HashSet::new();
        let columns: Vec<Column> = df
            .get_columns()
            .iter()
            .filter_map(|col| {
                let name = col.name().trim().to_lowercase();
                if seen.insert(name.clone()) {
                    Some(col.clone().with_name(name.into()))
                } else {
                    None
                }
            })
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    /// Get list of column names.
    pub fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn has_column(df: &DataFrame, name: &str) -> bool {
        df.get_column_names().iter().any(|c| c.as_str() == name)
    }

    /// Load the closing price series of an entity.
    pub fn load_series(&self, entity: &Entity) -> Result<PriceSeries> {
        let path = self.data_dir.join(&entity.file);
        let df = Self::read_csv(&path)?;

        for required in [DATE_COL, CLOSE_COL] {
            if !Self::has_column(&df, required) {
                return Err(DashboardError::MissingColumn {
                    column: required.to_string(),
                    file: entity.file.clone(),
                });
            }
        }

        let dates = Self::date_values(&df, DATE_COL)?;
        let closes = Self::f64_values(&df, CLOSE_COL)?;

        let points: Vec<PricePoint> = dates
            .into_iter()
            .zip(closes)
            .filter_map(|(date, close)| match (date, close) {
                (Some(date), Some(close)) if !close.is_nan() => Some(PricePoint { date, close }),
                _ => None,
            })
            .collect();

        let dropped = df.height() - points.len();
        if dropped > 0 {
            debug!("Dropped {} unparseable rows from {}", dropped, entity.file);
        }

        let series = PriceSeries::new(entity.label.clone(), points);
        info!("Loaded {} ({} sessions)", entity.label, series.len());
        Ok(series)
    }

    /// Load the forecast file of an entity, `forecast_<TICKER>.csv`.
    pub fn load_forecast(&self, entity: &Entity) -> Result<ForecastRecord> {
        let path = self.data_dir.join(entity.forecast_file());
        let df = Self::read_csv(&path)?;

        let missing: Vec<String> = FORECAST_COLUMNS
            .iter()
            .filter(|c| !Self::has_column(&df, c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DashboardError::Schema {
                missing,
                found: Self::column_names(&df),
            });
        }

        let dates = Self::date_values(&df, DATE_COL)?;
        let real = Self::f64_values(&df, REAL_CLOSE_COL)?;
        let predicted = Self::f64_values(&df, PREDICTED_CLOSE_COL)?;

        let mut rows: Vec<ForecastRow> = dates
            .into_iter()
            .zip(real)
            .zip(predicted)
            .filter_map(|((date, real), predicted)| {
                Some(ForecastRow {
                    date: date?,
                    real_close: real.filter(|v| !v.is_nan())?,
                    predicted_close: predicted.filter(|v| !v.is_nan())?,
                })
            })
            .collect();
        rows.sort_by_key(|r| r.date);

        info!("Loaded forecast {} ({} rows)", path.display(), rows.len());
        Ok(ForecastRecord {
            rows,
            table: Self::table_from_dataframe(&df),
        })
    }

    /// Decode the logo of an entity from `logos/<TICKER>.png`.
    pub fn load_logo(&self, entity: &Entity) -> Result<image::RgbaImage> {
        let path = self.data_dir.join(entity.logo_file());
        if !path.is_file() {
            return Err(DashboardError::FileNotFound(path.display().to_string()));
        }
        Ok(image::open(&path)?.to_rgba8())
    }

    /// Stringify every cell for display.
    pub fn table_from_dataframe(df: &DataFrame) -> TableData {
        let columns = Self::column_names(df);
        let rows = (0..df.height())
            .map(|i| {
                df.get_columns()
                    .iter()
                    .map(|col| match col.get(i) {
                        Ok(val) if !val.is_null() => val.to_string().trim_matches('"').to_string(),
                        _ => String::new(),
                    })
                    .collect()
            })
            .collect();

        TableData { columns, rows }
    }

    fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>> {
        let as_text = df.column(name)?.cast(&DataType::String)?;
        let ca = as_text.as_materialized_series().str()?;
        Ok(ca.into_iter().map(|v| v.and_then(parse_date)).collect())
    }

    fn f64_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
        let as_f64 = df.column(name)?.cast(&DataType::Float64)?;
        let ca = as_f64.as_materialized_series().f64()?;
        Ok(ca.into_iter().collect())
    }
}

/// Parse a calendar date from the formats seen in exported price files.
/// Time and offset parts are discarded.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.date_naive());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_common_date_formats() {
        assert_eq!(parse_date("2024-03-05"), Some(d(2024, 3, 5)));
        assert_eq!(parse_date(" 2024/03/05 "), Some(d(2024, 3, 5)));
        assert_eq!(parse_date("03/05/2024"), Some(d(2024, 3, 5)));
        assert_eq!(parse_date("2024-03-05 16:00:00"), Some(d(2024, 3, 5)));
        assert_eq!(parse_date("2024-03-05 00:00:00-05:00"), Some(d(2024, 3, 5)));
        assert_eq!(parse_date("2024-03-05T00:00:00Z"), Some(d(2024, 3, 5)));
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        let df = DataFrame::new(vec![
            Column::new(" Date ".into(), vec!["2024-01-01"]),
            Column::new("CLOSE".into(), vec![1.0]),
            Column::new("close ".into(), vec![2.0]),
        ])
        .unwrap();

        let normalized = DataLoader::normalize_columns(&df).unwrap();
        assert_eq!(
            DataLoader::column_names(&normalized),
            vec!["date".to_string(), "close".to_string()]
        );
    }

    #[test]
    fn table_stringifies_cells() {
        let df = DataFrame::new(vec![
            Column::new("date".into(), vec!["2024-01-01", "2024-01-02"]),
            Column::new("real_close".into(), vec![1.5, 2.5]),
        ])
        .unwrap();

        let table = DataLoader::table_from_dataframe(&df);
        assert_eq!(table.columns, vec!["date", "real_close"]);
        assert_eq!(table.rows[0], vec!["2024-01-01", "1.5"]);
        assert_eq!(table.rows.len(), 2);
    }
}
