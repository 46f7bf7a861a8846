//! Error types shared by the loader, metrics and export paths.

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Required column '{column}' not found in {file}")]
    MissingColumn { column: String, file: String },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Forecast file is missing required columns: {missing:?}. Available columns: {found:?}")]
    Schema {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("Sequences differ in length: {real} real values vs {predicted} predicted values")]
    LengthMismatch { real: usize, predicted: usize },

    #[error("Cannot compute a metric over empty sequences")]
    EmptyInput,

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Chart export failed: {0}")]
    Export(String),
}

impl DashboardError {
    /// Errors that leave the view usable but empty rather than broken.
    pub fn is_warning(&self) -> bool {
        matches!(self, DashboardError::FileNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
