//! Dashboard configuration and the entity catalog.
//!
//! The catalog is fixed for a session. It comes from `dashboard.json` in the
//! working directory when that file exists, otherwise from the built-in list
//! of companies shipped with the sample data.

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CONFIG_FILE_NAME: &str = "dashboard.json";

/// A selectable company backed by one CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Display label, e.g. `Apple (AAPL)`.
    pub label: String,
    /// Backing CSV file name relative to the data directory.
    pub file: String,
    pub description: String,
}

impl Entity {
    pub fn new(label: &str, file: &str, description: &str) -> Self {
        Self {
            label: label.to_string(),
            file: file.to_string(),
            description: description.to_string(),
        }
    }

    /// Ticker symbol: the part of the file name between the first underscore
    /// and the extension (`df_AAPL.csv` -> `AAPL`).
    pub fn symbol(&self) -> String {
        let stem = Path::new(&self.file)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file.clone());

        match stem.split_once('_') {
            Some((_, rest)) => rest.to_string(),
            None => stem,
        }
    }

    /// Label without the parenthesised ticker (`Apple (AAPL)` -> `Apple`).
    pub fn short_name(&self) -> &str {
        self.label
            .split('(')
            .next()
            .map(str::trim)
            .unwrap_or(&self.label)
    }

    pub fn forecast_file(&self) -> String {
        format!("forecast_{}.csv", self.symbol())
    }

    pub fn logo_file(&self) -> PathBuf {
        PathBuf::from("logos").join(format!("{}.png", self.symbol()))
    }
}

/// Ordered, immutable set of entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entities: Vec<Entity>,
}

impl Catalog {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn labels(&self) -> Vec<String> {
        self.entities.iter().map(|e| e.label.clone()).collect()
    }

    pub fn get(&self, label: &str) -> Result<&Entity> {
        self.entities
            .iter()
            .find(|e| e.label == label)
            .ok_or_else(|| DashboardError::UnknownEntity(label.to_string()))
    }

    pub fn first(&self) -> Option<&Entity> {
        self.entities.first()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            Entity::new(
                "Apple (AAPL)",
                "df_AAPL.csv",
                "Apple Inc. is a global technology company known for the iPhone, Mac, and innovative software services.",
            ),
            Entity::new(
                "Anheuser-Busch (ABNB)",
                "df_ABNB.csv",
                "Airbnb, Inc. operates an online marketplace for lodging, primarily homestays for vacation rentals.",
            ),
            Entity::new(
                "Google (GOOG)",
                "df_GOOG.csv",
                "Google LLC is a leading tech company specializing in internet-related services, AI, and cloud computing.",
            ),
            Entity::new(
                "Amazon (AMZN)",
                "df_AMZN.csv",
                "Amazon.com, Inc. is a global e-commerce and cloud computing giant headquartered in Seattle.",
            ),
            Entity::new(
                "Boeing (BA)",
                "df_BA.csv",
                "The Boeing Company designs, manufactures, and sells airplanes, rotorcraft, rockets, and satellites worldwide.",
            ),
            Entity::new(
                "American Tower (AMT)",
                "df_AMT.csv",
                "American Tower Corporation is a real estate investment trust that owns and operates wireless towers.",
            ),
        ])
    }
}

/// Top-level settings read at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub window_size: [f32; 2],
    pub entities: Catalog,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            window_size: [1400.0, 900.0],
            entities: Catalog::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a config file. Missing fields fall back to the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        debug!(
            "Parsed config {} ({} entities)",
            path.display(),
            config.entities.entities().len()
        );
        Ok(config)
    }

    /// Load `dashboard.json` from `dir` when present, otherwise the defaults.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            info!("Loading configuration from {}", path.display());
            Self::from_file(&path)
        } else {
            info!("No {} found, using built-in catalog", CONFIG_FILE_NAME);
            Ok(Self::default())
        }
    }

    pub fn resolve(&self, file: impl AsRef<Path>) -> PathBuf {
        self.data_dir.join(file)
    }
}
