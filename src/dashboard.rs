//! One synchronous pass from the user's selection to everything on screen.
//!
//! `render` loads the selected entity, narrows it to the chosen range and
//! builds every view from that. It holds no state between calls; the GUI
//! calls it again whenever the selection changes.

use crate::charts::{ChartData, ChartKind};
use crate::config::{Catalog, Entity};
use crate::data::{
    DataLoader, DataProcessor, DateRange, ForecastRecord, PriceSeries, TableData,
};
use crate::error::DashboardError;
use crate::stats::{format_currency, SeriesSummary, StatsCalculator};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const LINE_TITLE: &str = "Closing Price Over Time";
pub const BAR_TITLE: &str = "Closing Price Bar Chart";
pub const COMPARE_TITLE: &str = "Compare with Other Companies";
pub const FORECAST_TITLE: &str = "Real vs Predicted Closing Prices";
pub const FORECAST_MISSING: &str = "Forecast file not found for this company.";
pub const FORECAST_SCHEMA: &str =
    "Forecast file is missing required columns: 'real_close' or 'predicted_close'.";
pub const FORECAST_CAPTION: &str =
    "Forecast generated by an RNN model trained on past 7-day windows of closing prices.";

/// The four mutually exclusive view panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewTab {
    #[default]
    Line,
    Bar,
    Compare,
    Forecast,
}

impl ViewTab {
    pub const ALL: [ViewTab; 4] = [ViewTab::Line, ViewTab::Bar, ViewTab::Compare, ViewTab::Forecast];

    pub fn title(&self) -> &'static str {
        match self {
            ViewTab::Line => "📈 Line Chart",
            ViewTab::Bar => "📊 Bar Chart",
            ViewTab::Compare => "🔀 Compare",
            ViewTab::Forecast => "📉 Forecast",
        }
    }
}

/// What the user has picked.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    /// Label of the primary entity.
    pub entity: String,
    /// `None` means the full span of the entity's series.
    pub range: Option<DateRange>,
    /// Labels of the entities overlaid in the comparison view.
    pub compare: Vec<String>,
}

impl Selection {
    pub fn for_entity(label: &str) -> Self {
        Self {
            entity: label.to_string(),
            range: None,
            compare: Vec::new(),
        }
    }
}

/// State of the forecast panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastPanel {
    Ready {
        chart: ChartData,
        table: TableData,
        /// `None` when the file has no usable rows.
        mae: Option<f64>,
    },
    /// No forecast file for this entity. Not an error.
    Missing { message: String },
    /// The file exists but lacks required columns.
    SchemaError { message: String, found: Vec<String> },
    Failed { message: String },
}

/// Text of the "About" panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    pub heading: String,
    pub text: String,
    pub total_close: String,
    pub summary: Option<SeriesSummary>,
}

/// Everything derived from a successfully loaded primary entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityView {
    pub entity: Entity,
    /// Full span of the loaded series, `None` when it has no rows.
    pub bounds: Option<DateRange>,
    /// Range actually applied.
    pub range: Option<DateRange>,
    pub compare_options: Vec<String>,
    pub line: ChartData,
    pub bar: ChartData,
    pub comparison: ChartData,
    pub forecast: ForecastPanel,
    pub description: Description,
    pub logo_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// The primary entity could not be loaded; nothing is charted.
    Error { entity: String, message: String },
    Ready(Box<EntityView>),
}

/// Build every view for `selection`.
pub fn render(selection: &Selection, catalog: &Catalog, loader: &DataLoader) -> DashboardView {
    let entity = match catalog.get(&selection.entity) {
        Ok(entity) => entity,
        Err(e) => {
            return DashboardView::Error {
                entity: selection.entity.clone(),
                message: e.to_string(),
            }
        }
    };

    let series = match loader.load_series(entity) {
        Ok(series) => series,
        Err(e) => {
            warn!("Cannot display {}: {}", entity.label, e);
            return DashboardView::Error {
                entity: entity.label.clone(),
                message: e.to_string(),
            };
        }
    };

    let bounds = series.full_range();
    let range = match (selection.range, bounds) {
        (Some(range), Some(bounds)) => Some(range.clamp_to(&bounds)),
        (_, bounds) => bounds,
    };
    let filtered = match &range {
        Some(range) => DataProcessor::filter_by_range(&series, range),
        None => series.clone(),
    };
    debug!(
        "{}: {} of {} sessions in range",
        entity.label,
        filtered.len(),
        series.len()
    );

    let compare_options = catalog
        .labels()
        .into_iter()
        .filter(|label| *label != entity.label)
        .collect();

    let view = EntityView {
        entity: entity.clone(),
        bounds,
        range,
        compare_options,
        line: line_chart(&filtered),
        bar: ChartData::new(BAR_TITLE, ChartKind::Bar).with_trace(&entity.label, filtered.to_xy()),
        comparison: comparison_chart(&filtered, &selection.compare, range, catalog, loader),
        forecast: forecast_panel(entity, loader),
        description: describe(entity, &filtered),
        logo_path: loader.data_dir().join(entity.logo_file()),
    };

    info!("Rendered {}", entity.label);
    DashboardView::Ready(Box::new(view))
}

fn line_chart(filtered: &PriceSeries) -> ChartData {
    ChartData::new(LINE_TITLE, ChartKind::Line).with_trace(filtered.name(), filtered.to_xy())
}

/// Primary series plus every other selected entity over the same range.
/// Entities that fail to load are left out.
fn comparison_chart(
    primary: &PriceSeries,
    others: &[String],
    range: Option<DateRange>,
    catalog: &Catalog,
    loader: &DataLoader,
) -> ChartData {
    let extra: Vec<PriceSeries> = others
        .par_iter()
        .filter(|label| label.as_str() != primary.name())
        .filter_map(|label| {
            let loaded = catalog
                .get(label)
                .and_then(|other| loader.load_series(other));
            match loaded {
                Ok(series) => Some(match &range {
                    Some(range) => DataProcessor::filter_by_range(&series, range),
                    None => series,
                }),
                Err(e) => {
                    debug!("Skipping {} in comparison: {}", label, e);
                    None
                }
            }
        })
        .collect();

    let mut chart = line_chart(primary);
    chart.title = COMPARE_TITLE.to_string();
    for series in &extra {
        chart = chart.with_trace(series.name(), series.to_xy());
    }
    chart
}

fn forecast_panel(entity: &Entity, loader: &DataLoader) -> ForecastPanel {
    match loader.load_forecast(entity) {
        Ok(record) => forecast_ready(&record),
        Err(DashboardError::FileNotFound(path)) => {
            debug!("No forecast at {}", path);
            ForecastPanel::Missing {
                message: FORECAST_MISSING.to_string(),
            }
        }
        Err(DashboardError::Schema { found, .. }) => ForecastPanel::SchemaError {
            message: FORECAST_SCHEMA.to_string(),
            found,
        },
        Err(e) => {
            warn!("Forecast for {} failed: {}", entity.label, e);
            ForecastPanel::Failed {
                message: e.to_string(),
            }
        }
    }
}

fn forecast_ready(record: &ForecastRecord) -> ForecastPanel {
    let long = DataProcessor::stack_to_long(&record.rows);
    let mut chart = ChartData::new(FORECAST_TITLE, ChartKind::Line);
    for (label, points) in DataProcessor::split_by_label(&long) {
        chart = chart.with_trace(label.as_str(), points);
    }

    let mae = StatsCalculator::mean_absolute_error(&record.real(), &record.predicted()).ok();
    ForecastPanel::Ready {
        chart,
        table: record.table.clone(),
        mae,
    }
}

fn describe(entity: &Entity, filtered: &PriceSeries) -> Description {
    let closes = filtered.closes();
    Description {
        heading: format!("About {}", entity.short_name()),
        text: entity.description.clone(),
        total_close: format_currency(DataProcessor::total_close(filtered)),
        summary: StatsCalculator::summarize(&closes),
    }
}

/// MAE as shown to the user.
pub fn format_mae(mae: Option<f64>) -> String {
    match mae {
        Some(v) => format!("{:.4}", v),
        None => "n/a".to_string(),
    }
}
