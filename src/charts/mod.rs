//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{date_to_x, x_to_date_label, ChartData, ChartKind, ChartPlotter, Trace};
pub use renderer::{StaticChartRenderer, EXPORT_HEIGHT, EXPORT_WIDTH};
