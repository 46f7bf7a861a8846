//! Static Chart Renderer
//! Draws a `ChartData` to a PNG file with plotters, matching what the
//! interactive view shows: date x axis, one colored series per trace, legend.

use crate::charts::plotter::{ChartData, ChartKind};
use crate::error::{DashboardError, Result};
use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

pub const EXPORT_WIDTH: u32 = 1400;
pub const EXPORT_HEIGHT: u32 = 800;

fn export_err<E: std::fmt::Display>(err: E) -> DashboardError {
    DashboardError::Export(err.to_string())
}

fn day_label(day: &i32) -> String {
    NaiveDate::from_num_days_from_ce_opt(*day)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `chart` to `path` as PNG.
    pub fn render_png(chart: &ChartData, path: &Path, width: u32, height: u32) -> Result<()> {
        let (Some((first, last)), Some((lo, hi))) = (chart.x_bounds(), chart.y_bounds()) else {
            return Err(DashboardError::Export(format!(
                "'{}' has no data to draw",
                chart.title
            )));
        };

        let x_min = first.num_days_from_ce();
        let x_max = last.num_days_from_ce() + 1;
        let (y_min, y_max) = Self::padded_range(chart.kind, lo, hi);

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(export_err)?;

        let mut ctx = ChartBuilder::on(&root)
            .caption(&chart.title, ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(export_err)?;

        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_labels(8)
            .x_label_formatter(&day_label)
            .y_label_formatter(&|v| format!("{:.2}", v))
            .draw()
            .map_err(export_err)?;

        for (idx, trace) in chart.traces.iter().enumerate() {
            let color = Palette99::pick(idx).to_rgba();
            let points = trace
                .points
                .iter()
                .map(|&(date, value)| (date.num_days_from_ce(), value));

            let drawn = match chart.kind {
                ChartKind::Line => ctx
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .map_err(export_err)?,
                ChartKind::Bar => ctx
                    .draw_series(points.map(|(x, y)| {
                        Rectangle::new([(x, y_min.max(0.0)), (x + 1, y)], color.filled())
                    }))
                    .map_err(export_err)?,
            };
            drawn
                .label(trace.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 16, y + 5)], color.filled()));
        }

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .draw()
            .map_err(export_err)?;

        root.present().map_err(export_err)?;
        info!("Exported '{}' to {}", chart.title, path.display());
        Ok(())
    }

    /// Value axis range with some headroom. Bars start at zero.
    fn padded_range(kind: ChartKind, lo: f64, hi: f64) -> (f64, f64) {
        let span = (hi - lo).abs().max(1e-9);
        let pad = span * 0.05;
        match kind {
            ChartKind::Bar => (lo.min(0.0), hi + pad),
            ChartKind::Line => (lo - pad, hi + pad),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_axis_starts_at_zero() {
        assert_eq!(StaticChartRenderer::padded_range(ChartKind::Bar, 10.0, 20.0).0, 0.0);
        let (lo, hi) = StaticChartRenderer::padded_range(ChartKind::Line, 10.0, 20.0);
        assert!(lo < 10.0 && hi > 20.0);
    }

    #[test]
    fn empty_chart_is_not_exported() {
        let dir = tempfile::tempdir().unwrap();
        let chart = ChartData::new("Empty", ChartKind::Line);
        let err = StaticChartRenderer::render_png(&chart, &dir.path().join("x.png"), 100, 100)
            .unwrap_err();
        assert!(matches!(err, DashboardError::Export(_)));
    }

    #[test]
    fn day_labels_are_iso_dates() {
        let day = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap().num_days_from_ce();
        assert_eq!(day_label(&day), "2023-12-31");
    }
}
