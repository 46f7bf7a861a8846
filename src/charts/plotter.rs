//! Chart Plotter Module
//! Chart descriptions shared by the interactive and static renderers, and
//! their interactive drawing with egui_plot.

use crate::data::TableData;
use chrono::{Datelike, NaiveDate};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints};

/// Color palette for traces, in trace order.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(121, 85, 72),   // Brown
    Color32::from_rgb(96, 125, 139),  // Blue Grey
];

const CHART_HEIGHT: f32 = 420.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// One named (date, value) run.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub traces: Vec<Trace>,
}

impl ChartData {
    pub fn new(title: &str, kind: ChartKind) -> Self {
        Self {
            title: title.to_string(),
            kind,
            x_label: "Date".to_string(),
            y_label: "Price".to_string(),
            traces: Vec::new(),
        }
    }

    pub fn with_trace(mut self, name: &str, points: Vec<(NaiveDate, f64)>) -> Self {
        self.traces.push(Trace {
            name: name.to_string(),
            points,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.traces.iter().all(|t| t.points.is_empty())
    }

    /// Earliest and latest date over all traces.
    pub fn x_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self.traces.iter().flat_map(|t| t.points.iter().map(|p| p.0));
        let min = dates.clone().min()?;
        let max = dates.max()?;
        Some((min, max))
    }

    /// Smallest and largest value over all traces.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let values = self.traces.iter().flat_map(|t| t.points.iter().map(|p| p.1));
        values.fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Dates travel on the plot x axis as day numbers.
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

pub fn x_to_date_label(x: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub struct ChartPlotter;

impl ChartPlotter {
    pub fn trace_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    /// Draw a line or bar chart with a date x axis.
    pub fn draw_chart(ui: &mut egui::Ui, id: &str, chart: &ChartData) {
        ui.label(RichText::new(&chart.title).size(15.0).strong());

        if chart.is_empty() {
            ui.label(RichText::new("No data in the selected period").color(Color32::GRAY));
            return;
        }

        let kind = chart.kind;
        Plot::new(id)
            .height(CHART_HEIGHT)
            .legend(Legend::default())
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .x_axis_formatter(|mark, _range| x_to_date_label(mark.value))
            .label_formatter(|name, value| {
                let date = x_to_date_label(value.x);
                if name.is_empty() {
                    format!("{}\n{:.2}", date, value.y)
                } else {
                    format!("{}\n{}\n{:.2}", name, date, value.y)
                }
            })
            .show(ui, |plot_ui| {
                for (idx, trace) in chart.traces.iter().enumerate() {
                    let color = Self::trace_color(idx);
                    match kind {
                        ChartKind::Line => {
                            let points: PlotPoints = trace
                                .points
                                .iter()
                                .map(|&(date, value)| [date_to_x(date), value])
                                .collect();
                            plot_ui.line(Line::new(points).color(color).width(1.5).name(&trace.name));
                        }
                        ChartKind::Bar => {
                            let bars: Vec<Bar> = trace
                                .points
                                .iter()
                                .map(|&(date, value)| Bar::new(date_to_x(date), value).width(0.8))
                                .collect();
                            plot_ui.bar_chart(BarChart::new(bars).color(color).name(&trace.name));
                        }
                    }
                }
            });
    }

    /// Draw a raw table, striped, with a bounded height.
    pub fn draw_table(ui: &mut egui::Ui, id: &str, table: &TableData) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::ScrollArea::both()
                    .id_salt(id)
                    .max_height(260.0)
                    .show(ui, |ui| {
                        egui::Grid::new(ui.make_persistent_id(id))
                            .striped(true)
                            .min_col_width(80.0)
                            .spacing([12.0, 4.0])
                            .show(ui, |ui| {
                                for col in &table.columns {
                                    ui.label(RichText::new(col).strong().size(11.0));
                                }
                                ui.end_row();

                                for row in &table.rows {
                                    for cell in row {
                                        ui.label(RichText::new(cell).size(11.0));
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn bounds_span_all_traces() {
        let chart = ChartData::new("t", ChartKind::Line)
            .with_trace("a", vec![(d(2), 5.0), (d(4), 7.0)])
            .with_trace("b", vec![(d(1), 9.0), (d(3), 1.0)]);
        assert_eq!(chart.x_bounds(), Some((d(1), d(4))));
        assert_eq!(chart.y_bounds(), Some((1.0, 9.0)));
    }

    #[test]
    fn empty_chart_has_no_bounds() {
        let chart = ChartData::new("t", ChartKind::Bar).with_trace("a", Vec::new());
        assert!(chart.is_empty());
        assert_eq!(chart.x_bounds(), None);
        assert_eq!(chart.y_bounds(), None);
    }

    #[test]
    fn date_axis_round_trips() {
        assert_eq!(x_to_date_label(date_to_x(d(17))), "2024-05-17");
    }
}
