//! Chart Viewer Widget
//! Central panel: view tabs, the active chart, the about panel and the
//! discussion text.

use crate::charts::{ChartData, ChartPlotter};
use crate::dashboard::{
    format_mae, DashboardView, EntityView, ForecastPanel, ViewTab, FORECAST_CAPTION,
};
use egui::{Color32, RichText, ScrollArea};

const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const WARNING_COLOR: Color32 = Color32::from_rgb(243, 156, 18);
const INFO_COLOR: Color32 = Color32::from_rgb(52, 152, 219);

const DISCUSSION: [&str; 6] = [
    "Show the data clearly through line and bar charts with minimal clutter.",
    "Avoid distortion by maintaining proportional scale and true representations.",
    "Present many numbers in a small space with interactive tabs and filters.",
    "Encourage data comparison across companies using multi-select features.",
    "Reveal data at several levels of detail, from overviews to forecasted trends.",
    "Integrate text and graphics by providing context and company info directly with visuals.",
];

#[derive(Default)]
pub struct ChartViewer {
    pub active_tab: ViewTab,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chart of the active tab, if it has one to show.
    pub fn active_chart<'a>(&self, view: &'a DashboardView) -> Option<&'a ChartData> {
        let DashboardView::Ready(v) = view else {
            return None;
        };
        match self.active_tab {
            ViewTab::Line => Some(&v.line),
            ViewTab::Bar => Some(&v.bar),
            ViewTab::Compare => Some(&v.comparison),
            ViewTab::Forecast => match &v.forecast {
                ForecastPanel::Ready { chart, .. } => Some(chart),
                _ => None,
            },
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, view: &DashboardView) {
        let entity_view = match view {
            DashboardView::Error { entity, message } => {
                ui.add_space(20.0);
                ui.label(
                    RichText::new(format!("⚠ Cannot display {}", entity))
                        .size(18.0)
                        .strong()
                        .color(ERROR_COLOR),
                );
                ui.label(RichText::new(message).color(ERROR_COLOR));
                return;
            }
            DashboardView::Ready(v) => v,
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    for tab in ViewTab::ALL {
                        ui.selectable_value(&mut self.active_tab, tab, tab.title());
                    }
                });
                ui.separator();
                ui.add_space(8.0);

                match self.active_tab {
                    ViewTab::Line => {
                        Self::subheader(ui, "Interactive Line Chart");
                        ChartPlotter::draw_chart(ui, "line_chart", &entity_view.line);
                    }
                    ViewTab::Bar => {
                        Self::subheader(ui, "Interactive Bar Chart");
                        ChartPlotter::draw_chart(ui, "bar_chart", &entity_view.bar);
                    }
                    ViewTab::Compare => {
                        Self::subheader(ui, "Compare with Other Companies");
                        ChartPlotter::draw_chart(ui, "compare_chart", &entity_view.comparison);
                    }
                    ViewTab::Forecast => {
                        Self::subheader(ui, "Forecasted vs Real Prices (RNN Model)");
                        Self::draw_forecast(ui, &entity_view.forecast);
                    }
                }

                ui.add_space(15.0);
                Self::draw_about(ui, entity_view);

                ui.add_space(15.0);
                Self::draw_discussion(ui);
            });
    }

    fn subheader(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(18.0).strong());
        ui.add_space(6.0);
    }

    fn draw_forecast(ui: &mut egui::Ui, panel: &ForecastPanel) {
        match panel {
            ForecastPanel::Ready { chart, table, mae } => {
                ChartPlotter::draw_chart(ui, "forecast_chart", chart);
                ui.add_space(10.0);
                ui.label(RichText::new("Forecast Table:").strong());
                ChartPlotter::draw_table(ui, "forecast_table", table);
                ui.add_space(10.0);
                ui.label(
                    RichText::new(format!("Mean Absolute Error (MAE): {}", format_mae(*mae)))
                        .strong()
                        .color(INFO_COLOR),
                );
                ui.label(RichText::new(FORECAST_CAPTION).size(11.0).color(Color32::GRAY));
            }
            ForecastPanel::Missing { message } => {
                ui.label(RichText::new(format!("⚠ {}", message)).color(WARNING_COLOR));
            }
            ForecastPanel::SchemaError { message, found } => {
                ui.label(RichText::new(format!("✖ {}", message)).color(ERROR_COLOR));
                ui.label(format!("Available columns: {:?}", found));
            }
            ForecastPanel::Failed { message } => {
                ui.label(RichText::new(format!("✖ {}", message)).color(ERROR_COLOR));
            }
        }
    }

    fn draw_about(ui: &mut egui::Ui, view: &EntityView) {
        let description = &view.description;
        egui::CollapsingHeader::new("ℹ About this Dashboard")
            .default_open(false)
            .show(ui, |ui| {
                ui.label(RichText::new(&description.heading).size(16.0).strong());
                ui.label(&description.text);
                ui.add_space(6.0);
                ui.label(
                    RichText::new(format!(
                        "Total closing value in selected period: {}",
                        description.total_close
                    ))
                    .strong()
                    .color(INFO_COLOR),
                );

                if let Some(summary) = &description.summary {
                    ui.add_space(6.0);
                    egui::Grid::new("summary_grid")
                        .striped(true)
                        .spacing([12.0, 4.0])
                        .show(ui, |ui| {
                            for (name, value) in [
                                ("Sessions", summary.count.to_string()),
                                ("Mean close", format!("{:.2}", summary.mean)),
                                ("Std deviation", format!("{:.2}", summary.std_dev)),
                                ("Lowest close", format!("{:.2}", summary.min)),
                                ("Highest close", format!("{:.2}", summary.max)),
                            ] {
                                ui.label(RichText::new(name).size(11.0));
                                ui.label(RichText::new(value).size(11.0));
                                ui.end_row();
                            }
                        });
                }
            });
    }

    fn draw_discussion(ui: &mut egui::Ui) {
        ui.label(
            RichText::new("📚 Discussion – Tufte Principles in this Dashboard")
                .size(16.0)
                .strong(),
        );
        ui.label("This dashboard follows Edward Tufte's principles of effective data visualization:");
        for line in DISCUSSION {
            ui.label(format!("• {}", line));
        }
    }
}
