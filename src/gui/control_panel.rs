//! Control Panel Widget
//! Left side panel with the company, date range and comparison selectors.

use crate::config::Catalog;
use crate::dashboard::{DashboardView, Selection};
use crate::data::DateRange;
use chrono::{Days, NaiveDate};
use egui::{Color32, ComboBox, RichText, ScrollArea, Slider};
use std::path::Path;

/// Left side control panel. Owns the current selection.
pub struct ControlPanel {
    pub selection: Selection,
    pub status: String,
}

impl ControlPanel {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            status: "Ready".to_string(),
        }
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        catalog: &Catalog,
        view: &DashboardView,
        data_dir: &Path,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 Stock Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Folder Section =====
        ui.label(RichText::new("📁 Data Folder").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(data_dir.display().to_string()).size(12.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseFolder;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Company Section =====
        ui.label(RichText::new("📈 Select a company").size(14.0).strong());
        ui.add_space(5.0);

        ComboBox::from_id_salt("entity")
            .width(240.0)
            .selected_text(&self.selection.entity)
            .show_ui(ui, |ui| {
                for label in catalog.labels() {
                    if ui
                        .selectable_label(self.selection.entity == label, &label)
                        .clicked()
                        && self.selection.entity != label
                    {
                        self.selection = Selection::for_entity(&label);
                        action = ControlPanelAction::EntityChanged;
                    }
                }
            });

        let DashboardView::Ready(entity_view) = view else {
            ui.add_space(15.0);
            self.show_status(ui);
            return action;
        };

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Date Range Section =====
        ui.label(RichText::new("📅 Select a date range").size(14.0).strong());
        ui.add_space(5.0);

        match (entity_view.bounds, entity_view.range) {
            (Some(bounds), Some(range)) => {
                if self.show_range_sliders(ui, bounds, range) {
                    action = ControlPanelAction::RangeChanged;
                }
                if ui.small_button("Full range").clicked() && self.selection.range.is_some() {
                    self.selection.range = None;
                    action = ControlPanelAction::RangeChanged;
                }
            }
            _ => {
                ui.label(RichText::new("No dated rows in this file").color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Comparison Section =====
        ui.label(RichText::new("🔀 Select companies to compare").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                    for label in &entity_view.compare_options {
                        let mut checked = self.selection.compare.contains(label);
                        if ui.checkbox(&mut checked, label).changed() {
                            if checked {
                                self.selection.compare.push(label.clone());
                            } else {
                                self.selection.compare.retain(|l| l != label);
                            }
                            action = ControlPanelAction::CompareChanged;
                        }
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("💾 Export Chart (PNG)").size(14.0))
                .min_size(egui::vec2(200.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportPng;
            }
        });

        ui.add_space(15.0);
        self.show_status(ui);

        action
    }

    /// Two day-offset sliders over `bounds`. Returns true when the selection moved.
    fn show_range_sliders(&mut self, ui: &mut egui::Ui, bounds: DateRange, range: DateRange) -> bool {
        let origin = bounds.start();
        let span = bounds.span_days();
        let mut start = (range.start() - origin).num_days();
        let mut end = (range.end() - origin).num_days();

        let fmt = move |n: f64, _: std::ops::RangeInclusive<usize>| {
            offset_date(origin, n as i64)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };

        let start_changed = ui
            .add(Slider::new(&mut start, 0..=span).text("Start").custom_formatter(fmt))
            .changed();
        let end_changed = ui
            .add(Slider::new(&mut end, 0..=span).text("End").custom_formatter(fmt))
            .changed();

        if !start_changed && !end_changed {
            return false;
        }

        if start > end {
            if start_changed {
                end = start;
            } else {
                start = end;
            }
        }

        if let (Some(s), Some(e)) = (offset_date(origin, start), offset_date(origin, end)) {
            self.selection.range = DateRange::new(s, e).ok();
        }
        true
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));
    }
}

fn offset_date(origin: NaiveDate, days: i64) -> Option<NaiveDate> {
    origin.checked_add_days(Days::new(u64::try_from(days).ok()?))
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseFolder,
    EntityChanged,
    RangeChanged,
    CompareChanged,
    ExportPng,
}

impl ControlPanelAction {
    /// Whether the selection changed and the views must be rebuilt.
    pub fn needs_render(&self) -> bool {
        matches!(
            self,
            ControlPanelAction::EntityChanged
                | ControlPanelAction::RangeChanged
                | ControlPanelAction::CompareChanged
        )
    }
}
