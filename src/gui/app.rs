//! Stock Dashboard Main Application
//! Main window with control panel, header and chart viewer.

use crate::charts::{StaticChartRenderer, EXPORT_HEIGHT, EXPORT_WIDTH};
use crate::config::DashboardConfig;
use crate::dashboard::{render, DashboardView, Selection};
use crate::data::DataLoader;
use crate::error::DashboardError;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::{RichText, SidePanel, TextureHandle};
use tracing::{debug, info, warn};

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    view: DashboardView,

    // Logo texture, keyed by the entity it was loaded for
    logo: Option<TextureHandle>,
    logo_entity: Option<String>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let loader = DataLoader::new(config.data_dir.clone());
        let selection = config
            .entities
            .first()
            .map(|e| Selection::for_entity(&e.label))
            .unwrap_or_default();
        let view = render(&selection, &config.entities, &loader);

        Self {
            config,
            loader,
            control_panel: ControlPanel::new(selection),
            chart_viewer: ChartViewer::new(),
            view,
            logo: None,
            logo_entity: None,
        }
    }

    /// Rebuild every view from the current selection.
    fn refresh(&mut self) {
        self.view = render(
            &self.control_panel.selection,
            &self.config.entities,
            &self.loader,
        );
        match &self.view {
            DashboardView::Ready(v) => {
                // Keep the panel's range in step with what was actually applied
                if self.control_panel.selection.range.is_some() {
                    self.control_panel.selection.range = v.range;
                }
                self.control_panel.set_status("Ready");
            }
            DashboardView::Error { message, .. } => {
                self.control_panel.set_status(&format!("Error: {}", message));
            }
        }
    }

    /// Pick another data folder and reload.
    fn handle_browse_folder(&mut self) {
        if let Some(dir) = rfd::FileDialog::new()
            .set_directory(&self.config.data_dir)
            .pick_folder()
        {
            info!("Data folder changed to {}", dir.display());
            self.config.data_dir = dir.clone();
            self.loader = DataLoader::new(dir);
            self.control_panel.selection.range = None;
            self.logo_entity = None;
            self.refresh();
        }
    }

    /// Export the chart of the active tab as PNG and open it.
    fn handle_export_png(&mut self) {
        let Some(chart) = self.chart_viewer.active_chart(&self.view) else {
            self.control_panel.set_status("No chart to export");
            return;
        };

        let file_name = format!(
            "{}_{}.png",
            self.control_panel.selection.entity.replace([' ', '(', ')'], ""),
            chart.title.to_lowercase().replace(' ', "_")
        );
        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(&file_name)
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartRenderer::render_png(chart, &output_path, EXPORT_WIDTH, EXPORT_HEIGHT) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if let Err(e) = open::that(&output_path) {
                    warn!("Could not open {}: {}", output_path.display(), e);
                }
            }
            Err(e) => {
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Load the logo texture when the primary entity changes.
    fn update_logo(&mut self, ctx: &egui::Context) {
        let DashboardView::Ready(v) = &self.view else {
            self.logo = None;
            self.logo_entity = None;
            return;
        };
        if self.logo_entity.as_deref() == Some(v.entity.label.as_str()) {
            return;
        }

        self.logo_entity = Some(v.entity.label.clone());
        self.logo = match self.loader.load_logo(&v.entity) {
            Ok(img) => {
                let size = [img.width() as usize, img.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
                Some(ctx.load_texture(
                    format!("logo_{}", v.entity.symbol()),
                    color_image,
                    egui::TextureOptions::LINEAR,
                ))
            }
            Err(DashboardError::FileNotFound(path)) => {
                debug!("No logo at {}", path);
                None
            }
            Err(e) => {
                warn!("Failed to load logo for {}: {}", v.entity.label, e);
                None
            }
        };
    }

    fn draw_header(&self, ui: &mut egui::Ui) {
        let DashboardView::Ready(v) = &self.view else {
            return;
        };
        ui.horizontal(|ui| {
            if let Some(logo) = &self.logo {
                ui.add(egui::Image::new(logo).max_width(150.0).max_height(80.0));
                ui.add_space(12.0);
            }
            ui.vertical(|ui| {
                ui.label(
                    RichText::new(format!("Stock Price Dashboard – {}", v.entity.label))
                        .size(26.0)
                        .strong(),
                );
                ui.label(
                    RichText::new("Interactive Analysis with Forecast and Comparison")
                        .size(12.0)
                        .color(egui::Color32::GRAY),
                );
            });
        });
        ui.add_space(8.0);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_logo(ctx);

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(
                        ui,
                        &self.config.entities,
                        &self.view,
                        &self.config.data_dir,
                    );

                    if action.needs_render() {
                        debug!("{:?}", action);
                        self.refresh();
                    }
                    match action {
                        ControlPanelAction::BrowseFolder => self.handle_browse_folder(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        _ => {}
                    }
                });
            });

        // Central panel - header and views
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_header(ui);
            self.chart_viewer.show(ui, &self.view);
        });
    }
}
