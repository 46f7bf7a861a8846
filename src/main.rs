//! Stock Price Dashboard - CSV Price Series & Forecast Viewer
//!
//! Desktop dashboard for browsing per-company closing prices.

use anyhow::Context;
use eframe::egui;
use stock_dashboard::config::DashboardConfig;
use stock_dashboard::gui::DashboardApp;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cwd = std::env::current_dir().context("Cannot resolve working directory")?;
    let config = DashboardConfig::load_or_default(&cwd).context("Failed to load configuration")?;
    info!(
        "Starting Stock Dashboard ({} companies, data in {})",
        config.entities.entities().len(),
        config.data_dir.display()
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Stock Price Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Stock Price Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
