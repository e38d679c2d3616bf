//! Search Impressions Dashboard - Organic Google Search impressions by country
//!
//! Desktop dashboard for exploring a search-performance export.

use eframe::egui;
use impressions_dashboard::gui::DashboardApp;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> eframe::Result<()> {
    // Logging: RUST_LOG overrides the default filter
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Organic Search Country Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Organic Search Country Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
