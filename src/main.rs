mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod stats;
mod ui;

use app::StudentDashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_args(std::env::args().skip(1));
    log::info!("Starting dashboard with data file {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Student Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(StudentDashboardApp::new(config)))),
    )
}
