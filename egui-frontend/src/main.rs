use eframe::egui;
use log::{error, info};

mod app;
mod ui;

use app::BudgetApp;
use backend::AppConfig;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    info!("Starting budget tracker");

    let config = AppConfig::load();
    info!("Running with {:?} persistence", config.mode);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Monthly Expense Tracker"),
        ..Default::default()
    };

    eframe::run_native(
        "Monthly Expense Tracker",
        options,
        Box::new(move |_cc| match BudgetApp::new(&config) {
            Ok(app) => Ok(Box::new(app)),
            Err(e) => {
                error!("Failed to initialize app: {e}");
                Err(format!("Failed to initialize app: {e}").into())
            }
        }),
    )
}
