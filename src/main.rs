mod app;
mod classifier;
mod color;
mod config;
mod data;
mod error;
mod predict;
mod service;
mod state;
mod ui;

use std::path::PathBuf;

use app::SalaryTierApp;
use config::AppConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env(std::env::args_os().nth(1).map(PathBuf::from))?;
    log::info!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Tier – Salary Range Prediction",
        options,
        Box::new(|_cc| {
            Ok(Box::new(SalaryTierApp::new(AppState::new(
                config,
                service::global(),
            ))))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}
