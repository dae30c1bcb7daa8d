mod app;
mod color;
mod config;
mod data;
mod map;
mod state;
mod ui;

use app::OceanTrackerApp;
use color::ColorAssigner;
use config::DashboardConfig;
use data::loader::DataLoader;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::default();

    // The one and only read of the data file for this process.
    let loader = DataLoader::new(&config.data_path);
    let state = AppState::from_load(loader.load(), ColorAssigner::new(&mut rand::thread_rng()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(OceanTrackerApp::new(state, config)))),
    )
}
