mod app;
mod color;
mod state;
mod ui;

use std::path::Path;

use anyhow::{anyhow, Result};
use app::RailwayDashboardApp;
use eframe::egui;
use railway_dashboard::config::{DashboardConfig, CONFIG_FILE};
use railway_dashboard::data::loader::load_csv;
use railway_dashboard::data::stations::StationTable;
use railway_dashboard::data::Pipeline;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load(Path::new(CONFIG_FILE))?;

    // Without the dataset there is nothing to show: stop here.
    let dataset = load_csv(&config.data_path).inspect_err(|e| log::error!("{e:#}"))?;
    let pipeline = Pipeline::new(dataset, &StationTable::uk());
    let state = AppState::new(pipeline, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "UK Railway Intelligence Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(RailwayDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
