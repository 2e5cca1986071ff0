use anyhow::{anyhow, Result};
use eframe::egui;

use penguins_dashboard::app::PenguinsDashboardApp;
use penguins_dashboard::config::DashboardConfig;
use penguins_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env()?;
    log::info!("Starting with {config:?}");
    let state = AppState::from_config(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Penguins dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(PenguinsDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
