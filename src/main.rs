mod app;
mod color;
mod state;
mod ui;

use app::IrisExplorerApp;
use eframe::egui;
use iris_explorer::config::ViewerConfig;
use iris_explorer::data::loader;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let dataset = loader::load_bundled()?;
    log::info!("Loaded {} bundled records", dataset.len());

    let config = ViewerConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };
    let state = AppState::new(dataset, "bundled", config);

    eframe::run_native(
        "Iris Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(IrisExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
