use anyhow::Context;
use eframe::egui;
use precagro::app::PrecAgroApp;
use precagro::config;
use precagro::model::loader::{load_artifacts, ArtifactPaths};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Artifacts must load before any window exists; there is no degraded mode.
    let paths = ArtifactPaths::default();
    let context = load_artifacts(&paths)
        .context("loading prediction artifacts")
        .inspect_err(|e| log::error!("Startup failed: {e:#}"))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config::APP_TITLE)
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::WINDOW_MIN_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        config::APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(PrecAgroApp::new(cc, context, paths)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
