mod app;
mod config;
mod data;
mod guide;
mod state;
mod ui;

use app::VibeGuideApp;
use config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::default();
    let options = config.native_options();

    eframe::run_native(
        "Vibe Coding Guide",
        options,
        Box::new(|_cc| Ok(Box::new(VibeGuideApp::new(config)))),
    )
}
