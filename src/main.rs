mod app;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::SanitiserApp;
use config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::default();
    let options = config.native_options();

    eframe::run_native(
        config.title,
        options,
        Box::new(|_cc| Ok(Box::new(SanitiserApp::new(config)))),
    )
}
