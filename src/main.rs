use dots_and_boxes::{GameApp, GameConfig};

use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Invalid configuration: {:#}", e);
            process::exit(1);
        }
    };

    info!(
        "Starting {}x{} game: {} vs {}",
        config.grid_rows, config.grid_cols, config.player_a.name, config.player_b.name
    );

    eframe::run_native(
        "Dots and Boxes",
        eframe::NativeOptions::default(),
        Box::new(move |_cc| Ok(Box::new(GameApp::new(&config)))),
    )
}
