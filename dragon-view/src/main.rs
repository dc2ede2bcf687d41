//! Application entry point for the dragon fractal viewer.
//!
//! Sets up logging and configuration, then hands control to eframe with
//! [`Viewer`] from the `viewer` module as the app.

mod sprites;
mod viewer;

use dragon_core::config::Config;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

/// Optional config file looked up in the working directory.
const CONFIG_FILE: &str = "dragon-fractal.toml";

/// Loads [`CONFIG_FILE`] if present, falling back to defaults.
fn load_config() -> Config {
    let path = Path::new(CONFIG_FILE);
    if !path.exists() {
        return Config::default();
    }

    match Config::load(path) {
        Ok(cfg) => {
            tracing::info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            tracing::warn!("ignoring {}: {e}", path.display());
            Config::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Dragon Fractal")
            .with_inner_size([config.canvas_size.x, config.canvas_size.y + 60.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dragon Fractal",
        options,
        Box::new(move |cc| Ok(Box::new(Viewer::new(&cc.egui_ctx, config)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
