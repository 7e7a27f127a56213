mod app;
mod config;
mod draw;
mod palette;
mod world;

use anyhow::{Context, Result};

use pacer_engine::assets::load_image;
use pacer_engine::logging::{init_logging, LoggingConfig};
use pacer_engine::window::Runtime;

use crate::app::DemoApp;
use crate::config::DemoConfig;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = DemoConfig::from_args(std::env::args().skip(1));
    config.tuning.validate().context("invalid tuning")?;

    let sprite = load_image(&config.sprite_path)
        .with_context(|| format!("failed to load sprite {}", config.sprite_path.display()))?;
    log::info!(
        "loaded sprite {} ({}x{})",
        config.sprite_path.display(),
        sprite.width,
        sprite.height
    );

    let app = DemoApp::new(&config, sprite);
    Runtime::run(config.runtime, config.gpu, app)
}
