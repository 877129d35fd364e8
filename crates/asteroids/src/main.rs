//! Headless asteroids run
//!
//! Usage: `asteroids [config.toml|config.ron] [seconds]`

use asteroids::config::GameConfig;
use asteroids::game::Game;
use shatter_engine::foundation::logging;
use shatter_engine::prelude::*;

const DEFAULT_CONFIG_PATH: &str = "asteroids.toml";
const DEFAULT_RUN_SECONDS: f64 = 10.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_adjustable(log::LevelFilter::Info);

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let seconds = match args.next() {
        Some(value) => value.parse::<f64>()?,
        None => DEFAULT_RUN_SECONDS,
    };

    let config = GameConfig::load_or_default(&config_path)?;
    logging::apply_level(&config.engine.log_filter);
    log::info!("Starting asteroids for {seconds}s at {} Hz", config.engine.tick_rate_hz);

    let mut pacer = Pacer::new(config.engine.tick_rate_hz)?;
    let mut game = Game::new(config)?;
    let mut viewport = RecordingViewport::new();

    game.push_input(InputEvent::KeyUp(KeyCode::Space));

    let mut elapsed_ms = 0.0;
    while elapsed_ms < seconds * 1000.0 {
        pacer.wait();
        elapsed_ms += game.update();
        game.draw(&mut viewport);
        log::trace!(
            "Frame {}: {} draw calls",
            viewport.refresh_count(),
            viewport.commands().len()
        );
    }

    let controller = game.controller();
    log::info!(
        "Finished after {} ticks: level {}, {} lives, {} entities",
        game.scheduler().tick_count(),
        controller.level(),
        controller.lives(),
        game.world().len()
    );
    Ok(())
}
