/// Entry point and main loop.

mod config;
mod domain;
mod error;
mod games;
mod hub;
mod nav;
mod ui;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use config::GameConfig;
use error::HubError;
use hub::{Flow, Hub};
use nav::event::Action;
use nav::sound::SoundController;
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);
const DEFAULT_FILTER: &str = "majlis_games=info";

fn main() {
    let loaded = GameConfig::load();
    let config = loaded.config;

    init_logging(config.general.log_file.as_deref());
    if let Some(path) = &loaded.source {
        tracing::info!(path = %path.display(), "config loaded");
    }
    for problem in &loaded.problems {
        tracing::warn!(error = %problem, "config problem, using defaults");
    }

    let sound = match SoundEngine::new(config.sound.volume) {
        Some(engine) => SoundController::new(Box::new(engine)),
        None => SoundController::silent(),
    };
    let mut hub = Hub::new(sound, config.games.clone());

    if let Some(key) = &config.general.start_game {
        if let Err(e) = hub.start_at(key) {
            tracing::warn!(error = %e, "start_game ignored");
        }
    }

    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = run(&mut hub, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        tracing::error!(error = %e, "main loop failed");
        eprintln!("Error: {e}");
    }

    tracing::info!("bye");
    println!("مع السلامة! 👋");
}

/// File logging. The terminal is in raw mode, so nothing goes to stdout.
fn init_logging(path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: could not open log file {}: {e}", path.display());
            return;
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
}

fn run(hub: &mut Hub, renderer: &mut Renderer, config: &GameConfig) -> Result<(), HubError> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    let tick_rate = Duration::from_millis(config.general.tick_rate_ms);
    let mut last_tick = Instant::now();
    let mut actions: Vec<Action> = Vec::with_capacity(8);

    loop {
        kb.drain_events();
        gp.update();

        if kb.interrupted {
            tracing::info!("interrupted");
            return Ok(());
        }

        let layout = *renderer.layout();
        hub.set_menu_columns(layout.menu_cols);

        actions.clear();
        actions.extend(kb.actions.iter().copied());
        actions.extend(kb.clicks.iter().filter_map(|&(col, row)| layout.header_hit(col, row)));
        actions.extend(gp.actions.iter().copied());

        let now = Instant::now();
        for &action in &actions {
            if hub.handle(action, now) == Flow::Quit {
                return Ok(());
            }
        }

        if last_tick.elapsed() >= tick_rate {
            hub.tick(Instant::now());
            last_tick = Instant::now();
        }

        renderer.render(hub, Instant::now())?;
        std::thread::sleep(FRAME_SLEEP);
    }
}
