use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use engine::app::{AppConfig, run_game};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use winit::dpi::PhysicalSize;

use game::headful::audio::AudioOut;
use game::headful::{HeadfulFrontend, HeadfulGame};
use game::round::RoundEngine;
use game::session::Session;
use game::settings::SettingsStore;

#[derive(Debug, Parser)]
#[command(name = "arrow-recall")]
#[command(about = "Watch a sequence of arrows, then repeat it")]
struct Cli {
    /// Settings JSON; defaults to $ARROW_RECALL_SETTINGS_PATH or the XDG config dir.
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Fixed seed for the arrow sequences.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = false)]
    mute: bool,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let store = match &cli.settings {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::from_env(),
    };
    let mut settings = store.load_or_default();
    if let Some(w) = cli.width {
        settings.video.window_width = w;
    }
    if let Some(h) = cli.height {
        settings.video.window_height = h;
    }
    if cli.mute {
        settings.audio.mute_all = true;
    }
    let settings = settings.sanitized();
    info!(path = %store.path().display(), ?settings, "settings loaded");

    let audio = if settings.audio.mute_all {
        None
    } else {
        match AudioOut::open(settings.audio, settings.timing.beep_length()) {
            Ok(out) => Some(out),
            Err(err) => {
                warn!(%err, "no audio output; running silent");
                None
            }
        }
    };

    let engine = match cli.seed.or(settings.seed) {
        Some(seed) => {
            info!(seed, "seeded sequences");
            RoundEngine::seeded(seed)
        }
        None => RoundEngine::from_entropy(),
    };
    let frontend = HeadfulFrontend::new(audio);
    let session = Session::new(engine, settings.timing, frontend);

    let config = AppConfig {
        title: String::from("Arrow Recall"),
        desired_size: PhysicalSize::new(settings.video.window_width, settings.video.window_height),
        vsync: settings.video.vsync,
        ..AppConfig::default()
    };
    run_game(config, HeadfulGame::new(session)).context("failed to open the game window")?;
    Ok(())
}
