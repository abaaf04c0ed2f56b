#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots Shrinkmaze in a macroquad window.

mod config;
mod scene;

use std::{
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use glam::Vec2;
use shrinkmaze_core::Event;
use shrinkmaze_rendering::{effects::VisualEffects, palette, Presentation, RenderingBackend};
use shrinkmaze_rendering_macroquad::MacroquadBackend;
use shrinkmaze_session::{GameSession, SessionConfig, SessionInput};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{FileConfig, Settings};

const DEFAULT_LOG_FILTER: &str = "info";

/// Collect gems while the maze closes in around you.
#[derive(Debug, Parser)]
#[command(name = "shrinkmaze", version)]
pub(crate) struct Args {
    /// Seed for maze carving, placement and enemy behaviour.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// TOML file with presentation settings; flags override its values.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
    /// Edge length of a maze cell in pixels.
    #[arg(long, value_name = "PIXELS")]
    pub(crate) cell_size: Option<f32>,
    /// Log the frame rate once per second.
    #[arg(long)]
    pub(crate) show_fps: bool,
    /// Render as fast as possible instead of waiting for the display.
    #[arg(long, conflicts_with = "swap_interval")]
    pub(crate) no_vsync: bool,
    /// Swap interval requested from the platform.
    #[arg(long, value_name = "FRAMES")]
    pub(crate) swap_interval: Option<i32>,
    /// Log filter directive, for example `shrinkmaze_world=debug`.
    #[arg(long, value_name = "FILTER")]
    pub(crate) log: Option<String>,
}

/// Entry point for the Shrinkmaze command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, file, time_seed)?;
    init_tracing(settings.log.as_deref())?;

    let mut session_config = SessionConfig::with_seed(settings.seed);
    if let Some(cell_size) = settings.cell_size {
        session_config = session_config.with_cell_size(cell_size);
    }
    info!(seed = settings.seed, "booting shrinkmaze");

    let mut session = GameSession::new(session_config);
    let mut effects = VisualEffects::new(settings.seed.rotate_left(32));
    let _ = session.drain_events();
    let scene = scene::build(session.world(), &effects)?;

    let backend = MacroquadBackend::new()
        .with_swap_interval(settings.swap_interval)
        .with_show_fps(settings.show_fps);
    let presentation = Presentation::new("Shrinkmaze", palette::BACKGROUND, scene);

    backend
        .run(presentation, move |frame_dt, input, scene| {
            let steps = session.advance(
                frame_dt,
                SessionInput {
                    intent: input.intent,
                    start: input.start,
                    restart: input.restart,
                },
            );

            let events = session.drain_events();
            if events.contains(&Event::GameStarted) {
                effects.clear();
            }
            effects.observe(&events, Vec2::new(scene.width(), scene.height()));
            for _ in 0..steps {
                effects.update();
            }

            if let Err(err) = scene::refresh(scene, session.world(), &effects) {
                error!(error = %err, "failed to refresh scene");
            }
        })
        .context("rendering backend failed")
}

fn init_tracing(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter `{directive}`"))?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("failed to install tracing subscriber")
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
