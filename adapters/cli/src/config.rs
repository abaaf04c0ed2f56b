//! Presentation settings merged from the optional TOML file and the command line.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::Args;

/// Settings read from a `--config` TOML file. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    seed: Option<u64>,
    cell_size: Option<f32>,
    swap_interval: Option<i32>,
    show_fps: Option<bool>,
    log: Option<String>,
}

impl FileConfig {
    /// Reads and parses the file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Resolved settings used to boot the game.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Settings {
    pub(crate) seed: u64,
    pub(crate) cell_size: Option<f32>,
    pub(crate) swap_interval: Option<i32>,
    pub(crate) show_fps: bool,
    pub(crate) log: Option<String>,
}

impl Settings {
    /// Merges the command line over the file; `fallback_seed` runs only when neither names a seed.
    pub(crate) fn resolve<F>(args: &Args, file: FileConfig, fallback_seed: F) -> Result<Self>
    where
        F: FnOnce() -> u64,
    {
        let cell_size = args.cell_size.or(file.cell_size);
        if let Some(cell_size) = cell_size {
            if !(cell_size.is_finite() && cell_size > 0.0) {
                bail!("cell size must be a positive number, got {cell_size}");
            }
        }

        Ok(Self {
            seed: args.seed.or(file.seed).unwrap_or_else(fallback_seed),
            cell_size,
            swap_interval: args
                .swap_interval
                .or(args.no_vsync.then_some(0))
                .or(file.swap_interval),
            show_fps: args.show_fps || file.show_fps.unwrap_or(false),
            log: args.log.clone().or(file.log),
        })
    }
}
