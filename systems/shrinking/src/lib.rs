#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shrink timer that periodically collapses the outer ring of the maze.
//!
//! The system accumulates simulated time from [`Event::TimeAdvanced`] and
//! fires once the accumulated time strictly exceeds the configured interval.
//! Each firing either requests a new ring via [`Command::ShrinkRing`] or,
//! when the active bounds already reached the minimum span, checks whether
//! the maze has been cleared.

use std::time::Duration;

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shrinkmaze_core::{
    constants::{MAX_POWER_UPS, MIN_ACTIVE_SPAN, SHRINK_POWER_UP_CHANCE},
    ActiveBounds, Command, Event, PowerUpKind,
};
use shrinkmaze_world::query::GridView;
use tracing::debug;

/// Configuration parameters required to construct the shrinking system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided shrink cadence and seed.
    #[must_use]
    pub const fn new(interval: Duration, rng_seed: u64) -> Self {
        Self { interval, rng_seed }
    }
}

/// Pure system that decides when the maze shrinks.
#[derive(Debug)]
pub struct Shrinking {
    interval: Duration,
    elapsed: Duration,
    rng: ChaCha8Rng,
}

impl Shrinking {
    /// Creates a new shrinking system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            interval: config.interval,
            elapsed: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Time accumulated since the last firing.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Consumes events and immutable views to emit shrink commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        bounds: ActiveBounds,
        grid: GridView<'_>,
        gem_count: usize,
        power_up_count: usize,
        out: &mut Vec<Command>,
    ) {
        let mut advanced = false;
        for event in events {
            match event {
                Event::MazeLoaded { .. } => {
                    self.elapsed = Duration::ZERO;
                    advanced = false;
                }
                Event::TimeAdvanced { dt } => {
                    self.elapsed = self.elapsed.saturating_add(*dt);
                    advanced = true;
                }
                _ => {}
            }
        }

        if !advanced || self.elapsed <= self.interval {
            return;
        }
        self.elapsed = Duration::ZERO;

        if !bounds.can_contract(MIN_ACTIVE_SPAN) {
            debug!(gem_count, "shrink halted at minimum span");
            if gem_count == 0 {
                out.push(Command::DeclareVictory);
            }
            return;
        }

        out.push(Command::ShrinkRing);

        if power_up_count >= MAX_POWER_UPS || !self.rng.gen_bool(SHRINK_POWER_UP_CHANCE) {
            return;
        }
        let center = bounds.contracted().center();
        if !grid.is_path(center) {
            return;
        }
        if let Some(kind) = PowerUpKind::ALL.choose(&mut self.rng) {
            out.push(Command::SpawnPowerUp {
                kind: *kind,
                cell: center,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shrinkmaze_core::{CellKind, MazeDimensions, MazeLayout};

    fn open_layout() -> MazeLayout {
        let mut layout = MazeLayout::filled(MazeDimensions::DEFAULT, CellKind::Path);
        for cell in ActiveBounds::covering(MazeDimensions::DEFAULT).ring() {
            let _ = layout.set(cell, CellKind::Wall);
        }
        layout
    }

    fn advance(shrinking: &mut Shrinking, bounds: ActiveBounds, gems: usize) -> Vec<Command> {
        let layout = open_layout();
        let grid = GridView::new(&layout, 32.0);
        let mut out = Vec::new();
        shrinking.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_secs(1),
            }],
            bounds,
            grid,
            gems,
            0,
            &mut out,
        );
        out
    }

    #[test]
    fn fires_only_after_interval_is_exceeded() {
        let mut shrinking = Shrinking::new(Config::new(Duration::from_secs(2), 3));
        let bounds = ActiveBounds::covering(MazeDimensions::DEFAULT);
        assert!(advance(&mut shrinking, bounds, 5).is_empty());
        assert!(advance(&mut shrinking, bounds, 5).is_empty());
        let fired = advance(&mut shrinking, bounds, 5);
        assert_eq!(fired.first(), Some(&Command::ShrinkRing));
        assert_eq!(shrinking.elapsed(), Duration::ZERO);
    }

    #[test]
    fn halted_shrink_declares_victory_only_without_gems() {
        let mut shrinking = Shrinking::new(Config::new(Duration::ZERO, 3));
        let small = ActiveBounds::new(2, 18, 4, 10);
        assert!(advance(&mut shrinking, small, 2).is_empty());
        assert_eq!(
            advance(&mut shrinking, small, 0),
            vec![Command::DeclareVictory]
        );
    }

    #[test]
    fn maze_load_resets_accumulated_time() {
        let mut shrinking = Shrinking::new(Config::new(Duration::from_secs(8), 3));
        let layout = open_layout();
        let grid = GridView::new(&layout, 32.0);
        let bounds = ActiveBounds::covering(MazeDimensions::DEFAULT);
        let mut out = Vec::new();
        shrinking.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_secs(7),
            }],
            bounds,
            grid,
            1,
            0,
            &mut out,
        );
        shrinking.handle(
            &[Event::MazeLoaded {
                dimensions: MazeDimensions::DEFAULT,
            }],
            bounds,
            grid,
            1,
            0,
            &mut out,
        );
        assert_eq!(shrinking.elapsed(), Duration::ZERO);
        assert!(out.is_empty());
    }
}
