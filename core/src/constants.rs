//! Fixed gameplay tuning shared by the world, the systems, and the adapters.
//!
//! Lengths are expressed either as ratios of the cell size or in whole
//! cells; durations are either wall-clock [`Duration`] values or counts of
//! fixed simulation ticks.

use std::time::Duration;

use crate::{CellCoord, MazeDimensions};

/// Number of fixed simulation steps executed per second.
pub const TICKS_PER_SECOND: u32 = 60;

/// Simulated time covered by a single fixed step.
pub const FIXED_STEP: Duration = Duration::from_nanos(16_666_667);

/// Upper bound on fixed steps executed for a single rendered frame.
pub const MAX_STEPS_PER_FRAME: u32 = 5;

/// Side length of a grid cell in pixels when no override is configured.
pub const DEFAULT_CELL_SIZE: f32 = 32.0;

/// Grid dimensions used by the game.
pub const DEFAULT_DIMENSIONS: MazeDimensions = MazeDimensions::DEFAULT;

/// Cell the player spawns in and the maze carving starts from.
pub const START_CELL: CellCoord = CellCoord::new(1, 1);

/// Wall-clock time between two shrink firings.
pub const SHRINK_INTERVAL: Duration = Duration::from_secs(8);

/// Warning period a marked cell stays walkable before it solidifies.
pub const SHRINK_WARNING_TIME: Duration = Duration::from_secs(2);

/// Smallest span (`max - min`) on either axis at which shrinking halts.
pub const MIN_ACTIVE_SPAN: u32 = 7;

/// Delay between a victory and the regeneration of the maze.
pub const VICTORY_RESTART_DELAY: Duration = Duration::from_secs(3);

/// Inset in pixels applied to collision boxes so entities never graze walls.
pub const COLLISION_PADDING: f32 = 1.0;

/// Player diameter as a fraction of the cell size.
pub const PLAYER_SIZE_RATIO: f32 = 0.6;

/// Player speed in pixels per tick as a fraction of the cell size.
pub const PLAYER_SPEED_RATIO: f32 = 1.0 / 6.0;

/// Multiplier applied to the player speed while the speed power-up is active.
pub const SPEED_BOOST_FACTOR: f32 = 1.8;

/// Enemy base speed as a fraction of the player base speed.
pub const ENEMY_SPEED_RATIO: f32 = 0.5;

/// Gem diameter as a fraction of the cell size.
pub const GEM_SIZE_RATIO: f32 = 0.4;

/// Power-up diameter as a fraction of the cell size.
pub const POWER_UP_SIZE_RATIO: f32 = 0.5;

/// Number of previous player positions retained for the motion trail.
pub const TRAIL_LENGTH: usize = 5;

/// Upper bound on the number of gems placed per batch.
pub const MAX_GEMS: usize = 20;

/// Random attempts spent when placing a batch of gems.
pub const GEM_PLACEMENT_ATTEMPTS: u32 = 200;

/// Chasers created together with a fresh maze.
pub const INITIAL_CHASERS: usize = 2;

/// Wanderers created together with a fresh maze.
pub const INITIAL_WANDERERS: usize = 3;

/// Enemy population above which no reinforcements are added.
pub const MAX_ENEMIES: usize = 8;

/// Random attempts spent per enemy placement.
pub const ENEMY_PLACEMENT_ATTEMPTS: u32 = 50;

/// Chasers never spawn within this many cells of the player on both axes.
pub const CHASER_SPAWN_DISTANCE: u32 = 4;

/// Wanderers never spawn within this many cells of the player on both axes.
pub const WANDERER_SPAWN_DISTANCE: u32 = 3;

/// Rings next to the active bounds edge that never receive enemy spawns.
pub const ENEMY_SPAWN_RING_MARGIN: u32 = 2;

/// Score interval at which an extra enemy joins the maze.
pub const REINFORCEMENT_SCORE_INTERVAL: u32 = 20;

/// Maximum number of power-ups present before shrink drops are suppressed.
pub const MAX_POWER_UPS: usize = 3;

/// Placement attempts for power-ups scattered over a fresh maze.
pub const INITIAL_POWER_UP_ATTEMPTS: u32 = 4;

/// Probability that a shrink drops a power-up at the centre of the bounds.
pub const SHRINK_POWER_UP_CHANCE: f64 = 0.5;

/// Ticks between two chaser decisions.
pub const CHASER_DECISION_TICKS: u32 = 30;

/// Minimum ticks between two wanderer decisions.
pub const WANDERER_DECISION_TICKS: u32 = 90;

/// Exclusive upper bound of the random extension of a wanderer decision.
pub const WANDERER_DECISION_JITTER: u32 = 45;

/// Ticks an enemy without any open neighbour waits before deciding again.
pub const STALLED_DECISION_TICKS: u32 = 10;

/// Factor applied to the smaller grid side to derive cycle-injection attempts.
pub const CYCLE_ATTEMPT_FACTOR: f32 = 1.5;

/// Probability that an injected cycle opens a small room.
pub const ROOM_CHANCE: f64 = 0.3;
