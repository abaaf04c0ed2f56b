#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Placement system that populates mazes with gems, power-ups and enemies.
//!
//! A freshly loaded maze receives a gem set, a handful of power-ups and the
//! initial enemy roster. When the last gem disappears the system plans a new
//! set inside the active bounds; a maze too small to hold any gem is
//! reported as cleared.

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shrinkmaze_core::{
    constants::{
        ENEMY_PLACEMENT_ATTEMPTS, ENEMY_SPAWN_RING_MARGIN, GEM_PLACEMENT_ATTEMPTS,
        INITIAL_CHASERS, INITIAL_POWER_UP_ATTEMPTS, INITIAL_WANDERERS, MAX_ENEMIES, MAX_GEMS,
        REINFORCEMENT_SCORE_INTERVAL, START_CELL,
    },
    ActiveBounds, CellCoord, Command, EnemyKind, Event, PowerUpKind,
};
use shrinkmaze_world::query::{BoardView, GridView};
use tracing::debug;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration seeded with the provided value.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that decides where entities appear.
#[derive(Debug)]
pub struct Spawning {
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes world events and immutable views to emit placement commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        grid: GridView<'_>,
        bounds: ActiveBounds,
        board: &BoardView,
        out: &mut Vec<Command>,
    ) {
        let loaded = events
            .iter()
            .any(|event| matches!(event, Event::MazeLoaded { .. }));
        if loaded {
            self.populate(grid, bounds, board, out);
            return;
        }

        let depleted = events.iter().any(|event| {
            matches!(
                event,
                Event::GemCollected { .. } | Event::WallSolidified { .. }
            )
        });
        if depleted && board.gems.is_empty() {
            self.refill(grid, bounds, board, out);
        }
    }

    fn populate(
        &mut self,
        grid: GridView<'_>,
        bounds: ActiveBounds,
        board: &BoardView,
        out: &mut Vec<Command>,
    ) {
        let gems = self.plan_gems(grid, bounds, board);
        let power_ups = self.plan_power_ups(grid, bounds, &gems);
        let mut enemies = Vec::new();
        let mut occupied = board.enemies.clone();
        for (kind, count) in [
            (EnemyKind::Chaser, INITIAL_CHASERS),
            (EnemyKind::Wanderer, INITIAL_WANDERERS),
        ] {
            let cells =
                self.plan_enemies(grid, bounds, board.player_cell, kind, count, &occupied);
            occupied.extend_from_slice(&cells);
            enemies.extend(cells.into_iter().map(|cell| (kind, cell)));
        }
        debug!(
            gems = gems.len(),
            power_ups = power_ups.len(),
            enemies = enemies.len(),
            "maze populated"
        );

        let cleared = gems.is_empty();
        out.push(Command::PlaceGems { cells: gems });
        out.extend(
            power_ups
                .into_iter()
                .map(|(kind, cell)| Command::SpawnPowerUp { kind, cell }),
        );
        out.extend(
            enemies
                .into_iter()
                .map(|(kind, cell)| Command::SpawnEnemy { kind, cell }),
        );
        if cleared {
            out.push(Command::DeclareVictory);
        }
    }

    fn refill(
        &mut self,
        grid: GridView<'_>,
        bounds: ActiveBounds,
        board: &BoardView,
        out: &mut Vec<Command>,
    ) {
        let gems = self.plan_gems(grid, bounds, board);
        if gems.is_empty() {
            debug!(score = board.score, "no room left for gems");
            out.push(Command::DeclareVictory);
            return;
        }
        debug!(gems = gems.len(), score = board.score, "gems replenished");
        out.push(Command::PlaceGems { cells: gems });

        if board.score % REINFORCEMENT_SCORE_INTERVAL != 0 || board.enemy_count() >= MAX_ENEMIES {
            return;
        }
        let kind = if board.chasers < board.wanderers {
            EnemyKind::Chaser
        } else {
            EnemyKind::Wanderer
        };
        if let Some(cell) = self
            .plan_enemies(grid, bounds, board.player_cell, kind, 1, &board.enemies)
            .first()
        {
            debug!(?kind, "reinforcement spawned");
            out.push(Command::SpawnEnemy { kind, cell: *cell });
        }
    }

    /// Samples a gem set inside the bounds, avoiding the start cell and marked cells.
    fn plan_gems(
        &mut self,
        grid: GridView<'_>,
        bounds: ActiveBounds,
        board: &BoardView,
    ) -> Vec<CellCoord> {
        let open = |cell: CellCoord| grid.is_path(cell) && !board.marked.contains(&cell);
        let available = bounds.cells().filter(|cell| open(*cell)).count();
        let target = MAX_GEMS.min(available / 3);

        let mut gems = Vec::with_capacity(target);
        for _ in 0..GEM_PLACEMENT_ATTEMPTS {
            if gems.len() >= target {
                break;
            }
            let cell = self.sample(bounds);
            if cell != START_CELL && open(cell) && !gems.contains(&cell) {
                gems.push(cell);
            }
        }
        gems
    }

    fn plan_power_ups(
        &mut self,
        grid: GridView<'_>,
        bounds: ActiveBounds,
        gems: &[CellCoord],
    ) -> Vec<(PowerUpKind, CellCoord)> {
        let mut power_ups: Vec<(PowerUpKind, CellCoord)> = Vec::new();
        for _ in 0..INITIAL_POWER_UP_ATTEMPTS {
            let cell = self.sample(bounds);
            let free = cell != START_CELL
                && grid.is_path(cell)
                && !gems.contains(&cell)
                && power_ups.iter().all(|(_, taken)| *taken != cell);
            if !free {
                continue;
            }
            if let Some(kind) = PowerUpKind::ALL.choose(&mut self.rng) {
                power_ups.push((*kind, cell));
            }
        }
        power_ups
    }

    /// Samples up to `count` enemy cells away from the player and the next rings to shrink.
    fn plan_enemies(
        &mut self,
        grid: GridView<'_>,
        bounds: ActiveBounds,
        player_cell: CellCoord,
        kind: EnemyKind,
        count: usize,
        taken: &[CellCoord],
    ) -> Vec<CellCoord> {
        let Some(area) = bounds.inset(ENEMY_SPAWN_RING_MARGIN) else {
            return Vec::new();
        };
        let distance = kind.spawn_distance();
        let mut cells = Vec::with_capacity(count);
        for _ in 0..ENEMY_PLACEMENT_ATTEMPTS {
            if cells.len() >= count {
                break;
            }
            let cell = self.sample(area);
            let far = cell.column().abs_diff(player_cell.column()) > distance
                || cell.row().abs_diff(player_cell.row()) > distance;
            let free = !cells.contains(&cell) && !taken.contains(&cell);
            if far && free && grid.is_path(cell) {
                cells.push(cell);
            }
        }
        cells
    }

    fn sample(&mut self, bounds: ActiveBounds) -> CellCoord {
        CellCoord::new(
            self.rng.gen_range(bounds.min_x()..=bounds.max_x()),
            self.rng.gen_range(bounds.min_y()..=bounds.max_y()),
        )
    }
}
