#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy policy that picks a heading for every enemy whose decision cooldown elapsed.
//!
//! Chasers head straight for the player when a clear row or column connects
//! them, otherwise step along the axis with the larger distance. Wanderers
//! roam randomly and avoid doubling back. Decisions are made on whole cells:
//! an enemy considers the four neighbours of the cell containing its centre.

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shrinkmaze_core::{
    constants::{
        CHASER_DECISION_TICKS, STALLED_DECISION_TICKS, WANDERER_DECISION_JITTER,
        WANDERER_DECISION_TICKS,
    },
    CellCoord, CellKind, Command, Direction, EnemyKind,
};
use shrinkmaze_world::query::{EnemySnapshot, EnemyView, GridView};
use tracing::trace;

/// Configuration parameters required to construct the pursuit system.
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

/// Pure system that steers enemies toward or around the player.
#[derive(Debug)]
pub struct Pursuit {
    rng: ChaCha8Rng,
}

impl Pursuit {
    /// Creates a new pursuit system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits a steering command for every enemy that is ready to decide.
    pub fn handle(
        &mut self,
        enemies: &EnemyView,
        player_cell: CellCoord,
        grid: GridView<'_>,
        out: &mut Vec<Command>,
    ) {
        for enemy in enemies.iter().filter(|enemy| enemy.ready_for_decision()) {
            let open = grid.open_neighbors(enemy.cell);
            let (heading, cooldown_ticks) = if open.is_empty() {
                (None, STALLED_DECISION_TICKS)
            } else {
                match enemy.kind {
                    EnemyKind::Chaser => (
                        self.chase(enemy.cell, player_cell, grid, &open),
                        CHASER_DECISION_TICKS,
                    ),
                    EnemyKind::Wanderer => (
                        self.wander(enemy, &open),
                        WANDERER_DECISION_TICKS + self.rng.gen_range(0..WANDERER_DECISION_JITTER),
                    ),
                }
            };
            trace!(enemy = enemy.id.get(), ?heading, cooldown_ticks, "enemy decision");
            out.push(Command::SteerEnemy {
                enemy: enemy.id,
                heading,
                cooldown_ticks,
            });
        }
    }

    fn chase(
        &mut self,
        from: CellCoord,
        target: CellCoord,
        grid: GridView<'_>,
        open: &[Direction],
    ) -> Option<Direction> {
        line_of_sight(from, target, grid)
            .filter(|direction| open.contains(direction))
            .or_else(|| greedy_step(from, target, open))
            .or_else(|| open.choose(&mut self.rng).copied())
    }

    fn wander(&mut self, enemy: &EnemySnapshot, open: &[Direction]) -> Option<Direction> {
        let reverse = enemy.heading.map(Direction::opposite);
        let forward: Vec<Direction> = open
            .iter()
            .copied()
            .filter(|direction| Some(*direction) != reverse)
            .collect();
        if forward.is_empty() {
            open.choose(&mut self.rng).copied()
        } else {
            forward.choose(&mut self.rng).copied()
        }
    }
}

/// Direction toward the target when both share a column or row with only paths between.
///
/// Columns are checked before rows; an enemy already on the target cell has no line.
fn line_of_sight(from: CellCoord, target: CellCoord, grid: GridView<'_>) -> Option<Direction> {
    if from.column() == target.column() {
        let step = signum(from.row(), target.row());
        if step == 0 {
            return None;
        }
        let clear = between(from.row(), target.row())
            .all(|row| grid.kind(CellCoord::new(from.column(), row)) == CellKind::Path);
        return clear.then(|| Direction::from_delta(0, step)).flatten();
    }
    if from.row() == target.row() {
        let step = signum(from.column(), target.column());
        let clear = between(from.column(), target.column())
            .all(|column| grid.kind(CellCoord::new(column, from.row())) == CellKind::Path);
        return clear.then(|| Direction::from_delta(step, 0)).flatten();
    }
    None
}

/// Step along the axis with the larger distance, falling back to the other axis.
///
/// Ties favour the horizontal axis.
fn greedy_step(from: CellCoord, target: CellCoord, open: &[Direction]) -> Option<Direction> {
    let dx = signum(from.column(), target.column());
    let dy = signum(from.row(), target.row());
    let horizontal = Direction::from_delta(dx, 0).filter(|direction| open.contains(direction));
    let vertical = Direction::from_delta(0, dy).filter(|direction| open.contains(direction));

    if from.column().abs_diff(target.column()) >= from.row().abs_diff(target.row()) {
        horizontal.or(vertical)
    } else {
        vertical.or(horizontal)
    }
}

fn signum(from: u32, to: u32) -> i32 {
    match from.cmp(&to) {
        std::cmp::Ordering::Less => 1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => -1,
    }
}

/// Values strictly between `a` and `b`.
fn between(a: u32, b: u32) -> std::ops::Range<u32> {
    a.min(b).saturating_add(1)..a.max(b)
}
