#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Maze generator that carves a perfect maze and then injects cycles.
//!
//! Carving runs a randomized depth-first search over the odd-coordinate
//! lattice starting at the start cell, opening the wall between lattice
//! neighbours. A second pass knocks out random interior walls that already
//! touch two paths, sometimes widening them into small rooms, so the maze
//! offers escape routes. Finally the two-by-two pocket around the start cell
//! is forced open.

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shrinkmaze_core::{
    constants::{CYCLE_ATTEMPT_FACTOR, ROOM_CHANCE, START_CELL},
    CellCoord, CellKind, Direction, MazeDimensions, MazeLayout,
};
use tracing::debug;

/// Source of randomness consumed while carving.
pub trait CarveEntropy {
    /// Reorders the candidate directions in place.
    fn shuffle(&mut self, directions: &mut [Direction]);

    /// Returns a value in `0..upper`; `upper` is always positive.
    fn below(&mut self, upper: u32) -> u32;

    /// Returns `true` with the provided probability.
    fn chance(&mut self, probability: f64) -> bool;
}

/// Entropy backed by a seeded ChaCha generator.
#[derive(Clone, Debug)]
pub struct SeededEntropy {
    rng: ChaCha8Rng,
}

impl SeededEntropy {
    /// Creates an entropy source that replays the same sequence for the same seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl CarveEntropy for SeededEntropy {
    fn shuffle(&mut self, directions: &mut [Direction]) {
        directions.shuffle(&mut self.rng);
    }

    fn below(&mut self, upper: u32) -> u32 {
        self.rng.gen_range(0..upper.max(1))
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Carves a new maze of the provided dimensions.
#[must_use]
pub fn carve<E>(dimensions: MazeDimensions, entropy: &mut E) -> MazeLayout
where
    E: CarveEntropy + ?Sized,
{
    let mut layout = MazeLayout::filled(dimensions, CellKind::Wall);
    carve_passages(&mut layout, entropy);
    let cycles = inject_cycles(&mut layout, entropy);
    open_start_pocket(&mut layout);
    debug!(
        width = dimensions.width(),
        height = dimensions.height(),
        cycles,
        "maze carved"
    );
    layout
}

fn is_lattice_interior(dimensions: MazeDimensions, cell: CellCoord) -> bool {
    cell.column() > 0
        && cell.row() > 0
        && cell.column() < dimensions.width() - 1
        && cell.row() < dimensions.height() - 1
}

fn carve_passages<E>(layout: &mut MazeLayout, entropy: &mut E)
where
    E: CarveEntropy + ?Sized,
{
    let dimensions = layout.dimensions();
    let _ = layout.set(START_CELL, CellKind::Path);
    let mut stack = vec![START_CELL];

    while let Some(&current) = stack.last() {
        let mut directions = Direction::ALL;
        entropy.shuffle(&mut directions);

        let next = directions.into_iter().find_map(|direction| {
            let neighbor = current.step(direction, 2)?;
            let unvisited = is_lattice_interior(dimensions, neighbor)
                && layout.kind(neighbor) == CellKind::Wall;
            unvisited.then_some((direction, neighbor))
        });

        match next {
            Some((direction, neighbor)) => {
                if let Some(between) = current.step(direction, 1) {
                    let _ = layout.set(between, CellKind::Path);
                }
                let _ = layout.set(neighbor, CellKind::Path);
                stack.push(neighbor);
            }
            None => {
                let _ = stack.pop();
            }
        }
    }
}

fn inject_cycles<E>(layout: &mut MazeLayout, entropy: &mut E) -> u32
where
    E: CarveEntropy + ?Sized,
{
    let dimensions = layout.dimensions();
    let width = dimensions.width();
    let height = dimensions.height();
    let attempts = (width.min(height) as f32 * CYCLE_ATTEMPT_FACTOR).floor() as u32;
    let mut opened = 0;

    for _ in 0..attempts {
        let cell = CellCoord::new(
            entropy.below(width - 2) + 1,
            entropy.below(height - 2) + 1,
        );
        if layout.kind(cell) != CellKind::Wall {
            continue;
        }
        let open_neighbors = Direction::ALL
            .into_iter()
            .filter_map(|direction| cell.step(direction, 1))
            .filter(|neighbor| layout.is_path(*neighbor))
            .count();
        if open_neighbors < 2 {
            continue;
        }

        let _ = layout.set(cell, CellKind::Path);
        opened += 1;

        if entropy.chance(ROOM_CHANCE) {
            let room_width = if entropy.chance(0.5) { 2 } else { 3 };
            open_room(layout, cell, room_width, 2);
        }
    }
    opened
}

fn open_room(layout: &mut MazeLayout, origin: CellCoord, room_width: u32, room_height: u32) {
    let dimensions = layout.dimensions();
    if origin.column() + room_width >= dimensions.width() - 1
        || origin.row() + room_height >= dimensions.height() - 1
    {
        return;
    }
    for row in origin.row()..origin.row() + room_height {
        for column in origin.column()..origin.column() + room_width {
            let _ = layout.set(CellCoord::new(column, row), CellKind::Path);
        }
    }
}

fn open_start_pocket(layout: &mut MazeLayout) {
    for row in START_CELL.row()..=START_CELL.row() + 1 {
        for column in START_CELL.column()..=START_CELL.column() + 1 {
            let _ = layout.set(CellCoord::new(column, row), CellKind::Path);
        }
    }
}

/// Configuration parameters required to construct the carving system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    dimensions: MazeDimensions,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration for mazes of the given size.
    #[must_use]
    pub const fn new(dimensions: MazeDimensions, rng_seed: u64) -> Self {
        Self {
            dimensions,
            rng_seed,
        }
    }
}

/// Seeded maze generator producing a fresh layout per request.
#[derive(Debug)]
pub struct Carving {
    dimensions: MazeDimensions,
    entropy: SeededEntropy,
}

impl Carving {
    /// Creates a new carving system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            dimensions: config.dimensions,
            entropy: SeededEntropy::new(config.rng_seed),
        }
    }

    /// Dimensions of the mazes produced by this system.
    #[must_use]
    pub fn dimensions(&self) -> MazeDimensions {
        self.dimensions
    }

    /// Carves the next maze in the seeded sequence.
    #[must_use]
    pub fn generate(&mut self) -> MazeLayout {
        carve(self.dimensions, &mut self.entropy)
    }
}
