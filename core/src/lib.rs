#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Shrinkmaze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and the session driver
//! submit [`Command`] values describing desired mutations, the world executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values for systems and presentation layers to react to deterministically.

pub mod constants;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Describes which screen of the game is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen shown before the first run.
    Start,
    /// The simulation advances and accepts movement intent.
    Playing,
    /// The player was caught; the simulation is frozen until a new run starts.
    GameOver,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Installs a freshly carved maze, resetting bounds, markers and entities.
    LoadMaze {
        /// Layout that replaces the current grid wholesale.
        layout: MazeLayout,
    },
    /// Switches the active game phase.
    SetPhase {
        /// Phase the world should enter.
        phase: GamePhase,
    },
    /// Clears the accumulated score.
    ResetScore,
    /// Records the normalized movement intent reported by the input layer.
    SetPlayerIntent {
        /// Intent applied on subsequent ticks.
        intent: Intent,
    },
    /// Assigns a new heading and decision cooldown to an enemy.
    SteerEnemy {
        /// Identifier of the enemy being steered.
        enemy: EnemyId,
        /// Heading to follow, or `None` to stand still.
        heading: Option<Direction>,
        /// Ticks until the enemy becomes eligible for its next decision.
        cooldown_ticks: u32,
    },
    /// Advances the simulation by one fixed step.
    Tick {
        /// Simulated time covered by the step.
        dt: Duration,
    },
    /// Marks the outermost ring of the active bounds and contracts them.
    ShrinkRing,
    /// Replaces the gem set with gems on the provided cells.
    PlaceGems {
        /// Cells receiving a gem.
        cells: Vec<CellCoord>,
    },
    /// Drops a power-up on a path cell.
    SpawnPowerUp {
        /// Effect granted on pickup.
        kind: PowerUpKind,
        /// Cell receiving the power-up.
        cell: CellCoord,
    },
    /// Creates an enemy centred on a path cell.
    SpawnEnemy {
        /// Behaviour class of the new enemy.
        kind: EnemyKind,
        /// Cell the enemy starts in.
        cell: CellCoord,
    },
    /// Announces that the current maze has been cleared.
    DeclareVictory,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the simulation clock advanced while playing.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a new maze replaced the previous one.
    MazeLoaded {
        /// Dimensions of the installed maze.
        dimensions: MazeDimensions,
    },
    /// Announces that the world entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: GamePhase,
    },
    /// A run started or restarted on a fresh maze.
    GameStarted,
    /// The player touched an enemy without protection.
    EnemyCollision {
        /// Enemy that caught the player.
        enemy: EnemyId,
        /// Player position at the moment of contact.
        position: WorldPoint,
    },
    /// The run ended.
    GameOver {
        /// Player position when the run ended.
        position: WorldPoint,
    },
    /// The player picked up a gem.
    GemCollected {
        /// Centre of the collected gem.
        position: WorldPoint,
        /// Score after the pickup.
        score: u32,
    },
    /// A new gem batch was placed.
    GemsPlaced {
        /// Number of gems on the board after placement.
        count: usize,
    },
    /// A power-up appeared on the board.
    PowerUpSpawned {
        /// Effect carried by the power-up.
        kind: PowerUpKind,
        /// Cell holding the power-up.
        cell: CellCoord,
    },
    /// The player picked up a power-up.
    PowerUpCollected {
        /// Effect granted to the player.
        kind: PowerUpKind,
        /// Centre of the collected power-up.
        position: WorldPoint,
    },
    /// A power-up effect ran out.
    PowerUpExpired {
        /// Effect that ended.
        kind: PowerUpKind,
        /// Player position when the effect ended.
        position: WorldPoint,
    },
    /// An enemy joined the maze.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Behaviour class of the enemy.
        kind: EnemyKind,
        /// Cell the enemy starts in.
        cell: CellCoord,
    },
    /// A ring of cells was marked and the active bounds contracted.
    LevelShrinkBegan {
        /// Bounds after contraction.
        bounds: ActiveBounds,
        /// Number of path cells that received a warning marker.
        marked: usize,
    },
    /// A marked cell turned into a wall.
    WallSolidified {
        /// Cell that solidified.
        cell: CellCoord,
        /// Centre of the solidified cell.
        position: WorldPoint,
    },
    /// The current maze was cleared.
    Victory,
}

/// Cardinal movement directions, listed in canonical North, South, West, East order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
    /// Movement toward increasing column indices.
    East,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Unit offset of the direction as `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Reports whether the direction moves along the column axis.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::West | Direction::East)
    }

    /// Angle of the direction in radians, measured like `atan2(dy, dx)`.
    #[must_use]
    pub fn angle(self) -> f32 {
        let (dx, dy) = self.delta();
        (dy as f32).atan2(dx as f32)
    }

    /// Direction whose unit offset equals the provided signs, if any.
    #[must_use]
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            (1, 0) => Some(Direction::East),
            _ => None,
        }
    }
}

/// Movement request from the input layer, normalized to a single axis.
///
/// Each axis holds -1, 0 or +1. When both axes are requested the horizontal
/// component wins and the vertical one is dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    horizontal: i8,
    vertical: i8,
}

impl Intent {
    /// Intent that requests no movement.
    pub const IDLE: Intent = Intent {
        horizontal: 0,
        vertical: 0,
    };

    /// Creates a normalized intent from raw axis values.
    #[must_use]
    pub const fn new(horizontal: i32, vertical: i32) -> Self {
        let horizontal = horizontal.signum() as i8;
        let vertical = if horizontal != 0 {
            0
        } else {
            vertical.signum() as i8
        };
        Self {
            horizontal,
            vertical,
        }
    }

    /// Intent pointing along a single direction.
    #[must_use]
    pub const fn toward(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(dx, dy)
    }

    /// Horizontal component in the range -1..=1.
    #[must_use]
    pub const fn horizontal(&self) -> i8 {
        self.horizontal
    }

    /// Vertical component in the range -1..=1.
    #[must_use]
    pub const fn vertical(&self) -> i8 {
        self.vertical
    }

    /// Direction requested by the intent, if any.
    #[must_use]
    pub const fn direction(&self) -> Option<Direction> {
        Direction::from_delta(self.horizontal as i32, self.vertical as i32)
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Behaviour classes of enemies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Pursues the player using line of sight and greedy steps.
    Chaser,
    /// Roams randomly and avoids reversing.
    Wanderer,
}

impl EnemyKind {
    /// Enemy diameter as a fraction of the cell size.
    #[must_use]
    pub const fn size_ratio(self) -> f32 {
        match self {
            EnemyKind::Chaser => 0.7,
            EnemyKind::Wanderer => 0.65,
        }
    }

    /// Multiplier applied to the enemy base speed.
    #[must_use]
    pub const fn speed_factor(self) -> f32 {
        match self {
            EnemyKind::Chaser => 1.1,
            EnemyKind::Wanderer => 0.9,
        }
    }

    /// Minimum distance, in cells on at least one axis, kept from the player when spawning.
    #[must_use]
    pub const fn spawn_distance(self) -> u32 {
        match self {
            EnemyKind::Chaser => constants::CHASER_SPAWN_DISTANCE,
            EnemyKind::Wanderer => constants::WANDERER_SPAWN_DISTANCE,
        }
    }
}

/// Temporary effects granted by power-ups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Multiplies player speed.
    Speed,
    /// Makes enemy contact harmless.
    Invincibility,
    /// Lets the player pass through walls.
    Ghost,
}

impl PowerUpKind {
    /// All power-up kinds.
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Speed,
        PowerUpKind::Invincibility,
        PowerUpKind::Ghost,
    ];

    /// Duration of the effect expressed in fixed ticks.
    #[must_use]
    pub const fn duration_ticks(self) -> u32 {
        let seconds = match self {
            PowerUpKind::Speed => 5,
            PowerUpKind::Invincibility => 3,
            PowerUpKind::Ghost => 4,
        };
        seconds * constants::TICKS_PER_SECOND
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Cell reached by moving `distance` cells in `direction`, if it stays non-negative.
    #[must_use]
    pub fn step(self, direction: Direction, distance: u32) -> Option<CellCoord> {
        let (dx, dy) = direction.delta();
        let distance = i32::try_from(distance).ok()?;
        let column = self.column.checked_add_signed(dx * distance)?;
        let row = self.row.checked_add_signed(dy * distance)?;
        Some(CellCoord::new(column, row))
    }

    /// Pixel-space centre of the cell.
    #[must_use]
    pub fn center(self, cell_size: f32) -> WorldPoint {
        WorldPoint::new(
            (self.column as f32 + 0.5) * cell_size,
            (self.row as f32 + 0.5) * cell_size,
        )
    }
}

/// Continuous position in pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    /// Horizontal coordinate in pixels.
    pub x: f32,
    /// Vertical coordinate in pixels.
    pub y: f32,
}

impl WorldPoint {
    /// Creates a point from pixel coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle in radians of the vector pointing from `self` toward `other`.
    #[must_use]
    pub fn angle_to(self, other: WorldPoint) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Grid cell containing the point, or `None` for negative coordinates.
    #[must_use]
    pub fn cell(self, cell_size: f32) -> Option<CellCoord> {
        if self.x < 0.0 || self.y < 0.0 || cell_size <= 0.0 {
            return None;
        }
        let column = (self.x / cell_size).floor();
        let row = (self.y / cell_size).floor();
        if column > u32::MAX as f32 || row > u32::MAX as f32 {
            return None;
        }
        Some(CellCoord::new(column as u32, row as u32))
    }
}

/// Content of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Walkable cell.
    Path,
    /// Solid cell.
    Wall,
}

/// Smallest accepted maze side length.
const MIN_MAZE_SIDE: u32 = 5;

/// Validated maze dimensions: both sides odd and at least five cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MazeDimensions {
    width: u32,
    height: u32,
}

impl MazeDimensions {
    /// Grid used by the shipped game.
    pub const DEFAULT: MazeDimensions = MazeDimensions {
        width: 21,
        height: 15,
    };

    /// Validates and creates maze dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, DimensionError> {
        if width < MIN_MAZE_SIDE || height < MIN_MAZE_SIDE {
            return Err(DimensionError::TooSmall {
                width,
                height,
                minimum: MIN_MAZE_SIDE,
            });
        }
        if width % 2 == 0 {
            return Err(DimensionError::EvenWidth { width });
        }
        if height % 2 == 0 {
            return Err(DimensionError::EvenHeight { height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Reports whether the cell lies on the outermost ring of the grid.
    #[must_use]
    pub const fn is_border(&self, cell: CellCoord) -> bool {
        cell.column() == 0
            || cell.row() == 0
            || cell.column() == self.width - 1
            || cell.row() == self.height - 1
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row() as usize * self.width as usize + cell.column() as usize)
        } else {
            None
        }
    }
}

/// Reasons maze dimensions are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum DimensionError {
    /// A side is shorter than the minimum.
    #[error("maze of {width}x{height} cells is smaller than {minimum}x{minimum}")]
    TooSmall {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Minimum accepted side length.
        minimum: u32,
    },
    /// The width is even, which breaks the two-step carving lattice.
    #[error("maze width {width} must be odd")]
    EvenWidth {
        /// Requested width.
        width: u32,
    },
    /// The height is even, which breaks the two-step carving lattice.
    #[error("maze height {height} must be odd")]
    EvenHeight {
        /// Requested height.
        height: u32,
    },
}

/// Reasons a maze layout cannot be assembled.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The dimensions themselves are invalid.
    #[error(transparent)]
    Dimensions(#[from] DimensionError),
    /// The number of cells does not match the dimensions.
    #[error("expected {expected} cells but received {actual}")]
    CellCountMismatch {
        /// Cell count implied by the dimensions.
        expected: usize,
        /// Cell count provided.
        actual: usize,
    },
    /// A textual row differs in length from the first row.
    #[error("row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },
    /// A textual cell uses a glyph other than `#` or `.`.
    #[error("unknown glyph {glyph:?} at column {column}, row {row}")]
    UnknownGlyph {
        /// Offending character.
        glyph: char,
        /// Column of the character.
        column: usize,
        /// Row of the character.
        row: usize,
    },
}

/// Dense row-major grid of cells with validated dimensions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MazeLayout {
    dimensions: MazeDimensions,
    cells: Vec<CellKind>,
}

impl MazeLayout {
    /// Creates a layout where every cell has the same kind.
    #[must_use]
    pub fn filled(dimensions: MazeDimensions, kind: CellKind) -> Self {
        Self {
            dimensions,
            cells: vec![kind; dimensions.cell_count()],
        }
    }

    /// Wraps a row-major cell buffer after checking its length.
    pub fn from_cells(dimensions: MazeDimensions, cells: Vec<CellKind>) -> Result<Self, LayoutError> {
        if cells.len() != dimensions.cell_count() {
            return Err(LayoutError::CellCountMismatch {
                expected: dimensions.cell_count(),
                actual: cells.len(),
            });
        }
        Ok(Self { dimensions, cells })
    }

    /// Parses rows drawn with `#` for walls and `.` for paths.
    pub fn parse<S>(rows: &[S]) -> Result<Self, LayoutError>
    where
        S: AsRef<str>,
    {
        let expected = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut cells = Vec::with_capacity(expected * rows.len());
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let actual = row.chars().count();
            if actual != expected {
                return Err(LayoutError::RaggedRow {
                    row: row_index,
                    expected,
                    actual,
                });
            }
            for (column, glyph) in row.chars().enumerate() {
                let kind = match glyph {
                    '#' => CellKind::Wall,
                    '.' => CellKind::Path,
                    glyph => {
                        return Err(LayoutError::UnknownGlyph {
                            glyph,
                            column,
                            row: row_index,
                        })
                    }
                };
                cells.push(kind);
            }
        }
        let width = u32::try_from(expected).unwrap_or(u32::MAX);
        let height = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        let dimensions = MazeDimensions::new(width, height)?;
        Self::from_cells(dimensions, cells)
    }

    /// Dimensions of the layout.
    #[must_use]
    pub const fn dimensions(&self) -> MazeDimensions {
        self.dimensions
    }

    /// Row-major view over all cells.
    #[must_use]
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Kind of the cell; cells outside the grid read as walls.
    #[must_use]
    pub fn kind(&self, cell: CellCoord) -> CellKind {
        self.dimensions
            .index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(CellKind::Wall)
    }

    /// Reports whether the cell is walkable.
    #[must_use]
    pub fn is_path(&self, cell: CellCoord) -> bool {
        self.kind(cell) == CellKind::Path
    }

    /// Overwrites a cell, returning whether its kind changed.
    pub fn set(&mut self, cell: CellCoord, kind: CellKind) -> bool {
        let Some(slot) = self
            .dimensions
            .index(cell)
            .and_then(|index| self.cells.get_mut(index))
        else {
            return false;
        };
        let changed = *slot != kind;
        *slot = kind;
        changed
    }

    /// Iterates over every cell with its coordinate in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellKind)> + '_ {
        let width = self.dimensions.width();
        self.cells.iter().enumerate().map(move |(index, kind)| {
            let index = index as u32;
            (CellCoord::new(index % width, index / width), *kind)
        })
    }

    /// Renders the layout back into `#`/`.` rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.dimensions.width() as usize)
            .map(|row| {
                row.iter()
                    .map(|kind| match kind {
                        CellKind::Path => '.',
                        CellKind::Wall => '#',
                    })
                    .collect()
            })
            .collect()
    }
}

/// Inclusive rectangle of cells still subject to shrinking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveBounds {
    min_x: u32,
    max_x: u32,
    min_y: u32,
    max_y: u32,
}

impl ActiveBounds {
    /// Creates bounds from inclusive limits.
    #[must_use]
    pub const fn new(min_x: u32, max_x: u32, min_y: u32, max_y: u32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Bounds covering the whole grid.
    #[must_use]
    pub const fn covering(dimensions: MazeDimensions) -> Self {
        Self::new(0, dimensions.width() - 1, 0, dimensions.height() - 1)
    }

    /// Smallest column inside the bounds.
    #[must_use]
    pub const fn min_x(&self) -> u32 {
        self.min_x
    }

    /// Largest column inside the bounds.
    #[must_use]
    pub const fn max_x(&self) -> u32 {
        self.max_x
    }

    /// Smallest row inside the bounds.
    #[must_use]
    pub const fn min_y(&self) -> u32 {
        self.min_y
    }

    /// Largest row inside the bounds.
    #[must_use]
    pub const fn max_y(&self) -> u32 {
        self.max_y
    }

    /// Horizontal span, `max_x - min_x`.
    #[must_use]
    pub const fn span_x(&self) -> u32 {
        self.max_x - self.min_x
    }

    /// Vertical span, `max_y - min_y`.
    #[must_use]
    pub const fn span_y(&self) -> u32 {
        self.max_y - self.min_y
    }

    /// Reports whether both spans still exceed `minimum_span`.
    #[must_use]
    pub const fn can_contract(&self, minimum_span: u32) -> bool {
        self.span_x() > minimum_span && self.span_y() > minimum_span
    }

    /// Bounds shrunk by one cell on every side; degenerate bounds are returned unchanged.
    #[must_use]
    pub const fn contracted(self) -> Self {
        if self.span_x() < 2 || self.span_y() < 2 {
            return self;
        }
        Self::new(
            self.min_x + 1,
            self.max_x - 1,
            self.min_y + 1,
            self.max_y - 1,
        )
    }

    /// Bounds shrunk by `depth` cells on every side, if anything remains.
    #[must_use]
    pub const fn inset(self, depth: u32) -> Option<Self> {
        if self.span_x() < depth * 2 || self.span_y() < depth * 2 {
            return None;
        }
        Some(Self::new(
            self.min_x + depth,
            self.max_x - depth,
            self.min_y + depth,
            self.max_y - depth,
        ))
    }

    /// Reports whether the cell lies inside the bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() >= self.min_x
            && cell.column() <= self.max_x
            && cell.row() >= self.min_y
            && cell.row() <= self.max_y
    }

    /// Cell at the floor of the midpoint of both axes.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(
            (self.min_x + self.max_x) / 2,
            (self.min_y + self.max_y) / 2,
        )
    }

    /// Perimeter cells of the bounds, each corner listed once.
    ///
    /// Columns `min_x` and `max_x` are walked top to bottom first, followed by
    /// the remaining cells of rows `min_y` and `max_y` from left to right.
    #[must_use]
    pub fn ring(&self) -> Vec<CellCoord> {
        let mut cells = Vec::new();
        for row in self.min_y..=self.max_y {
            cells.push(CellCoord::new(self.min_x, row));
            if self.max_x != self.min_x {
                cells.push(CellCoord::new(self.max_x, row));
            }
        }
        for column in self.min_x + 1..self.max_x {
            cells.push(CellCoord::new(column, self.min_y));
            if self.max_y != self.min_y {
                cells.push(CellCoord::new(column, self.max_y));
            }
        }
        cells
    }

    /// Iterates over every cell inside the bounds in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let Self {
            min_x,
            max_x,
            min_y,
            max_y,
        } = *self;
        (min_y..=max_y).flat_map(move |row| (min_x..=max_x).map(move |column| CellCoord::new(column, row)))
    }
}
