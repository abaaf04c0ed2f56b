#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Shrinkmaze.
//!
//! The world owns the wall grid, the active bounds, the shrink markers and
//! every entity. It is mutated exclusively through [`apply`] and observed
//! through the functions in [`query`].

mod motion;
mod shrink;

use std::{collections::VecDeque, time::Duration};

use shrinkmaze_core::{
    constants::{
        DEFAULT_CELL_SIZE, ENEMY_SPEED_RATIO, GEM_SIZE_RATIO, MIN_ACTIVE_SPAN, PLAYER_SIZE_RATIO,
        PLAYER_SPEED_RATIO, POWER_UP_SIZE_RATIO, SPEED_BOOST_FACTOR, START_CELL, TRAIL_LENGTH,
    },
    ActiveBounds, CellCoord, CellKind, Command, Direction, EnemyId, EnemyKind, Event, GamePhase,
    Intent, MazeDimensions, MazeLayout, PowerUpKind, WorldPoint,
};
use tracing::{debug, info};

use self::{query::GridView, shrink::ShrinkField};

/// Represents the authoritative Shrinkmaze world state.
#[derive(Debug)]
pub struct World {
    cell_size: f32,
    layout: MazeLayout,
    bounds: ActiveBounds,
    shrink: ShrinkField,
    phase: GamePhase,
    score: u32,
    player: Player,
    enemies: Vec<Enemy>,
    next_enemy_id: u32,
    gems: Vec<Gem>,
    power_ups: Vec<PowerUp>,
    victory_declared: bool,
}

impl World {
    /// Creates a world on the title screen with the default cell size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_cell_size(DEFAULT_CELL_SIZE)
    }

    /// Creates a world whose cells measure `cell_size` pixels.
    ///
    /// Non-positive or non-finite sizes fall back to the default.
    #[must_use]
    pub fn with_cell_size(cell_size: f32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            DEFAULT_CELL_SIZE
        };
        let layout = MazeLayout::filled(MazeDimensions::DEFAULT, CellKind::Wall);
        Self {
            cell_size,
            bounds: ActiveBounds::covering(layout.dimensions()),
            layout,
            shrink: ShrinkField::default(),
            phase: GamePhase::Start,
            score: 0,
            player: Player::spawn(START_CELL.center(cell_size)),
            enemies: Vec::new(),
            next_enemy_id: 0,
            gems: Vec::new(),
            power_ups: Vec::new(),
            victory_declared: false,
        }
    }

    fn grid(&self) -> GridView<'_> {
        GridView::new(&self.layout, self.cell_size)
    }

    fn player_half_size(&self) -> f32 {
        self.cell_size * PLAYER_SIZE_RATIO * 0.5
    }

    fn player_speed(&self) -> f32 {
        let base = self.cell_size * PLAYER_SPEED_RATIO;
        if self.player.timers.speed > 0 {
            base * SPEED_BOOST_FACTOR
        } else {
            base
        }
    }

    fn load_maze(&mut self, layout: MazeLayout, out_events: &mut Vec<Event>) {
        let dimensions = layout.dimensions();
        self.bounds = ActiveBounds::covering(dimensions);
        self.layout = layout;
        self.shrink.clear();
        self.gems.clear();
        self.power_ups.clear();
        self.enemies.clear();
        self.next_enemy_id = 0;
        self.player = Player::spawn(START_CELL.center(self.cell_size));
        self.victory_declared = false;
        debug!(
            width = dimensions.width(),
            height = dimensions.height(),
            "maze loaded"
        );
        out_events.push(Event::MazeLoaded { dimensions });
    }

    fn set_phase(&mut self, phase: GamePhase, out_events: &mut Vec<Event>) {
        if self.phase != phase {
            self.phase = phase;
            out_events.push(Event::PhaseChanged { phase });
        }
        if phase == GamePhase::Playing {
            out_events.push(Event::GameStarted);
        }
    }

    fn shrink_ring(&mut self, out_events: &mut Vec<Event>) {
        if !self.bounds.can_contract(MIN_ACTIVE_SPAN) {
            debug!(bounds = ?self.bounds, "shrink request ignored at minimum span");
            return;
        }
        let marked = self.shrink.mark_ring(&self.layout, self.bounds);
        self.bounds = self.bounds.contracted();
        debug!(marked, bounds = ?self.bounds, "shrink ring marked");
        out_events.push(Event::LevelShrinkBegan {
            bounds: self.bounds,
            marked,
        });
    }

    fn place_gems(&mut self, cells: Vec<CellCoord>, out_events: &mut Vec<Event>) {
        let mut gems: Vec<Gem> = Vec::with_capacity(cells.len());
        for cell in cells {
            if !self.layout.is_path(cell) || gems.iter().any(|gem| gem.cell == cell) {
                continue;
            }
            gems.push(Gem {
                cell,
                position: cell.center(self.cell_size),
            });
        }
        self.gems = gems;
        out_events.push(Event::GemsPlaced {
            count: self.gems.len(),
        });
    }

    fn spawn_power_up(&mut self, kind: PowerUpKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        if !self.layout.is_path(cell) || self.power_ups.iter().any(|power| power.cell == cell) {
            return;
        }
        self.power_ups.push(PowerUp {
            kind,
            cell,
            position: cell.center(self.cell_size),
        });
        out_events.push(Event::PowerUpSpawned { kind, cell });
    }

    fn spawn_enemy(&mut self, kind: EnemyKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        if !self.layout.is_path(cell) {
            return;
        }
        let enemy = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.saturating_add(1);
        let position = cell.center(self.cell_size);
        self.enemies.push(Enemy {
            id: enemy,
            kind,
            position,
            heading: None,
            cooldown: 0,
            eye_angle: position.angle_to(self.player.position),
        });
        out_events.push(Event::EnemySpawned { enemy, kind, cell });
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.phase != GamePhase::Playing {
            return;
        }
        out_events.push(Event::TimeAdvanced { dt });

        self.move_player();
        self.expire_power_ups(out_events);
        self.collect_gems(out_events);
        self.collect_power_ups(out_events);
        if self.detect_enemy_contact(out_events) {
            return;
        }
        self.move_enemies();
        self.solidify_markers(dt, out_events);
    }

    fn move_player(&mut self) {
        let Some(direction) = self.player.intent.direction() else {
            self.player.heading = None;
            return;
        };
        let stride = motion::advance(
            self.grid(),
            self.player.position,
            self.player_half_size(),
            direction,
            self.player_speed(),
            self.player.timers.ghost > 0,
        );
        let player = &mut self.player;
        if stride.position != player.position {
            player.trail.push_front(player.position);
            player.trail.truncate(TRAIL_LENGTH);
        }
        player.position = stride.position;
        player.heading = Some(direction);
        player.facing = direction.angle();
    }

    fn collect_gems(&mut self, out_events: &mut Vec<Event>) {
        let player = self.player.position;
        let reach = self.player_half_size() + self.cell_size * GEM_SIZE_RATIO * 0.5;
        let mut collected = Vec::new();
        self.gems.retain(|gem| {
            let touched = gem.position.distance(player) < reach;
            if touched {
                collected.push(gem.position);
            }
            !touched
        });
        for position in collected {
            self.score = self.score.saturating_add(1);
            out_events.push(Event::GemCollected {
                position,
                score: self.score,
            });
        }
    }

    fn collect_power_ups(&mut self, out_events: &mut Vec<Event>) {
        let player = self.player.position;
        let reach = self.player_half_size() + self.cell_size * POWER_UP_SIZE_RATIO * 0.5;
        let mut collected = Vec::new();
        self.power_ups.retain(|power| {
            let touched = power.position.distance(player) < reach;
            if touched {
                collected.push((power.kind, power.position));
            }
            !touched
        });
        for (kind, position) in collected {
            self.player.timers.grant(kind);
            debug!(?kind, "power-up collected");
            out_events.push(Event::PowerUpCollected { kind, position });
        }
    }

    fn detect_enemy_contact(&mut self, out_events: &mut Vec<Event>) -> bool {
        if self.player.timers.invincibility > 0 {
            return false;
        }
        let player = self.player.position;
        let radius = self.player_half_size();
        let cell_size = self.cell_size;
        let Some(enemy) = self
            .enemies
            .iter()
            .find(|enemy| enemy.position.distance(player) < radius + enemy.half_size(cell_size))
            .map(|enemy| enemy.id)
        else {
            return false;
        };

        info!(enemy = enemy.get(), score = self.score, "player caught");
        self.phase = GamePhase::GameOver;
        out_events.push(Event::EnemyCollision {
            enemy,
            position: player,
        });
        out_events.push(Event::PhaseChanged {
            phase: GamePhase::GameOver,
        });
        out_events.push(Event::GameOver { position: player });
        true
    }

    fn expire_power_ups(&mut self, out_events: &mut Vec<Event>) {
        let position = self.player.position;
        for kind in self.player.timers.countdown() {
            out_events.push(Event::PowerUpExpired { kind, position });
        }
    }

    fn move_enemies(&mut self) {
        let grid = GridView::new(&self.layout, self.cell_size);
        let cell_size = self.cell_size;
        let target = self.player.position;
        for enemy in &mut self.enemies {
            if let Some(direction) = enemy.heading {
                let stride = motion::advance(
                    grid,
                    enemy.position,
                    enemy.half_size(cell_size),
                    direction,
                    enemy.speed(cell_size),
                    false,
                );
                enemy.position = stride.position;
                if stride.blocked {
                    enemy.heading = None;
                    enemy.cooldown = 0;
                }
            }
            enemy.cooldown = enemy.cooldown.saturating_sub(1);
            enemy.eye_angle = enemy.position.angle_to(target);
        }
    }

    fn solidify_markers(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        for cell in self.shrink.advance(dt) {
            if !self.layout.set(cell, CellKind::Wall) {
                continue;
            }
            self.gems.retain(|gem| gem.cell != cell);
            self.power_ups.retain(|power| power.cell != cell);
            debug!(column = cell.column(), row = cell.row(), "wall solidified");
            out_events.push(Event::WallSolidified {
                cell,
                position: cell.center(self.cell_size),
            });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadMaze { layout } => world.load_maze(layout, out_events),
        Command::SetPhase { phase } => world.set_phase(phase, out_events),
        Command::ResetScore => world.score = 0,
        Command::SetPlayerIntent { intent } => world.player.intent = intent,
        Command::SteerEnemy {
            enemy,
            heading,
            cooldown_ticks,
        } => {
            if let Some(enemy) = world.enemies.iter_mut().find(|candidate| candidate.id == enemy) {
                enemy.heading = heading;
                enemy.cooldown = cooldown_ticks;
            }
        }
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::ShrinkRing => world.shrink_ring(out_events),
        Command::PlaceGems { cells } => world.place_gems(cells, out_events),
        Command::SpawnPowerUp { kind, cell } => world.spawn_power_up(kind, cell, out_events),
        Command::SpawnEnemy { kind, cell } => world.spawn_enemy(kind, cell, out_events),
        Command::DeclareVictory => {
            if world.phase == GamePhase::Playing && !world.victory_declared {
                world.victory_declared = true;
                info!(score = world.score, "maze cleared");
                out_events.push(Event::Victory);
            }
        }
    }
}

/// Remaining ticks of every power-up effect held by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PowerUpTimers {
    speed: u32,
    invincibility: u32,
    ghost: u32,
}

impl PowerUpTimers {
    /// Ticks left on the speed boost.
    #[must_use]
    pub const fn speed(&self) -> u32 {
        self.speed
    }

    /// Ticks left on invincibility.
    #[must_use]
    pub const fn invincibility(&self) -> u32 {
        self.invincibility
    }

    /// Ticks left on ghost mode.
    #[must_use]
    pub const fn ghost(&self) -> u32 {
        self.ghost
    }

    /// Ticks left for the provided effect.
    #[must_use]
    pub const fn remaining(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Speed => self.speed,
            PowerUpKind::Invincibility => self.invincibility,
            PowerUpKind::Ghost => self.ghost,
        }
    }

    fn slot(&mut self, kind: PowerUpKind) -> &mut u32 {
        match kind {
            PowerUpKind::Speed => &mut self.speed,
            PowerUpKind::Invincibility => &mut self.invincibility,
            PowerUpKind::Ghost => &mut self.ghost,
        }
    }

    fn grant(&mut self, kind: PowerUpKind) {
        *self.slot(kind) = kind.duration_ticks();
    }

    /// Decrements each running timer once, returning the effects that just ended.
    fn countdown(&mut self) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let slot = self.slot(kind);
            if *slot == 0 {
                continue;
            }
            *slot -= 1;
            if *slot == 0 {
                expired.push(kind);
            }
        }
        expired
    }
}

#[derive(Clone, Debug)]
struct Player {
    position: WorldPoint,
    heading: Option<Direction>,
    intent: Intent,
    timers: PowerUpTimers,
    trail: VecDeque<WorldPoint>,
    facing: f32,
}

impl Player {
    fn spawn(position: WorldPoint) -> Self {
        Self {
            position,
            heading: None,
            intent: Intent::IDLE,
            timers: PowerUpTimers::default(),
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
            facing: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    kind: EnemyKind,
    position: WorldPoint,
    heading: Option<Direction>,
    cooldown: u32,
    eye_angle: f32,
}

impl Enemy {
    fn half_size(&self, cell_size: f32) -> f32 {
        cell_size * self.kind.size_ratio() * 0.5
    }

    fn speed(&self, cell_size: f32) -> f32 {
        cell_size * PLAYER_SPEED_RATIO * ENEMY_SPEED_RATIO * self.kind.speed_factor()
    }
}

#[derive(Clone, Copy, Debug)]
struct Gem {
    cell: CellCoord,
    position: WorldPoint,
}

#[derive(Clone, Copy, Debug)]
struct PowerUp {
    kind: PowerUpKind,
    cell: CellCoord,
    position: WorldPoint,
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use shrinkmaze_core::{
        constants::{GEM_SIZE_RATIO, POWER_UP_SIZE_RATIO, SHRINK_WARNING_TIME, START_CELL},
        ActiveBounds, CellCoord, CellKind, Direction, EnemyId, EnemyKind, GamePhase,
        MazeDimensions, MazeLayout, PowerUpKind, WorldPoint,
    };

    use super::{PowerUpTimers, World};

    /// Phase the world is currently in.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Gems collected since the score was last reset.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Side length of a cell in pixels.
    #[must_use]
    pub fn cell_size(world: &World) -> f32 {
        world.cell_size
    }

    /// Dimensions of the installed maze.
    #[must_use]
    pub fn dimensions(world: &World) -> MazeDimensions {
        world.layout.dimensions()
    }

    /// Read-only view of the wall grid.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        world.grid()
    }

    /// Rectangle still subject to shrinking.
    #[must_use]
    pub fn active_bounds(world: &World) -> ActiveBounds {
        world.bounds
    }

    /// Pending shrink markers in placement order.
    #[must_use]
    pub fn shrink_markers(world: &World) -> Vec<ShrinkMarkerSnapshot> {
        world
            .shrink
            .markers()
            .iter()
            .map(|marker| ShrinkMarkerSnapshot {
                cell: marker.cell,
                remaining: marker.remaining,
            })
            .collect()
    }

    /// Reports whether the victory for the current maze has already been announced.
    #[must_use]
    pub fn victory_declared(world: &World) -> bool {
        world.victory_declared
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            position: player.position,
            radius: world.player_half_size(),
            heading: player.heading,
            facing: player.facing,
            timers: player.timers,
            trail: player.trail.iter().copied().collect(),
        }
    }

    /// Grid cell containing the player's centre.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world
            .player
            .position
            .cell(world.cell_size)
            .unwrap_or(START_CELL)
    }

    /// Reports whether none of the four cells around the player is walkable.
    #[must_use]
    pub fn player_trapped(world: &World) -> bool {
        world.grid().open_neighbors(player_cell(world)).is_empty()
    }

    /// Captures a read-only view of the enemies, ordered by identifier.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let cell_size = world.cell_size;
        let mut snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                kind: enemy.kind,
                position: enemy.position,
                cell: enemy.position.cell(cell_size).unwrap_or(START_CELL),
                radius: enemy.half_size(cell_size),
                heading: enemy.heading,
                cooldown: enemy.cooldown,
                eye_angle: enemy.eye_angle,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        EnemyView { snapshots }
    }

    /// Gems currently on the board.
    #[must_use]
    pub fn gems(world: &World) -> Vec<GemSnapshot> {
        let radius = world.cell_size * GEM_SIZE_RATIO * 0.5;
        world
            .gems
            .iter()
            .map(|gem| GemSnapshot {
                cell: gem.cell,
                position: gem.position,
                radius,
            })
            .collect()
    }

    /// Power-ups currently on the board.
    #[must_use]
    pub fn power_ups(world: &World) -> Vec<PowerUpSnapshot> {
        let radius = world.cell_size * POWER_UP_SIZE_RATIO * 0.5;
        world
            .power_ups
            .iter()
            .map(|power| PowerUpSnapshot {
                kind: power.kind,
                cell: power.cell,
                position: power.position,
                radius,
            })
            .collect()
    }

    /// Summarises which cells are taken, for placement decisions.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView {
        BoardView {
            gems: world.gems.iter().map(|gem| gem.cell).collect(),
            power_ups: world.power_ups.iter().map(|power| power.cell).collect(),
            marked: world.shrink.markers().iter().map(|marker| marker.cell).collect(),
            enemies: world
                .enemies
                .iter()
                .filter_map(|enemy| enemy.position.cell(world.cell_size))
                .collect(),
            chasers: count_kind(world, EnemyKind::Chaser),
            wanderers: count_kind(world, EnemyKind::Wanderer),
            player_cell: player_cell(world),
            score: world.score,
        }
    }

    fn count_kind(world: &World, kind: EnemyKind) -> usize {
        world
            .enemies
            .iter()
            .filter(|enemy| enemy.kind == kind)
            .count()
    }

    /// Read-only view into the wall grid with pixel-space sampling.
    #[derive(Clone, Copy, Debug)]
    pub struct GridView<'a> {
        layout: &'a MazeLayout,
        cell_size: f32,
    }

    impl<'a> GridView<'a> {
        /// Wraps a layout measured with the provided cell size.
        #[must_use]
        pub fn new(layout: &'a MazeLayout, cell_size: f32) -> Self {
            Self { layout, cell_size }
        }

        /// Underlying layout.
        #[must_use]
        pub fn layout(&self) -> &'a MazeLayout {
            self.layout
        }

        /// Dimensions of the grid.
        #[must_use]
        pub fn dimensions(&self) -> MazeDimensions {
            self.layout.dimensions()
        }

        /// Side length of a cell in pixels.
        #[must_use]
        pub fn cell_size(&self) -> f32 {
            self.cell_size
        }

        /// Canvas width and height in pixels.
        #[must_use]
        pub fn canvas_size(&self) -> (f32, f32) {
            let dimensions = self.dimensions();
            (
                dimensions.width() as f32 * self.cell_size,
                dimensions.height() as f32 * self.cell_size,
            )
        }

        /// Kind of the cell; cells outside the grid read as walls.
        #[must_use]
        pub fn kind(&self, cell: CellCoord) -> CellKind {
            self.layout.kind(cell)
        }

        /// Reports whether the cell is walkable.
        #[must_use]
        pub fn is_path(&self, cell: CellCoord) -> bool {
            self.layout.is_path(cell)
        }

        /// Kind of the cell under a pixel-space point; off-grid points read as walls.
        #[must_use]
        pub fn kind_at(&self, point: WorldPoint) -> CellKind {
            point
                .cell(self.cell_size)
                .map_or(CellKind::Wall, |cell| self.layout.kind(cell))
        }

        /// Reports whether a pixel-space point lies in a wall or off the grid.
        #[must_use]
        pub fn is_wall_at(&self, point: WorldPoint) -> bool {
            self.kind_at(point) == CellKind::Wall
        }

        /// Walkable orthogonal neighbours in North, South, West, East order.
        #[must_use]
        pub fn open_neighbors(&self, cell: CellCoord) -> Vec<Direction> {
            Direction::ALL
                .into_iter()
                .filter(|direction| {
                    cell.step(*direction, 1)
                        .is_some_and(|neighbor| self.layout.is_path(neighbor))
                })
                .collect()
        }
    }

    /// Countdown of a cell scheduled to solidify.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ShrinkMarkerSnapshot {
        /// Marked cell.
        pub cell: CellCoord,
        /// Time left before the cell turns into a wall.
        pub remaining: Duration,
    }

    impl ShrinkMarkerSnapshot {
        /// Remaining time as a fraction of the warning period, in `0.0..=1.0`.
        #[must_use]
        pub fn remaining_fraction(&self) -> f32 {
            (self.remaining.as_secs_f32() / SHRINK_WARNING_TIME.as_secs_f32()).clamp(0.0, 1.0)
        }
    }

    /// Immutable representation of the player.
    #[derive(Clone, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Centre of the player in pixels.
        pub position: WorldPoint,
        /// Half of the player's side length in pixels.
        pub radius: f32,
        /// Direction moved on the last tick, if any.
        pub heading: Option<Direction>,
        /// Angle of the last movement direction in radians.
        pub facing: f32,
        /// Remaining power-up durations.
        pub timers: PowerUpTimers,
        /// Previous positions, most recent first.
        pub trail: Vec<WorldPoint>,
    }

    /// Immutable representation of a single enemy.
    #[derive(Clone, Debug, PartialEq)]
    pub struct EnemySnapshot {
        /// Unique identifier assigned to the enemy.
        pub id: EnemyId,
        /// Behaviour class.
        pub kind: EnemyKind,
        /// Centre of the enemy in pixels.
        pub position: WorldPoint,
        /// Grid cell containing the centre.
        pub cell: CellCoord,
        /// Half of the enemy's side length in pixels.
        pub radius: f32,
        /// Current heading, if moving.
        pub heading: Option<Direction>,
        /// Ticks until the next decision.
        pub cooldown: u32,
        /// Angle from the enemy toward the player in radians.
        pub eye_angle: f32,
    }

    impl EnemySnapshot {
        /// Reports whether the enemy is due for a new decision.
        #[must_use]
        pub fn ready_for_decision(&self) -> bool {
            self.cooldown == 0
        }
    }

    /// Read-only snapshot describing all enemies.
    #[derive(Clone, Debug, Default)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Iterator over the captured snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }

        /// Number of enemies captured.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether no enemy was captured.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }

        /// Consumes the view, yielding the underlying snapshots.
        pub fn into_vec(self) -> Vec<EnemySnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a gem.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct GemSnapshot {
        /// Cell holding the gem.
        pub cell: CellCoord,
        /// Centre of the gem in pixels.
        pub position: WorldPoint,
        /// Pickup radius in pixels.
        pub radius: f32,
    }

    /// Immutable representation of a power-up on the board.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PowerUpSnapshot {
        /// Effect granted on pickup.
        pub kind: PowerUpKind,
        /// Cell holding the power-up.
        pub cell: CellCoord,
        /// Centre of the power-up in pixels.
        pub position: WorldPoint,
        /// Pickup radius in pixels.
        pub radius: f32,
    }

    /// Occupied cells and population counts used to plan placements.
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub struct BoardView {
        /// Cells holding a gem.
        pub gems: Vec<CellCoord>,
        /// Cells holding a power-up.
        pub power_ups: Vec<CellCoord>,
        /// Cells carrying a shrink marker.
        pub marked: Vec<CellCoord>,
        /// Cells containing an enemy's centre.
        pub enemies: Vec<CellCoord>,
        /// Number of chasers.
        pub chasers: usize,
        /// Number of wanderers.
        pub wanderers: usize,
        /// Cell containing the player.
        pub player_cell: CellCoord,
        /// Current score.
        pub score: u32,
    }

    impl BoardView {
        /// Total number of enemies.
        #[must_use]
        pub fn enemy_count(&self) -> usize {
            self.chasers + self.wanderers
        }

        /// Reports whether a gem, power-up or marker already uses the cell.
        #[must_use]
        pub fn is_taken(&self, cell: CellCoord) -> bool {
            self.gems.contains(&cell) || self.power_ups.contains(&cell) || self.marked.contains(&cell)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shrinkmaze_core::constants::FIXED_STEP;

    const ROOMY: [&str; 11] = [
        "#####################",
        "#...................#",
        "#.#################.#",
        "#.#...............#.#",
        "#.#.#############.#.#",
        "#.#.#...........#.#.#",
        "#.#.#############.#.#",
        "#.#...............#.#",
        "#.#################.#",
        "#...................#",
        "#####################",
    ];

    fn playing_world() -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        let layout = MazeLayout::parse(&ROOMY).expect("valid layout");
        apply(&mut world, Command::LoadMaze { layout }, &mut events);
        apply(
            &mut world,
            Command::SetPhase {
                phase: GamePhase::Playing,
            },
            &mut events,
        );
        world
    }

    fn solidified(events: &[Event]) -> Vec<CellCoord> {
        events
            .iter()
            .filter_map(|event| match event {
                Event::WallSolidified { cell, .. } => Some(*cell),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn marker_over_an_existing_wall_solidifies_silently() {
        let mut world = playing_world();
        let mut events = Vec::new();
        apply(&mut world, Command::ShrinkRing, &mut events);
        apply(&mut world, Command::ShrinkRing, &mut events);
        assert_eq!(world.shrink.markers().len(), 52);

        let corner = CellCoord::new(19, 9);
        assert!(world.shrink.is_marked(corner));
        assert!(world.layout.set(corner, CellKind::Wall));

        let mut events = Vec::new();
        for _ in 0..120 {
            apply(&mut world, Command::Tick { dt: FIXED_STEP }, &mut events);
        }

        let cells = solidified(&events);
        assert_eq!(cells.len(), 51);
        assert!(!cells.contains(&corner));
        assert_eq!(world.layout.kind(corner), CellKind::Wall);
        assert!(world.shrink.markers().is_empty());
    }

    #[test]
    fn marking_the_same_ring_twice_solidifies_each_cell_once() {
        let mut world = playing_world();
        let mut events = Vec::new();
        apply(&mut world, Command::ShrinkRing, &mut events);
        let ring = world.bounds;
        apply(&mut world, Command::ShrinkRing, &mut events);
        assert_eq!(world.shrink.mark_ring(&world.layout, ring), 0);

        let mut events = Vec::new();
        for _ in 0..240 {
            apply(&mut world, Command::Tick { dt: FIXED_STEP }, &mut events);
        }

        let mut cells = solidified(&events);
        let total = cells.len();
        cells.sort();
        cells.dedup();
        assert_eq!(total, 52);
        assert_eq!(cells.len(), total);
    }
}
