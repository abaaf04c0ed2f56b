#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game session that owns the world, every system and the fixed-step clock.
//!
//! Frames of arbitrary length are converted into whole simulation steps.
//! Each step forwards the player's intent, lets the pursuit system steer
//! enemies, ticks the world and then pumps the resulting events through the
//! shrinking and spawning systems until they stop answering with commands.

use std::time::Duration;

use shrinkmaze_core::{
    constants::{
        DEFAULT_CELL_SIZE, FIXED_STEP, MAX_STEPS_PER_FRAME, SHRINK_INTERVAL,
        VICTORY_RESTART_DELAY,
    },
    Command, DimensionError, Event, GamePhase, Intent, MazeDimensions,
};
use shrinkmaze_system_carving::{self as carving, Carving};
use shrinkmaze_system_pursuit::{self as pursuit, Pursuit};
use shrinkmaze_system_shrinking::{self as shrinking, Shrinking};
use shrinkmaze_system_spawning::{self as spawning, Spawning};
use shrinkmaze_world::{self as world, query, World};
use tracing::{debug, info, warn};

/// Parameters required to construct a [`GameSession`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    seed: u64,
    dimensions: MazeDimensions,
    cell_size: f32,
}

impl SessionConfig {
    /// Validates the maze size and builds a configuration with the default cell size.
    pub fn new(seed: u64, width: u32, height: u32) -> Result<Self, DimensionError> {
        Ok(Self {
            seed,
            dimensions: MazeDimensions::new(width, height)?,
            cell_size: DEFAULT_CELL_SIZE,
        })
    }

    /// Configuration for the default maze size.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            dimensions: MazeDimensions::DEFAULT,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }

    /// Replaces the pixel size of a cell.
    #[must_use]
    pub const fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Seed every random stream of the session derives from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Size of the generated mazes.
    #[must_use]
    pub const fn dimensions(&self) -> MazeDimensions {
        self.dimensions
    }
}

/// Input gathered by the presentation layer for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionInput {
    /// Normalized movement request.
    pub intent: Intent,
    /// Start a new run from the title or game-over screen.
    pub start: bool,
    /// Regenerate the current level while playing.
    pub restart: bool,
}

/// Deferred action executed once the session clock reaches a deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTransition {
    /// Session clock value at which the action runs.
    pub at: Duration,
    /// Action to run.
    pub action: Transition,
}

/// Actions that can be scheduled on the session clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Carve a fresh maze and start over from a zero score.
    Regenerate,
}

/// Aggregate owning the complete game state.
#[derive(Debug)]
pub struct GameSession {
    world: World,
    carving: Carving,
    shrinking: Shrinking,
    pursuit: Pursuit,
    spawning: Spawning,
    intent: Intent,
    clock: Duration,
    accumulator: Duration,
    pending: Option<PendingTransition>,
    events: Vec<Event>,
}

impl GameSession {
    /// Creates a session showing a freshly populated maze on the title screen.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let seed = config.seed;
        let mut session = Self {
            world: World::with_cell_size(config.cell_size),
            carving: Carving::new(carving::Config::new(config.dimensions, stream_seed(seed, 0))),
            shrinking: Shrinking::new(shrinking::Config::new(
                SHRINK_INTERVAL,
                stream_seed(seed, 1),
            )),
            pursuit: Pursuit::new(pursuit::Config::new(stream_seed(seed, 2))),
            spawning: Spawning::new(spawning::Config::new(stream_seed(seed, 3))),
            intent: Intent::IDLE,
            clock: Duration::ZERO,
            accumulator: Duration::ZERO,
            pending: None,
            events: Vec::new(),
        };
        let layout = session.carving.generate();
        session.apply_all(vec![Command::LoadMaze { layout }]);
        session
    }

    /// Read-only access to the world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Simulated time elapsed since the session was created.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Transition scheduled on the session clock, if any.
    #[must_use]
    pub fn pending_transition(&self) -> Option<PendingTransition> {
        self.pending
    }

    /// Removes and returns every event emitted since the previous call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Starts a new run with a fresh maze and a zero score.
    ///
    /// Ignored while a run is in progress.
    pub fn start(&mut self) {
        if query::phase(&self.world) == GamePhase::Playing {
            return;
        }
        info!("starting new run");
        self.regenerate(true);
    }

    /// Replaces the current maze, keeping the score. Only valid while playing.
    pub fn restart_level(&mut self) {
        if query::phase(&self.world) != GamePhase::Playing {
            return;
        }
        info!(score = query::score(&self.world), "restarting level");
        self.regenerate(false);
    }

    /// Consumes a rendered frame, running as many fixed steps as fit.
    ///
    /// Returns the number of steps executed.
    pub fn advance(&mut self, frame_dt: Duration, input: SessionInput) -> u32 {
        if input.start {
            self.start();
        }
        if input.restart {
            self.restart_level();
        }
        self.intent = input.intent;

        self.accumulator = self.accumulator.saturating_add(frame_dt);
        let mut steps = 0;
        while self.accumulator >= FIXED_STEP {
            if steps == MAX_STEPS_PER_FRAME {
                warn!(
                    dropped_ms = self.accumulator.as_millis() as u64,
                    "frame took too long, dropping simulation time"
                );
                self.accumulator = Duration::ZERO;
                break;
            }
            self.accumulator -= FIXED_STEP;
            self.step();
            steps += 1;
        }
        steps
    }

    /// Runs a single fixed simulation step.
    pub fn step(&mut self) {
        self.clock = self.clock.saturating_add(FIXED_STEP);
        if self.run_due_transition() {
            return;
        }

        let mut commands = vec![Command::SetPlayerIntent {
            intent: self.intent,
        }];
        self.pursuit.handle(
            &query::enemy_view(&self.world),
            query::player_cell(&self.world),
            query::grid_view(&self.world),
            &mut commands,
        );
        commands.push(Command::Tick { dt: FIXED_STEP });
        self.apply_all(commands);
    }

    fn run_due_transition(&mut self) -> bool {
        let Some(pending) = self.pending else {
            return false;
        };
        if self.clock < pending.at {
            return false;
        }
        self.pending = None;
        if query::phase(&self.world) != GamePhase::Playing {
            debug!(?pending, "discarding transition outside play");
            return false;
        }
        match pending.action {
            Transition::Regenerate => {
                info!(score = query::score(&self.world), "regenerating cleared maze");
                self.regenerate(true);
            }
        }
        true
    }

    fn regenerate(&mut self, reset_score: bool) {
        self.pending = None;
        let layout = self.carving.generate();
        let mut commands = Vec::with_capacity(3);
        if reset_score {
            commands.push(Command::ResetScore);
        }
        commands.push(Command::LoadMaze { layout });
        commands.push(Command::SetPhase {
            phase: GamePhase::Playing,
        });
        self.apply_all(commands);
    }

    /// Applies the commands and feeds the resulting events back to the reactive systems.
    fn apply_all(&mut self, commands: Vec<Command>) {
        let mut commands = commands;
        while !commands.is_empty() {
            let mut events = Vec::new();
            for command in commands.drain(..) {
                world::apply(&mut self.world, command, &mut events);
            }
            if events.is_empty() {
                break;
            }

            self.shrinking.handle(
                &events,
                query::active_bounds(&self.world),
                query::grid_view(&self.world),
                query::gems(&self.world).len(),
                query::power_ups(&self.world).len(),
                &mut commands,
            );
            self.spawning.handle(
                &events,
                query::grid_view(&self.world),
                query::active_bounds(&self.world),
                &query::board_view(&self.world),
                &mut commands,
            );
            self.record(events);
        }
    }

    fn record(&mut self, events: Vec<Event>) {
        for event in &events {
            if *event == Event::Victory && self.pending.is_none() {
                let at = self.clock.saturating_add(VICTORY_RESTART_DELAY);
                debug!(?at, "victory transition scheduled");
                self.pending = Some(PendingTransition {
                    at,
                    action: Transition::Regenerate,
                });
            }
        }
        self.events.extend(events);
    }
}

/// Derives an independent seed for one random stream of the session.
fn stream_seed(seed: u64, stream: u64) -> u64 {
    seed ^ stream.wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shrinkmaze_core::constants::START_CELL;

    fn playing_session() -> GameSession {
        let mut session = GameSession::new(SessionConfig::with_seed(99));
        session.start();
        let _ = session.drain_events();
        session
    }

    #[test]
    fn victory_regenerates_after_the_delay() {
        let mut session = playing_session();
        let mut events = Vec::new();
        world::apply(
            &mut session.world,
            Command::PlaceGems {
                cells: vec![START_CELL],
            },
            &mut events,
        );
        world::apply(&mut session.world, Command::Tick { dt: FIXED_STEP }, &mut events);
        assert_eq!(query::score(session.world()), 1);

        session.record(vec![Event::Victory]);
        let pending = session.pending_transition().expect("transition scheduled");
        assert_eq!(pending.at, session.clock() + VICTORY_RESTART_DELAY);

        session.clock = pending.at - FIXED_STEP * 2;
        session.step();
        assert_eq!(session.pending_transition(), Some(pending));

        let _ = session.drain_events();
        session.step();

        assert!(session.pending_transition().is_none());
        let events = session.drain_events();
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::MazeLoaded { .. })));
        assert_eq!(query::phase(session.world()), GamePhase::Playing);
        assert_eq!(query::score(session.world()), 0);
    }

    #[test]
    fn transition_is_discarded_after_game_over() {
        let mut session = playing_session();
        session.record(vec![Event::Victory]);
        world::apply(
            &mut session.world,
            Command::SetPhase {
                phase: GamePhase::GameOver,
            },
            &mut Vec::new(),
        );
        session.clock += VICTORY_RESTART_DELAY;
        session.step();

        assert!(session.pending_transition().is_none());
        assert!(!session
            .drain_events()
            .iter()
            .any(|event| matches!(event, Event::MazeLoaded { .. })));
        assert_eq!(query::phase(session.world()), GamePhase::GameOver);
    }

    #[test]
    fn second_victory_does_not_push_the_deadline_back() {
        let mut session = playing_session();
        session.record(vec![Event::Victory]);
        let first = session.pending_transition();
        session.clock += FIXED_STEP;
        session.record(vec![Event::Victory]);
        assert_eq!(session.pending_transition(), first);
    }

    #[test]
    fn stream_seeds_differ() {
        let seeds: Vec<u64> = (0..4).map(|stream| stream_seed(7, stream)).collect();
        for (index, seed) in seeds.iter().enumerate() {
            assert!(!seeds[index + 1..].contains(seed));
        }
    }
}
