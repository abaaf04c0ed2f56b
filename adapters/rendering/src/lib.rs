#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Shrinkmaze adapters.

pub mod effects;

use anyhow::Result as AnyResult;
use glam::Vec2;
use shrinkmaze_core::{ActiveBounds, EnemyKind, GamePhase, Intent, PowerUpKind};
use std::{error::Error, fmt, time::Duration};

use self::effects::Particle;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with its alpha replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear blend between `self` (at 0.0) and `other` (at 1.0).
    #[must_use]
    pub fn mix(self, other: Self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);
        let blend = |from: f32, to: f32| from + (to - from) * amount;
        Self {
            red: blend(self.red, other.red),
            green: blend(self.green, other.green),
            blue: blend(self.blue, other.blue),
            alpha: blend(self.alpha, other.alpha),
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors shared by every backend.
pub mod palette {
    use super::Color;
    use shrinkmaze_core::{EnemyKind, PowerUpKind};

    /// Background and open path.
    pub const BACKGROUND: Color = Color::from_rgb_u8(0x1a, 0x1a, 0x2e);
    /// Solid walls.
    pub const WALL: Color = Color::from_rgb_u8(0x16, 0x21, 0x3e);
    /// Player body and trail.
    pub const PLAYER: Color = Color::from_rgb_u8(0x0e, 0xad, 0x69);
    /// Gems and score text.
    pub const GEM: Color = Color::from_rgb_u8(0xff, 0x77, 0x00);
    /// Highlights, active bounds outline and effect bursts.
    pub const HIGHLIGHT: Color = Color::from_rgb_u8(0x4c, 0xc9, 0xf0);
    /// Cells about to solidify.
    pub const WARNING: Color = Color::from_rgb_u8(0xe9, 0x45, 0x60);

    /// Body color of an enemy class.
    #[must_use]
    pub const fn enemy(kind: EnemyKind) -> Color {
        match kind {
            EnemyKind::Chaser => Color::from_rgb_u8(0xe9, 0x45, 0x60),
            EnemyKind::Wanderer => Color::from_rgb_u8(0x9d, 0x4e, 0xdd),
        }
    }

    /// Color of a power-up pickup and its HUD entry.
    #[must_use]
    pub const fn power_up(kind: PowerUpKind) -> Color {
        match kind {
            PowerUpKind::Speed => Color::from_rgb_u8(0x00, 0xff, 0x00),
            PowerUpKind::Invincibility => Color::from_rgb_u8(0xff, 0xff, 0x00),
            PowerUpKind::Ghost => Color::from_rgb_u8(0xaa, 0xaa, 0xff),
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Movement requested by held keys, already normalized to a single axis.
    pub intent: Intent,
    /// Whether a start key was pressed on this frame.
    pub start: bool,
    /// Whether the restart key was pressed on this frame.
    pub restart: bool,
}

/// Wall grid of the maze expressed in world units.
#[derive(Clone, Debug, PartialEq)]
pub struct MazePresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single cell expressed in world units.
    pub cell_size: f32,
    walls: Vec<bool>,
}

impl MazePresentation {
    /// Creates a new maze descriptor from row-major wall flags.
    ///
    /// Returns an error when the cell size is not positive or the flag count
    /// does not match the grid.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_size: f32,
        walls: Vec<bool>,
    ) -> std::result::Result<Self, RenderingError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(RenderingError::InvalidCellSize { cell_size });
        }
        let expected = columns as usize * rows as usize;
        if walls.len() != expected {
            return Err(RenderingError::WallCountMismatch {
                expected,
                actual: walls.len(),
            });
        }
        Ok(Self {
            columns,
            rows,
            cell_size,
            walls,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Reports whether the cell is a wall; cells outside the grid count as walls.
    #[must_use]
    pub fn is_wall(&self, column: u32, row: u32) -> bool {
        if column >= self.columns || row >= self.rows {
            return true;
        }
        let index = row as usize * self.columns as usize + column as usize;
        self.walls.get(index).copied().unwrap_or(true)
    }

    /// Top-left corner of a cell in world units.
    #[must_use]
    pub fn cell_origin(&self, column: u32, row: u32) -> Vec2 {
        Vec2::new(column as f32, row as f32) * self.cell_size
    }
}

/// Cell scheduled to turn into a wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerPresentation {
    /// Column of the marked cell.
    pub column: u32,
    /// Row of the marked cell.
    pub row: u32,
    /// Remaining warning time as a fraction in `0.0..=1.0`.
    pub remaining: f32,
}

/// Active power-up effect shown on the player and in the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveEffect {
    /// Effect kind.
    pub kind: PowerUpKind,
    /// Seconds left before the effect wears off.
    pub seconds_left: f32,
}

/// Player avatar description.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerPresentation {
    /// Centre in world units.
    pub position: Vec2,
    /// Half of the side length in world units.
    pub half_size: f32,
    /// Angle of the last movement direction in radians.
    pub facing: f32,
    /// Previous positions, most recent first.
    pub trail: Vec<Vec2>,
    /// Effects currently running.
    pub effects: Vec<ActiveEffect>,
}

impl PlayerPresentation {
    /// Reports whether the effect is running.
    #[must_use]
    pub fn has_effect(&self, kind: PowerUpKind) -> bool {
        self.effects.iter().any(|effect| effect.kind == kind)
    }
}

/// Enemy avatar description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Behaviour class, which selects the color.
    pub kind: EnemyKind,
    /// Centre in world units.
    pub position: Vec2,
    /// Half of the side length in world units.
    pub half_size: f32,
    /// Angle from the enemy toward the player in radians.
    pub eye_angle: f32,
}

/// Gem description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GemPresentation {
    /// Centre in world units.
    pub position: Vec2,
    /// Radius in world units.
    pub radius: f32,
}

/// Power-up pickup description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerUpPresentation {
    /// Effect granted on pickup.
    pub kind: PowerUpKind,
    /// Centre in world units.
    pub position: Vec2,
    /// Radius in world units.
    pub radius: f32,
}

/// Text overlays drawn on top of the maze.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPresentation {
    /// Current score.
    pub score: u32,
    /// Active screen.
    pub phase: GamePhase,
    /// The player has no open neighbour.
    pub trapped: bool,
    /// The maze was cleared and a new one is on its way.
    pub victory: bool,
}

impl HudPresentation {
    /// Heading shown across the maze for the current state, if any.
    #[must_use]
    pub fn banner(&self) -> Option<String> {
        match self.phase {
            GamePhase::Start => Some("Shifting Maze - press Enter to start".to_owned()),
            GamePhase::GameOver => Some(format!(
                "Game Over! Final score: {} - press Enter to retry",
                self.score
            )),
            GamePhase::Playing if self.victory => Some(format!("VICTORY! Score: {}", self.score)),
            GamePhase::Playing if self.trapped => Some("Trapped! Press R to restart".to_owned()),
            GamePhase::Playing => None,
        }
    }
}

/// Scene description combining the maze and everything that lives in it.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Wall grid.
    pub maze: MazePresentation,
    /// Rectangle still subject to shrinking.
    pub active_bounds: ActiveBounds,
    /// Cells counting down to solidification.
    pub markers: Vec<MarkerPresentation>,
    /// Player avatar.
    pub player: PlayerPresentation,
    /// Enemies.
    pub enemies: Vec<EnemyPresentation>,
    /// Gems.
    pub gems: Vec<GemPresentation>,
    /// Power-up pickups.
    pub power_ups: Vec<PowerUpPresentation>,
    /// Short-lived effect particles.
    pub particles: Vec<Particle>,
    /// Text overlays.
    pub hud: HudPresentation,
}

impl Scene {
    /// Creates a scene showing an empty maze on the title screen.
    #[must_use]
    pub fn new(maze: MazePresentation, active_bounds: ActiveBounds) -> Self {
        Self {
            maze,
            active_bounds,
            markers: Vec::new(),
            player: PlayerPresentation::default(),
            enemies: Vec::new(),
            gems: Vec::new(),
            power_ups: Vec::new(),
            particles: Vec::new(),
            hud: HudPresentation {
                score: 0,
                phase: GamePhase::Start,
                trapped: false,
                victory: false,
            },
        }
    }

    /// Width of the scene in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.maze.width()
    }

    /// Height of the scene in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.maze.height()
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Shrinkmaze scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the real frame delta and
    /// the input captured by the adapter, and rewrites the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cells must have a positive, finite size.
    InvalidCellSize {
        /// Provided size that failed validation.
        cell_size: f32,
    },
    /// The wall flags do not cover the grid exactly.
    WallCountMismatch {
        /// Number of cells in the grid.
        expected: usize,
        /// Number of flags provided.
        actual: usize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize { cell_size } => {
                write!(f, "cell_size must be positive (received {cell_size})")
            }
            Self::WallCountMismatch { expected, actual } => {
                write!(f, "expected {expected} wall flags, received {actual}")
            }
        }
    }
}

impl Error for RenderingError {}
