#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Shrinkmaze.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! The adapter therefore depends on macroquad without its default `audio`
//! feature; game audio is left to consumers of the event stream.

use anyhow::Result;
use glam::Vec2;
use macroquad::{
    color::{BLACK, WHITE},
    input::{is_key_down, is_key_pressed, KeyCode},
};
use shrinkmaze_core::{Intent, PowerUpKind};
use shrinkmaze_rendering::{
    palette, Color, EnemyPresentation, FrameInput, GemPresentation, HudPresentation,
    MarkerPresentation, PlayerPresentation, PowerUpPresentation, Presentation, RenderingBackend,
    Scene,
};
use std::time::Duration;
use tracing::info;

const HUD_FONT_SIZE: f32 = 24.0;
const BANNER_FONT_SIZE: f32 = 36.0;
const MARGIN: f32 = 48.0;

/// Directional keys held during a frame.
///
/// Arrow keys and WASD map to the same directions. Horizontal input wins when
/// both axes are held.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    /// Up arrow or `W`.
    pub up: bool,
    /// Down arrow or `S`.
    pub down: bool,
    /// Left arrow or `A`.
    pub left: bool,
    /// Right arrow or `D`.
    pub right: bool,
}

impl HeldKeys {
    fn poll() -> Self {
        Self {
            up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
        }
    }

    /// Normalized movement intent for the held keys; opposite keys cancel out.
    #[must_use]
    pub fn intent(&self) -> Intent {
        let axis = |negative: bool, positive: bool| i32::from(positive) - i32::from(negative);
        Intent::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `Enter` or `Space` starts a run from the title or game-over screen.
    start: bool,
    /// `R` regenerates the level while playing.
    restart: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let start = is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space);
        let restart = is_key_pressed(KeyCode::R);

        Self {
            quit_requested,
            start,
            restart,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs the frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }
        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: (scene.width() + MARGIN * 2.0) as i32,
            window_height: (scene.height() + MARGIN * 2.0) as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = FrameInput {
                    intent: HeldKeys::poll().intent(),
                    start: keyboard.start,
                    restart: keyboard.restart,
                };
                update_scene(frame_dt, frame_input, &mut scene);

                macroquad::window::clear_background(background);
                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let time = macroquad::time::get_time() as f32;

                draw_maze(&scene, &metrics);
                draw_markers(&scene.markers, scene.maze.cell_size, &metrics, time);
                draw_active_bounds(&scene, &metrics);
                draw_gems(&scene.gems, &metrics, time);
                draw_power_ups(&scene.power_ups, &metrics, time);
                draw_particles(&scene, &metrics);
                draw_enemies(&scene.enemies, &metrics);
                draw_player(&scene.player, &metrics, time);
                draw_hud(&scene.hud, &scene.player, &metrics);

                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    if show_fps {
                        info!(fps = per_second, "frame rate");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Maps world units onto the window while preserving the aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    screen_width: f32,
    screen_height: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let world_width = scene.width();
        let world_height = scene.height();
        let scale = if world_width <= f32::EPSILON || world_height <= f32::EPSILON {
            1.0
        } else {
            let available_width = (screen_width - MARGIN * 2.0).max(1.0);
            let available_height = (screen_height - MARGIN * 2.0).max(1.0);
            (available_width / world_width).min(available_height / world_height)
        };

        Self {
            scale,
            offset_x: ((screen_width - world_width * scale) * 0.5).max(0.0),
            offset_y: ((screen_height - world_height * scale) * 0.5).max(0.0),
            screen_width,
            screen_height,
        }
    }

    fn to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.scale,
            self.offset_y + position.y * self.scale,
        )
    }

    fn length(&self, value: f32) -> f32 {
        value * self.scale
    }
}

fn draw_maze(scene: &Scene, metrics: &SceneMetrics) {
    let maze = &scene.maze;
    let cell = metrics.length(maze.cell_size);
    let wall = to_macroquad_color(palette::WALL);
    let edge = to_macroquad_color(palette::WALL.lighten(0.15));
    for row in 0..maze.rows {
        for column in 0..maze.columns {
            if !maze.is_wall(column, row) {
                continue;
            }
            let origin = metrics.to_screen(maze.cell_origin(column, row));
            macroquad::shapes::draw_rectangle(origin.x, origin.y, cell, cell, wall);
            macroquad::shapes::draw_rectangle_lines(origin.x, origin.y, cell, cell, 1.0, edge);
        }
    }
}

fn draw_markers(markers: &[MarkerPresentation], cell_size: f32, metrics: &SceneMetrics, time: f32) {
    let cell = metrics.length(cell_size);
    for marker in markers {
        let urgency = 1.0 - marker.remaining;
        let blink = 0.5 + 0.5 * (time * (4.0 + urgency * 12.0)).sin();
        let color = palette::WARNING.mix(palette::WALL, urgency).with_alpha(0.4 + 0.5 * blink);
        let origin = metrics.to_screen(
            Vec2::new(marker.column as f32, marker.row as f32) * cell_size,
        );
        macroquad::shapes::draw_rectangle(origin.x, origin.y, cell, cell, to_macroquad_color(color));
    }
}

fn draw_active_bounds(scene: &Scene, metrics: &SceneMetrics) {
    let bounds = scene.active_bounds;
    let cell_size = scene.maze.cell_size;
    let top_left = metrics.to_screen(Vec2::new(bounds.min_x() as f32, bounds.min_y() as f32) * cell_size);
    let size = Vec2::new(
        (bounds.span_x() + 1) as f32,
        (bounds.span_y() + 1) as f32,
    ) * metrics.length(cell_size);
    macroquad::shapes::draw_rectangle_lines(
        top_left.x,
        top_left.y,
        size.x,
        size.y,
        2.0,
        to_macroquad_color(palette::HIGHLIGHT.with_alpha(0.35)),
    );
}

fn draw_gems(gems: &[GemPresentation], metrics: &SceneMetrics, time: f32) {
    let color = to_macroquad_color(palette::GEM);
    for gem in gems {
        let center = metrics.to_screen(gem.position);
        macroquad::shapes::draw_poly(
            center.x,
            center.y,
            4,
            metrics.length(gem.radius),
            (time * 90.0) % 360.0,
            color,
        );
    }
}

fn draw_power_ups(power_ups: &[PowerUpPresentation], metrics: &SceneMetrics, time: f32) {
    let pulse = 1.0 + 0.2 * (time * 3.0).sin();
    for power in power_ups {
        let center = metrics.to_screen(power.position);
        let radius = metrics.length(power.radius) * pulse;
        let color = to_macroquad_color(palette::power_up(power.kind));
        match power.kind {
            PowerUpKind::Speed => {
                macroquad::shapes::draw_poly(center.x, center.y, 4, radius, 0.0, color);
            }
            PowerUpKind::Invincibility => {
                macroquad::shapes::draw_circle(center.x, center.y, radius, color);
            }
            PowerUpKind::Ghost => {
                macroquad::shapes::draw_circle(center.x, center.y, radius, color);
                macroquad::shapes::draw_circle(
                    center.x - radius * 0.35,
                    center.y - radius * 0.2,
                    radius * 0.2,
                    BLACK,
                );
                macroquad::shapes::draw_circle(
                    center.x + radius * 0.35,
                    center.y - radius * 0.2,
                    radius * 0.2,
                    BLACK,
                );
            }
        }
    }
}

fn draw_particles(scene: &Scene, metrics: &SceneMetrics) {
    for particle in &scene.particles {
        let center = metrics.to_screen(particle.position);
        let color = particle.color.with_alpha(particle.opacity());
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            metrics.length(particle.size),
            to_macroquad_color(color),
        );
    }
}

fn draw_enemies(enemies: &[EnemyPresentation], metrics: &SceneMetrics) {
    for enemy in enemies {
        let center = metrics.to_screen(enemy.position);
        let half = metrics.length(enemy.half_size);
        macroquad::shapes::draw_rectangle(
            center.x - half,
            center.y - half,
            half * 2.0,
            half * 2.0,
            to_macroquad_color(palette::enemy(enemy.kind)),
        );

        let look = Vec2::from_angle(enemy.eye_angle) * half * 0.15;
        for side in [-1.0, 1.0] {
            let eye = center + Vec2::new(side * half * 0.4, -half * 0.2);
            macroquad::shapes::draw_circle(eye.x, eye.y, half * 0.28, WHITE);
            macroquad::shapes::draw_circle(eye.x + look.x, eye.y + look.y, half * 0.13, BLACK);
        }
    }
}

fn draw_player(player: &PlayerPresentation, metrics: &SceneMetrics, time: f32) {
    let half = metrics.length(player.half_size);
    let trail_length = player.trail.len().max(1) as f32;
    for (index, position) in player.trail.iter().enumerate() {
        let center = metrics.to_screen(*position);
        let fade = 1.0 - (index as f32 + 1.0) / (trail_length + 1.0);
        let color = palette::PLAYER.with_alpha(0.4 * fade);
        macroquad::shapes::draw_circle(center.x, center.y, half * fade, to_macroquad_color(color));
    }

    let center = metrics.to_screen(player.position);
    if player.has_effect(PowerUpKind::Invincibility) {
        let glow = 1.2 + 0.15 * (time * 10.0).sin();
        let color = palette::power_up(PowerUpKind::Invincibility).with_alpha(0.35);
        macroquad::shapes::draw_circle(center.x, center.y, half * glow * 1.4, to_macroquad_color(color));
    }
    let body = if player.has_effect(PowerUpKind::Ghost) {
        palette::PLAYER.with_alpha(0.5)
    } else if player.has_effect(PowerUpKind::Speed) {
        palette::PLAYER.lighten(0.3)
    } else {
        palette::PLAYER
    };
    macroquad::shapes::draw_rectangle(
        center.x - half,
        center.y - half,
        half * 2.0,
        half * 2.0,
        to_macroquad_color(body),
    );
    let nose = center + Vec2::from_angle(player.facing) * half * 0.6;
    macroquad::shapes::draw_circle(nose.x, nose.y, half * 0.25, WHITE);
}

fn draw_hud(hud: &HudPresentation, player: &PlayerPresentation, metrics: &SceneMetrics) {
    let _ = macroquad::text::draw_text(
        &format!("Score: {}", hud.score),
        MARGIN * 0.5,
        MARGIN * 0.6,
        HUD_FONT_SIZE,
        to_macroquad_color(palette::GEM),
    );

    let mut x = MARGIN * 0.5 + 160.0;
    for effect in &player.effects {
        let label = format!("{:?} {:.1}s", effect.kind, effect.seconds_left);
        let _ = macroquad::text::draw_text(
            &label,
            x,
            MARGIN * 0.6,
            HUD_FONT_SIZE * 0.8,
            to_macroquad_color(palette::power_up(effect.kind)),
        );
        x += 150.0;
    }

    let Some(banner) = hud.banner() else {
        return;
    };
    let dimensions = macroquad::text::measure_text(&banner, None, BANNER_FONT_SIZE as u16, 1.0);
    let left = (metrics.screen_width - dimensions.width) * 0.5;
    let baseline = metrics.screen_height * 0.5;
    macroquad::shapes::draw_rectangle(
        left - 20.0,
        baseline - dimensions.height - 16.0,
        dimensions.width + 40.0,
        dimensions.height + 32.0,
        to_macroquad_color(Color::new(0.04, 0.04, 0.16, 0.8)),
    );
    let _ = macroquad::text::draw_text(
        &banner,
        left,
        baseline,
        BANNER_FONT_SIZE,
        to_macroquad_color(palette::HIGHLIGHT),
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
