//! Particle bursts spawned in reaction to gameplay events.
//!
//! Particles are plain records advanced once per simulation step; they never
//! feed back into the simulation.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use shrinkmaze_core::Event;

use crate::{palette, Color};

const MAX_PARTICLES: usize = 800;
const VICTORY_BURSTS: usize = 20;

/// Single fading particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Centre in world units.
    pub position: Vec2,
    /// Displacement per step in world units.
    pub velocity: Vec2,
    /// Base color; alpha fades with [`Particle::opacity`].
    pub color: Color,
    /// Current radius in world units.
    pub size: f32,
    initial_size: f32,
    life: u32,
    max_life: u32,
}

impl Particle {
    /// Remaining life as a fraction of the initial life.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    /// Steps left before the particle disappears.
    #[must_use]
    pub fn life(&self) -> u32 {
        self.life
    }

    fn update(&mut self) -> bool {
        self.position += self.velocity;
        self.life = self.life.saturating_sub(1);
        self.size = self.initial_size * self.opacity();
        self.life > 0
    }
}

/// Owns every live particle and spawns new ones from events.
#[derive(Debug)]
pub struct VisualEffects {
    particles: Vec<Particle>,
    rng: ChaCha8Rng,
}

impl VisualEffects {
    /// Creates an empty effect pool with a seeded generator.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Live particles.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Drops every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawns bursts for the provided events. `canvas` bounds the victory confetti.
    pub fn observe(&mut self, events: &[Event], canvas: Vec2) {
        for event in events {
            match event {
                Event::GemCollected { position, .. } => {
                    self.burst(Vec2::new(position.x, position.y), palette::GEM, 10);
                }
                Event::PowerUpCollected { kind, position } => {
                    let at = Vec2::new(position.x, position.y);
                    self.burst(at, palette::HIGHLIGHT, 10);
                    self.burst(at, palette::power_up(*kind), 5);
                }
                Event::PowerUpExpired { position, .. } => {
                    self.burst(Vec2::new(position.x, position.y), palette::HIGHLIGHT, 10);
                }
                Event::EnemyCollision { position, .. } => {
                    self.burst(Vec2::new(position.x, position.y), palette::PLAYER, 20);
                }
                Event::WallSolidified { position, .. } => {
                    self.burst(Vec2::new(position.x, position.y), palette::WALL.lighten(0.3), 5);
                }
                Event::Victory => self.confetti(canvas),
                _ => {}
            }
        }
    }

    /// Advances every particle by one step and drops the expired ones.
    pub fn update(&mut self) {
        self.particles.retain_mut(Particle::update);
    }

    fn confetti(&mut self, canvas: Vec2) {
        let colors = [palette::GEM, palette::PLAYER, palette::HIGHLIGHT];
        for _ in 0..VICTORY_BURSTS {
            let at = Vec2::new(
                self.rng.gen_range(0.0..=canvas.x.max(0.0)),
                self.rng.gen_range(0.0..=canvas.y.max(0.0)),
            );
            let color = colors.choose(&mut self.rng).copied().unwrap_or(palette::GEM);
            self.burst(at, color, 5);
        }
    }

    fn burst(&mut self, position: Vec2, color: Color, amount: usize) {
        for _ in 0..amount {
            if self.particles.len() >= MAX_PARTICLES {
                return;
            }
            let speed = self.rng.gen_range(0.5..2.5);
            let angle = self.rng.gen_range(0.0..TAU);
            let size = self.rng.gen_range(2.0..5.0);
            let life = self.rng.gen_range(20..40);
            self.particles.push(Particle {
                position,
                velocity: Vec2::from_angle(angle) * speed,
                color,
                size,
                initial_size: size,
                life,
                max_life: life,
            });
        }
    }
}
