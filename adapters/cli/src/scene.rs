//! Translates world queries into the scene consumed by rendering backends.

use anyhow::{Context, Result};
use glam::Vec2;
use shrinkmaze_core::{constants::TICKS_PER_SECOND, CellKind, GamePhase, PowerUpKind, WorldPoint};
use shrinkmaze_rendering::{
    effects::VisualEffects, ActiveEffect, EnemyPresentation, GemPresentation, HudPresentation,
    MarkerPresentation, MazePresentation, PlayerPresentation, PowerUpPresentation, Scene,
};
use shrinkmaze_world::{query, World};

/// Builds a complete scene for the current world state.
pub(crate) fn build(world: &World, effects: &VisualEffects) -> Result<Scene> {
    let mut scene = Scene::new(maze(world)?, query::active_bounds(world));
    refresh(&mut scene, world, effects)?;
    Ok(scene)
}

/// Rewrites every scene element from the world and the particle pool.
pub(crate) fn refresh(scene: &mut Scene, world: &World, effects: &VisualEffects) -> Result<()> {
    scene.maze = maze(world)?;
    scene.active_bounds = query::active_bounds(world);
    scene.markers = query::shrink_markers(world)
        .iter()
        .map(|marker| MarkerPresentation {
            column: marker.cell.column(),
            row: marker.cell.row(),
            remaining: marker.remaining_fraction(),
        })
        .collect();
    scene.player = player(world);
    scene.enemies = query::enemy_view(world)
        .iter()
        .map(|enemy| EnemyPresentation {
            kind: enemy.kind,
            position: to_vec2(enemy.position),
            half_size: enemy.radius,
            eye_angle: enemy.eye_angle,
        })
        .collect();
    scene.gems = query::gems(world)
        .iter()
        .map(|gem| GemPresentation {
            position: to_vec2(gem.position),
            radius: gem.radius,
        })
        .collect();
    scene.power_ups = query::power_ups(world)
        .iter()
        .map(|power| PowerUpPresentation {
            kind: power.kind,
            position: to_vec2(power.position),
            radius: power.radius,
        })
        .collect();
    scene.particles = effects.particles().to_vec();

    let phase = query::phase(world);
    scene.hud = HudPresentation {
        score: query::score(world),
        phase,
        trapped: phase == GamePhase::Playing && query::player_trapped(world),
        victory: query::victory_declared(world),
    };
    Ok(())
}

fn maze(world: &World) -> Result<MazePresentation> {
    let grid = query::grid_view(world);
    let dimensions = grid.dimensions();
    let walls = grid
        .layout()
        .cells()
        .iter()
        .map(|kind| *kind == CellKind::Wall)
        .collect();
    MazePresentation::new(
        dimensions.width(),
        dimensions.height(),
        grid.cell_size(),
        walls,
    )
    .context("failed to describe the maze for rendering")
}

fn player(world: &World) -> PlayerPresentation {
    let snapshot = query::player(world);
    let effects = PowerUpKind::ALL
        .iter()
        .filter_map(|kind| {
            let ticks = snapshot.timers.remaining(*kind);
            (ticks > 0).then(|| ActiveEffect {
                kind: *kind,
                seconds_left: ticks as f32 / TICKS_PER_SECOND as f32,
            })
        })
        .collect();

    PlayerPresentation {
        position: to_vec2(snapshot.position),
        half_size: snapshot.radius,
        facing: snapshot.facing,
        trail: snapshot.trail.into_iter().map(to_vec2).collect(),
        effects,
    }
}

fn to_vec2(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x, point.y)
}
