use shrinkmaze_core::{constants::COLLISION_PADDING, Direction, WorldPoint};

use crate::query::GridView;

/// Result of moving a body for a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Stride {
    pub(crate) position: WorldPoint,
    pub(crate) blocked: bool,
}

/// Moves a square body of `half_size` along `direction`, resolving walls per axis.
///
/// The leading edge of the collision box (inset by the padding) is sampled at
/// both perpendicular corners. A wall under either sample snaps the body so
/// its box rests against the far edge of its current cell. Out-of-grid samples
/// count as walls. With `ghost` set the samples are skipped, and in every case
/// the centre is finally clamped inside the canvas.
pub(crate) fn advance(
    grid: GridView<'_>,
    position: WorldPoint,
    half_size: f32,
    direction: Direction,
    speed: f32,
    ghost: bool,
) -> Stride {
    let reach = (half_size - COLLISION_PADDING).max(0.0);
    let cell_size = grid.cell_size();
    let (dx, dy) = direction.delta();
    let mut next = position;
    let mut blocked = false;

    if dx != 0 {
        let sign = dx as f32;
        let tentative = position.x + sign * speed;
        let edge = tentative + sign * reach;
        let hit = !ghost
            && (grid.is_wall_at(WorldPoint::new(edge, position.y - reach))
                || grid.is_wall_at(WorldPoint::new(edge, position.y + reach)));
        if hit {
            blocked = true;
            next.x = snap(position.x, sign, reach, cell_size);
        } else {
            next.x = tentative;
        }
    }

    if dy != 0 {
        let sign = dy as f32;
        let tentative = position.y + sign * speed;
        let edge = tentative + sign * reach;
        let hit = !ghost
            && (grid.is_wall_at(WorldPoint::new(position.x - reach, edge))
                || grid.is_wall_at(WorldPoint::new(position.x + reach, edge)));
        if hit {
            blocked = true;
            next.y = snap(position.y, sign, reach, cell_size);
        } else {
            next.y = tentative;
        }
    }

    let (width, height) = grid.canvas_size();
    next.x = clamp_axis(next.x, half_size, width);
    next.y = clamp_axis(next.y, half_size, height);

    Stride {
        position: next,
        blocked,
    }
}

fn snap(coordinate: f32, sign: f32, reach: f32, cell_size: f32) -> f32 {
    let cell = (coordinate / cell_size).floor();
    if sign > 0.0 {
        (cell + 1.0) * cell_size - reach - COLLISION_PADDING
    } else {
        cell * cell_size + reach + COLLISION_PADDING
    }
}

fn clamp_axis(value: f32, half_size: f32, extent: f32) -> f32 {
    if extent <= half_size * 2.0 {
        return extent * 0.5;
    }
    value.clamp(half_size, extent - half_size)
}
