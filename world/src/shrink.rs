use std::time::Duration;

use shrinkmaze_core::{constants::SHRINK_WARNING_TIME, ActiveBounds, CellCoord, MazeLayout};

/// Countdown attached to a path cell that will turn into a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ShrinkingWall {
    pub(crate) cell: CellCoord,
    pub(crate) remaining: Duration,
}

/// Pending shrink markers in the order they were placed.
#[derive(Clone, Debug, Default)]
pub(crate) struct ShrinkField {
    markers: Vec<ShrinkingWall>,
}

impl ShrinkField {
    pub(crate) fn clear(&mut self) {
        self.markers.clear();
    }

    pub(crate) fn markers(&self) -> &[ShrinkingWall] {
        &self.markers
    }

    pub(crate) fn is_marked(&self, cell: CellCoord) -> bool {
        self.markers.iter().any(|marker| marker.cell == cell)
    }

    /// Marks every path cell on the ring of `bounds`, returning how many were marked.
    pub(crate) fn mark_ring(&mut self, layout: &MazeLayout, bounds: ActiveBounds) -> usize {
        let mut marked = 0;
        for cell in bounds.ring() {
            if !layout.is_path(cell) || self.is_marked(cell) {
                continue;
            }
            self.markers.push(ShrinkingWall {
                cell,
                remaining: SHRINK_WARNING_TIME,
            });
            marked += 1;
        }
        marked
    }

    /// Counts every marker down and removes those that reached zero.
    pub(crate) fn advance(&mut self, dt: Duration) -> Vec<CellCoord> {
        let mut expired = Vec::new();
        self.markers.retain_mut(|marker| {
            marker.remaining = marker.remaining.saturating_sub(dt);
            if marker.remaining.is_zero() {
                expired.push(marker.cell);
                false
            } else {
                true
            }
        });
        expired
    }
}
