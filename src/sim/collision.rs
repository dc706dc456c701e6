//! Drop-target detection for dragged tiles
//!
//! A dropped tile combines with the FIRST other tile (in stacking order, bottom
//! to top) whose anchor is strictly closer than the threshold. This is not a
//! nearest-neighbour search: a farther tile lower in the stack wins over a
//! closer one above it.

use super::tile::{TileId, TileInstance};
use crate::Point;

/// Result of a drop-target search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropHit {
    /// Index of the target in the tile slice
    pub index: usize,
    pub target: TileId,
    /// Anchor-to-anchor distance
    pub distance: f64,
}

/// Whether two anchors are close enough to combine
#[inline]
pub fn within_reach(a: Point, b: Point, threshold: f64) -> bool {
    a.distance(b) < threshold
}

/// Find the tile `dragged` was dropped on, if any
pub fn find_drop_target(tiles: &[TileInstance], dragged: TileId, threshold: f64) -> Option<DropHit> {
    let dropped = tiles.iter().find(|t| t.id == dragged)?;

    tiles
        .iter()
        .enumerate()
        .filter(|(_, t)| t.id != dragged)
        .find(|(_, t)| within_reach(t.pos, dropped.pos, threshold))
        .map(|(index, t)| DropHit {
            index,
            target: t.id,
            distance: t.pos.distance(dropped.pos),
        })
}
