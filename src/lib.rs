//! WonderLab - a playground of small browser toys and AI experiments
//!
//! Core modules:
//! - `sim`: Deterministic toy logic (circle scoring, crafting workspace, particles, quest, budget)
//! - `services`: Generative text seam and the Gemini adapter
//! - `app`: View routing, experiment catalog and the demo admin session
//! - `markup`: HTML for the lists the page rebuilds (inventory, catalog, shop)
//! - `settings`: Tunables persisted to LocalStorage
//! - `highscores`: Local best circle scores
//! - `storage`: LocalStorage JSON helpers shared by the two above

pub mod app;
pub mod highscores;
pub mod markup;
pub mod services;
pub mod settings;
pub mod sim;
mod storage;

pub use highscores::HighScores;
pub use settings::Settings;

use glam::DVec2;

/// A point in canvas-local pixel space
pub type Point = DVec2;

/// Toy configuration constants
pub mod consts {
    /// Strokes shorter than this are refused by the circle scorer
    pub const MIN_STROKE_POINTS: usize = 20;
    /// Wobble (percent of radius) is weighted this much against the score
    pub const WOBBLE_WEIGHT: f64 = 2.0;
    /// Closure gap of one radius costs this many points, and never more
    pub const CLOSURE_PENALTY_CAP: f64 = 50.0;

    /// Two tiles closer than this (pixels) combine on drop
    pub const COLLISION_THRESHOLD: f64 = 60.0;
    /// Half-width of the random window new tiles spawn in
    pub const SPAWN_JITTER: f64 = 20.0;
    /// Offset from a tile's anchor to its visual center
    pub const TILE_HALF_WIDTH: f64 = 50.0;
    pub const TILE_HALF_HEIGHT: f64 = 25.0;
    /// Spawn position when the workspace has not been measured yet
    pub const FALLBACK_SPAWN: (f64, f64) = (100.0, 100.0);
    /// Pending combinations older than this give their tiles back
    pub const COMBINE_TIMEOUT_MS: f64 = 15_000.0;

    /// Particle field defaults
    pub const PARTICLE_COUNT: usize = 60;
    pub const PARTICLE_SPEED_SPAN: f64 = 6.0;
    pub const PARTICLE_MIN_RADIUS: f64 = 2.0;
    pub const PARTICLE_RADIUS_SPAN: f64 = 5.0;
    pub const REPEL_RADIUS: f64 = 100.0;
    pub const REPEL_STRENGTH: f64 = 0.005;
}

/// Round to one decimal place, the precision scores are shown with
#[inline]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean of a set of points (None when empty)
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(DVec2::ZERO, |acc, p| acc + *p);
    Some(sum / points.len() as f64)
}

/// Point halfway between two others
#[inline]
pub fn midpoint(a: Point, b: Point) -> Point {
    (a + b) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(97.34), 97.3);
        assert_eq!(round_to_tenth(97.35001), 97.4);
        assert_eq!(round_to_tenth(100.0), 100.0);
    }

    #[test]
    fn test_centroid() {
        assert!(centroid(&[]).is_none());
        let c = centroid(&[DVec2::new(0.0, 0.0), DVec2::new(10.0, 20.0)]).unwrap();
        assert_eq!(c, DVec2::new(5.0, 10.0));
    }

    #[test]
    fn test_midpoint() {
        let m = midpoint(DVec2::new(100.0, 100.0), DVec2::new(130.0, 120.0));
        assert_eq!(m, DVec2::new(115.0, 110.0));
    }
}
