//! Tunables and preferences
//!
//! Persisted in LocalStorage on the web; natively every load yields defaults.
//! Stored JSON may omit fields, which then take their default.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::storage;

const STORAGE_KEY: &str = "wonderlab_settings";

/// Playground settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Draw a circle ===
    /// Strokes shorter than this are refused
    pub min_stroke_points: usize,

    // === Crafting ===
    /// Anchor distance under which a dropped tile combines (pixels)
    pub collision_threshold: f64,
    /// Half-width of the spawn window around the workspace center
    pub spawn_jitter: f64,
    /// Pending combinations older than this give their tiles back
    pub combine_timeout_ms: f64,

    // === Particle field ===
    pub particle_count: usize,
    pub repel_radius: f64,
    pub repel_strength: f64,

    // === Accessibility ===
    /// Reduced motion (fewer particles)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_stroke_points: MIN_STROKE_POINTS,

            collision_threshold: COLLISION_THRESHOLD,
            spawn_jitter: SPAWN_JITTER,
            combine_timeout_ms: COMBINE_TIMEOUT_MS,

            particle_count: PARTICLE_COUNT,
            repel_radius: REPEL_RADIUS,
            repel_strength: REPEL_STRENGTH,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Particle count after accessibility preferences
    pub fn effective_particle_count(&self) -> usize {
        if self.reduced_motion {
            self.particle_count / 2
        } else {
            self.particle_count
        }
    }

    /// Parse stored JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Stored settings, or defaults if there are none
    pub fn load() -> Self {
        match storage::load(STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        if storage::save(STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert_eq!(s.min_stroke_points, 20);
        assert_eq!(s.collision_threshold, 60.0);
        assert_eq!(s.effective_particle_count(), 60);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"collision_threshold": 80.0}"#).unwrap();
        assert_eq!(s.collision_threshold, 80.0);
        assert_eq!(s.min_stroke_points, MIN_STROKE_POINTS);
        assert!(!s.reduced_motion);
    }

    #[test]
    fn test_corrupt_json_is_an_error() {
        assert!(Settings::from_json("not json").is_err());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_load_is_default() {
        assert_eq!(Settings::load(), Settings::default());
    }
}
