//! Bouncing particle field shown behind custom experiments
//!
//! Purely decorative. Particles drift, bounce off the canvas edges and are
//! pushed away from the pointer.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Point;
use crate::consts::*;
use crate::settings::Settings;

/// Particle palette (red, yellow, green, blue, purple, pink)
pub const PALETTE: [u32; 6] = [0xef4444, 0xeab308, 0x22c55e, 0x3b82f6, 0xa855f7, 0xec4899];

/// Pointer position used before the first move event (far off-canvas)
pub const POINTER_PARKED: DVec2 = DVec2::new(-1000.0, -1000.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Point,
    pub vel: DVec2,
    pub radius: f64,
    pub color: u32,
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    pub bounds: DVec2,
    pub pointer: Point,
    count: usize,
    repel_radius: f64,
    repel_strength: f64,
    rng: Pcg32,
}

impl ParticleField {
    pub fn new(seed: u64, width: f64, height: f64, settings: &Settings) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            bounds: DVec2::new(width, height),
            pointer: POINTER_PARKED,
            count: settings.effective_particle_count(),
            repel_radius: settings.repel_radius,
            repel_strength: settings.repel_strength,
            rng: Pcg32::seed_from_u64(seed),
        };
        field.respawn();
        field
    }

    /// Throw away every particle and scatter a fresh set over the canvas
    pub fn respawn(&mut self) {
        let bounds = self.bounds;
        self.particles = (0..self.count)
            .map(|_| {
                let pos = DVec2::new(
                    self.rng.random::<f64>() * bounds.x,
                    self.rng.random::<f64>() * bounds.y,
                );
                let vel = DVec2::new(
                    (self.rng.random::<f64>() - 0.5) * PARTICLE_SPEED_SPAN,
                    (self.rng.random::<f64>() - 0.5) * PARTICLE_SPEED_SPAN,
                );
                let radius = self.rng.random::<f64>() * PARTICLE_RADIUS_SPAN + PARTICLE_MIN_RADIUS;
                let color = PALETTE[self.rng.random_range(0..PALETTE.len())];
                Particle {
                    pos,
                    vel,
                    radius,
                    color,
                }
            })
            .collect();
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.bounds = DVec2::new(width, height);
    }

    pub fn set_pointer(&mut self, at: Point) {
        self.pointer = at;
    }

    /// Advance one animation frame
    pub fn step(&mut self) {
        let bounds = self.bounds;
        let pointer = self.pointer;
        for p in &mut self.particles {
            p.pos += p.vel;

            if p.pos.x < 0.0 || p.pos.x > bounds.x {
                p.vel.x = -p.vel.x;
            }
            if p.pos.y < 0.0 || p.pos.y > bounds.y {
                p.vel.y = -p.vel.y;
            }

            let to_pointer = pointer - p.pos;
            if to_pointer.length() < self.repel_radius {
                p.vel -= to_pointer * self.repel_strength;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> ParticleField {
        ParticleField::new(5, 800.0, 600.0, &Settings::default())
    }

    #[test]
    fn test_spawn_within_bounds() {
        let f = field();
        assert_eq!(f.len(), PARTICLE_COUNT);
        for p in &f.particles {
            assert!(p.pos.x >= 0.0 && p.pos.x <= 800.0);
            assert!(p.pos.y >= 0.0 && p.pos.y <= 600.0);
            assert!(p.vel.x.abs() <= 3.0 && p.vel.y.abs() <= 3.0);
            assert!(p.radius >= 2.0 && p.radius <= 7.0);
            assert!(PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn test_bounce_off_wall() {
        let mut f = field();
        f.particles = vec![Particle {
            pos: DVec2::new(799.0, 300.0),
            vel: DVec2::new(2.0, 0.0),
            radius: 3.0,
            color: PALETTE[0],
        }];
        f.step();
        assert_eq!(f.particles[0].pos.x, 801.0);
        assert_eq!(f.particles[0].vel.x, -2.0);
    }

    #[test]
    fn test_pointer_repels() {
        let mut f = field();
        f.particles = vec![Particle {
            pos: DVec2::new(400.0, 300.0),
            vel: DVec2::ZERO,
            radius: 3.0,
            color: PALETTE[1],
        }];
        f.set_pointer(DVec2::new(450.0, 300.0));
        f.step();
        // Pushed left, away from the pointer
        assert!((f.particles[0].vel.x - (-0.25)).abs() < 1e-12);
        assert_eq!(f.particles[0].vel.y, 0.0);
    }

    #[test]
    fn test_parked_pointer_has_no_effect() {
        let mut f = field();
        let before: Vec<DVec2> = f.particles.iter().map(|p| p.vel).collect();
        f.step();
        for (p, v) in f.particles.iter().zip(before) {
            // Only wall bounces may flip a component
            assert_eq!(p.vel.x.abs(), v.x.abs());
            assert_eq!(p.vel.y.abs(), v.y.abs());
        }
    }

    #[test]
    fn test_resize_then_respawn_uses_new_bounds() {
        let mut f = field();
        f.resize(50.0, 40.0);
        f.respawn();
        assert_eq!(f.len(), PARTICLE_COUNT);
        assert!(f.particles.iter().all(|p| p.pos.x <= 50.0 && p.pos.y <= 40.0));
    }

    #[test]
    fn test_reduced_motion_halves_count() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let f = ParticleField::new(1, 100.0, 100.0, &settings);
        assert_eq!(f.len(), PARTICLE_COUNT / 2);
    }
}
