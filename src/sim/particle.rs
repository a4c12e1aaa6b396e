//! Cosmetic particles: explosion debris and engine exhaust

use glam::Vec2;
use rand::Rng;

use super::body::{Body, Entity, Wrap, tick_lifetime};
use crate::consts::{PARTICLE_LIFETIME, PARTICLE_SPEED};
use crate::{Bounds, rotate_deg};

/// Explosion palette (RGB)
pub const PARTICLE_COLORS: [[u8; 3]; 4] = [
    [255, 165, 0],
    [255, 69, 0],
    [255, 255, 0],
    [255, 255, 255],
];

/// Exhaust color
pub const THRUST_COLOR: [u8; 3] = [255, 140, 0];

/// A particle for visual effects; never collides
#[derive(Debug, Clone)]
pub struct Particle {
    pub body: Body,
    pub color: [u8; 3],
    /// Seconds left; drives the fade-out
    pub life: f32,
}

impl Entity for Particle {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, color: [u8; 3]) -> Self {
        Self {
            body: Body::new(pos, vel, 0.0),
            color,
            life: PARTICLE_LIFETIME,
        }
    }

    /// Debris with a random radial velocity and palette color
    pub fn explosion<R: Rng>(rng: &mut R, pos: Vec2) -> Self {
        let angle = rng.random_range(0.0..360.0);
        let speed = rng.random_range(50.0..PARTICLE_SPEED);
        let color = PARTICLE_COLORS[rng.random_range(0..PARTICLE_COLORS.len())];
        Self::new(pos, rotate_deg(Vec2::new(speed, 0.0), angle), color)
    }

    /// Opacity in [0, 1]
    pub fn alpha(&self) -> f32 {
        (self.life / PARTICLE_LIFETIME).clamp(0.0, 1.0)
    }

    /// Draw size shrinks with the fade
    pub fn size(&self) -> f32 {
        (5.0 * self.alpha()).max(1.0)
    }

    pub fn advance(&mut self, dt: f32, bounds: Bounds) {
        tick_lifetime(&mut self.body, &mut self.life, dt);
        self.body.integrate(dt, bounds, Wrap::Both);
    }
}

/// Burst of explosion debris
pub fn explosion<R: Rng>(rng: &mut R, pos: Vec2, count: usize) -> Vec<Particle> {
    (0..count).map(|_| Particle::explosion(rng, pos)).collect()
}
