//! Bullets fired by the player or by enemy craft

use glam::Vec2;

use super::body::{Body, Entity, Wrap, tick_lifetime};
use crate::Bounds;
use crate::consts::{BULLET_LIFETIME, BULLET_RADIUS};

/// A bullet travels at the velocity it was fired with until its lifetime runs out
#[derive(Debug, Clone)]
pub struct Bullet {
    pub body: Body,
    /// Seconds left before the bullet fizzles
    pub remaining: f32,
}

impl Entity for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            body: Body::new(pos, vel, BULLET_RADIUS),
            remaining: BULLET_LIFETIME,
        }
    }

    /// Seconds since the bullet was fired
    pub fn age(&self) -> f32 {
        BULLET_LIFETIME - self.remaining
    }

    pub fn advance(&mut self, dt: f32, bounds: Bounds) {
        tick_lifetime(&mut self.body, &mut self.remaining, dt);
        if self.body.active {
            self.body.integrate(dt, bounds, Wrap::Both);
        }
    }
}
