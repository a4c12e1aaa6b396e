//! Power-up pickups dropped by destroyed asteroids

use glam::Vec2;
use serde::Serialize;

use super::body::{Body, Entity, Wrap, tick_lifetime};
use crate::Bounds;
use crate::consts::{POWERUP_DURATION, POWERUP_RADIUS};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    Shield,
    Speed,
    Multishot,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Shield, PowerUpKind::Speed, PowerUpKind::Multishot];

    /// Display color (RGB)
    pub fn color(&self) -> [u8; 3] {
        match self {
            PowerUpKind::Shield => [0, 170, 255],
            PowerUpKind::Speed => [0, 255, 100],
            PowerUpKind::Multishot => [255, 0, 200],
        }
    }
}

/// A pickup entity; stationary, expires if not collected in time
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    pub remaining: f32,
}

impl Entity for PowerUp {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            body: Body::new(pos, Vec2::ZERO, POWERUP_RADIUS),
            kind,
            remaining: POWERUP_DURATION,
        }
    }

    pub fn advance(&mut self, dt: f32, bounds: Bounds) {
        tick_lifetime(&mut self.body, &mut self.remaining, dt);
        self.body.integrate(dt, bounds, Wrap::Both);
    }
}
