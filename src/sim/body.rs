//! Kinematic record shared by every mobile entity

use glam::Vec2;

use crate::{Bounds, wrap_coord};

/// How an entity re-enters the playfield after crossing an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    /// Toroidal: both axes wrap independently
    Both,
    /// Left/right only; vertical position is left untouched
    Horizontal,
}

/// Position, velocity, rotation (degrees), collision radius and liveness
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub radius: f32,
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            rotation: 0.0,
            radius: radius.max(0.0),
            active: true,
        }
    }

    /// Integrate position by `vel * dt`, then wrap
    pub fn integrate(&mut self, dt: f32, bounds: Bounds, wrap: Wrap) {
        self.pos += self.vel * dt;
        self.wrap(bounds, wrap);
    }

    pub fn wrap(&mut self, bounds: Bounds, wrap: Wrap) {
        self.pos.x = wrap_coord(self.pos.x, bounds.width);
        if wrap == Wrap::Both {
            self.pos.y = wrap_coord(self.pos.y, bounds.height);
        }
    }

    /// Circle-circle overlap: distance between centers < sum of radii
    #[inline]
    pub fn overlaps(&self, other: &Body) -> bool {
        circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }

    #[inline]
    pub fn kill(&mut self) {
        self.active = false;
    }
}

#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Anything stored in an entity pool
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    #[inline]
    fn is_active(&self) -> bool {
        self.body().active
    }
}

/// Count down a lifetime timer; deactivates the body on expiry
#[inline]
pub(crate) fn tick_lifetime(body: &mut Body, remaining: &mut f32, dt: f32) {
    *remaining -= dt;
    if *remaining <= 0.0 {
        body.active = false;
    }
}
