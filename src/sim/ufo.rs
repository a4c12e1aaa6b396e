//! Enemy craft: flies horizontally and fires aimed shots at the player

use glam::Vec2;
use rand::Rng;

use super::body::{Body, Entity, Wrap};
use super::projectile::Bullet;
use crate::Bounds;
use crate::consts::{BULLET_SPEED, UFO_BULLET_SPEED_FACTOR, UFO_RADIUS, UFO_SHOOT_INTERVAL, UFO_SPEED};

#[derive(Debug, Clone)]
pub struct Ufo {
    pub body: Body,
    /// Seconds until the next shot
    pub shoot_cooldown: f32,
}

impl Entity for Ufo {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Ufo {
    /// Enters at `pos` heading left or right at random
    pub fn new<R: Rng>(rng: &mut R, pos: Vec2) -> Self {
        let vx = if rng.random_bool(0.5) { UFO_SPEED } else { -UFO_SPEED };
        Self {
            body: Body::new(pos, Vec2::new(vx, 0.0), UFO_RADIUS),
            shoot_cooldown: UFO_SHOOT_INTERVAL,
        }
    }

    /// Horizontal wrap only; the vertical coordinate is never constrained
    pub fn advance(&mut self, dt: f32, bounds: Bounds) {
        self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
        self.body.integrate(dt, bounds, Wrap::Horizontal);
    }

    /// Fire at `target` when the cooldown has elapsed
    ///
    /// A target sitting exactly on the craft has no aim direction; the shot
    /// is skipped and the gun stays ready.
    pub fn shoot(&mut self, target: Vec2) -> Option<Bullet> {
        if self.shoot_cooldown > 0.0 {
            return None;
        }
        let aim = (target - self.body.pos).normalize_or_zero();
        if aim == Vec2::ZERO {
            return None;
        }
        self.shoot_cooldown = UFO_SHOOT_INTERVAL;
        Some(Bullet::new(
            self.body.pos,
            aim * BULLET_SPEED * UFO_BULLET_SPEED_FACTOR,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_moves_horizontally_only() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut ufo = Ufo::new(&mut rng, Vec2::new(400.0, 0.0));
        for _ in 0..600 {
            ufo.advance(1.0 / 60.0, Bounds::default());
            assert_eq!(ufo.body.pos.y, 0.0);
            assert!(ufo.body.pos.x >= 0.0 && ufo.body.pos.x < 800.0);
        }
    }

    #[test]
    fn test_aimed_shot_and_cooldown() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut ufo = Ufo::new(&mut rng, Vec2::new(100.0, 600.0));
        assert!(ufo.shoot(Vec2::new(100.0, 300.0)).is_none());

        ufo.advance(UFO_SHOOT_INTERVAL, Bounds::default());
        let target = ufo.body.pos + Vec2::new(0.0, -300.0);
        let bullet = ufo.shoot(target).expect("gun should be ready");
        let dir = bullet.body.vel.normalize();
        assert!((dir - Vec2::new(0.0, -1.0)).length() < 1e-4);
        assert!((bullet.body.vel.length() - BULLET_SPEED * UFO_BULLET_SPEED_FACTOR).abs() < 1e-2);
        assert!(ufo.shoot(target).is_none());
    }

    #[test]
    fn test_zero_length_aim_is_skipped() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut ufo = Ufo::new(&mut rng, Vec2::new(100.0, 0.0));
        ufo.shoot_cooldown = 0.0;
        assert!(ufo.shoot(ufo.body.pos).is_none());
        assert_eq!(ufo.shoot_cooldown, 0.0);
    }
}
