//! The player's ship

use glam::Vec2;
use rand::Rng;

use super::body::{Body, Entity, Wrap};
use super::particle::{Particle, THRUST_COLOR};
use super::pickup::PowerUpKind;
use super::pool::Pool;
use super::projectile::Bullet;
use crate::consts::*;
use crate::{Bounds, heading, rotate_deg};

/// Continuous control intent for one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

/// The player ship
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub shielded: bool,
    /// Multiplier on thrust and top speed (1.0 = baseline)
    pub speed_boost: f32,
    pub multishot: bool,
    /// Countdown shared by whichever power-up is active
    pub powerup_timer: f32,
    /// Grace period after respawn; hazards are ignored while > 0
    pub invincible_timer: f32,
    /// Seconds until the gun may fire again
    pub shoot_cooldown: f32,
    /// Engine flame visible this step
    pub thrusting: bool,
    /// Exhaust particles owned by the ship
    pub thrust_particles: Pool<Particle>,
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::ZERO, PLAYER_RADIUS),
            shielded: false,
            speed_boost: 1.0,
            multishot: false,
            powerup_timer: 0.0,
            invincible_timer: 0.0,
            shoot_cooldown: 0.0,
            thrusting: false,
            thrust_particles: Pool::new(),
        }
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    /// Apply a collected power-up; the newest one always gets the full duration
    pub fn apply_powerup(&mut self, kind: PowerUpKind) {
        self.powerup_timer = POWERUP_DURATION;
        match kind {
            PowerUpKind::Shield => self.shielded = true,
            PowerUpKind::Speed => self.speed_boost = SPEED_BOOST,
            PowerUpKind::Multishot => self.multishot = true,
        }
    }

    /// Drop every power-up effect at once
    pub fn clear_powerups(&mut self) {
        self.shielded = false;
        self.speed_boost = 1.0;
        self.multishot = false;
        self.powerup_timer = 0.0;
    }

    /// Move to `pos`, stop, face up, and start the invincibility window
    pub fn respawn(&mut self, pos: Vec2) {
        self.body.pos = pos;
        self.body.vel = Vec2::ZERO;
        self.body.rotation = 0.0;
        self.invincible_timer = INVINCIBLE_DURATION;
    }

    /// Steering, thrust, drag, movement and timers for one step
    pub fn update<R: Rng>(&mut self, rng: &mut R, controls: Controls, dt: f32, bounds: Bounds) {
        if controls.turn_left {
            self.body.rotation -= PLAYER_ROTATION_SPEED * dt;
        }
        if controls.turn_right {
            self.body.rotation += PLAYER_ROTATION_SPEED * dt;
        }
        self.body.rotation = self.body.rotation.rem_euclid(360.0);

        self.thrusting = controls.thrust;
        if self.thrusting {
            let dir = heading(self.body.rotation);
            self.body.vel += dir * PLAYER_THRUST * self.speed_boost * dt;
            self.emit_exhaust(rng, dir);
        }

        let max_speed = PLAYER_MAX_SPEED * self.speed_boost;
        self.body.vel = self.body.vel.clamp_length_max(max_speed);
        self.body.vel *= PLAYER_DRAG;
        self.body.integrate(dt, bounds, Wrap::Both);

        self.shoot_cooldown = (self.shoot_cooldown - dt).max(0.0);
        if self.invincible_timer > 0.0 {
            self.invincible_timer = (self.invincible_timer - dt).max(0.0);
        }
        if self.powerup_timer > 0.0 {
            self.powerup_timer -= dt;
            if self.powerup_timer <= 0.0 {
                self.clear_powerups();
            }
        }
    }

    fn emit_exhaust<R: Rng>(&mut self, rng: &mut R, dir: Vec2) {
        let nozzle = self.body.pos - dir * self.body.radius;
        let jitter = rng.random_range(-20.0..20.0);
        let speed = rng.random_range(60.0..120.0);
        let vel = self.body.vel + rotate_deg(-dir, jitter) * speed;
        self.thrust_particles.push(Particle::new(nozzle, vel, THRUST_COLOR));
    }

    /// Fire if the gun is ready: one bullet, or three with multishot
    pub fn shoot(&mut self) -> Vec<Bullet> {
        if self.shoot_cooldown > 0.0 {
            return Vec::new();
        }
        self.shoot_cooldown = PLAYER_SHOOT_COOLDOWN;

        let offsets: &[f32] = if self.multishot {
            &[0.0, -MULTISHOT_SPREAD, MULTISHOT_SPREAD]
        } else {
            &[0.0]
        };
        offsets
            .iter()
            .map(|offset| {
                let dir = heading(self.body.rotation + offset);
                let muzzle = self.body.pos + dir * (self.body.radius + 5.0);
                Bullet::new(muzzle, dir * BULLET_SPEED)
            })
            .collect()
    }

    /// Age and prune exhaust particles
    pub fn update_particles(&mut self, dt: f32, bounds: Bounds) {
        for particle in self.thrust_particles.iter_mut() {
            particle.advance(dt, bounds);
        }
        self.thrust_particles.commit();
    }
}
