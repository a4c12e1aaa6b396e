//! Asteroid Blaster - a wrap-around arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, level flow)
//! - `app`: Application state machine (menu, playing, game over, names, scores)
//! - `platform`: Raw key input collapsed into control intent
//! - `persistence`: Key/value JSON storage backends
//! - `highscores` / `settings`: Persisted top-10 list and startup configuration
//! - `audio`: Sound cue sink fed by simulation events

pub mod app;
pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use app::{App, AppState};
pub use highscores::HighScores;
pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame time fed into the accumulator
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_ROTATION_SPEED: f32 = 300.0; // degrees per second
    pub const PLAYER_THRUST: f32 = 200.0; // pixels per second squared
    pub const PLAYER_MAX_SPEED: f32 = 300.0;
    /// Per-tick velocity damping
    pub const PLAYER_DRAG: f32 = 0.99;
    pub const PLAYER_SHOOT_COOLDOWN: f32 = 0.2;
    /// Post-respawn grace period (seconds)
    pub const INVINCIBLE_DURATION: f32 = 2.0;

    /// Bullets
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const BULLET_SPEED: f32 = 400.0;
    pub const BULLET_LIFETIME: f32 = 2.0;
    /// Angular offset of the side bullets when multishot is active (degrees)
    pub const MULTISHOT_SPREAD: f32 = 15.0;

    /// Waves
    pub const INITIAL_LEVEL: u32 = 1;
    pub const BASE_ASTEROIDS: usize = 4;
    pub const LEVEL_ASTEROID_INCREASE: usize = 2;
    /// Minimum distance between a fresh asteroid and the player
    pub const ASTEROID_SPAWN_DISTANCE: f32 = 100.0;
    pub const SPEED_INCREASE_PER_LEVEL: f32 = 0.1;
    /// Rejection-sampling cap when placing wave asteroids
    pub const SPAWN_MAX_ATTEMPTS: u32 = 1000;
    /// A bonus life is granted on every level divisible by this
    pub const BONUS_LIFE_EVERY: u32 = 5;

    /// Asteroid tiers (large, medium, small)
    pub const ASTEROID_LARGE_RADIUS: f32 = 40.0;
    pub const ASTEROID_MEDIUM_RADIUS: f32 = 20.0;
    pub const ASTEROID_SMALL_RADIUS: f32 = 10.0;
    /// Base travel speed (pixels per second) before type and level scaling
    pub const ASTEROID_LARGE_SPEED: f32 = 50.0;
    pub const ASTEROID_MEDIUM_SPEED: f32 = 80.0;
    pub const ASTEROID_SMALL_SPEED: f32 = 120.0;
    pub const ASTEROID_LARGE_SCORE: u32 = 20;
    pub const ASTEROID_MEDIUM_SCORE: u32 = 50;
    pub const ASTEROID_SMALL_SCORE: u32 = 100;
    /// Asteroid types
    pub const FAST_SPEED_MULTIPLIER: f32 = 1.5;
    pub const FAST_SCORE_MULTIPLIER: f32 = 1.2;
    pub const ARMORED_SCORE_MULTIPLIER: f32 = 2.0;
    /// Hit points of a fresh armored asteroid
    pub const ARMORED_HITPOINTS: u8 = 2;

    /// Enemy craft
    pub const UFO_RADIUS: f32 = 15.0;
    pub const UFO_SPEED: f32 = 100.0;
    pub const UFO_SHOOT_INTERVAL: f32 = 2.0;
    pub const UFO_SCORE: u32 = 200;
    pub const UFO_SPAWN_LEVEL: u32 = 3;
    pub const UFO_MAX_ACTIVE: usize = 2;
    /// UFO bullets fly slower than the player's
    pub const UFO_BULLET_SPEED_FACTOR: f32 = 0.7;

    /// Power-ups
    pub const POWERUP_RADIUS: f32 = 10.0;
    /// Effect duration once collected, and pickup lifetime on the field
    pub const POWERUP_DURATION: f32 = 10.0;
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.1;
    pub const SPEED_BOOST: f32 = 1.5;

    /// Particles
    pub const PARTICLE_LIFETIME: f32 = 1.0;
    pub const PARTICLE_SPEED: f32 = 150.0;
    pub const PARTICLE_COUNT_EXPLODE: usize = 10;
}

/// Playfield size; entities wrap toroidally inside `[0, width) x [0, height)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: consts::SCREEN_WIDTH,
            height: consts::SCREEN_HEIGHT,
        }
    }
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Wrap a coordinate into `[0, max)`
#[inline]
pub fn wrap_coord(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    let wrapped = value.rem_euclid(max);
    // rem_euclid can round up to `max` for tiny negative inputs
    if wrapped >= max { 0.0 } else { wrapped }
}

/// Rotate a vector by `degrees` (counter-clockwise in math coordinates)
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Unit heading for a ship rotation; 0 degrees points up the screen
#[inline]
pub fn heading(rotation: f32) -> Vec2 {
    rotate_deg(Vec2::new(0.0, -1.0), rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_coord() {
        assert_eq!(wrap_coord(-1.0, 800.0), 799.0);
        assert_eq!(wrap_coord(801.0, 800.0), 1.0);
        assert_eq!(wrap_coord(800.0, 800.0), 0.0);
        assert_eq!(wrap_coord(400.0, 800.0), 400.0);
        let tiny = wrap_coord(-1e-9, 800.0);
        assert!((0.0..800.0).contains(&tiny));
    }

    #[test]
    fn test_heading() {
        let up = heading(0.0);
        assert!(up.x.abs() < 1e-5 && (up.y + 1.0).abs() < 1e-5);
        let right = heading(90.0);
        assert!((right.x - 1.0).abs() < 1e-5 && right.y.abs() < 1e-5);
    }
}
