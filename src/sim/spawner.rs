//! Wave generation and enemy spawn gating

use glam::Vec2;
use rand::Rng;

use super::asteroid::{Asteroid, AsteroidKind, AsteroidSize};
use super::ufo::Ufo;
use crate::Bounds;
use crate::consts::*;

/// Number of large asteroids in a level's opening wave
pub fn wave_size(level: u32) -> usize {
    BASE_ASTEROIDS + level as usize * LEVEL_ASTEROID_INCREASE
}

/// Velocity multiplier applied to a level's opening wave
pub fn wave_speed_scale(level: u32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * SPEED_INCREASE_PER_LEVEL
}

/// Roll an asteroid type; faster rocks from level 2, armored from level 4
pub fn roll_kind<R: Rng>(rng: &mut R, level: u32) -> AsteroidKind {
    let roll: f32 = rng.random();
    if level >= 4 && roll < 0.15 {
        AsteroidKind::armored()
    } else if level >= 2 && (0.15..0.35).contains(&roll) {
        AsteroidKind::Fast
    } else {
        AsteroidKind::Normal
    }
}

/// Uniform point on the playfield at least `clearance` away from `avoid`
///
/// Bounded rejection sampling: after `SPAWN_MAX_ATTEMPTS` misses the last
/// sample is used as is.
pub fn sample_clear_point<R: Rng>(rng: &mut R, bounds: Bounds, avoid: Vec2, clearance: f32) -> Vec2 {
    let mut pos = Vec2::ZERO;
    for _ in 0..SPAWN_MAX_ATTEMPTS {
        pos = Vec2::new(
            rng.random_range(0.0..bounds.width),
            rng.random_range(0.0..bounds.height),
        );
        if pos.distance(avoid) > clearance {
            break;
        }
    }
    pos
}

/// Opening wave for `level`, placed clear of the player
pub fn spawn_wave<R: Rng>(rng: &mut R, level: u32, player_pos: Vec2, bounds: Bounds) -> Vec<Asteroid> {
    let scale = wave_speed_scale(level);
    (0..wave_size(level))
        .map(|_| {
            let pos = sample_clear_point(rng, bounds, player_pos, ASTEROID_SPAWN_DISTANCE);
            let kind = roll_kind(rng, level);
            let mut asteroid = Asteroid::new(rng, pos, AsteroidSize::Large, kind);
            asteroid.body.vel *= scale;
            asteroid
        })
        .collect()
}

/// Maybe launch a UFO this step
///
/// Gated on level, the concurrent cap, and a per-step draw against `chance`.
/// New craft enter on the top or bottom edge.
pub fn maybe_spawn_ufo<R: Rng>(
    rng: &mut R,
    level: u32,
    active_ufos: usize,
    chance: f64,
    bounds: Bounds,
) -> Option<Ufo> {
    if level < UFO_SPAWN_LEVEL || active_ufos >= UFO_MAX_ACTIVE {
        return None;
    }
    if !rng.random_bool(chance.clamp(0.0, 1.0)) {
        return None;
    }
    let y = if rng.random_bool(0.5) { 0.0 } else { bounds.height };
    let x = rng.random_range(0.0..bounds.width);
    Some(Ufo::new(rng, Vec2::new(x, y)))
}
