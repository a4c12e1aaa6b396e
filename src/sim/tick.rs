//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::body::Entity;
use super::collision::check_collisions;
use super::player::Controls;
use super::spawner;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::heading;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    /// Fire (held; the gun cooldown limits the rate)
    pub fire: bool,
    /// Idle/demo mode - autopilot flies the ship
    pub idle_mode: bool,
}

impl TickInput {
    pub fn controls(&self) -> Controls {
        Controls {
            turn_left: self.turn_left,
            turn_right: self.turn_right,
            thrust: self.thrust,
            fire: self.fire,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Nothing moves once the run has ended
    if state.game_over {
        return;
    }
    state.time_ticks += 1;

    let controls = if input.idle_mode {
        autopilot(state)
    } else {
        input.controls()
    };
    let bounds = state.bounds;

    // Ship
    state.player.update(&mut state.rng, controls, dt, bounds);
    if controls.fire {
        let shots = state.player.shoot();
        if !shots.is_empty() {
            state.events.push(GameEvent::ShotFired {
                bullets: shots.len(),
            });
            for bullet in shots {
                state.bullets.push(bullet);
            }
        }
    }

    // Free-flying entities
    for bullet in state.bullets.iter_mut() {
        bullet.advance(dt, bounds);
    }
    for asteroid in state.asteroids.iter_mut() {
        asteroid.advance(dt, bounds);
    }
    for powerup in state.powerups.iter_mut() {
        powerup.advance(dt, bounds);
    }

    // Enemy craft
    if let Some(ufo) = spawner::maybe_spawn_ufo(
        &mut state.rng,
        state.level,
        state.ufos.active_count(),
        state.difficulty.ufo_spawn_chance(),
        bounds,
    ) {
        log::debug!("UFO entering at ({:.0}, {:.0})", ufo.body.pos.x, ufo.body.pos.y);
        state.ufos.push(ufo);
    }
    let target = state.player.body.pos;
    for ufo in state.ufos.iter_mut() {
        if !ufo.is_active() {
            continue;
        }
        ufo.advance(dt, bounds);
        if let Some(bullet) = ufo.shoot(target) {
            state.events.push(GameEvent::UfoFired { pos: ufo.body.pos });
            state.ufo_bullets.push(bullet);
        }
    }
    for bullet in state.ufo_bullets.iter_mut() {
        bullet.advance(dt, bounds);
    }

    check_collisions(state);

    // Cosmetic particles
    for particle in state.particles.iter_mut() {
        particle.advance(dt, bounds);
    }
    state.player.update_particles(dt, bounds);

    state.commit();

    if !state.game_over && state.asteroids.is_empty() {
        advance_level(state);
    }
}

/// Field cleared: next level, maybe a bonus life, and a fresh wave
fn advance_level(state: &mut GameState) {
    state.events.push(GameEvent::LevelComplete { level: state.level });
    state.level += 1;

    if state.level % BONUS_LIFE_EVERY == 0 {
        state.lives += 1;
        state.events.push(GameEvent::BonusLife { lives: state.lives });
    }

    state.spawn_wave();
    log::info!(
        "Level {} ({} asteroids, score {})",
        state.level,
        state.asteroids.len(),
        state.score
    );
}

/// Demo pilot: turn toward the nearest rock and fire once roughly aligned
fn autopilot(state: &GameState) -> Controls {
    let ship = state.player.body.pos;
    let nearest = state.asteroids.live().min_by(|a, b| {
        a.body
            .pos
            .distance_squared(ship)
            .partial_cmp(&b.body.pos.distance_squared(ship))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let Some(rock) = nearest else {
        return Controls::default();
    };

    let to_rock = rock.body.pos - ship;
    let wanted = to_rock.x.atan2(-to_rock.y).to_degrees();
    let diff = (wanted - state.player.body.rotation + 180.0).rem_euclid(360.0) - 180.0;

    Controls {
        turn_left: diff < -5.0,
        turn_right: diff > 5.0,
        thrust: false,
        fire: diff.abs() < 10.0 && heading(state.player.body.rotation).dot(to_rock) > 0.0,
    }
}
