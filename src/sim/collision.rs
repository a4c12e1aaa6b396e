//! Collision detection and response
//!
//! All tests are circle-circle. Resolution runs in a fixed order each step:
//! player bullets against asteroids, then against UFOs, pickups, and finally
//! the hazards that cost the player a life. Entities killed earlier in the
//! pass are skipped by later phases; spawns (split children, debris, drops)
//! are deferred to the end of the step.

use rand::Rng;

use super::asteroid::Strike;
use super::body::{Entity, circles_overlap};
use super::particle;
use super::pickup::{PowerUp, PowerUpKind};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Per-pass bookkeeping
#[derive(Debug, Default)]
struct Pass {
    /// At most one life is lost per step no matter how many hazards overlap
    life_lost: bool,
}

/// Run every collision phase for the current step
///
/// Returns `true` if the player lost a life.
pub fn check_collisions(state: &mut GameState) -> bool {
    let mut pass = Pass::default();

    bullets_vs_asteroids(state);
    bullets_vs_ufos(state);
    player_vs_powerups(state);
    player_vs_asteroids(state, &mut pass);
    player_vs_ufos(state, &mut pass);
    enemy_fire_vs_player(state, &mut pass);

    pass.life_lost
}

fn bullets_vs_asteroids(state: &mut GameState) {
    for bi in 0..state.bullets.len() {
        let bullet = &state.bullets[bi];
        if !bullet.is_active() {
            continue;
        }
        let (pos, radius) = (bullet.body.pos, bullet.body.radius);

        // A bullet is spent on the first rock it touches
        let Some(ai) = state
            .asteroids
            .iter()
            .position(|a| a.is_active() && circles_overlap(pos, radius, a.body.pos, a.body.radius))
        else {
            continue;
        };

        state.bullets[bi].body.kill();
        match state.asteroids[ai].strike() {
            Strike::Damaged => {
                let pos = state.asteroids[ai].body.pos;
                state.events.push(GameEvent::AsteroidDamaged { pos });
            }
            Strike::Destroyed => destroy_asteroid(state, ai, true),
        }
    }
}

/// Score, split, debris and an optional power-up drop for a dead asteroid
fn destroy_asteroid(state: &mut GameState, index: usize, may_drop: bool) {
    state.asteroids[index].body.kill();

    let asteroid = &state.asteroids[index];
    let pos = asteroid.body.pos;
    let size = asteroid.size;
    let score = asteroid.score_value();

    let children = state.asteroids[index].split(&mut state.rng);
    state.asteroids.defer_all(children);

    let debris = particle::explosion(&mut state.rng, pos, PARTICLE_COUNT_EXPLODE);
    state.particles.defer_all(debris);

    if may_drop && state.rng.random_bool(POWERUP_SPAWN_CHANCE) {
        let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
        log::debug!("Power-up drop: {:?} at ({:.0}, {:.0})", kind, pos.x, pos.y);
        state.powerups.defer(PowerUp::new(pos, kind));
    }

    state.score += score;
    state.events.push(GameEvent::AsteroidDestroyed { pos, size, score });
}

fn bullets_vs_ufos(state: &mut GameState) {
    for bi in 0..state.bullets.len() {
        let bullet = &state.bullets[bi];
        if !bullet.is_active() {
            continue;
        }
        let (pos, radius) = (bullet.body.pos, bullet.body.radius);

        let Some(ui) = state
            .ufos
            .iter()
            .position(|u| u.is_active() && circles_overlap(pos, radius, u.body.pos, u.body.radius))
        else {
            continue;
        };

        state.bullets[bi].body.kill();
        state.ufos[ui].body.kill();
        let ufo_pos = state.ufos[ui].body.pos;

        let debris = particle::explosion(&mut state.rng, ufo_pos, PARTICLE_COUNT_EXPLODE);
        state.particles.defer_all(debris);
        state.score += UFO_SCORE;
        state.events.push(GameEvent::UfoDestroyed {
            pos: ufo_pos,
            score: UFO_SCORE,
        });
    }
}

fn player_vs_powerups(state: &mut GameState) {
    for pi in 0..state.powerups.len() {
        let powerup = &state.powerups[pi];
        if !powerup.is_active() || !powerup.body.overlaps(&state.player.body) {
            continue;
        }
        let kind = powerup.kind;
        state.powerups[pi].body.kill();
        state.player.apply_powerup(kind);
        state.events.push(GameEvent::PowerUpCollected(kind));
    }
}

fn player_vs_asteroids(state: &mut GameState, pass: &mut Pass) {
    if state.player.is_invincible() {
        return;
    }
    let player = &state.player.body;
    let Some(ai) = state
        .asteroids
        .iter()
        .position(|a| a.is_active() && a.body.overlaps(player))
    else {
        return;
    };

    if state.player.shielded {
        state.player.shielded = false;
        state.events.push(GameEvent::ShieldAbsorbed);
        destroy_asteroid(state, ai, false);
    } else {
        lose_life(state, pass);
    }
}

fn player_vs_ufos(state: &mut GameState, pass: &mut Pass) {
    if state.player.is_invincible() {
        return;
    }
    let player = &state.player.body;
    if state.ufos.live().any(|u| u.body.overlaps(player)) {
        lose_life(state, pass);
    }
}

fn enemy_fire_vs_player(state: &mut GameState, pass: &mut Pass) {
    if state.player.is_invincible() {
        return;
    }
    let player = &state.player.body;
    let Some(bi) = state
        .ufo_bullets
        .iter()
        .position(|b| b.is_active() && b.body.overlaps(player))
    else {
        return;
    };
    state.ufo_bullets[bi].body.kill();
    lose_life(state, pass);
}

fn lose_life(state: &mut GameState, pass: &mut Pass) {
    if pass.life_lost {
        return;
    }
    pass.life_lost = true;

    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::PlayerHit {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        state.game_over = true;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over at level {} with {} points", state.level, state.score);
    } else {
        state.respawn_player();
        log::debug!("Player hit, {} lives left", state.lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crate::sim::asteroid::{Asteroid, AsteroidKind, AsteroidSize};
    use crate::sim::projectile::Bullet;
    use crate::sim::ufo::Ufo;
    use glam::Vec2;

    /// A state with nothing on the field but the ship
    fn empty_state() -> GameState {
        let mut state = GameState::new(42, Difficulty::Normal);
        state.asteroids.clear();
        state
    }

    fn rock_at(state: &mut GameState, pos: Vec2, size: AsteroidSize, kind: AsteroidKind) {
        let mut rock = Asteroid::new(&mut state.rng, pos, size, kind);
        rock.body.vel = Vec2::ZERO;
        state.asteroids.push(rock);
    }

    #[test]
    fn test_bullet_destroys_asteroid_and_splits() {
        let mut state = empty_state();
        let pos = Vec2::new(100.0, 100.0);
        rock_at(&mut state, pos, AsteroidSize::Large, AsteroidKind::Normal);
        state.bullets.push(Bullet::new(pos, Vec2::ZERO));

        check_collisions(&mut state);

        assert_eq!(state.score, 20);
        assert!(!state.bullets[0].is_active());
        assert!(!state.asteroids[0].is_active());
        // Children are not part of this step
        assert_eq!(state.asteroids.pending_count(), 2);
        assert_eq!(state.particles.pending_count(), PARTICLE_COUNT_EXPLODE);

        state.commit();
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.asteroids.iter().all(|a| a.size == AsteroidSize::Medium));
    }

    #[test]
    fn test_bullet_hits_only_one_asteroid() {
        let mut state = empty_state();
        let pos = Vec2::new(100.0, 100.0);
        rock_at(&mut state, pos, AsteroidSize::Small, AsteroidKind::Normal);
        rock_at(&mut state, pos, AsteroidSize::Small, AsteroidKind::Normal);
        state.bullets.push(Bullet::new(pos, Vec2::ZERO));

        check_collisions(&mut state);

        assert_eq!(state.asteroids.active_count(), 1);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_armored_needs_two_hits() {
        let mut state = empty_state();
        let pos = Vec2::new(100.0, 100.0);
        rock_at(&mut state, pos, AsteroidSize::Medium, AsteroidKind::armored());

        state.bullets.push(Bullet::new(pos, Vec2::ZERO));
        check_collisions(&mut state);
        assert!(state.asteroids[0].is_active());
        assert_eq!(state.asteroids[0].hitpoints(), 1);
        assert_eq!(state.score, 0);
        assert!(matches!(state.events.last(), Some(GameEvent::AsteroidDamaged { .. })));

        state.commit();
        state.bullets.push(Bullet::new(pos, Vec2::ZERO));
        check_collisions(&mut state);
        assert!(!state.asteroids[0].is_active());
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_bullet_kills_ufo() {
        let mut state = empty_state();
        let pos = Vec2::new(100.0, 100.0);
        let ufo = Ufo::new(&mut state.rng, pos);
        state.ufos.push(ufo);
        state.bullets.push(Bullet::new(pos, Vec2::ZERO));

        check_collisions(&mut state);

        assert!(!state.ufos[0].is_active());
        assert_eq!(state.score, UFO_SCORE);
    }

    #[test]
    fn test_shield_absorbs_asteroid() {
        let mut state = empty_state();
        let center = state.player.body.pos;
        state.player.apply_powerup(PowerUpKind::Shield);
        rock_at(&mut state, center, AsteroidSize::Large, AsteroidKind::Normal);

        let lost = check_collisions(&mut state);

        assert!(!lost);
        assert_eq!(state.lives, 3);
        assert!(!state.player.shielded);
        assert!(!state.asteroids[0].is_active());
        assert_eq!(state.score, 20);
        assert!(state.events.contains(&GameEvent::ShieldAbsorbed));
    }

    #[test]
    fn test_unshielded_hit_costs_life_and_respawns() {
        let mut state = empty_state();
        state.player.body.pos = Vec2::new(50.0, 50.0);
        rock_at(&mut state, Vec2::new(50.0, 50.0), AsteroidSize::Large, AsteroidKind::Normal);

        assert!(check_collisions(&mut state));
        assert_eq!(state.lives, 2);
        assert_eq!(state.player.body.pos, state.bounds.center());
        assert!(state.player.is_invincible());
        // The asteroid survives the collision
        assert!(state.asteroids[0].is_active());
    }

    #[test]
    fn test_one_life_per_step() {
        let mut state = empty_state();
        let center = state.player.body.pos;
        rock_at(&mut state, center, AsteroidSize::Large, AsteroidKind::Normal);
        let ufo = Ufo::new(&mut state.rng, center);
        state.ufos.push(ufo);
        state.ufo_bullets.push(Bullet::new(center, Vec2::ZERO));

        check_collisions(&mut state);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_one_life_per_step_on_last_life() {
        let mut state = empty_state();
        state.lives = 1;
        let center = state.player.body.pos;
        rock_at(&mut state, center, AsteroidSize::Large, AsteroidKind::Normal);
        let ufo = Ufo::new(&mut state.rng, center);
        state.ufos.push(ufo);
        state.ufo_bullets.push(Bullet::new(center, Vec2::ZERO));

        check_collisions(&mut state);
        assert_eq!(state.lives, 0);
        assert!(state.game_over);
        let game_overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_invincible_player_ignores_hazards() {
        let mut state = empty_state();
        let center = state.player.body.pos;
        state.player.invincible_timer = 1.0;
        rock_at(&mut state, center, AsteroidSize::Large, AsteroidKind::Normal);
        state.ufo_bullets.push(Bullet::new(center, Vec2::ZERO));

        assert!(!check_collisions(&mut state));
        assert_eq!(state.lives, 3);
        assert!(state.asteroids[0].is_active());
        assert!(state.ufo_bullets[0].is_active());
    }

    #[test]
    fn test_invincible_player_still_collects_powerups() {
        let mut state = empty_state();
        let center = state.player.body.pos;
        state.player.invincible_timer = 1.0;
        state.powerups.push(PowerUp::new(center, PowerUpKind::Multishot));

        check_collisions(&mut state);
        assert!(state.player.multishot);
        assert!(!state.powerups[0].is_active());
        assert_eq!(
            state.events,
            vec![GameEvent::PowerUpCollected(PowerUpKind::Multishot)]
        );
    }

    #[test]
    fn test_destroyed_asteroid_can_drop_powerup() {
        let mut state = empty_state();
        // 0.9^500 makes a dropless run practically impossible
        for i in 0..500 {
            let pos = Vec2::new(40.0 + (i % 10) as f32 * 60.0, 60.0);
            rock_at(&mut state, pos, AsteroidSize::Small, AsteroidKind::Normal);
            state.bullets.push(Bullet::new(pos, Vec2::ZERO));
            check_collisions(&mut state);

            if state.powerups.pending_count() > 0 {
                // Not collectible until the step commits
                assert_eq!(state.powerups.len(), 0);
                state.commit();
                assert_eq!(state.powerups.len(), 1);
                assert_eq!(state.powerups[0].body.pos, pos);
                return;
            }
            state.commit();
        }
        panic!("no power-up dropped in 500 kills");
    }

    #[test]
    fn test_shield_kill_never_drops() {
        let mut state = empty_state();
        let center = state.player.body.pos;
        for _ in 0..200 {
            state.player.apply_powerup(PowerUpKind::Shield);
            rock_at(&mut state, center, AsteroidSize::Small, AsteroidKind::Normal);
            check_collisions(&mut state);
            assert!(!state.player.shielded);
            assert_eq!(state.powerups.pending_count(), 0);
            state.commit();
        }
        assert_eq!(state.lives, 3);
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_hazards_count_again_after_invincibility() {
        let mut state = empty_state();
        let center = state.player.body.pos;
        rock_at(&mut state, center, AsteroidSize::Large, AsteroidKind::Normal);

        state.player.invincible_timer = 0.5;
        assert!(!check_collisions(&mut state));
        assert_eq!(state.lives, 3);

        state.player.invincible_timer = 0.0;
        assert!(check_collisions(&mut state));
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_enemy_bullet_is_consumed() {
        let mut state = empty_state();
        let center = state.player.body.pos;
        state.ufo_bullets.push(Bullet::new(center, Vec2::ZERO));

        check_collisions(&mut state);
        assert!(!state.ufo_bullets[0].is_active());
        assert_eq!(state.lives, 2);
    }
}
