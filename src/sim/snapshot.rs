//! Read-only view of a game state for drawing
//!
//! The renderer never touches `GameState`; it gets one of these per frame.

use glam::Vec2;
use serde::Serialize;

use super::asteroid::{AsteroidKind, AsteroidSize};
use super::body::Entity;
use super::pickup::PowerUpKind;
use super::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub rotation: f32,
    pub radius: f32,
    pub thrusting: bool,
    pub shielded: bool,
    /// Drawn blinking while set
    pub invincible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AsteroidView {
    pub size: AsteroidSize,
    pub kind: AsteroidKind,
    /// Polygon in world space
    pub outline: Vec<Vec2>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CircleView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PowerUpKind,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub color: [u8; 3],
    pub alpha: f32,
    pub size: f32,
}

/// Everything visible this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub hud: Hud,
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView>,
    pub bullets: Vec<CircleView>,
    pub enemy_bullets: Vec<CircleView>,
    pub ufos: Vec<CircleView>,
    pub powerups: Vec<PowerUpView>,
    /// Explosion debris followed by engine exhaust
    pub particles: Vec<ParticleView>,
}

fn circle<E: Entity>(entity: &E) -> CircleView {
    CircleView {
        pos: entity.body().pos,
        radius: entity.body().radius,
    }
}

impl GameState {
    pub fn snapshot(&self) -> RenderSnapshot {
        let player = &self.player;
        RenderSnapshot {
            hud: Hud {
                score: self.score,
                lives: self.lives,
                level: self.level,
            },
            ship: ShipView {
                pos: player.body.pos,
                rotation: player.body.rotation,
                radius: player.body.radius,
                thrusting: player.thrusting,
                shielded: player.shielded,
                invincible: player.is_invincible(),
            },
            asteroids: self
                .asteroids
                .live()
                .map(|a| AsteroidView {
                    size: a.size,
                    kind: a.kind,
                    outline: a.outline(),
                })
                .collect(),
            bullets: self.bullets.live().map(circle).collect(),
            enemy_bullets: self.ufo_bullets.live().map(circle).collect(),
            ufos: self.ufos.live().map(circle).collect(),
            powerups: self
                .powerups
                .live()
                .map(|p| PowerUpView {
                    pos: p.body.pos,
                    radius: p.body.radius,
                    kind: p.kind,
                    color: p.kind.color(),
                })
                .collect(),
            particles: self
                .particles
                .live()
                .chain(player.thrust_particles.live())
                .map(|p| ParticleView {
                    pos: p.body.pos,
                    color: p.color,
                    alpha: p.alpha(),
                    size: p.size(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crate::sim::spawner::wave_size;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = GameState::new(8, Difficulty::Normal);
        state.score = 450;
        let snap = state.snapshot();
        assert_eq!(
            snap.hud,
            Hud {
                score: 450,
                lives: 3,
                level: 1
            }
        );
        assert_eq!(snap.asteroids.len(), wave_size(1));
        assert!(snap.bullets.is_empty());
        assert_eq!(snap.ship.pos, state.bounds.center());
    }

    #[test]
    fn test_snapshot_skips_dead_entities() {
        let mut state = GameState::new(8, Difficulty::Normal);
        state.asteroids[0].body.kill();
        assert_eq!(state.snapshot().asteroids.len(), wave_size(1) - 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(8, Difficulty::Normal);
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["hud"]["level"], 1);
        assert!(json["asteroids"][0]["outline"].is_array());
    }
}
