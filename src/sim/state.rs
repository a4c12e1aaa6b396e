//! Game state and core simulation types
//!
//! Everything one run of the game owns lives here: the ship, every entity
//! pool, the scoreboard and the seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::asteroid::{Asteroid, AsteroidSize};
use super::particle::Particle;
use super::pickup::{PowerUp, PowerUpKind};
use super::player::Player;
use super::pool::Pool;
use super::projectile::Bullet;
use super::spawner;
use super::ufo::Ufo;
use crate::Bounds;
use crate::consts::INITIAL_LEVEL;
use crate::settings::Difficulty;

/// Something noteworthy that happened during a step
///
/// Drained by the application once per frame; this is the only channel
/// through which the simulation talks to audio and UI.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ShotFired { bullets: usize },
    /// Armor absorbed a bullet
    AsteroidDamaged { pos: Vec2 },
    AsteroidDestroyed { pos: Vec2, size: AsteroidSize, score: u32 },
    UfoFired { pos: Vec2 },
    UfoDestroyed { pos: Vec2, score: u32 },
    PowerUpCollected(PowerUpKind),
    /// Shield consumed instead of a life
    ShieldAbsorbed,
    PlayerHit { lives_left: u32 },
    LevelComplete { level: u32 },
    BonusLife { lives: u32 },
    GameOver { score: u32 },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub bounds: Bounds,
    pub difficulty: Difficulty,
    pub level: u32,
    pub lives: u32,
    pub score: u32,
    pub game_over: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub asteroids: Pool<Asteroid>,
    /// Player bullets
    pub bullets: Pool<Bullet>,
    pub ufos: Pool<Ufo>,
    /// Enemy bullets, never tested against other enemies
    pub ufo_bullets: Pool<Bullet>,
    pub powerups: Pool<PowerUp>,
    /// Explosion debris
    pub particles: Pool<Particle>,
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a run on the default playfield
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        Self::with_bounds(seed, difficulty, Bounds::default())
    }

    pub fn with_bounds(seed: u64, difficulty: Difficulty, bounds: Bounds) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            difficulty,
            level: INITIAL_LEVEL,
            lives: difficulty.initial_lives(),
            score: 0,
            game_over: false,
            time_ticks: 0,
            player: Player::new(bounds.center()),
            asteroids: Pool::new(),
            bullets: Pool::new(),
            ufos: Pool::new(),
            ufo_bullets: Pool::new(),
            powerups: Pool::new(),
            particles: Pool::new(),
            events: Vec::new(),
        };
        state.spawn_wave();
        state
    }

    /// Fresh run with the same difficulty; the RNG keeps its stream
    pub fn reset(&mut self) {
        self.player = Player::new(self.bounds.center());
        self.asteroids.clear();
        self.bullets.clear();
        self.ufos.clear();
        self.ufo_bullets.clear();
        self.powerups.clear();
        self.particles.clear();
        self.events.clear();
        self.score = 0;
        self.lives = self.difficulty.initial_lives();
        self.level = INITIAL_LEVEL;
        self.game_over = false;
        self.time_ticks = 0;
        self.spawn_wave();
        log::info!(
            "New game (difficulty: {}, lives: {})",
            self.difficulty.as_str(),
            self.lives
        );
    }

    /// Populate the asteroid pool with the current level's wave
    pub fn spawn_wave(&mut self) {
        let wave = spawner::spawn_wave(&mut self.rng, self.level, self.player.body.pos, self.bounds);
        for asteroid in wave {
            self.asteroids.push(asteroid);
        }
    }

    /// Put the ship back at the center with a grace period
    pub fn respawn_player(&mut self) {
        let center = self.bounds.center();
        self.player.respawn(center);
    }

    /// End-of-step compaction: drop dead entities, admit deferred spawns
    pub fn commit(&mut self) {
        self.asteroids.commit();
        self.bullets.commit();
        self.ufos.commit();
        self.ufo_bullets.commit();
        self.powerups.commit();
        self.particles.commit();
    }

    /// Hand the accumulated events to the caller
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
