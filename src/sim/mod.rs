//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pool insertion order)
//! - No rendering, audio or platform dependencies

pub mod asteroid;
pub mod body;
pub mod collision;
pub mod particle;
pub mod pickup;
pub mod player;
pub mod pool;
pub mod projectile;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod ufo;

pub use asteroid::{Asteroid, AsteroidKind, AsteroidSize};
pub use body::{Body, Entity, Wrap};
pub use collision::check_collisions;
pub use particle::Particle;
pub use pickup::{PowerUp, PowerUpKind};
pub use player::{Controls, Player};
pub use pool::Pool;
pub use projectile::Bullet;
pub use snapshot::RenderSnapshot;
pub use state::{GameEvent, GameState};
pub use tick::{TickInput, tick};
pub use ufo::Ufo;
