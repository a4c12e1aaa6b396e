//! Asteroids: size tiers, types, outline generation and splitting

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::body::{Body, Entity, Wrap};
use crate::consts::*;
use crate::{Bounds, rotate_deg};

/// Size tier; each tier splits into two of the next smaller one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AsteroidSize {
    Large,
    Medium,
    Small,
}

impl AsteroidSize {
    pub fn radius(&self) -> f32 {
        match self {
            AsteroidSize::Large => ASTEROID_LARGE_RADIUS,
            AsteroidSize::Medium => ASTEROID_MEDIUM_RADIUS,
            AsteroidSize::Small => ASTEROID_SMALL_RADIUS,
        }
    }

    /// Base travel speed (pixels/s) before type and level scaling
    pub fn speed(&self) -> f32 {
        match self {
            AsteroidSize::Large => ASTEROID_LARGE_SPEED,
            AsteroidSize::Medium => ASTEROID_MEDIUM_SPEED,
            AsteroidSize::Small => ASTEROID_SMALL_SPEED,
        }
    }

    pub fn base_score(&self) -> u32 {
        match self {
            AsteroidSize::Large => ASTEROID_LARGE_SCORE,
            AsteroidSize::Medium => ASTEROID_MEDIUM_SCORE,
            AsteroidSize::Small => ASTEROID_SMALL_SCORE,
        }
    }

    /// Tier produced by splitting, `None` for the terminal tier
    pub fn smaller(&self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// Asteroid type. Only armored rocks carry hit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AsteroidKind {
    Normal,
    Fast,
    Armored { hitpoints: u8 },
}

impl AsteroidKind {
    pub fn armored() -> Self {
        AsteroidKind::Armored {
            hitpoints: ARMORED_HITPOINTS,
        }
    }

    pub fn speed_multiplier(&self) -> f32 {
        match self {
            AsteroidKind::Fast => FAST_SPEED_MULTIPLIER,
            _ => 1.0,
        }
    }

    pub fn score_multiplier(&self) -> f32 {
        match self {
            AsteroidKind::Normal => 1.0,
            AsteroidKind::Fast => FAST_SCORE_MULTIPLIER,
            AsteroidKind::Armored { .. } => ARMORED_SCORE_MULTIPLIER,
        }
    }

    /// Same type with full hit points
    pub fn fresh(&self) -> Self {
        match self {
            AsteroidKind::Armored { .. } => AsteroidKind::armored(),
            other => *other,
        }
    }
}

/// Result of a single bullet strike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    /// Armor absorbed the hit
    Damaged,
    Destroyed,
}

/// An asteroid entity
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
    pub kind: AsteroidKind,
    /// Spin in degrees per second
    pub spin: f32,
    /// Outline relative to the center, generated once and rotated for drawing
    pub shape: Vec<Vec2>,
}

impl Entity for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Asteroid {
    /// Create an asteroid with a random heading, spin and outline
    pub fn new<R: Rng>(rng: &mut R, pos: Vec2, size: AsteroidSize, kind: AsteroidKind) -> Self {
        let angle = rng.random_range(0.0..360.0);
        let speed = size.speed() * kind.speed_multiplier();
        let vel = rotate_deg(Vec2::new(speed, 0.0), angle);
        let radius = size.radius();
        Self {
            body: Body::new(pos, vel, radius),
            size,
            kind,
            spin: rng.random_range(-90.0..90.0),
            shape: generate_shape(rng, radius),
        }
    }

    /// Points awarded on destruction
    pub fn score_value(&self) -> u32 {
        (self.size.base_score() as f32 * self.kind.score_multiplier()).round() as u32
    }

    pub fn hitpoints(&self) -> u8 {
        match self.kind {
            AsteroidKind::Armored { hitpoints } => hitpoints,
            _ => 1,
        }
    }

    /// Apply one bullet's worth of damage
    pub fn strike(&mut self) -> Strike {
        if let AsteroidKind::Armored { hitpoints } = &mut self.kind {
            *hitpoints = hitpoints.saturating_sub(1);
            if *hitpoints > 0 {
                return Strike::Damaged;
            }
        }
        self.body.kill();
        Strike::Destroyed
    }

    pub fn advance(&mut self, dt: f32, bounds: Bounds) {
        self.body.rotation = (self.body.rotation + self.spin * dt).rem_euclid(360.0);
        self.body.integrate(dt, bounds, Wrap::Both);
    }

    /// Two children one tier smaller at the same position; none for small rocks
    pub fn split<R: Rng>(&self, rng: &mut R) -> Vec<Asteroid> {
        match self.size.smaller() {
            Some(size) => (0..2)
                .map(|_| Asteroid::new(rng, self.body.pos, size, self.kind.fresh()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Outline in world space at the current rotation
    pub fn outline(&self) -> Vec<Vec2> {
        self.shape
            .iter()
            .map(|p| self.body.pos + rotate_deg(*p, self.body.rotation))
            .collect()
    }
}

/// Irregular polygon: 5-14 evenly spaced vertices at 0.8-1.2x radius
fn generate_shape<R: Rng>(rng: &mut R, radius: f32) -> Vec<Vec2> {
    let count = rng.random_range(5..=14usize);
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            let distance = radius * rng.random_range(0.8..1.2);
            Vec2::new(angle.cos(), angle.sin()) * distance
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_split_is_size_monotonic_and_terminal() {
        let mut rng = rng();
        let pos = Vec2::new(100.0, 100.0);

        let large = Asteroid::new(&mut rng, pos, AsteroidSize::Large, AsteroidKind::Normal);
        let children = large.split(&mut rng);
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|c| c.size == AsteroidSize::Medium));
        assert!(children.iter().all(|c| c.body.pos == pos));

        let grandchildren = children[0].split(&mut rng);
        assert_eq!(grandchildren.len(), 2);
        assert!(grandchildren.iter().all(|c| c.size == AsteroidSize::Small));

        assert!(grandchildren[0].split(&mut rng).is_empty());
    }

    #[test]
    fn test_children_get_independent_shapes() {
        let mut rng = rng();
        let parent = Asteroid::new(&mut rng, Vec2::ZERO, AsteroidSize::Large, AsteroidKind::Normal);
        let children = parent.split(&mut rng);
        assert_ne!(children[0].shape, children[1].shape);
    }

    #[test]
    fn test_shape_bounds() {
        let mut rng = rng();
        for _ in 0..50 {
            let a = Asteroid::new(&mut rng, Vec2::ZERO, AsteroidSize::Medium, AsteroidKind::Normal);
            assert!((5..=14).contains(&a.shape.len()));
            for p in &a.shape {
                let d = p.length();
                assert!(d >= 0.8 * 20.0 - 1e-3 && d <= 1.2 * 20.0 + 1e-3);
            }
        }
    }

    #[test]
    fn test_score_values() {
        let mut rng = rng();
        let normal = Asteroid::new(&mut rng, Vec2::ZERO, AsteroidSize::Large, AsteroidKind::Normal);
        let fast = Asteroid::new(&mut rng, Vec2::ZERO, AsteroidSize::Medium, AsteroidKind::Fast);
        let armored = Asteroid::new(&mut rng, Vec2::ZERO, AsteroidSize::Small, AsteroidKind::armored());
        assert_eq!(normal.score_value(), 20);
        assert_eq!(fast.score_value(), 60);
        assert_eq!(armored.score_value(), 200);
    }

    #[test]
    fn test_armored_takes_two_strikes() {
        let mut rng = rng();
        let mut rock = Asteroid::new(&mut rng, Vec2::ZERO, AsteroidSize::Large, AsteroidKind::armored());
        assert_eq!(rock.hitpoints(), 2);
        assert_eq!(rock.strike(), Strike::Damaged);
        assert!(rock.body.active);
        assert_eq!(rock.hitpoints(), 1);
        assert_eq!(rock.strike(), Strike::Destroyed);
        assert!(!rock.body.active);
    }

    #[test]
    fn test_armored_children_start_fresh() {
        let mut rng = rng();
        let mut rock = Asteroid::new(&mut rng, Vec2::ZERO, AsteroidSize::Large, AsteroidKind::armored());
        rock.strike();
        rock.strike();
        let children = rock.split(&mut rng);
        assert!(children.iter().all(|c| c.hitpoints() == ARMORED_HITPOINTS));
    }

    #[test]
    fn test_shape_is_stable_across_frames() {
        let mut rng = rng();
        let mut rock = Asteroid::new(&mut rng, Vec2::new(50.0, 50.0), AsteroidSize::Large, AsteroidKind::Normal);
        let shape = rock.shape.clone();
        for _ in 0..30 {
            rock.advance(1.0 / 60.0, Bounds::default());
        }
        assert_eq!(rock.shape, shape);
    }
}
