//! Entity collections
//!
//! Each category of entity lives in exactly one `Pool`. Entities spawned
//! during collision resolution go to a pending list and only join the live
//! list at `commit`, so nothing spawned mid-step is seen by the same step.
//! Dead entities stay in place (inactive) until `commit` compacts them away,
//! which keeps indices stable while a step is iterating.

use std::ops::{Index, IndexMut};

use super::body::Entity;

#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
    pending: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pending: Vec::new(),
        }
    }
}

impl<T: Entity> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert immediately (visible to the rest of this step)
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Insert at the end of this step
    pub fn defer(&mut self, item: T) {
        self.pending.push(item);
    }

    pub fn defer_all(&mut self, items: impl IntoIterator<Item = T>) {
        self.pending.extend(items);
    }

    /// Drop inactive entries and admit pending spawns
    pub fn commit(&mut self) {
        self.items.retain(|item| item.is_active());
        self.items.append(&mut self.pending);
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.pending.clear();
    }

    /// Slots in the live list, including ones killed this step
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_active()).count()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// No live entity and nothing waiting to spawn
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.items.iter().all(|item| !item.is_active())
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    /// Active entries only
    pub fn live(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|item| item.is_active())
    }
}

impl<T> Index<usize> for Pool<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for Pool<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Body;
    use glam::Vec2;

    struct Dot(Body);

    impl Entity for Dot {
        fn body(&self) -> &Body {
            &self.0
        }
        fn body_mut(&mut self) -> &mut Body {
            &mut self.0
        }
    }

    fn dot() -> Dot {
        Dot(Body::new(Vec2::ZERO, Vec2::ZERO, 1.0))
    }

    #[test]
    fn test_deferred_spawns_wait_for_commit() {
        let mut pool = Pool::new();
        pool.push(dot());
        pool.defer(dot());
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.pending_count(), 1);

        pool.commit();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.pending_count(), 0);
    }

    #[test]
    fn test_commit_compacts_dead() {
        let mut pool = Pool::new();
        pool.push(dot());
        pool.push(dot());
        pool[0].body_mut().kill();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.active_count(), 1);

        pool.commit();
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_is_empty_counts_pending() {
        let mut pool = Pool::new();
        pool.push(dot());
        pool[0].body_mut().kill();
        assert!(pool.is_empty());
        pool.defer(dot());
        assert!(!pool.is_empty());
    }
}
