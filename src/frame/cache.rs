//! Bounded FIFO cache for off-grid frame queries.

use std::collections::VecDeque;

use super::Basis;

/// Counters describing how frame queries were served.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Queries answered directly from a precomputed sample.
    pub grid_hits: u64,
    /// Off-grid queries found in the cache.
    pub cache_hits: u64,
    /// Off-grid queries that had to be computed.
    pub cache_misses: u64,
    /// Entries dropped to make room for newer ones.
    pub evictions: u64,
}

impl CacheStats {
    /// Total number of queries seen.
    #[must_use]
    pub fn queries(&self) -> u64 {
        self.grid_hits + self.cache_hits + self.cache_misses
    }
}

/// Bounded FIFO of off-grid frame queries.
///
/// Lookups are a linear scan keyed on the exact bit pattern of `u`. When
/// full, inserting drops the oldest entry.
#[derive(Debug, Clone)]
pub struct FrameCache {
    entries: VecDeque<(f64, Basis)>,
    capacity: usize,
    stats: CacheStats,
}

impl FrameCache {
    /// Creates an empty cache holding at most `capacity` results.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// Number of cached results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up `u`, counting a hit when found.
    pub fn get(&mut self, u: f64) -> Option<Basis> {
        let key = u.to_bits();
        let found = self
            .entries
            .iter()
            .find(|(k, _)| k.to_bits() == key)
            .map(|&(_, basis)| basis);
        if found.is_some() {
            self.stats.cache_hits += 1;
        }
        found
    }

    /// Stores a freshly computed result, counting a miss.
    ///
    /// Returns the evicted `(u, basis)` pair if the cache was full.
    pub fn insert(&mut self, u: f64, basis: Basis) -> Option<(f64, Basis)> {
        self.stats.cache_misses += 1;
        if self.capacity == 0 {
            return None;
        }
        let evicted = if self.entries.len() >= self.capacity {
            self.stats.evictions += 1;
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back((u, basis));
        evicted
    }

    /// Counts a query served from the precomputed samples.
    pub fn record_grid_hit(&mut self) {
        self.stats.grid_hits += 1;
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Zeroes the counters without touching cached entries.
    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Drops every cached entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Point3, Vector3};

    #[allow(clippy::cast_precision_loss)]
    fn basis(tag: usize) -> Basis {
        Basis {
            normal: Vector3::x(),
            bitangent: Vector3::y(),
            tangent: Vector3::z(),
            position: Point3::new(tag as f64, 0.0, 0.0),
        }
    }

    #[test]
    fn miss_then_hit() {
        let mut cache = FrameCache::new(4);
        assert_eq!(cache.get(0.3), None);
        cache.insert(0.3, basis(1));
        assert_eq!(cache.get(0.3), Some(basis(1)));
        let stats = cache.stats();
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.cache_misses, 1);
    }

    #[test]
    fn evicts_oldest_first() {
        let mut cache = FrameCache::new(2);
        assert!(cache.insert(0.1, basis(1)).is_none());
        assert!(cache.insert(0.2, basis(2)).is_none());
        let evicted = cache.insert(0.3, basis(3));
        assert_eq!(evicted, Some((0.1, basis(1))));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(0.1), None);
        assert_eq!(cache.get(0.2), Some(basis(2)));
        assert_eq!(cache.get(0.3), Some(basis(3)));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut cache = FrameCache::new(200);
        for i in 0..1000_u32 {
            cache.insert(f64::from(i) * 0.001 + 0.0001, basis(0));
        }
        assert_eq!(cache.len(), 200);
        assert_eq!(cache.stats().evictions, 800);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = FrameCache::new(0);
        cache.insert(0.5, basis(1));
        assert!(cache.is_empty());
        assert_eq!(cache.get(0.5), None);
    }

    #[test]
    fn reset_keeps_entries() {
        let mut cache = FrameCache::new(2);
        cache.insert(0.5, basis(1));
        cache.record_grid_hit();
        assert_eq!(cache.stats().queries(), 2);
        cache.reset_stats();
        assert_eq!(cache.stats(), CacheStats::default());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_keeps_counters() {
        let mut cache = FrameCache::new(2);
        cache.insert(0.5, basis(1));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(0.5), None);
        assert_eq!(cache.stats().cache_misses, 1);
    }
}
