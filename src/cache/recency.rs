//! Recency Cache Module
//!
//! Least-recently-used eviction over a HashMap plus an [`LruTracker`].

use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::{EvictionPolicy, LruTracker};

// == Recency Cache ==
/// Bounded cache evicting the least recently touched entry.
///
/// Both `get` hits and `put`s count as touches. With capacity 0 nothing is
/// ever retained and every lookup misses.
#[derive(Debug)]
pub struct RecencyCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K: Hash + Eq + Clone, V> RecencyCache<K, V> {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            capacity,
        }
    }

    // == Contains ==
    /// Checks residency without touching the entry.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    // == Peek LRU ==
    /// The key that the next eviction would remove.
    pub fn peek_lru(&self) -> Option<&K> {
        self.lru.peek_oldest()
    }

    fn evict_lru(&mut self) {
        let evicted = self.lru.evict_oldest();
        debug_assert!(evicted.is_some(), "eviction attempted on an empty cache");
        if let Some(key) = evicted {
            self.entries.remove(&key);
        }
    }
}

impl<K: Hash + Eq + Clone, V> EvictionPolicy<K, V> for RecencyCache<K, V> {
    fn get(&mut self, key: &K) -> Option<&V> {
        if !self.entries.contains_key(key) {
            return None;
        }
        self.lru.touch(key);
        self.entries.get(key)
    }

    fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        // Overwrites never evict
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_lru();
        }

        self.lru.touch(&key);
        self.entries.insert(key, value);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> RecencyCache<u64, String> {
        RecencyCache::new(capacity)
    }

    #[test]
    fn test_get_missing_key() {
        let mut cache = cache(2);
        assert!(cache.get(&1).is_none());
    }

    #[test]
    fn test_put_then_get() {
        let mut cache = cache(2);
        cache.put(1, "one".to_string());

        assert_eq!(cache.get(&1).map(String::as_str), Some("one"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = cache(2);
        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        assert!(cache.get(&1).is_some());
        cache.put(3, "three".to_string());

        // 2 was least recently used
        assert!(cache.get(&2).is_none());
        assert!(cache.get(&1).is_some());
        assert!(cache.get(&3).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_put_existing_updates_value_and_recency() {
        let mut cache = cache(2);
        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        cache.put(1, "uno".to_string());
        cache.put(3, "three".to_string());

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&2));
        assert_eq!(cache.get(&1).map(String::as_str), Some("uno"));
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut cache = cache(2);
        cache.put(1, "one".to_string());
        cache.put(2, "two".to_string());
        cache.put(2, "dos".to_string());

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&1));
        assert_eq!(cache.peek_lru(), Some(&1));
    }

    #[test]
    fn test_zero_capacity_never_retains() {
        let mut cache = cache(0);
        for key in 0..10 {
            cache.put(key, format!("v{}", key));
            assert!(cache.get(&key).is_none());
        }
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 0);
    }

    #[test]
    fn test_large_capacity_does_not_preallocate() {
        let mut cache = cache(1 << 40);
        cache.put(1, "one".to_string());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.capacity(), 1 << 40);
    }
}
