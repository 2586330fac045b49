//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every touch stamps the key with the next value of a logical clock. The
/// `order` index maps stamps back to keys, so:
/// - First entry = Least recently used
/// - Last entry = Most recently used
///
/// Stamps are unique, so the recency order is total.
#[derive(Debug)]
pub struct LruTracker<K> {
    /// Key -> stamp of its last touch
    stamps: HashMap<K, u64>,
    /// Stamp -> key, ordered oldest first
    order: BTreeMap<u64, K>,
    /// Next stamp to hand out
    clock: u64,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            stamps: HashMap::new(),
            order: BTreeMap::new(),
            clock: 0,
        }
    }
}

impl<K: Hash + Eq + Clone> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    ///
    /// Existing keys move to the fresh end; new keys are added there.
    pub fn touch(&mut self, key: &K) {
        let stamp = self.clock;
        self.clock += 1;
        if let Some(old) = self.stamps.insert(key.clone(), stamp) {
            self.order.remove(&old);
        }
        self.order.insert(stamp, key.clone());
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &K) {
        if let Some(stamp) = self.stamps.remove(key) {
            self.order.remove(&stamp);
        }
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        let (_, key) = self.order.pop_first()?;
        self.stamps.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.values().next()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    // == Is Empty ==
    /// Checks if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked.
    pub fn contains(&self, key: &K) -> bool {
        self.stamps.contains_key(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new() {
        let lru: LruTracker<u64> = LruTracker::new();
        assert!(lru.is_empty());
        assert_eq!(lru.len(), 0);
    }

    #[test]
    fn test_lru_touch_new_key() {
        let mut lru = LruTracker::new();

        lru.touch(&1);
        lru.touch(&2);
        lru.touch(&3);

        assert_eq!(lru.len(), 3);
        // 1 is oldest (added first)
        assert_eq!(lru.peek_oldest(), Some(&1));
    }

    #[test]
    fn test_lru_touch_existing_key() {
        let mut lru = LruTracker::new();

        lru.touch(&1);
        lru.touch(&2);
        lru.touch(&3);

        // Touch 1 again - should move to the fresh end
        lru.touch(&1);

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.peek_oldest(), Some(&2));
    }

    #[test]
    fn test_lru_evict_oldest() {
        let mut lru = LruTracker::new();

        lru.touch(&1);
        lru.touch(&2);
        lru.touch(&3);

        assert_eq!(lru.evict_oldest(), Some(1));
        assert_eq!(lru.len(), 2);
        assert!(!lru.contains(&1));

        assert_eq!(lru.evict_oldest(), Some(2));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_evict_empty() {
        let mut lru: LruTracker<u64> = LruTracker::new();
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_lru_remove() {
        let mut lru = LruTracker::new();

        lru.touch(&1);
        lru.touch(&2);
        lru.touch(&3);

        lru.remove(&2);

        assert_eq!(lru.len(), 2);
        assert!(!lru.contains(&2));
        assert!(lru.contains(&1));
        assert!(lru.contains(&3));
    }

    #[test]
    fn test_lru_remove_nonexistent_key() {
        let mut lru = LruTracker::new();

        lru.touch(&1);
        lru.touch(&2);
        lru.remove(&42);

        assert_eq!(lru.len(), 2);
        assert_eq!(lru.peek_oldest(), Some(&1));
    }

    #[test]
    fn test_lru_order_after_multiple_touches() {
        let mut lru = LruTracker::new();

        // touch(a), touch(b), touch(c)  -> oldest..newest = [a, b, c]
        // touch(a), touch(c), touch(b)  -> oldest..newest = [a, c, b]
        for key in ["a", "b", "c", "a", "c", "b"] {
            lru.touch(&key);
        }

        assert_eq!(lru.evict_oldest(), Some("a"));
        assert_eq!(lru.evict_oldest(), Some("c"));
        assert_eq!(lru.evict_oldest(), Some("b"));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_lru_touch_same_key_multiple_times() {
        let mut lru = LruTracker::new();

        lru.touch(&1);
        lru.touch(&1);
        lru.touch(&1);

        // Should only have one entry
        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evict_oldest(), Some(1));
        assert!(lru.is_empty());
    }
}
