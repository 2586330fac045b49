//! Frequency Cache Module
//!
//! Least-frequently-used eviction with a linear scan for the victim.

use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::{EvictionPolicy, FrequencyEntry};

// == Frequency Cache ==
/// Bounded cache evicting the entry with the fewest touches.
///
/// Every get-hit and every put on a resident key increments the entry's
/// frequency. Among entries sharing the minimum frequency the one touched
/// longest ago is evicted, which keeps the choice independent of hash
/// iteration order.
#[derive(Debug)]
pub struct FrequencyCache<K, V> {
    entries: HashMap<K, FrequencyEntry<V>>,
    capacity: usize,
    /// Logical clock for last-touch stamps
    tick: u64,
}

impl<K: Hash + Eq + Clone, V> FrequencyCache<K, V> {
    // == Constructor ==
    /// Creates an empty cache; capacity 0 turns `put` into a no-op.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
            tick: 0,
        }
    }

    // == Frequency ==
    /// Current access count of `key`, if resident.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.frequency)
    }

    // == Peek LFU ==
    /// The key that the next eviction would remove.
    pub fn peek_lfu(&self) -> Option<&K> {
        self.entries
            .iter()
            .min_by_key(|(_, entry)| entry.eviction_rank())
            .map(|(key, _)| key)
    }

    fn next_tick(&mut self) -> u64 {
        let tick = self.tick;
        self.tick += 1;
        tick
    }

    fn evict_lfu(&mut self) {
        let victim = self.peek_lfu().cloned();
        debug_assert!(victim.is_some(), "eviction attempted on an empty cache");
        if let Some(key) = victim {
            self.entries.remove(&key);
        }
    }
}

impl<K: Hash + Eq + Clone, V> EvictionPolicy<K, V> for FrequencyCache<K, V> {
    fn get(&mut self, key: &K) -> Option<&V> {
        let tick = self.next_tick();
        let entry = self.entries.get_mut(key)?;
        entry.touch(tick);
        Some(&entry.value)
    }

    fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        let tick = self.next_tick();
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.touch(tick);
            entry.value = value;
            return;
        }

        if self.entries.len() >= self.capacity {
            self.evict_lfu();
        }
        self.entries.insert(key, FrequencyEntry::new(value, tick));
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
