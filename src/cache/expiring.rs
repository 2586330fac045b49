//! Expiring Cache Module
//!
//! Time-bounded cache whose entries live for a base TTL plus a random jitter.
//! Expired entries are dropped lazily when a `get` observes them.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::{EvictionPolicy, ExpiringEntry};
use crate::clock::{Clock, SystemClock};
use crate::error::{BenchError, Result};

// == Jitter Range ==
/// Inclusive range of whole seconds added to the base TTL on every insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JitterRange {
    pub min_secs: u64,
    pub max_secs: u64,
}

impl JitterRange {
    /// Creates a range, rejecting `min_secs > max_secs`.
    pub fn new(min_secs: u64, max_secs: u64) -> Result<Self> {
        if min_secs > max_secs {
            return Err(BenchError::invalid(format!(
                "TTL jitter range is inverted: [{}, {}]",
                min_secs, max_secs
            )));
        }
        Ok(Self { min_secs, max_secs })
    }

    /// Draws one jitter value.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        Duration::from_secs(rng.gen_range(self.min_secs..=self.max_secs))
    }
}

impl Default for JitterRange {
    fn default() -> Self {
        Self {
            min_secs: 0,
            max_secs: 10,
        }
    }
}

/// Converts a TTL in (possibly fractional) seconds, rejecting values that are
/// not strictly positive and finite.
pub fn ttl_from_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(BenchError::invalid(format!(
            "base TTL must be a positive number of seconds, got {}",
            secs
        )));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| BenchError::invalid(e.to_string()))
}

// == Expiring Cache ==
/// Bounded cache with randomized, non-sliding expiry.
///
/// When full, `put` evicts the entry with the earliest expiry instant whether
/// or not it has actually expired. Ties go to the earlier insertion.
#[derive(Debug)]
pub struct ExpiringCache<K, V, C = SystemClock, R = StdRng> {
    entries: HashMap<K, ExpiringEntry<V>>,
    capacity: usize,
    base_ttl: Duration,
    jitter: JitterRange,
    clock: C,
    rng: R,
    /// Insertion counter for tie-breaking
    seq: u64,
}

impl<K: Hash + Eq + Clone, V> ExpiringCache<K, V, SystemClock, StdRng> {
    // == Constructor ==
    /// Creates a cache on the system clock with an entropy-seeded RNG.
    pub fn new(capacity: usize, base_ttl: Duration, jitter: JitterRange) -> Result<Self> {
        Self::with_parts(capacity, base_ttl, jitter, SystemClock, StdRng::from_entropy())
    }
}

impl<K: Hash + Eq + Clone, V, C: Clock, R: Rng> ExpiringCache<K, V, C, R> {
    /// Creates a cache with an explicit clock and random source.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `base_ttl` is zero, the jitter range is
    /// inverted, or the longest possible lifetime does not fit in an
    /// `Instant` on `clock`.
    pub fn with_parts(
        capacity: usize,
        base_ttl: Duration,
        jitter: JitterRange,
        clock: C,
        rng: R,
    ) -> Result<Self> {
        if base_ttl.is_zero() {
            return Err(BenchError::invalid("base TTL must be greater than zero"));
        }
        let jitter = JitterRange::new(jitter.min_secs, jitter.max_secs)?;
        base_ttl
            .checked_add(Duration::from_secs(jitter.max_secs))
            .and_then(|max_ttl| clock.now().checked_add(max_ttl))
            .ok_or_else(|| {
                BenchError::invalid(format!(
                    "TTL of {:?} plus up to {}s jitter overflows the clock",
                    base_ttl, jitter.max_secs
                ))
            })?;

        // Grows on demand; capacity is only an upper bound
        Ok(Self {
            entries: HashMap::new(),
            capacity,
            base_ttl,
            jitter,
            clock,
            rng,
            seq: 0,
        })
    }

    // == Expires At ==
    /// Expiry instant of `key`, if resident (expired or not).
    pub fn expires_at(&self, key: &K) -> Option<Instant> {
        self.entries.get(key).map(|entry| entry.expires_at)
    }

    // == Peek Soonest ==
    /// The key that the next eviction would remove.
    pub fn peek_soonest(&self) -> Option<&K> {
        self.entries
            .iter()
            .min_by_key(|(_, entry)| entry.eviction_rank())
            .map(|(key, _)| key)
    }

    fn evict_soonest(&mut self) {
        let victim = self.peek_soonest().cloned();
        debug_assert!(victim.is_some(), "eviction attempted on an empty cache");
        if let Some(key) = victim {
            self.entries.remove(&key);
        }
    }
}

impl<K: Hash + Eq + Clone, V, C: Clock, R: Rng> EvictionPolicy<K, V>
    for ExpiringCache<K, V, C, R>
{
    fn get(&mut self, key: &K) -> Option<&V> {
        let now = self.clock.now();
        if self.entries.get(key)?.is_expired(now) {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| &entry.value)
    }

    fn put(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        // Evicts even when `key` is already resident
        if self.entries.len() >= self.capacity {
            self.evict_soonest();
        }

        let now = self.clock.now();
        let ttl = self.base_ttl.saturating_add(self.jitter.sample(&mut self.rng));
        let Some(entry) = ExpiringEntry::new(value, now, ttl, self.seq) else {
            warn!("Dropping insert: expiry {:?} past now overflows the clock", ttl);
            return;
        };
        self.seq += 1;
        self.entries.insert(key, entry);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
