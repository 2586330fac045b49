//! Cache Entry Module
//!
//! Per-policy entry metadata for the frequency and expiring caches.

use std::time::{Duration, Instant};

// == Frequency Entry ==
/// Entry of a [`FrequencyCache`](super::FrequencyCache).
#[derive(Debug, Clone)]
pub struct FrequencyEntry<V> {
    /// The stored value
    pub value: V,
    /// Number of touches (get-hits and puts) since insertion, starting at 1
    pub frequency: u64,
    /// Logical time of the most recent touch, used to break frequency ties
    pub last_touch: u64,
}

impl<V> FrequencyEntry<V> {
    // == Constructor ==
    /// Creates an entry with frequency 1, touched at `tick`.
    pub fn new(value: V, tick: u64) -> Self {
        Self {
            value,
            frequency: 1,
            last_touch: tick,
        }
    }

    // == Touch ==
    /// Records one more access at logical time `tick`.
    pub fn touch(&mut self, tick: u64) {
        self.frequency += 1;
        self.last_touch = tick;
    }

    /// Eviction rank: lowest frequency first, then oldest touch.
    pub fn eviction_rank(&self) -> (u64, u64) {
        (self.frequency, self.last_touch)
    }
}

// == Expiring Entry ==
/// Entry of an [`ExpiringCache`](super::ExpiringCache).
#[derive(Debug, Clone)]
pub struct ExpiringEntry<V> {
    /// The stored value
    pub value: V,
    /// Absolute expiry instant
    pub expires_at: Instant,
    /// Insertion sequence number, used to break expiry ties
    pub inserted_seq: u64,
}

impl<V> ExpiringEntry<V> {
    // == Constructor ==
    /// Creates an entry expiring `ttl` after `now`, or `None` if that
    /// instant is not representable.
    pub fn new(value: V, now: Instant, ttl: Duration, inserted_seq: u64) -> Option<Self> {
        Some(Self {
            value,
            expires_at: now.checked_add(ttl)?,
            inserted_seq,
        })
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is live strictly before `expires_at`; at the expiry instant
    /// itself it is already expired.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime at `now`, zero once expired.
    pub fn ttl_remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }

    /// Eviction rank: earliest expiry first, then earliest insertion.
    pub fn eviction_rank(&self) -> (Instant, u64) {
        (self.expires_at, self.inserted_seq)
    }
}
