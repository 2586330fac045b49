//! Cache Module
//!
//! Bounded caches with three eviction strategies behind one get/put contract:
//! recency (LRU), frequency (LFU) and jittered time-to-live.

mod entry;
mod expiring;
mod frequency;
mod kind;
mod lru;
mod recency;
mod stats;


// Re-export public types
pub use entry::{ExpiringEntry, FrequencyEntry};
pub use expiring::{ttl_from_secs, ExpiringCache, JitterRange};
pub use frequency::FrequencyCache;
pub use kind::{BoxedPolicy, PolicyKind, TtlSettings};
pub use lru::LruTracker;
pub use recency::RecencyCache;
pub use stats::RunStats;

// == Content Types ==
/// Identifier of a piece of content, drawn from `[1, N]`.
pub type ContentId = u64;

/// Opaque payload stored against a [`ContentId`].
pub type ContentValue = String;

/// Builds the payload stored for `id` on a miss.
pub fn content_value_for(id: ContentId) -> ContentValue {
    format!("Content {}", id)
}

// == Eviction Policy ==
/// Uniform contract shared by every cache policy.
///
/// The benchmark runner only ever talks to a cache through this trait.
/// Implementations must keep `len() <= capacity()` once `put` returns.
pub trait EvictionPolicy<K, V> {
    /// Looks up `key`, applying the policy's touch side-effects on a hit.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Inserts or refreshes `key`, evicting an entry first if the policy
    /// requires room.
    fn put(&mut self, key: K, value: V);

    /// Number of resident entries.
    fn len(&self) -> usize;

    /// Maximum number of resident entries.
    fn capacity(&self) -> usize;

    // == Is Empty ==
    /// Checks if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
