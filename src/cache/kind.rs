//! Policy Kind Module
//!
//! Names the available eviction policies and builds boxed instances of them.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::cache::expiring::ttl_from_secs;
use crate::cache::{
    ContentId, ContentValue, EvictionPolicy, ExpiringCache, FrequencyCache, JitterRange,
    RecencyCache,
};
use crate::clock::SystemClock;
use crate::error::{BenchError, Result};

/// A policy instance as the benchmark runner sees it.
pub type BoxedPolicy = Box<dyn EvictionPolicy<ContentId, ContentValue>>;

// == TTL Settings ==
/// Expiry parameters for [`PolicyKind::Expiring`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TtlSettings {
    /// Base lifetime in seconds; must be positive
    pub base_ttl_secs: f64,
    /// Whole seconds added per insertion
    pub jitter: JitterRange,
}

impl Default for TtlSettings {
    fn default() -> Self {
        Self {
            base_ttl_secs: 5.0,
            jitter: JitterRange::default(),
        }
    }
}

// == Policy Kind ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Least recently used
    Recency,
    /// Least frequently used
    Frequency,
    /// Earliest jittered expiry
    Expiring,
}

impl PolicyKind {
    /// Every policy, in reporting order.
    pub const ALL: [PolicyKind; 3] = [
        PolicyKind::Recency,
        PolicyKind::Frequency,
        PolicyKind::Expiring,
    ];

    /// Short label used in run names.
    pub fn label(&self) -> &'static str {
        match self {
            PolicyKind::Recency => "LRU",
            PolicyKind::Frequency => "LFU",
            PolicyKind::Expiring => "Adaptive TTL",
        }
    }

    // == Build ==
    /// Constructs a cache of this kind.
    ///
    /// `rng_seed` seeds the expiring cache's jitter source and is ignored by
    /// the other policies.
    ///
    /// # Errors
    /// `InvalidConfiguration` for a negative capacity on the recency and
    /// expiring policies (the frequency policy treats it as 0), or for bad
    /// TTL settings.
    pub fn build(&self, capacity: i64, ttl: &TtlSettings, rng_seed: u64) -> Result<BoxedPolicy> {
        match self {
            PolicyKind::Recency => {
                let capacity = checked_capacity(*self, capacity)?;
                Ok(Box::new(RecencyCache::<ContentId, ContentValue>::new(capacity)))
            }
            PolicyKind::Frequency => {
                let capacity = usize::try_from(capacity).unwrap_or(0);
                Ok(Box::new(FrequencyCache::<ContentId, ContentValue>::new(capacity)))
            }
            PolicyKind::Expiring => {
                let capacity = checked_capacity(*self, capacity)?;
                let base_ttl = ttl_from_secs(ttl.base_ttl_secs)?;
                let cache = ExpiringCache::<ContentId, ContentValue, _, _>::with_parts(
                    capacity,
                    base_ttl,
                    ttl.jitter,
                    SystemClock,
                    StdRng::seed_from_u64(rng_seed),
                )?;
                Ok(Box::new(cache))
            }
        }
    }
}

fn checked_capacity(kind: PolicyKind, capacity: i64) -> Result<usize> {
    usize::try_from(capacity).map_err(|_| {
        BenchError::invalid(format!(
            "{} capacity must not be negative, got {}",
            kind.label(),
            capacity
        ))
    })
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PolicyKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" | "recency" => Ok(PolicyKind::Recency),
            "lfu" | "frequency" => Ok(PolicyKind::Frequency),
            "ttl" | "expiring" | "adaptive_ttl" => Ok(PolicyKind::Expiring),
            other => Err(BenchError::invalid(format!("unknown policy '{}'", other))),
        }
    }
}
