//! Benchmark Runner Module
//!
//! Drives a request stream against one cache and measures hit rate and
//! average per-request latency.

use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::cache::{content_value_for, ContentId, ContentValue, EvictionPolicy, RunStats};
use crate::error::{BenchError, Result};

// == Benchmark Result ==
/// Outcome of one (policy, capacity) run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    /// Run label, e.g. `LRU-1.5x`
    pub policy_label: String,
    /// Cache capacity the run used
    pub capacity: usize,
    pub num_requests: u64,
    pub hits: u64,
    pub misses: u64,
    /// hits / num_requests, in `[0, 1]`
    pub hit_rate: f64,
    /// Wall-clock seconds per request
    pub average_latency_secs: f64,
    /// Entries resident when the run finished
    pub final_size: usize,
}

// == Benchmark Runner ==
/// Executes a fixed number of requests against a cache.
///
/// Each request is a `get`; a miss is followed by a `put` of the content
/// value. Hits never `put`, so they do not refresh TTLs or add extra
/// frequency beyond what `get` itself does.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkRunner {
    num_requests: u64,
}

impl BenchmarkRunner {
    // == Constructor ==
    /// # Errors
    /// `InvalidConfiguration` if `num_requests` is 0.
    pub fn new(num_requests: u64) -> Result<Self> {
        if num_requests == 0 {
            return Err(BenchError::invalid("number of requests must be positive"));
        }
        Ok(Self { num_requests })
    }

    /// Requests replayed per run.
    pub fn num_requests(&self) -> u64 {
        self.num_requests
    }

    // == Run ==
    /// Pulls `num_requests` identifiers from `requests` and replays them
    /// against `cache`.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `requests` runs dry before `num_requests`.
    pub fn run<P, I>(
        &self,
        label: impl Into<String>,
        cache: &mut P,
        requests: I,
    ) -> Result<BenchmarkResult>
    where
        P: EvictionPolicy<ContentId, ContentValue> + ?Sized,
        I: IntoIterator<Item = ContentId>,
    {
        let label = label.into();
        debug!(
            "Running {} (capacity={}, requests={})",
            label,
            cache.capacity(),
            self.num_requests
        );

        let mut stats = RunStats::new();
        let mut requests = requests.into_iter();
        let start = Instant::now();

        for _ in 0..self.num_requests {
            let Some(id) = requests.next() else {
                return Err(BenchError::invalid(format!(
                    "request stream exhausted after {} of {} requests",
                    stats.requests(),
                    self.num_requests
                )));
            };

            if cache.get(&id).is_some() {
                stats.record_hit();
            } else {
                cache.put(id, content_value_for(id));
                stats.record_miss();
            }
        }

        let elapsed = start.elapsed();
        let result = BenchmarkResult {
            policy_label: label,
            capacity: cache.capacity(),
            num_requests: self.num_requests,
            hits: stats.hits,
            misses: stats.misses,
            hit_rate: stats.hit_rate(),
            average_latency_secs: elapsed.as_secs_f64() / self.num_requests as f64,
            final_size: cache.len(),
        };

        debug!(
            "Finished {}: hit_rate={:.4}, avg_latency={:.3e}s",
            result.policy_label, result.hit_rate, result.average_latency_secs
        );
        Ok(result)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{FrequencyCache, RecencyCache};
    use crate::workload::{WorkloadGenerator, WorkloadMode};

    #[test]
    fn test_rejects_zero_requests() {
        assert!(matches!(
            BenchmarkRunner::new(0),
            Err(BenchError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_counts_hits_and_misses() {
        let runner = BenchmarkRunner::new(6).unwrap();
        let mut cache = RecencyCache::<ContentId, ContentValue>::new(2);

        let result = runner
            .run("LRU", &mut cache, vec![1, 1, 2, 1, 3, 2])
            .unwrap();

        // miss, hit, miss, hit, miss (evicts 2), miss
        assert_eq!(result.hits, 2);
        assert_eq!(result.misses, 4);
        assert_eq!(result.num_requests, 6);
        assert!((result.hit_rate - 2.0 / 6.0).abs() < f64::EPSILON);
        assert_eq!(result.capacity, 2);
        assert_eq!(result.final_size, 2);
        assert_eq!(result.policy_label, "LRU");
        assert!(result.average_latency_secs >= 0.0);
    }

    #[test]
    fn test_miss_inserts_content_value() {
        let runner = BenchmarkRunner::new(1).unwrap();
        let mut cache = FrequencyCache::<ContentId, ContentValue>::new(4);

        runner.run("LFU", &mut cache, [7]).unwrap();

        assert_eq!(cache.get(&7).map(String::as_str), Some("Content 7"));
    }

    #[test]
    fn test_hits_do_not_put() {
        let runner = BenchmarkRunner::new(3).unwrap();
        let mut cache = FrequencyCache::<ContentId, ContentValue>::new(4);

        runner.run("LFU", &mut cache, [5, 5, 5]).unwrap();

        // 1 from the put, +1 per get-hit, no extra puts
        assert_eq!(cache.frequency(&5), Some(3));
    }

    #[test]
    fn test_exhausted_stream_is_an_error() {
        let runner = BenchmarkRunner::new(10).unwrap();
        let mut cache = RecencyCache::<ContentId, ContentValue>::new(4);
        assert!(runner.run("LRU", &mut cache, vec![1, 2, 3]).is_err());
    }

    #[test]
    fn test_zero_capacity_never_hits() {
        let runner = BenchmarkRunner::new(2_000).unwrap();
        let mut cache = RecencyCache::<ContentId, ContentValue>::new(0);
        let workload = WorkloadGenerator::new(100, WorkloadMode::zipf(), 1).unwrap();

        let result = runner.run("LRU-0", &mut cache, workload).unwrap();

        assert_eq!(result.hits, 0);
        assert_eq!(result.hit_rate, 0.0);
    }

    #[test]
    fn test_runs_through_trait_object() {
        let runner = BenchmarkRunner::new(100).unwrap();
        let mut cache: Box<dyn EvictionPolicy<ContentId, ContentValue>> =
            Box::new(RecencyCache::<ContentId, ContentValue>::new(100));

        let result = runner
            .run("LRU", cache.as_mut(), (1..=10).cycle())
            .unwrap();

        assert_eq!(result.misses, 10);
        assert_eq!(result.hits, 90);
    }
}
