//! Run Statistics Module
//!
//! Counts hits and misses observed by the benchmark loop.

use serde::Serialize;

// == Run Stats ==
/// Hit/miss counters for one benchmark run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing (absent or expired)
    pub misses: u64,
}

impl RunStats {
    // == Constructor ==
    /// Creates a new RunStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total lookups recorded.
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    // == Hit Rate ==
    /// Calculates the hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.requests();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = RunStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.requests(), 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        assert_eq!(RunStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = RunStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 1.0);
    }

    #[test]
    fn test_hit_rate_all_misses() {
        let mut stats = RunStats::new();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = RunStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.25);
        assert_eq!(stats.requests(), 4);
    }
}
