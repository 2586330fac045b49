//! Configuration Module
//!
//! Handles loading and validating experiment configuration from environment
//! variables.

use std::env;
use std::str::FromStr;

use serde::Serialize;

use crate::cache::{JitterRange, PolicyKind, TtlSettings};
use crate::error::{BenchError, Result};
use crate::workload::{WorkloadMode, DEFAULT_UNIVERSE, DEFAULT_ZIPF_EXPONENT};

/// Experiment configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// Requests replayed against every cache
    pub num_requests: u64,
    /// Size N of the content universe `[1, N]`
    pub universe: u64,
    /// Capacity that the capacity factors scale
    pub base_capacity: u64,
    /// Multipliers applied to `base_capacity`, one sweep step each
    pub capacity_factors: Vec<f64>,
    /// Policies benchmarked at every capacity
    pub policies: Vec<PolicyKind>,
    /// Expiry parameters for the expiring policy
    pub ttl: TtlSettings,
    /// Request distribution
    pub workload: WorkloadMode,
    /// Workload seed; drawn from entropy when unset
    pub seed: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `NUM_REQUESTS` - Requests per run (default: 1000)
    /// - `CONTENT_UNIVERSE` - Number of distinct content ids (default: 100)
    /// - `BASE_CAPACITY` - Capacity before scaling (default: 50)
    /// - `CAPACITY_FACTORS` - Comma-separated multipliers (default: 1.0,1.5,2.0)
    /// - `POLICIES` - Comma-separated `lru`, `lfu`, `ttl` (default: all three)
    /// - `BASE_TTL_SECS` - Base TTL in seconds (default: 5)
    /// - `TTL_JITTER_MIN` / `TTL_JITTER_MAX` - Jitter seconds (default: 0 / 10)
    /// - `WORKLOAD` - `uniform` or `zipf` (default: zipf)
    /// - `ZIPF_EXPONENT` - Skew exponent (default: 2.0)
    /// - `WORKLOAD_SEED` - Fixed seed (default: unset)
    ///
    /// Unparseable values fall back to their defaults; range checks are left
    /// to [`Config::validate`].
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let jitter = JitterRange {
            min_secs: env_or("TTL_JITTER_MIN", defaults.ttl.jitter.min_secs),
            max_secs: env_or("TTL_JITTER_MAX", defaults.ttl.jitter.max_secs),
        };
        let workload = match env_or("WORKLOAD", defaults.workload) {
            WorkloadMode::Zipf { .. } => WorkloadMode::Zipf {
                exponent: env_or("ZIPF_EXPONENT", DEFAULT_ZIPF_EXPONENT),
            },
            uniform => uniform,
        };

        Self {
            num_requests: env_or("NUM_REQUESTS", defaults.num_requests),
            universe: env_or("CONTENT_UNIVERSE", defaults.universe),
            base_capacity: env_or("BASE_CAPACITY", defaults.base_capacity),
            capacity_factors: env_list_or("CAPACITY_FACTORS", defaults.capacity_factors),
            policies: env_list_or("POLICIES", defaults.policies),
            ttl: TtlSettings {
                base_ttl_secs: env_or("BASE_TTL_SECS", defaults.ttl.base_ttl_secs),
                jitter,
            },
            workload,
            seed: env::var("WORKLOAD_SEED").ok().and_then(|v| v.parse().ok()),
        }
    }

    // == Validate ==
    /// Checks the values that would make the whole sweep meaningless.
    ///
    /// Per-run problems such as a bad TTL are not checked here; they only
    /// skip the affected runs.
    pub fn validate(&self) -> Result<()> {
        if self.num_requests == 0 {
            return Err(BenchError::invalid("NUM_REQUESTS must be positive"));
        }
        if self.universe == 0 {
            return Err(BenchError::invalid("CONTENT_UNIVERSE must be positive"));
        }
        if self.capacity_factors.is_empty() {
            return Err(BenchError::invalid("at least one capacity factor is required"));
        }
        if let Some(factor) = self.capacity_factors.iter().find(|f| !f.is_finite()) {
            return Err(BenchError::invalid(format!(
                "capacity factor must be finite, got {}",
                factor
            )));
        }
        if self.policies.is_empty() {
            return Err(BenchError::invalid("at least one policy is required"));
        }
        if let WorkloadMode::Zipf { exponent } = self.workload {
            if !exponent.is_finite() || exponent < 0.0 {
                return Err(BenchError::invalid(format!(
                    "ZIPF_EXPONENT must be a finite non-negative number, got {}",
                    exponent
                )));
            }
        }
        Ok(())
    }

    // == Capacity For ==
    /// Capacity of one sweep step: `base_capacity × factor`, truncated.
    pub fn capacity_for(&self, factor: f64) -> i64 {
        (self.base_capacity as f64 * factor) as i64
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_requests: 1000,
            universe: DEFAULT_UNIVERSE,
            base_capacity: 50,
            capacity_factors: vec![1.0, 1.5, 2.0],
            policies: PolicyKind::ALL.to_vec(),
            ttl: TtlSettings::default(),
            workload: WorkloadMode::default(),
            seed: None,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses a comma-separated list; any bad element discards the whole list.
fn env_list_or<T: FromStr>(name: &str, default: Vec<T>) -> Vec<T> {
    env::var(name)
        .ok()
        .and_then(|v| parse_list(&v))
        .unwrap_or(default)
}

fn parse_list<T: FromStr>(raw: &str) -> Option<Vec<T>> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.num_requests, 1000);
        assert_eq!(config.universe, 100);
        assert_eq!(config.base_capacity, 50);
        assert_eq!(config.capacity_factors, vec![1.0, 1.5, 2.0]);
        assert_eq!(config.policies, PolicyKind::ALL.to_vec());
        assert_eq!(config.ttl.base_ttl_secs, 5.0);
        assert_eq!(config.ttl.jitter, JitterRange::new(0, 10).unwrap());
        assert_eq!(config.workload, WorkloadMode::Zipf { exponent: 2.0 });
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        for name in [
            "NUM_REQUESTS",
            "CONTENT_UNIVERSE",
            "BASE_CAPACITY",
            "CAPACITY_FACTORS",
            "POLICIES",
            "BASE_TTL_SECS",
            "TTL_JITTER_MIN",
            "TTL_JITTER_MAX",
            "WORKLOAD",
            "ZIPF_EXPONENT",
            "WORKLOAD_SEED",
        ] {
            env::remove_var(name);
        }

        assert_eq!(Config::from_env(), Config::default());
    }

    #[test]
    fn test_capacity_for_truncates() {
        let config = Config::default();
        assert_eq!(config.capacity_for(1.0), 50);
        assert_eq!(config.capacity_for(1.5), 75);
        assert_eq!(config.capacity_for(0.33), 16);
        assert_eq!(config.capacity_for(-1.0), -50);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list::<f64>("1.0, 1.5,2"), Some(vec![1.0, 1.5, 2.0]));
        assert_eq!(
            parse_list::<PolicyKind>("lru,ttl"),
            Some(vec![PolicyKind::Recency, PolicyKind::Expiring])
        );
        assert_eq!(parse_list::<f64>("1.0,abc"), None);
    }

    #[test]
    fn test_validate_rejects_zero_requests() {
        let config = Config {
            num_requests: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BenchError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_sweep() {
        let no_factors = Config {
            capacity_factors: vec![],
            ..Config::default()
        };
        let no_policies = Config {
            policies: vec![],
            ..Config::default()
        };
        assert!(no_factors.validate().is_err());
        assert!(no_policies.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_workload() {
        let config = Config {
            workload: WorkloadMode::Zipf { exponent: -2.0 },
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            universe: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ignores_per_run_problems() {
        let config = Config {
            ttl: TtlSettings {
                base_ttl_secs: -5.0,
                jitter: JitterRange::default(),
            },
            capacity_factors: vec![-1.0, 1.0],
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
