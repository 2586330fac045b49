//! Workload Generator Module
//!
//! Produces content identifiers from `[1, N]` under a uniform or Zipf-shaped
//! distribution.

use std::fmt;
use std::str::FromStr;

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::cache::ContentId;
use crate::error::{BenchError, Result};

/// Default number of distinct content identifiers.
pub const DEFAULT_UNIVERSE: u64 = 100;

/// Default Zipf skew exponent.
pub const DEFAULT_ZIPF_EXPONENT: f64 = 2.0;

// == Workload Mode ==
/// Shape of the request distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WorkloadMode {
    /// Every identifier equally likely.
    Uniform,
    /// `P(k) ∝ 1 / k^exponent`; low identifiers dominate.
    Zipf { exponent: f64 },
}

impl WorkloadMode {
    /// Zipf mode with the default exponent.
    pub fn zipf() -> Self {
        WorkloadMode::Zipf {
            exponent: DEFAULT_ZIPF_EXPONENT,
        }
    }
}

impl Default for WorkloadMode {
    fn default() -> Self {
        Self::zipf()
    }
}

impl fmt::Display for WorkloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadMode::Uniform => write!(f, "uniform"),
            WorkloadMode::Zipf { exponent } => write!(f, "zipf(s={})", exponent),
        }
    }
}

impl FromStr for WorkloadMode {
    type Err = BenchError;

    /// Parses `uniform` or `zipf`; `zipf` carries the default exponent.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(WorkloadMode::Uniform),
            "zipf" | "skewed" => Ok(WorkloadMode::zipf()),
            other => Err(BenchError::invalid(format!(
                "unknown workload mode '{}', expected 'uniform' or 'zipf'",
                other
            ))),
        }
    }
}

// == Workload Generator ==
/// Endless stream of content identifiers.
///
/// The Zipf weighting is computed once at construction and reused for every
/// draw, so the empirical distribution converges instead of drifting. Use
/// [`Iterator::take`] for a bounded sequence.
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    universe: u64,
    mode: WorkloadMode,
    rng: StdRng,
    zipf: Option<WeightedIndex<f64>>,
}

impl WorkloadGenerator {
    // == Constructor ==
    /// Creates a reproducible generator seeded with `seed`.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `universe` is 0 or the Zipf exponent is
    /// negative or not finite.
    pub fn new(universe: u64, mode: WorkloadMode, seed: u64) -> Result<Self> {
        Self::with_rng(universe, mode, StdRng::seed_from_u64(seed))
    }

    /// Creates a generator seeded from OS entropy.
    pub fn from_entropy(universe: u64, mode: WorkloadMode) -> Result<Self> {
        Self::with_rng(universe, mode, StdRng::from_entropy())
    }

    fn with_rng(universe: u64, mode: WorkloadMode, rng: StdRng) -> Result<Self> {
        if universe == 0 {
            return Err(BenchError::invalid("content universe must not be empty"));
        }

        let zipf = match mode {
            WorkloadMode::Uniform => None,
            WorkloadMode::Zipf { exponent } => {
                Some(WeightedIndex::new(zipf_weights(universe, exponent)?).map_err(
                    |e| BenchError::invalid(format!("invalid Zipf weighting: {}", e)),
                )?)
            }
        };

        Ok(Self {
            universe,
            mode,
            rng,
            zipf,
        })
    }

    // == Next Id ==
    /// Draws the next identifier in `[1, universe]`.
    pub fn next_id(&mut self) -> ContentId {
        match &self.zipf {
            Some(weights) => weights.sample(&mut self.rng) as ContentId + 1,
            None => self.rng.gen_range(1..=self.universe),
        }
    }

    /// Number of distinct identifiers the generator draws from.
    pub fn universe(&self) -> u64 {
        self.universe
    }

    /// The popularity distribution in use.
    pub fn mode(&self) -> WorkloadMode {
        self.mode
    }
}

impl Iterator for WorkloadGenerator {
    type Item = ContentId;

    fn next(&mut self) -> Option<ContentId> {
        Some(self.next_id())
    }
}

/// Unnormalized Zipf weights `1 / k^exponent` for `k` in `1..=universe`.
fn zipf_weights(universe: u64, exponent: f64) -> Result<Vec<f64>> {
    if !exponent.is_finite() || exponent < 0.0 {
        return Err(BenchError::invalid(format!(
            "Zipf exponent must be a finite non-negative number, got {}",
            exponent
        )));
    }
    Ok((1..=universe)
        .map(|k| 1.0 / (k as f64).powf(exponent))
        .collect())
}
