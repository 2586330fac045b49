//! Cache Sim - A benchmarking harness for cache eviction policies
//!
//! Replays a synthetic request workload against LRU, LFU and jittered-TTL
//! caches and reports hit rate and average per-request latency.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod experiment;
pub mod runner;
pub mod workload;

pub use cache::{EvictionPolicy, PolicyKind};
pub use config::Config;
pub use error::{BenchError, Result};
pub use experiment::{run_sweep, ExperimentReport};
pub use runner::{BenchmarkResult, BenchmarkRunner};
pub use workload::{WorkloadGenerator, WorkloadMode};
