//! Error types for the benchmarking harness
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Bench Error Enum ==
/// Unified error type for cache construction, workload setup and benchmark runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// A configuration value is out of range (negative capacity, zero requests,
    /// non-positive TTL, ...). Raised at construction time, never mid-run.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A benchmark worker failed to complete
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BenchError {
    /// Shorthand for building an [`BenchError::InvalidConfiguration`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        BenchError::InvalidConfiguration(msg.into())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the harness.
pub type Result<T> = std::result::Result<T, BenchError>;
