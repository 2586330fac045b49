//! Cache Sim - A benchmarking harness for cache eviction policies
//!
//! Runs the configured capacity × policy sweep and prints the report as JSON.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_sim::{run_sweep, Config};

/// Entry point for the benchmark sweep.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Run every (capacity factor, policy) combination
/// 4. Write the experiment report to stdout as JSON
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: requests={}, universe={}, base_capacity={}, factors={:?}, policies={:?}",
        config.num_requests,
        config.universe,
        config.base_capacity,
        config.capacity_factors,
        config.policies
    );

    let report = run_sweep(&config)
        .await
        .context("benchmark sweep failed")?;

    info!(
        "Sweep complete: {} results, {} skipped",
        report.results.len(),
        report.skipped.len()
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to serialize report")?
    );

    Ok(())
}
