//! Experiment Module
//!
//! Runs the capacity × policy sweep. Every combination gets its own cache and
//! workload generator and runs on a blocking worker thread; results come back
//! in sweep order.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::cache::{PolicyKind, TtlSettings};
use crate::config::Config;
use crate::error::{BenchError, Result};
use crate::runner::{BenchmarkResult, BenchmarkRunner};
use crate::workload::{WorkloadGenerator, WorkloadMode};

/// Mixed into the workload seed to seed TTL jitter, so the two streams differ.
const JITTER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

// == Run Plan ==
/// One (policy, capacity) combination of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    pub label: String,
    pub kind: PolicyKind,
    pub capacity: i64,
}

/// Run label in the form `LRU-1.5x`.
pub fn run_label(kind: PolicyKind, factor: f64) -> String {
    format!("{}-{:?}x", kind.label(), factor)
}

/// Lists the sweep's runs: factor-major, then policy order.
pub fn plan_runs(config: &Config) -> Vec<RunPlan> {
    config
        .capacity_factors
        .iter()
        .flat_map(|&factor| {
            config.policies.iter().map(move |&kind| RunPlan {
                label: run_label(kind, factor),
                kind,
                capacity: config.capacity_for(factor),
            })
        })
        .collect()
}

// == Report ==
/// A combination that could not be built or run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRun {
    pub policy_label: String,
    pub capacity: i64,
    pub reason: String,
}

/// Everything a sweep produced, ready for reporting or plotting.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub generated_at: DateTime<Utc>,
    /// Workload seed shared by every run
    pub seed: u64,
    pub num_requests: u64,
    pub universe: u64,
    pub workload: WorkloadMode,
    /// Successful runs in sweep order
    pub results: Vec<BenchmarkResult>,
    pub skipped: Vec<SkippedRun>,
}

impl ExperimentReport {
    /// Looks up a result by its run label.
    pub fn result(&self, label: &str) -> Option<&BenchmarkResult> {
        self.results.iter().find(|r| r.policy_label == label)
    }
}

// == Run Sweep ==
/// Runs every planned combination in parallel and gathers the report.
///
/// All runs replay the same request sequence (same workload seed), so their
/// hit rates are directly comparable.
///
/// # Errors
/// `InvalidConfiguration` if the configuration fails [`Config::validate`].
/// A combination that fails to build, fails to run or panics is recorded in
/// [`ExperimentReport::skipped`] and the rest of the sweep carries on.
pub async fn run_sweep(config: &Config) -> Result<ExperimentReport> {
    config.validate()?;
    let runner = BenchmarkRunner::new(config.num_requests)?;
    let seed = config.seed.unwrap_or_else(rand::random);

    info!(
        "Starting sweep: {} runs, {} requests each, workload={}, seed={}",
        config.capacity_factors.len() * config.policies.len(),
        config.num_requests,
        config.workload,
        seed
    );

    let jobs: Vec<(RunPlan, JoinHandle<Result<BenchmarkResult>>)> = plan_runs(config)
        .into_iter()
        .map(|plan| {
            let job = RunJob {
                plan: plan.clone(),
                runner,
                ttl: config.ttl,
                universe: config.universe,
                workload: config.workload,
                seed,
            };
            (plan, tokio::task::spawn_blocking(move || job.run()))
        })
        .collect();

    let (results, skipped) = collect_runs(jobs).await;

    Ok(ExperimentReport {
        generated_at: Utc::now(),
        seed,
        num_requests: config.num_requests,
        universe: config.universe,
        workload: config.workload,
        results,
        skipped,
    })
}

// == Collect Runs ==
/// Awaits every worker in order, splitting outcomes into results and skips.
async fn collect_runs(
    jobs: Vec<(RunPlan, JoinHandle<Result<BenchmarkResult>>)>,
) -> (Vec<BenchmarkResult>, Vec<SkippedRun>) {
    let mut results = Vec::with_capacity(jobs.len());
    let mut skipped = Vec::new();

    for (plan, handle) in jobs {
        let outcome = handle
            .await
            .map_err(|e| BenchError::Internal(format!("worker failed: {}", e)))
            .and_then(|outcome| outcome);

        match outcome {
            Ok(result) => {
                info!(
                    "{} (capacity {}): hit rate {:.2}%, avg response {:.3e}s",
                    result.policy_label,
                    result.capacity,
                    result.hit_rate * 100.0,
                    result.average_latency_secs
                );
                results.push(result);
            }
            Err(err) => {
                warn!("Skipping {} (capacity {}): {}", plan.label, plan.capacity, err);
                skipped.push(SkippedRun {
                    policy_label: plan.label,
                    capacity: plan.capacity,
                    reason: err.to_string(),
                });
            }
        }
    }

    (results, skipped)
}

/// Self-contained inputs of one worker.
struct RunJob {
    plan: RunPlan,
    runner: BenchmarkRunner,
    ttl: TtlSettings,
    universe: u64,
    workload: WorkloadMode,
    seed: u64,
}

impl RunJob {
    fn run(self) -> Result<BenchmarkResult> {
        let mut cache = self
            .plan
            .kind
            .build(self.plan.capacity, &self.ttl, self.seed ^ JITTER_SEED_SALT)?;
        let requests = WorkloadGenerator::new(self.universe, self.workload, self.seed)?;
        self.runner.run(self.plan.label, cache.as_mut(), requests)
    }
}
