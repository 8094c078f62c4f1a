//! The consensus hook.

use std::time::Duration;

use chrono::Utc;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::partition::PartitionMatrix;

use super::types::{ConsensusMetrics, PartialResult, PartialResultInfo};

/// Everything the orchestrator knows about one finished round.
///
/// Per-run slices are indexed by run. Runs that were already exhausted this
/// round report their last known iteration and metric.
#[derive(Debug, Clone, Copy)]
pub struct RoundOutcome<'a> {
    /// Round number (1-based).
    pub iteration: usize,
    /// True if every run is exhausted after this round.
    pub is_last: bool,
    /// Each run's iteration counter.
    pub run_iteration: &'a [usize],
    /// Each run's latest metric (inertia).
    pub run_metrics: &'a [f64],
    /// The full partition matrix after this round.
    pub partitions: &'a PartitionMatrix,
    /// Time spent stepping the runs.
    pub elapsed: Duration,
    /// Shared dataset.
    pub data: &'a Dataset,
    /// Number of clusters.
    pub n_clusters: usize,
}

impl RoundOutcome<'_> {
    /// Number of runs in the ensemble.
    pub fn n_runs(&self) -> usize {
        self.run_metrics.len()
    }

    /// Round metadata with `best_run`, stamped with the current time.
    pub fn info(&self, best_run: usize) -> PartialResultInfo {
        PartialResultInfo {
            iteration: self.iteration,
            is_last: self.is_last,
            timestamp: Utc::now(),
            run_iteration: self.run_iteration.to_vec(),
            elapsed_time: self.elapsed.as_secs_f64(),
            best_run,
        }
    }
}

/// Reduces one round's per-run outcomes into a single ensemble answer.
///
/// Implementations must return labels of length `n` with values in
/// `[0, k)` and a full copy of the partition matrix. Swapping the policy
/// requires no change anywhere else.
pub trait ConsensusPolicy {
    /// Policy-specific metric record.
    type Metrics: ConsensusMetrics;

    /// Short policy name for logs.
    fn name(&self) -> &'static str;

    /// Build this round's snapshot.
    fn build(&mut self, round: &RoundOutcome<'_>) -> Result<PartialResult<Self::Metrics>>;
}

/// Lowest index holding the minimum value (NaN sorts last).
pub fn stable_argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if b.total_cmp(&v).is_le() => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Lowest index holding the maximum value.
pub fn stable_argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if b.total_cmp(&v).is_ge() => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
