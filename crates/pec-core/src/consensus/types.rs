//! Round snapshot value types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::partition::PartitionMatrix;

/// Round metadata common to every consensus policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialResultInfo {
    /// Round number, starting at 1 and increasing by exactly 1.
    pub iteration: usize,

    /// True only on the final round the engine will ever produce.
    pub is_last: bool,

    /// Wall-clock time at round completion.
    pub timestamp: DateTime<Utc>,

    /// Each run's own iteration counter, in run order.
    pub run_iteration: Vec<usize>,

    /// Seconds spent stepping the runs this round.
    pub elapsed_time: f64,

    /// Run the policy singled out this round.
    pub best_run: usize,
}

/// Metrics reported by [`InertiaConsensus`](super::InertiaConsensus).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InertiaMetrics {
    /// Inertia of the best run this round.
    pub inertia: f64,
}

/// Metrics reported by [`VotingConsensus`](super::VotingConsensus).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteMetrics {
    /// Inertia of the voted labeling against its own cluster means.
    pub inertia: f64,

    /// Mean fraction of points on which an aligned run agrees with the vote.
    pub agreement: f64,

    /// Per-run agreement with the vote, in run order.
    pub run_agreement: Vec<f64>,
}

/// Metric record every policy exposes, so generic callers can report
/// partition quality without knowing the policy.
pub trait ConsensusMetrics: Clone + std::fmt::Debug + Serialize + Send {
    /// Inertia of the consensus labeling.
    fn inertia(&self) -> f64;
}

impl ConsensusMetrics for InertiaMetrics {
    fn inertia(&self) -> f64 {
        self.inertia
    }
}

impl ConsensusMetrics for VoteMetrics {
    fn inertia(&self) -> f64 {
        self.inertia
    }
}

/// One round's ensemble answer.
///
/// Built once per round by a consensus policy and handed to the caller; the
/// engine keeps no reference to it. Fields are read through accessors so the
/// snapshot stays as produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartialResult<M> {
    info: PartialResultInfo,
    metrics: M,
    labels: Vec<usize>,
    partitions: PartitionMatrix,
}

impl<M> PartialResult<M> {
    /// Assemble a snapshot.
    pub fn new(
        info: PartialResultInfo,
        metrics: M,
        labels: Vec<usize>,
        partitions: PartitionMatrix,
    ) -> Self {
        Self {
            info,
            metrics,
            labels,
            partitions,
        }
    }

    /// Round metadata.
    pub fn info(&self) -> &PartialResultInfo {
        &self.info
    }

    /// Policy metrics.
    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Consensus label of every sample.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Snapshot of the full `n × r` partition matrix.
    pub fn partitions(&self) -> &PartitionMatrix {
        &self.partitions
    }

    /// Round number.
    pub fn iteration(&self) -> usize {
        self.info.iteration
    }

    /// True on the final round.
    pub fn is_last(&self) -> bool {
        self.info.is_last
    }

    /// Take the consensus labels.
    pub fn into_labels(self) -> Vec<usize> {
        self.labels
    }
}
