//! Single-step trial contract and the factory seam.

use crate::config::InitStrategy;
use crate::dataset::Dataset;
use crate::error::Result;

use super::types::RunStepResult;

/// One incremental clustering trial, advanced one step at a time.
///
/// Implementors own their state exclusively. The orchestrator only reads
/// through this trait and never mutates a run's labels or centroids.
///
/// # Contract
///
/// - `has_next_step()` is true while the trial is below its iteration cap,
///   not converged, and not failed.
/// - `next_step()` performs exactly one refinement pass. Calling it while
///   `has_next_step()` is false returns
///   [`StateError::RunExhausted`](crate::error::StateError::RunExhausted).
/// - A trial that becomes numerically unrecoverable reports
///   `has_next_step() == false` from then on instead of returning errors.
/// - Behaviour is deterministic given data, k, seed, and init strategy.
pub trait ProgressiveRun: Send {
    /// Whether another refinement step is available.
    fn has_next_step(&self) -> bool;

    /// Perform one refinement step.
    ///
    /// # Errors
    ///
    /// `StateError::RunExhausted` if `has_next_step()` is false.
    fn next_step(&mut self) -> Result<RunStepResult>;

    /// Steps performed so far.
    fn iteration(&self) -> usize;

    /// Current label vector (length `n`).
    fn labels(&self) -> &[usize];
}

/// Everything a factory needs to build run `index`.
#[derive(Debug, Clone)]
pub struct RunSpec<'a> {
    /// Position of the run in the ensemble (== partition column).
    pub index: usize,
    /// Shared dataset view.
    pub data: &'a Dataset,
    /// Number of clusters.
    pub n_clusters: usize,
    /// Per-run iteration cap.
    pub max_iter: usize,
    /// Centroid-shift tolerance.
    pub tol: f64,
    /// Initialization strategy selected in the configuration.
    pub init: InitStrategy,
    /// The run's private sub-seed.
    pub seed: u64,
}

/// Builds the runs of an ensemble.
///
/// The orchestrator calls this once per run, on the first round, so the
/// concrete trial algorithm stays pluggable.
pub trait RunFactory {
    /// Concrete trial type.
    type Run: ProgressiveRun;

    /// Build the run described by `spec`.
    fn create(&self, spec: RunSpec<'_>) -> Result<Self::Run>;
}
