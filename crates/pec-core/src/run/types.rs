//! Per-step result record.

use serde::Serialize;

/// Outcome of one refinement step of a single run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStepResult {
    /// The run's iteration counter after this step (starts at 1).
    pub iteration: usize,

    /// Quality metric of the new assignment (inertia; lower is better).
    pub metric: f64,

    /// Label of every sample after this step, values in `[0, k)`.
    pub labels: Vec<usize>,
}
