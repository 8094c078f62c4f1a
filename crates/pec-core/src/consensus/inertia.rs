//! Best-run selection by inertia.

use crate::error::{PecError, Result};

use super::traits::{stable_argmin, ConsensusPolicy, RoundOutcome};
use super::types::{InertiaMetrics, PartialResult};

/// Picks the run with the lowest inertia this round (lowest index on ties)
/// and returns its labels as the consensus.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertiaConsensus;

impl InertiaConsensus {
    /// Create the policy.
    pub fn new() -> Self {
        Self
    }
}

impl ConsensusPolicy for InertiaConsensus {
    type Metrics = InertiaMetrics;

    fn name(&self) -> &'static str {
        "inertia"
    }

    fn build(&mut self, round: &RoundOutcome<'_>) -> Result<PartialResult<InertiaMetrics>> {
        let best_run = stable_argmin(round.run_metrics)
            .ok_or_else(|| PecError::internal("inertia consensus received a round with no runs"))?;
        let labels = round
            .partitions
            .column(best_run)
            .ok_or_else(|| {
                PecError::internal(format!(
                    "best run {} has no partition column ({} columns)",
                    best_run,
                    round.partitions.n_runs()
                ))
            })?
            .to_vec();

        Ok(PartialResult::new(
            round.info(best_run),
            InertiaMetrics {
                inertia: round.run_metrics[best_run],
            },
            labels,
            round.partitions.clone(),
        ))
    }
}
