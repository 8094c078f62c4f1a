//! Iterator adapter over ensemble rounds.

use std::iter::FusedIterator;

use crate::consensus::{ConsensusPolicy, PartialResult};
use crate::error::Result;
use crate::run::RunFactory;

use super::orchestrator::ProgressiveEnsembleClustering;

/// Yields one [`PartialResult`] per round until the ensemble completes.
///
/// Stops after the first error.
pub struct Rounds<'a, C, F>
where
    C: ConsensusPolicy,
    F: RunFactory,
{
    ensemble: &'a mut ProgressiveEnsembleClustering<C, F>,
    failed: bool,
}

impl<'a, C, F> Rounds<'a, C, F>
where
    C: ConsensusPolicy,
    F: RunFactory,
{
    pub(crate) fn new(ensemble: &'a mut ProgressiveEnsembleClustering<C, F>) -> Self {
        Self {
            ensemble,
            failed: false,
        }
    }
}

impl<C, F> Iterator for Rounds<'_, C, F>
where
    C: ConsensusPolicy,
    F: RunFactory,
{
    type Item = Result<PartialResult<C::Metrics>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || !self.ensemble.has_next_round() {
            return None;
        }
        let result = self.ensemble.next_round();
        self.failed = result.is_err();
        Some(result)
    }
}

impl<C, F> FusedIterator for Rounds<'_, C, F>
where
    C: ConsensusPolicy,
    F: RunFactory,
{
}
