//! Scripted runs with a fixed number of steps.
//!
//! Run `i` with length `L` steps exactly `L` times. After step `t` every
//! label is `t % k` and the metric is `(i + 1) / t`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::{EnsembleConfig, InitStrategy};
use crate::consensus::{
    ConsensusPolicy, InertiaConsensus, InertiaMetrics, PartialResult, RoundOutcome,
};
use crate::dataset::Dataset;
use crate::ensemble::ProgressiveEnsembleClustering;
use crate::error::{PecError, Result, StateError};
use crate::run::{ProgressiveRun, RunFactory, RunSpec, RunStepResult};

#[derive(Debug)]
pub struct ScriptedRun {
    pub index: usize,
    pub seed: u64,
    pub init: InitStrategy,
    length: usize,
    fail_at: Option<usize>,
    n_clusters: usize,
    iteration: usize,
    labels: Vec<usize>,
}

impl ProgressiveRun for ScriptedRun {
    fn has_next_step(&self) -> bool {
        self.iteration < self.length
    }

    fn next_step(&mut self) -> Result<RunStepResult> {
        if !self.has_next_step() {
            return Err(StateError::RunExhausted {
                iteration: self.iteration,
            }
            .into());
        }
        if self.fail_at == Some(self.iteration + 1) {
            return Err(PecError::internal(format!("run {} scripted failure", self.index)));
        }
        self.iteration += 1;
        self.labels.fill(self.iteration % self.n_clusters);
        Ok(RunStepResult {
            iteration: self.iteration,
            metric: (self.index + 1) as f64 / self.iteration as f64,
            labels: self.labels.clone(),
        })
    }

    fn iteration(&self) -> usize {
        self.iteration
    }

    fn labels(&self) -> &[usize] {
        &self.labels
    }
}

/// Builds [`ScriptedRun`]s and counts how many it built.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFactory {
    pub lengths: Vec<usize>,
    pub fail_at: Option<(usize, usize)>,
    pub created: Arc<AtomicUsize>,
}

impl ScriptedFactory {
    pub fn new(lengths: &[usize]) -> Self {
        Self {
            lengths: lengths.to_vec(),
            ..Default::default()
        }
    }

    /// Make run `run` fail on its `step`-th step.
    pub fn failing(mut self, run: usize, step: usize) -> Self {
        self.fail_at = Some((run, step));
        self
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl RunFactory for ScriptedFactory {
    type Run = ScriptedRun;

    fn create(&self, spec: RunSpec<'_>) -> Result<ScriptedRun> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedRun {
            index: spec.index,
            seed: spec.seed,
            init: spec.init,
            length: self.lengths.get(spec.index).copied().unwrap_or(1),
            fail_at: self
                .fail_at
                .filter(|&(run, _)| run == spec.index)
                .map(|(_, step)| step),
            n_clusters: spec.n_clusters,
            iteration: 0,
            labels: vec![0; spec.data.n_samples()],
        })
    }
}

/// Inertia consensus that fails its first `failures_left` final rounds.
#[derive(Debug, Default)]
pub struct FlakyConsensus {
    pub failures_left: usize,
}

impl ConsensusPolicy for FlakyConsensus {
    type Metrics = InertiaMetrics;

    fn name(&self) -> &'static str {
        "flaky"
    }

    fn build(&mut self, round: &RoundOutcome<'_>) -> Result<PartialResult<InertiaMetrics>> {
        if round.is_last && self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(PecError::internal("flaky consensus failure"));
        }
        InertiaConsensus.build(round)
    }
}

/// Six 1-D points.
pub fn six_points() -> Dataset {
    Dataset::from_flat(vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0], 6, 1).unwrap()
}

/// Scripted ensemble with one run per entry of `lengths`.
pub fn scripted(
    lengths: &[usize],
    k: usize,
) -> (
    ProgressiveEnsembleClustering<InertiaConsensus, ScriptedFactory>,
    ScriptedFactory,
) {
    let factory = ScriptedFactory::new(lengths);
    let config = EnsembleConfig::new(k)
        .with_runs(lengths.len())
        .with_max_iter(100)
        .with_seed(7);
    let ensemble = ProgressiveEnsembleClustering::with_factory(
        six_points(),
        config,
        InertiaConsensus,
        factory.clone(),
    )
    .unwrap();
    (ensemble, factory)
}
