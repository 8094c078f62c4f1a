//! Progressive ensemble orchestrator.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::EnsembleConfig;
use crate::consensus::{
    ConsensusPolicy, InertiaConsensus, PartialResult, RoundOutcome, VotingConsensus,
};
use crate::dataset::Dataset;
use crate::error::{PecError, Result, StateError};
use crate::partition::PartitionMatrix;
use crate::run::{KMeansRunFactory, ProgressiveRun, RunFactory, RunSpec};
use crate::seed::SeedGenerator;

use super::lifecycle::{EnsembleStage, Lifecycle};
use super::rounds::Rounds;

/// Ensemble of k-means runs reduced by best inertia.
pub type InertiaEnsemble = ProgressiveEnsembleClustering<InertiaConsensus>;

/// Ensemble of k-means runs reduced by label-aligned voting.
pub type VotingEnsemble = ProgressiveEnsembleClustering<VotingConsensus>;

/// Runs `r` progressive clustering trials in lock-step and reports one
/// consensus answer per round.
///
/// Every round steps each run that can still step, in run-index order, and
/// overwrites that run's partition column. Runs that are already exhausted
/// keep their last column and metric. The ensemble completes on the round in
/// which no run can step any further; that round's result is the only one
/// with `is_last == true`.
///
/// # Example
///
/// ```
/// use pec_core::config::EnsembleConfig;
/// use pec_core::consensus::InertiaConsensus;
/// use pec_core::{Dataset, ProgressiveEnsembleClustering};
///
/// let data = Dataset::from_rows(&[[0.0, 0.0], [0.0, 1.0], [10.0, 10.0], [10.0, 11.0]]).unwrap();
/// let config = EnsembleConfig::new(2).with_runs(3).with_seed(42);
/// let mut ensemble = ProgressiveEnsembleClustering::new(data, config, InertiaConsensus).unwrap();
///
/// while ensemble.has_next_round() {
///     let result = ensemble.next_round().unwrap();
///     assert_eq!(result.labels().len(), 4);
/// }
/// ```
pub struct ProgressiveEnsembleClustering<C, F = KMeansRunFactory>
where
    C: ConsensusPolicy,
    F: RunFactory,
{
    data: Dataset,
    config: EnsembleConfig,
    seeds: Vec<u64>,
    factory: F,
    consensus: C,
    state: Lifecycle<F::Run>,
    partitions: PartitionMatrix,
    run_metrics: Vec<f64>,
    round: usize,
}

impl<C: ConsensusPolicy> ProgressiveEnsembleClustering<C> {
    /// Build an ensemble of [`ProgressiveKMeans`](crate::run::ProgressiveKMeans) runs.
    ///
    /// # Errors
    ///
    /// Any configuration problem, including `n_clusters > data.n_samples()`.
    pub fn new(data: Dataset, config: EnsembleConfig, consensus: C) -> Result<Self> {
        Self::with_factory(data, config, consensus, KMeansRunFactory)
    }
}

impl<C, F> ProgressiveEnsembleClustering<C, F>
where
    C: ConsensusPolicy,
    F: RunFactory,
{
    /// Build an ensemble whose runs come from `factory`.
    ///
    /// Validates the configuration against the data and derives one sub-seed
    /// per run. No run is created until the first [`next_round`](Self::next_round).
    pub fn with_factory(
        data: Dataset,
        config: EnsembleConfig,
        consensus: C,
        factory: F,
    ) -> Result<Self> {
        config.validate_for_samples(data.n_samples())?;

        let seeds = SeedGenerator::new(config.random_state).derive(config.n_runs);

        info!(
            n_samples = data.n_samples(),
            n_features = data.n_features(),
            n_clusters = config.n_clusters,
            n_runs = config.n_runs,
            max_iter = config.max_iter,
            init = %config.init,
            seeded = config.random_state.is_some(),
            parallel = config.parallel,
            policy = consensus.name(),
            "progressive ensemble configured"
        );

        Ok(Self {
            partitions: PartitionMatrix::new(data.n_samples(), config.n_runs),
            run_metrics: vec![f64::INFINITY; config.n_runs],
            data,
            config,
            seeds,
            factory,
            consensus,
            state: Lifecycle::Constructed,
            round: 0,
        })
    }

    /// True until every run has reported exhaustion.
    pub fn has_next_round(&self) -> bool {
        !matches!(self.state, Lifecycle::Completed(_))
    }

    /// Advance every run that can still step by one step and build this
    /// round's result.
    ///
    /// # Errors
    ///
    /// - `StateError::EnsembleCompleted` once the ensemble has completed
    /// - any error from the run factory, a run, or the consensus policy
    ///
    /// A consensus error on the final round leaves the ensemble active, so
    /// the final round can be requested again.
    pub fn next_round(&mut self) -> Result<PartialResult<C::Metrics>> {
        if !self.has_next_round() {
            return Err(StateError::EnsembleCompleted { rounds: self.round }.into());
        }
        if matches!(self.state, Lifecycle::Constructed) {
            self.spawn_runs()?;
        }
        let Lifecycle::Active(runs) = &mut self.state else {
            return Err(PecError::internal("ensemble has no active runs to step"));
        };

        self.round += 1;
        let round = self.round;
        let start = Instant::now();

        let stepped: Vec<bool> = if self.config.parallel {
            runs.par_iter_mut()
                .zip(self.partitions.par_columns_mut())
                .zip(self.run_metrics.par_iter_mut())
                .enumerate()
                .map(|(index, ((run, column), metric))| advance_run(index, run, column, metric))
                .collect::<Result<_>>()?
        } else {
            runs.iter_mut()
                .zip(self.partitions.columns_mut())
                .zip(self.run_metrics.iter_mut())
                .enumerate()
                .map(|(index, ((run, column), metric))| advance_run(index, run, column, metric))
                .collect::<Result<_>>()?
        };

        let elapsed = start.elapsed();
        let run_iteration: Vec<usize> = runs.iter().map(|run| run.iteration()).collect();
        let is_last = runs.iter().all(|run| !run.has_next_step());

        debug!(
            round,
            stepped = stepped.iter().filter(|&&s| s).count(),
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            is_last,
            "round stepped"
        );

        let outcome = RoundOutcome {
            iteration: round,
            is_last,
            run_iteration: &run_iteration,
            run_metrics: &self.run_metrics,
            partitions: &self.partitions,
            elapsed,
            data: &self.data,
            n_clusters: self.config.n_clusters,
        };
        let result = self.consensus.build(&outcome);

        if is_last {
            if result.is_ok() {
                self.state.complete();
                info!(
                    rounds = round,
                    run_iteration = ?run_iteration,
                    "progressive ensemble completed"
                );
            } else {
                // Runs are exhausted, so a retry rebuilds this same round.
                self.round -= 1;
            }
        }
        result
    }

    /// Iterator over the remaining rounds.
    pub fn rounds(&mut self) -> Rounds<'_, C, F> {
        Rounds::new(self)
    }

    /// Drive the ensemble to completion and return the final round.
    ///
    /// # Errors
    ///
    /// The first error any round produces, or `StateError::EnsembleCompleted`
    /// if the ensemble had already completed before this call.
    pub fn run_to_completion(&mut self) -> Result<PartialResult<C::Metrics>> {
        let mut last = None;
        while self.has_next_round() {
            last = Some(self.next_round()?);
        }
        last.ok_or_else(|| StateError::EnsembleCompleted { rounds: self.round }.into())
    }

    /// Current lifecycle stage.
    pub fn stage(&self) -> EnsembleStage {
        self.state.stage()
    }

    /// Rounds produced so far.
    pub fn rounds_completed(&self) -> usize {
        self.round
    }

    /// The validated configuration.
    pub fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    /// The shared dataset.
    pub fn data(&self) -> &Dataset {
        &self.data
    }

    /// Sub-seed of every run, in run order.
    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }

    /// The live partition matrix.
    pub fn partitions(&self) -> &PartitionMatrix {
        &self.partitions
    }

    /// Latest metric of every run (`INFINITY` before a run's first step).
    pub fn run_metrics(&self) -> &[f64] {
        &self.run_metrics
    }

    /// The runs, in run order. Empty before the first round.
    pub fn runs(&self) -> &[F::Run] {
        self.state.runs()
    }

    /// The consensus policy.
    pub fn consensus(&self) -> &C {
        &self.consensus
    }

    fn spawn_runs(&mut self) -> Result<()> {
        let runs = self
            .seeds
            .iter()
            .enumerate()
            .map(|(index, &seed)| {
                self.factory.create(RunSpec {
                    index,
                    data: &self.data,
                    n_clusters: self.config.n_clusters,
                    max_iter: self.config.max_iter,
                    tol: self.config.tol,
                    init: self.config.init,
                    seed,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            n_runs = runs.len(),
            init = %self.config.init,
            "progressive runs created"
        );
        self.state = Lifecycle::Active(runs);
        Ok(())
    }
}

impl<C, F> std::fmt::Debug for ProgressiveEnsembleClustering<C, F>
where
    C: ConsensusPolicy,
    F: RunFactory,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressiveEnsembleClustering")
            .field("shape", &self.data.shape())
            .field("config", &self.config)
            .field("policy", &self.consensus.name())
            .field("stage", &self.state.stage())
            .field("round", &self.round)
            .finish()
    }
}

/// Step one run if it can, copying its labels into `column`.
///
/// Returns whether the run stepped. An exhausted run is left untouched.
fn advance_run<R: ProgressiveRun>(
    index: usize,
    run: &mut R,
    column: &mut [usize],
    metric: &mut f64,
) -> Result<bool> {
    if !run.has_next_step() {
        return Ok(false);
    }
    let step = run.next_step()?;
    if step.labels.len() != column.len() {
        return Err(PecError::internal(format!(
            "run {} returned {} labels for {} samples",
            index,
            step.labels.len(),
            column.len()
        )));
    }
    column.copy_from_slice(&step.labels);
    *metric = step.metric;

    debug!(
        run = index,
        iteration = step.iteration,
        inertia = step.metric,
        exhausted = !run.has_next_step(),
        "run stepped"
    );
    Ok(true)
}
