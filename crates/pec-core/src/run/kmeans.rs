//! Progressive Lloyd's k-means: one assignment + update pass per step.
//!
//! # Step
//!
//! 1. Assign each point to its nearest current centroid (ties to the lowest
//!    centroid index).
//! 2. Recover empty clusters (see below).
//! 3. Move each centroid to the mean of its members.
//! 4. Report the inertia of the new assignment against the new centroids.
//!
//! Reporting inertia after the update makes the per-run metric sequence
//! non-increasing: reassignment cannot raise it, moving to the mean cannot
//! raise it, and recovery only ever lowers it.
//!
//! # Empty-cluster recovery
//!
//! A cluster left empty by the assignment pass takes the point farthest from
//! its currently assigned centroid, chosen among clusters that still keep at
//! least one other member (ties to the lowest point index). Empty clusters
//! are filled in increasing cluster order. With `k <= n` a donor always
//! exists, so every cluster is non-empty after recovery.
//!
//! # Convergence
//!
//! A run stops when its largest centroid shift is below `tol`, when its
//! labels did not change from the previous step, or at `max_iter`. A step
//! whose inertia is not finite marks the run failed; its previous state is
//! kept and it reports no further steps.

use tracing::{debug, warn};

use crate::config::InitStrategy;
use crate::dataset::Dataset;
use crate::error::{ConfigError, Result, StateError};
use crate::metrics::{cluster_means, inertia, max_centroid_shift, nearest_centroid};
use crate::seed::run_rng;

use super::init::initial_centroids;
use super::traits::{ProgressiveRun, RunFactory, RunSpec};
use super::types::RunStepResult;

/// One k-means trial advanced a single Lloyd step at a time.
#[derive(Debug, Clone)]
pub struct ProgressiveKMeans {
    data: Dataset,
    n_clusters: usize,
    max_iter: usize,
    tol: f64,
    centroids: Vec<f64>,
    labels: Vec<usize>,
    iteration: usize,
    converged: bool,
    failed: bool,
    last_metric: Option<f64>,
    recoveries: usize,
}

impl ProgressiveKMeans {
    /// Build a trial seeded by `strategy` with the run's private `seed`.
    ///
    /// # Errors
    ///
    /// `ConfigError` for `k < 1`, `k > n`, `max_iter < 1`, or a negative or
    /// non-finite `tol`.
    pub fn new(
        data: Dataset,
        n_clusters: usize,
        max_iter: usize,
        tol: f64,
        strategy: InitStrategy,
        seed: u64,
    ) -> Result<Self> {
        validate_params(&data, n_clusters, max_iter, tol)?;
        let mut rng = run_rng(seed);
        let centroids = initial_centroids(&data, n_clusters, strategy, &mut rng);
        Ok(Self::with_state(data, n_clusters, max_iter, tol, centroids))
    }

    /// Build a trial from explicit starting centroids (flat `k × d`).
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new), plus a shape or finiteness problem with
    /// `centroids`.
    pub fn from_centroids(
        data: Dataset,
        centroids: Vec<f64>,
        max_iter: usize,
        tol: f64,
    ) -> Result<Self> {
        let d = data.n_features();
        if centroids.len() % d != 0 {
            return Err(ConfigError::ShapeMismatch {
                expected: (centroids.len() / d + 1) * d,
                actual: centroids.len(),
            }
            .into());
        }
        if let Some(pos) = centroids.iter().position(|v| !v.is_finite()) {
            return Err(ConfigError::NonFiniteValue {
                row: pos / d,
                column: pos % d,
            }
            .into());
        }
        let n_clusters = centroids.len() / d;
        validate_params(&data, n_clusters, max_iter, tol)?;
        Ok(Self::with_state(data, n_clusters, max_iter, tol, centroids))
    }

    fn with_state(
        data: Dataset,
        n_clusters: usize,
        max_iter: usize,
        tol: f64,
        centroids: Vec<f64>,
    ) -> Self {
        let n = data.n_samples();
        Self {
            data,
            n_clusters,
            max_iter,
            tol,
            centroids,
            labels: vec![0; n],
            iteration: 0,
            converged: false,
            failed: false,
            last_metric: None,
            recoveries: 0,
        }
    }

    /// Current centroids, flat row-major `k × d`.
    pub fn centroids(&self) -> &[f64] {
        &self.centroids
    }

    /// Centroid `j`.
    pub fn centroid(&self, j: usize) -> &[f64] {
        let d = self.data.n_features();
        &self.centroids[j * d..(j + 1) * d]
    }

    /// Number of clusters.
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// True once the run stopped by tolerance or unchanged labels.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// True once a step produced a non-finite inertia.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Metric reported by the latest step.
    pub fn last_metric(&self) -> Option<f64> {
        self.last_metric
    }

    /// Total empty-cluster recoveries performed.
    pub fn recoveries(&self) -> usize {
        self.recoveries
    }

    /// Assignment pass: labels and squared distance to the assigned centroid.
    fn assign(&self) -> (Vec<usize>, Vec<f64>) {
        let d = self.data.n_features();
        self.data
            .rows()
            .map(|row| nearest_centroid(row, &self.centroids, d))
            .unzip()
    }

    /// Fill every empty cluster with the farthest point of a cluster that can
    /// spare one. Returns how many clusters were refilled.
    fn recover_empty_clusters(&self, labels: &mut [usize], distances: &mut [f64]) -> usize {
        let mut counts = vec![0usize; self.n_clusters];
        for &label in labels.iter() {
            counts[label] += 1;
        }

        let mut recovered = 0;
        for cluster in 0..self.n_clusters {
            if counts[cluster] > 0 {
                continue;
            }
            let donor = (0..labels.len())
                .filter(|&i| counts[labels[i]] > 1)
                .max_by(|&a, &b| distances[a].total_cmp(&distances[b]).then(b.cmp(&a)));
            let Some(point) = donor else {
                break;
            };

            warn!(
                cluster,
                point,
                distance = distances[point],
                iteration = self.iteration + 1,
                "k-means step left cluster empty, reseeding with farthest point"
            );
            counts[labels[point]] -= 1;
            counts[cluster] = 1;
            labels[point] = cluster;
            distances[point] = 0.0;
            recovered += 1;
        }
        recovered
    }
}

impl ProgressiveRun for ProgressiveKMeans {
    fn has_next_step(&self) -> bool {
        self.iteration < self.max_iter && !self.converged && !self.failed
    }

    fn next_step(&mut self) -> Result<RunStepResult> {
        if !self.has_next_step() {
            return Err(StateError::RunExhausted {
                iteration: self.iteration,
            }
            .into());
        }

        let d = self.data.n_features();
        let (mut labels, mut distances) = self.assign();
        let recovered = self.recover_empty_clusters(&mut labels, &mut distances);
        let (centroids, _) = cluster_means(&self.data, &labels, self.n_clusters, &self.centroids);
        let metric = inertia(&self.data, &labels, &centroids);

        if !metric.is_finite() {
            warn!(
                iteration = self.iteration + 1,
                metric, "k-means step produced non-finite inertia, stopping run"
            );
            self.failed = true;
            return Ok(RunStepResult {
                iteration: self.iteration,
                metric: self.last_metric.unwrap_or(f64::INFINITY),
                labels: self.labels.clone(),
            });
        }

        let center_shift = max_centroid_shift(&self.centroids, &centroids, d);
        let labels_unchanged = self.iteration > 0 && labels == self.labels;

        self.iteration += 1;
        self.recoveries += recovered;
        self.converged = center_shift < self.tol || labels_unchanged;
        self.centroids = centroids;
        self.labels = labels;
        self.last_metric = Some(metric);

        debug!(
            iteration = self.iteration,
            inertia = metric,
            center_shift,
            labels_unchanged,
            recovered,
            converged = self.converged,
            "k-means step"
        );

        Ok(RunStepResult {
            iteration: self.iteration,
            metric,
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

fn validate_params(data: &Dataset, n_clusters: usize, max_iter: usize, tol: f64) -> Result<()> {
    if n_clusters == 0 {
        return Err(ConfigError::InvalidClusterCount(n_clusters).into());
    }
    if n_clusters > data.n_samples() {
        return Err(ConfigError::ClustersExceedSamples {
            k: n_clusters,
            n: data.n_samples(),
        }
        .into());
    }
    if max_iter == 0 {
        return Err(ConfigError::InvalidMaxIter(max_iter).into());
    }
    if !tol.is_finite() || tol < 0.0 {
        return Err(ConfigError::InvalidTolerance(tol).into());
    }
    Ok(())
}

/// Factory producing [`ProgressiveKMeans`] runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct KMeansRunFactory;

impl RunFactory for KMeansRunFactory {
    type Run = ProgressiveKMeans;

    fn create(&self, spec: RunSpec<'_>) -> Result<Self::Run> {
        ProgressiveKMeans::new(
            spec.data.clone(),
            spec.n_clusters,
            spec.max_iter,
            spec.tol,
            spec.init,
            spec.seed,
        )
    }
}
