//! Single incremental clustering trials.
//!
//! # Overview
//!
//! A run owns one trial's state (labels, centroids, iteration counter,
//! convergence flag) and exposes it through the pull protocol of
//! [`ProgressiveRun`]: check `has_next_step()`, then call `next_step()`.
//!
//! [`ProgressiveKMeans`] is the Lloyd's k-means trial with Random or
//! K-means++ seeding. [`RunFactory`] is the seam the orchestrator uses to
//! build runs, so other trial algorithms can be plugged in.

mod init;
mod kmeans;
#[cfg(test)]
mod tests;
mod traits;
mod types;

pub use init::{initial_centroids, kmeans_plus_plus_indices, random_indices};
pub use kmeans::{KMeansRunFactory, ProgressiveKMeans};
pub use traits::{ProgressiveRun, RunFactory, RunSpec};
pub use types::RunStepResult;
