//! Sub-error types for pec-core.
//!
//! Each error type covers a specific domain of failures.

use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// CONFIG ERROR
// ============================================================================

/// Configuration and input validation errors.
///
/// Raised synchronously while building an ensemble, a run, or a dataset.
/// Never retried: the caller must reconstruct with corrected parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Number of clusters must be at least 1.
    #[error("n_clusters must be >= 1, got {0}")]
    InvalidClusterCount(usize),

    /// Number of runs must be at least 1.
    #[error("n_runs must be >= 1, got {0}")]
    InvalidRunCount(usize),

    /// More clusters requested than there are samples.
    ///
    /// # When This Occurs
    ///
    /// - `n_clusters > n_samples` at engine or run construction
    #[error("n_clusters ({k}) must be <= n_samples ({n})")]
    ClustersExceedSamples {
        /// Requested number of clusters
        k: usize,
        /// Number of samples in the dataset
        n: usize,
    },

    /// Maximum iterations must be at least 1.
    #[error("max_iter must be >= 1, got {0}")]
    InvalidMaxIter(usize),

    /// Tolerance must be finite and non-negative.
    #[error("tol must be a finite non-negative number, got {0}")]
    InvalidTolerance(f64),

    /// Init strategy name did not match any known variant.
    #[error("unknown init strategy '{0}' (expected 'random' or 'k-means++')")]
    UnknownInitStrategy(String),

    /// Dataset has no samples or no features.
    #[error("dataset must have at least one sample and one feature (got {n_samples}x{n_features})")]
    EmptyDataset {
        /// Number of rows supplied
        n_samples: usize,
        /// Number of columns supplied
        n_features: usize,
    },

    /// Flat buffer length or row width does not match the declared shape.
    #[error("shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch {
        /// Value count implied by the declared shape
        expected: usize,
        /// Value count actually supplied
        actual: usize,
    },

    /// NaN or infinity in the input matrix.
    #[error("non-finite value at row {row}, column {column}")]
    NonFiniteValue {
        /// Row of the offending value
        row: usize,
        /// Column of the offending value
        column: usize,
    },

    /// Any other out-of-range parameter.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

// ============================================================================
// STATE ERROR
// ============================================================================

/// Round-pull protocol violations.
///
/// These indicate caller misuse and are never recovered from, except by
/// constructing a fresh engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// `next_round()` called after the ensemble reached Completed.
    #[error("ensemble already completed after {rounds} rounds")]
    EnsembleCompleted {
        /// Number of rounds produced before completion
        rounds: usize,
    },

    /// `next_step()` called on a run whose `has_next_step()` is false.
    #[error("run has no next step (stopped at iteration {iteration})")]
    RunExhausted {
        /// Iteration the run stopped at
        iteration: usize,
    },
}
