//! Centralized defaults for ensemble configuration.
//!
//! Every default used by serde or the builder lives here so config files,
//! the CLI, and tests agree on one value.

/// Ensemble shape defaults.
pub mod ensemble {
    /// Default number of independent runs.
    ///
    /// Matches the common `n_init = 10` restart count for k-means.
    pub const DEFAULT_N_RUNS: usize = 10;

    /// Default cap on refinement steps per run.
    pub const DEFAULT_MAX_ITER: usize = 300;

    /// Default centroid-shift tolerance for per-run convergence.
    pub const DEFAULT_TOL: f64 = 1e-4;
}

/// Synthetic blob generator defaults.
pub mod blobs {
    /// Default number of generated samples.
    pub const DEFAULT_N_SAMPLES: usize = 300;

    /// Default number of blob centers.
    pub const DEFAULT_N_CENTERS: usize = 3;

    /// Default dimensionality.
    pub const DEFAULT_N_FEATURES: usize = 2;

    /// Default per-blob standard deviation.
    pub const DEFAULT_CLUSTER_STD: f64 = 1.0;

    /// Default bounding box for blob centers, `(low, high)`.
    pub const DEFAULT_CENTER_BOX: (f64, f64) = (-10.0, 10.0);

    /// Default generator seed.
    pub const DEFAULT_SEED: u64 = 42;
}

#[cfg(test)]
#[allow(clippy::assertions_on_constants)]
mod tests {
    use super::*;

    #[test]
    fn test_ensemble_defaults_are_valid() {
        assert!(ensemble::DEFAULT_N_RUNS >= 1);
        assert!(ensemble::DEFAULT_MAX_ITER >= 1);
        assert!(ensemble::DEFAULT_TOL >= 0.0 && ensemble::DEFAULT_TOL.is_finite());
    }

    #[test]
    fn test_center_box_ordered() {
        let (low, high) = blobs::DEFAULT_CENTER_BOX;
        assert!(low < high, "center box must be non-empty");
    }
}
