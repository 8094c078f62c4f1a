//! Seeded synthetic datasets for demos, benchmarks, and tests.
//!
//! Isotropic Gaussian blobs around centers drawn uniformly from a box. The
//! same [`BlobsConfig`] always yields the same dataset.

use rand::distributions::Uniform;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::config::constants::blobs::{
    DEFAULT_CENTER_BOX, DEFAULT_CLUSTER_STD, DEFAULT_N_CENTERS, DEFAULT_N_FEATURES,
    DEFAULT_N_SAMPLES, DEFAULT_SEED,
};
use crate::dataset::Dataset;
use crate::error::{ConfigError, Result};

/// Configuration for [`make_blobs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobsConfig {
    /// Total number of points.
    pub n_samples: usize,
    /// Number of blobs.
    pub n_centers: usize,
    /// Dimensionality.
    pub n_features: usize,
    /// Standard deviation of every blob.
    pub cluster_std: f64,
    /// `(low, high)` bounds for blob centers on every axis.
    pub center_box: (f64, f64),
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for BlobsConfig {
    fn default() -> Self {
        Self {
            n_samples: DEFAULT_N_SAMPLES,
            n_centers: DEFAULT_N_CENTERS,
            n_features: DEFAULT_N_FEATURES,
            cluster_std: DEFAULT_CLUSTER_STD,
            center_box: DEFAULT_CENTER_BOX,
            seed: DEFAULT_SEED,
        }
    }
}

/// Generated points plus the blob each point was drawn from.
#[derive(Debug, Clone)]
pub struct Blobs {
    /// The points.
    pub data: Dataset,
    /// Ground-truth blob index of every point.
    pub truth: Vec<usize>,
    /// Blob centers, flat `n_centers × n_features`.
    pub centers: Vec<f64>,
}

/// Generate Gaussian blobs.
///
/// Points are dealt to blobs round-robin, so blob sizes differ by at most one.
///
/// # Errors
///
/// `ConfigError` for zero sizes, a negative or non-finite std, or an empty
/// center box.
pub fn make_blobs(config: &BlobsConfig) -> Result<Blobs> {
    if config.n_centers == 0 {
        return Err(ConfigError::InvalidParameter {
            name: "n_centers",
            reason: "must be >= 1".to_string(),
        }
        .into());
    }
    let (low, high) = config.center_box;
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(ConfigError::InvalidParameter {
            name: "center_box",
            reason: format!("expected finite low < high, got ({}, {})", low, high),
        }
        .into());
    }
    let noise = Normal::new(0.0, config.cluster_std).map_err(|e| ConfigError::InvalidParameter {
        name: "cluster_std",
        reason: e.to_string(),
    })?;
    if !config.cluster_std.is_finite() {
        return Err(ConfigError::InvalidParameter {
            name: "cluster_std",
            reason: "must be finite".to_string(),
        }
        .into());
    }

    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let center_dist = Uniform::new(low, high);

    let centers: Vec<f64> = (0..config.n_centers * config.n_features)
        .map(|_| center_dist.sample(&mut rng))
        .collect();

    let d = config.n_features;
    let mut values = Vec::with_capacity(config.n_samples * d);
    let mut truth = Vec::with_capacity(config.n_samples);
    for i in 0..config.n_samples {
        let blob = i % config.n_centers;
        truth.push(blob);
        for &c in &centers[blob * d..(blob + 1) * d] {
            values.push(c + noise.sample(&mut rng));
        }
    }

    let data = Dataset::from_flat(values, config.n_samples, config.n_features)?;
    Ok(Blobs {
        data,
        truth,
        centers,
    })
}
