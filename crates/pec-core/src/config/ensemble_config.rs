//! Validated configuration for a progressive ensemble.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::constants::ensemble::{DEFAULT_MAX_ITER, DEFAULT_N_RUNS, DEFAULT_TOL};
use super::init_strategy::{deserialize_init_strategy, InitStrategy};
use crate::error::{ConfigError, Result};

/// Configuration for a progressive ensemble.
///
/// Immutable once handed to the engine. Data-independent checks run in
/// [`validate`](Self::validate); the `k <= n` check needs the dataset and
/// runs in [`validate_for_samples`](Self::validate_for_samples).
///
/// # Example
///
/// ```
/// use pec_core::config::{EnsembleConfig, InitStrategy};
///
/// let config = EnsembleConfig::new(3)
///     .with_runs(5)
///     .with_seed(42)
///     .with_init(InitStrategy::Random);
/// assert!(config.validate_for_samples(100).is_ok());
/// assert!(config.validate_for_samples(2).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnsembleConfig {
    /// Number of clusters (k). Must be >= 1 and <= number of samples.
    pub n_clusters: usize,

    /// Number of independent runs (r). Must be >= 1.
    #[serde(default = "default_n_runs")]
    pub n_runs: usize,

    /// Maximum refinement steps per run. Must be >= 1.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    /// A run converges once its largest centroid shift falls below this.
    ///
    /// Must be finite and >= 0. With `0.0` only unchanged labels stop a run
    /// early.
    #[serde(default = "default_tol")]
    pub tol: f64,

    /// Master seed. `None` draws from system entropy and forfeits
    /// reproducibility.
    #[serde(default)]
    pub random_state: Option<u64>,

    /// Centroid initialization strategy handed to every run.
    #[serde(default, deserialize_with = "deserialize_init_strategy")]
    pub init: InitStrategy,

    /// Step the runs of a round on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

fn default_n_runs() -> usize {
    DEFAULT_N_RUNS
}

fn default_max_iter() -> usize {
    DEFAULT_MAX_ITER
}

fn default_tol() -> f64 {
    DEFAULT_TOL
}

impl EnsembleConfig {
    /// Configuration for `n_clusters` with every other field at its default.
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            n_runs: DEFAULT_N_RUNS,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
            random_state: None,
            init: InitStrategy::default(),
            parallel: false,
        }
    }

    /// Set the number of runs.
    pub fn with_runs(mut self, n_runs: usize) -> Self {
        self.n_runs = n_runs;
        self
    }

    /// Set the per-run iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Set or clear the master seed.
    pub fn with_random_state(mut self, random_state: Option<u64>) -> Self {
        self.random_state = random_state;
        self
    }

    /// Set the initialization strategy.
    pub fn with_init(mut self, init: InitStrategy) -> Self {
        self.init = init;
        self
    }

    /// Enable or disable parallel stepping within a round.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate every data-independent parameter.
    ///
    /// # Errors
    ///
    /// - `k < 1`, `r < 1`, `max_iter < 1`
    /// - `tol` negative, NaN, or infinite
    pub fn validate(&self) -> Result<()> {
        if self.n_clusters == 0 {
            return Err(ConfigError::InvalidClusterCount(self.n_clusters).into());
        }
        if self.n_runs == 0 {
            return Err(ConfigError::InvalidRunCount(self.n_runs).into());
        }
        if self.max_iter == 0 {
            return Err(ConfigError::InvalidMaxIter(self.max_iter).into());
        }
        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tol).into());
        }
        Ok(())
    }

    /// Validate against a dataset of `n_samples` rows.
    ///
    /// # Errors
    ///
    /// Everything [`validate`](Self::validate) rejects, plus `k > n`.
    pub fn validate_for_samples(&self, n_samples: usize) -> Result<()> {
        self.validate()?;
        if self.n_clusters > n_samples {
            return Err(ConfigError::ClustersExceedSamples {
                k: self.n_clusters,
                n: n_samples,
            }
            .into());
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    ///
    /// ```
    /// use pec_core::config::{EnsembleConfig, InitStrategy};
    ///
    /// let config = EnsembleConfig::from_toml_str(r#"
    ///     n_clusters = 4
    ///     random_state = 7
    ///     init = "random"
    /// "#).unwrap();
    /// assert_eq!(config.n_clusters, 4);
    /// assert_eq!(config.init, InitStrategy::Random);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }
}
