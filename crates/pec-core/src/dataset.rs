//! Immutable shared input matrix.

use std::sync::Arc;

use crate::error::{ConfigError, Result};

/// Dense `n × d` matrix of `f64`, row-major, read-only.
///
/// Cloning is cheap: every clone is a view onto the same reference-counted
/// buffer, so runs share the orchestrator's data without copying it.
///
/// # Validation
///
/// Construction rejects empty shapes, length mismatches, and non-finite
/// values. Downstream code relies on every value being finite.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    values: Arc<[f64]>,
    n_samples: usize,
    n_features: usize,
}

impl Dataset {
    /// Build from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyDataset`] if either dimension is zero
    /// - [`ConfigError::ShapeMismatch`] if `values.len() != n_samples * n_features`
    /// - [`ConfigError::NonFiniteValue`] on NaN or infinity
    pub fn from_flat(values: Vec<f64>, n_samples: usize, n_features: usize) -> Result<Self> {
        if n_samples == 0 || n_features == 0 {
            return Err(ConfigError::EmptyDataset {
                n_samples,
                n_features,
            }
            .into());
        }
        let expected = n_samples
            .checked_mul(n_features)
            .ok_or_else(|| ConfigError::InvalidParameter {
                name: "shape",
                reason: format!("{}x{} overflows usize", n_samples, n_features),
            })?;
        if values.len() != expected {
            return Err(ConfigError::ShapeMismatch {
                expected,
                actual: values.len(),
            }
            .into());
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(ConfigError::NonFiniteValue {
                row: pos / n_features,
                column: pos % n_features,
            }
            .into());
        }

        Ok(Self {
            values: values.into(),
            n_samples,
            n_features,
        })
    }

    /// Build from rows of equal width.
    ///
    /// ```
    /// use pec_core::Dataset;
    ///
    /// let data = Dataset::from_rows(&[vec![0.0, 0.0], vec![1.0, 1.0]]).unwrap();
    /// assert_eq!(data.shape(), (2, 2));
    /// assert_eq!(data.row(1), &[1.0, 1.0]);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let n_samples = rows.len();
        let n_features = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);

        let mut values = Vec::with_capacity(n_samples * n_features);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n_features {
                return Err(ConfigError::ShapeMismatch {
                    expected: n_features,
                    actual: row.len(),
                }
                .into());
            }
            values.extend_from_slice(row);
        }

        Self::from_flat(values, n_samples, n_features)
    }

    /// Number of rows (n).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Number of columns (d).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// `(n_samples, n_features)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_samples, self.n_features)
    }

    /// Row `i`. Panics if `i >= n_samples`, like slice indexing.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        let start = i * self.n_features;
        &self.values[start..start + self.n_features]
    }

    /// Iterate over rows in index order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.values.chunks_exact(self.n_features)
    }

    /// The flat row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Column means.
    pub fn mean(&self) -> Vec<f64> {
        let mut mean = vec![0.0; self.n_features];
        for row in self.rows() {
            for (m, v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        let n = self.n_samples as f64;
        mean.iter_mut().for_each(|m| *m /= n);
        mean
    }

    /// Sum of squared deviations from the column means.
    ///
    /// Equals the inertia of the single-cluster partition.
    pub fn total_sum_of_squares(&self) -> f64 {
        let mean = self.mean();
        self.rows()
            .map(|row| crate::metrics::squared_euclidean(row, &mean))
            .sum()
    }

    /// True if both handles view the same buffer.
    #[inline]
    pub fn shares_buffer_with(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}
