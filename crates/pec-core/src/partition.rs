//! The shared `n × r` partition matrix.

use rayon::prelude::*;
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Every run's current label for every sample.
///
/// Column `j` belongs to run `j`. Storage is column-major so each run's
/// labels form one contiguous slice; the orchestrator hands out disjoint
/// column slices, which is what lets runs be stepped in parallel without
/// locking.
///
/// Serializes as `n` rows of `r` labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionMatrix {
    n_samples: usize,
    n_runs: usize,
    labels: Vec<usize>,
}

impl PartitionMatrix {
    /// All-zero matrix.
    pub fn new(n_samples: usize, n_runs: usize) -> Self {
        Self {
            n_samples,
            n_runs,
            labels: vec![0; n_samples * n_runs],
        }
    }

    /// Build from per-run label columns of equal length.
    ///
    /// Returns `None` if the columns are ragged.
    pub fn from_columns(columns: &[Vec<usize>]) -> Option<Self> {
        let n_samples = columns.first().map(Vec::len).unwrap_or(0);
        if columns.iter().any(|c| c.len() != n_samples) {
            return None;
        }
        Some(Self {
            n_samples,
            n_runs: columns.len(),
            labels: columns.concat(),
        })
    }

    /// `(n_samples, n_runs)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_samples, self.n_runs)
    }

    /// Number of rows.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// Number of columns.
    #[inline]
    pub fn n_runs(&self) -> usize {
        self.n_runs
    }

    /// Label of `sample` in run `run`.
    pub fn get(&self, sample: usize, run: usize) -> Option<usize> {
        if sample >= self.n_samples || run >= self.n_runs {
            return None;
        }
        Some(self.labels[run * self.n_samples + sample])
    }

    /// All labels of run `run`.
    pub fn column(&self, run: usize) -> Option<&[usize]> {
        if run >= self.n_runs {
            return None;
        }
        Some(&self.labels[run * self.n_samples..(run + 1) * self.n_samples])
    }

    /// Iterate over columns in run order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        ColumnIter {
            labels: &self.labels,
            n_samples: self.n_samples,
            remaining: self.n_runs,
        }
    }

    /// Labels of `sample` across all runs.
    pub fn row(&self, sample: usize) -> Option<Vec<usize>> {
        if sample >= self.n_samples {
            return None;
        }
        Some(
            (0..self.n_runs)
                .map(|run| self.labels[run * self.n_samples + sample])
                .collect(),
        )
    }

    /// Row-major copy: `n` rows of `r` labels.
    pub fn to_rows(&self) -> Vec<Vec<usize>> {
        (0..self.n_samples)
            .map(|sample| {
                (0..self.n_runs)
                    .map(|run| self.labels[run * self.n_samples + sample])
                    .collect()
            })
            .collect()
    }

    /// True if every entry lies in `[0, k)`.
    pub fn all_below(&self, k: usize) -> bool {
        self.labels.iter().all(|&l| l < k)
    }

    /// Mutable column slices in run order.
    pub(crate) fn columns_mut(&mut self) -> std::slice::ChunksMut<'_, usize> {
        // chunks_mut(0) panics; an empty matrix has no columns to hand out.
        self.labels.chunks_mut(self.n_samples.max(1))
    }

    /// Parallel mutable column slices in run order.
    pub(crate) fn par_columns_mut(&mut self) -> rayon::slice::ChunksMut<'_, usize> {
        self.labels.par_chunks_mut(self.n_samples.max(1))
    }
}

struct ColumnIter<'a> {
    labels: &'a [usize],
    n_samples: usize,
    remaining: usize,
}

impl<'a> Iterator for ColumnIter<'a> {
    type Item = &'a [usize];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (head, tail) = self.labels.split_at(self.n_samples);
        self.labels = tail;
        self.remaining -= 1;
        Some(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ColumnIter<'_> {}

impl Serialize for PartitionMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.n_samples))?;
        for row in self.to_rows() {
            seq.serialize_element(&row)?;
        }
        seq.end()
    }
}
