//! Helper functions for creating test data (REAL data, NO mocks).

use crate::dataset::Dataset;
use crate::synthetic::{make_blobs, BlobsConfig};

/// Two well-separated pairs of 2-D points.
pub fn two_pairs() -> Dataset {
    Dataset::from_rows(&[
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
    ])
    .unwrap()
}

/// Four points on a line at 0, 1, 2, 3.
pub fn line_of_four() -> Dataset {
    Dataset::from_rows(&[vec![0.0], vec![1.0], vec![2.0], vec![3.0]]).unwrap()
}

/// `n` copies of the same point.
pub fn identical_points(n: usize) -> Dataset {
    Dataset::from_rows(&vec![vec![2.5, -1.0]; n]).unwrap()
}

/// Four 1-D points whose squared distances overflow `f64`.
pub fn overflowing() -> Dataset {
    Dataset::from_flat(vec![0.0, 1e200, -1e200, 5.0], 4, 1).unwrap()
}

/// Seeded Gaussian blobs.
pub fn blobs(n_samples: usize, n_centers: usize, seed: u64) -> Dataset {
    make_blobs(&BlobsConfig {
        n_samples,
        n_centers,
        cluster_std: 1.5,
        seed,
        ..Default::default()
    })
    .unwrap()
    .data
}
