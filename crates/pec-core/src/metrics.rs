//! Distance and partition-quality metrics.
//!
//! Centroids are stored as flat row-major `k × d` buffers throughout the
//! crate; these helpers take that layout.

use crate::dataset::Dataset;

/// Squared Euclidean distance. Avoids the sqrt for comparisons.
#[inline]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Euclidean distance.
#[inline]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    squared_euclidean(a, b).sqrt()
}

/// Index and squared distance of the nearest centroid.
///
/// Ties go to the lowest centroid index.
pub fn nearest_centroid(point: &[f64], centroids: &[f64], n_features: usize) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (j, centroid) in centroids.chunks_exact(n_features).enumerate() {
        let dist = squared_euclidean(point, centroid);
        if dist < best.1 {
            best = (j, dist);
        }
    }
    best
}

/// Per-cluster means of the assigned points, plus member counts.
///
/// Clusters with no members keep the corresponding entry of `fallback`.
pub fn cluster_means(
    data: &Dataset,
    labels: &[usize],
    n_clusters: usize,
    fallback: &[f64],
) -> (Vec<f64>, Vec<usize>) {
    let d = data.n_features();
    let mut sums = vec![0.0; n_clusters * d];
    let mut counts = vec![0usize; n_clusters];

    for (row, &cluster) in data.rows().zip(labels) {
        counts[cluster] += 1;
        for (s, v) in sums[cluster * d..(cluster + 1) * d].iter_mut().zip(row) {
            *s += v;
        }
    }

    for (cluster, &count) in counts.iter().enumerate() {
        let slot = &mut sums[cluster * d..(cluster + 1) * d];
        if count > 0 {
            slot.iter_mut().for_each(|s| *s /= count as f64);
        } else {
            slot.copy_from_slice(&fallback[cluster * d..(cluster + 1) * d]);
        }
    }

    (sums, counts)
}

/// Sum of squared distances from each point to its assigned centroid.
pub fn inertia(data: &Dataset, labels: &[usize], centroids: &[f64]) -> f64 {
    let d = data.n_features();
    data.rows()
        .zip(labels)
        .map(|(row, &cluster)| squared_euclidean(row, &centroids[cluster * d..(cluster + 1) * d]))
        .sum()
}

/// Inertia of a labeling against its own cluster means.
///
/// Empty clusters contribute nothing.
pub fn partition_inertia(data: &Dataset, labels: &[usize], n_clusters: usize) -> f64 {
    let zeros = vec![0.0; n_clusters * data.n_features()];
    let (means, _) = cluster_means(data, labels, n_clusters, &zeros);
    inertia(data, labels, &means)
}

/// Largest Euclidean displacement between matching centroids.
pub fn max_centroid_shift(old: &[f64], new: &[f64], n_features: usize) -> f64 {
    old.chunks_exact(n_features)
        .zip(new.chunks_exact(n_features))
        .map(|(a, b)| euclidean(a, b))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Dataset {
        Dataset::from_rows(&[
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![10.0, 10.0],
            vec![10.0, 11.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_squared_euclidean() {
        assert_eq!(squared_euclidean(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_eq!(euclidean(&[1.5, -2.0], &[1.5, -2.0]), 0.0);
    }

    #[test]
    fn test_nearest_centroid_ties_go_low() {
        let centroids = [0.0, 0.0, 2.0, 0.0];
        let (j, dist) = nearest_centroid(&[1.0, 0.0], &centroids, 2);
        assert_eq!(j, 0);
        assert_eq!(dist, 1.0);

        let (j, _) = nearest_centroid(&[1.5, 0.0], &centroids, 2);
        assert_eq!(j, 1);
    }

    #[test]
    fn test_cluster_means_and_fallback() {
        let data = square();
        let fallback = [7.0, 7.0, 8.0, 8.0, 9.0, 9.0];
        let (means, counts) = cluster_means(&data, &[0, 0, 2, 2], 3, &fallback);

        assert_eq!(counts, vec![2, 0, 2]);
        assert_eq!(&means[0..2], &[0.0, 0.5]);
        assert_eq!(&means[2..4], &[8.0, 8.0], "empty cluster keeps fallback");
        assert_eq!(&means[4..6], &[10.0, 10.5]);
    }

    #[test]
    fn test_partition_inertia() {
        let data = square();
        // Each pair sits 0.5 from its mean in one coordinate: 4 * 0.25.
        assert!((partition_inertia(&data, &[0, 0, 1, 1], 2) - 1.0).abs() < 1e-12);
        // Single cluster equals the total sum of squares.
        let tss = data.total_sum_of_squares();
        assert!((partition_inertia(&data, &[0, 0, 0, 0], 1) - tss).abs() < 1e-9);
    }

    #[test]
    fn test_max_centroid_shift() {
        let old = [0.0, 0.0, 1.0, 1.0];
        let new = [0.0, 3.0, 1.0, 1.5];
        assert_eq!(max_centroid_shift(&old, &new, 2), 3.0);
        assert_eq!(max_centroid_shift(&old, &old, 2), 0.0);
    }
}
