//! Centroid initialization.
//!
//! Both strategies draw only from the run's private RNG, so a run's starting
//! centroids are a pure function of `(data, k, seed, strategy)`.

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::InitStrategy;
use crate::dataset::Dataset;
use crate::metrics::squared_euclidean;

/// Initial centroids as a flat `k × d` buffer.
///
/// Callers guarantee `1 <= k <= n`.
pub fn initial_centroids<R: Rng>(
    data: &Dataset,
    k: usize,
    strategy: InitStrategy,
    rng: &mut R,
) -> Vec<f64> {
    let indices = match strategy {
        InitStrategy::Random => random_indices(data.n_samples(), k, rng),
        InitStrategy::KMeansPlusPlus => kmeans_plus_plus_indices(data, k, rng),
    };
    gather_rows(data, &indices)
}

/// `k` distinct sample indices, uniformly at random.
pub fn random_indices<R: Rng>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    rand::seq::index::sample(rng, n, k).into_vec()
}

/// K-means++ seeding.
///
/// The first index is uniform. Each next index is drawn with probability
/// proportional to the squared distance to the nearest already chosen
/// centroid. When every remaining point coincides with a chosen centroid, or
/// the weights overflow to infinity, the draw falls back to a uniform pick
/// among unchosen indices, so the result always holds `k` distinct indices.
pub fn kmeans_plus_plus_indices<R: Rng>(data: &Dataset, k: usize, rng: &mut R) -> Vec<usize> {
    let n = data.n_samples();
    let mut chosen = Vec::with_capacity(k);
    let mut taken = vec![false; n];

    let first = rng.gen_range(0..n);
    chosen.push(first);
    taken[first] = true;

    let mut min_dist: Vec<f64> = data
        .rows()
        .map(|row| squared_euclidean(row, data.row(first)))
        .collect();

    // Chosen rows have weight 0, so the weighted draw never repeats one.
    while chosen.len() < k {
        // WeightedIndex panics when the cumulative weight is infinite.
        let drawn = if min_dist.iter().sum::<f64>().is_finite() {
            WeightedIndex::new(&min_dist).ok().map(|weighted| weighted.sample(rng))
        } else {
            None
        };
        let next = match drawn {
            Some(i) => i,
            None => {
                let unchosen: Vec<usize> = (0..n).filter(|&i| !taken[i]).collect();
                match unchosen.choose(rng) {
                    Some(&i) => i,
                    None => break,
                }
            }
        };

        chosen.push(next);
        taken[next] = true;

        let centroid = data.row(next);
        for (row, w) in data.rows().zip(min_dist.iter_mut()) {
            let dist = squared_euclidean(row, centroid);
            if dist < *w {
                *w = dist;
            }
        }
    }

    chosen
}

fn gather_rows(data: &Dataset, indices: &[usize]) -> Vec<f64> {
    let mut centroids = Vec::with_capacity(indices.len() * data.n_features());
    for &i in indices {
        centroids.extend_from_slice(data.row(i));
    }
    centroids
}
