//! Label-aligned majority voting across runs.
//!
//! Cluster ids are arbitrary per run, so runs are first aligned to a
//! reference run (the lowest-inertia one) by greedy maximum-overlap matching
//! on the `k × k` contingency table. Each point then takes the label most
//! aligned runs give it.

use crate::error::{PecError, Result};
use crate::metrics::partition_inertia;

use super::traits::{stable_argmax, stable_argmin, ConsensusPolicy, RoundOutcome};
use super::types::{PartialResult, VoteMetrics};

/// Majority vote over label-aligned runs.
///
/// - Reference run: lowest inertia this round (lowest index on ties).
/// - Vote ties: the reference run's label wins if it is among the tied
///   labels, otherwise the lowest tied label.
/// - `best_run`: the run agreeing most with the vote (lowest index on ties).
#[derive(Debug, Clone, Copy, Default)]
pub struct VotingConsensus;

impl VotingConsensus {
    /// Create the policy.
    pub fn new() -> Self {
        Self
    }
}

impl ConsensusPolicy for VotingConsensus {
    type Metrics = VoteMetrics;

    fn name(&self) -> &'static str {
        "vote"
    }

    fn build(&mut self, round: &RoundOutcome<'_>) -> Result<PartialResult<VoteMetrics>> {
        let k = round.n_clusters;
        let reference_run = stable_argmin(round.run_metrics)
            .ok_or_else(|| PecError::internal("voting consensus received a round with no runs"))?;
        let reference = round.partitions.column(reference_run).ok_or_else(|| {
            PecError::internal(format!("reference run {} has no partition column", reference_run))
        })?;

        let aligned: Vec<Vec<usize>> = round
            .partitions
            .columns()
            .map(|column| {
                let mapping = align_labels(reference, column, k);
                column.iter().map(|&l| mapping[l]).collect()
            })
            .collect();

        let n = round.partitions.n_samples();
        let mut votes = vec![0usize; k];
        let labels: Vec<usize> = (0..n)
            .map(|i| {
                votes.fill(0);
                for run in &aligned {
                    votes[run[i]] += 1;
                }
                majority(&votes, reference[i])
            })
            .collect();

        let run_agreement: Vec<f64> = aligned
            .iter()
            .map(|run| {
                let same = run.iter().zip(&labels).filter(|(a, b)| a == b).count();
                same as f64 / n.max(1) as f64
            })
            .collect();
        let agreement = run_agreement.iter().sum::<f64>() / run_agreement.len().max(1) as f64;
        let best_run = stable_argmax(&run_agreement).unwrap_or(reference_run);
        let inertia = partition_inertia(round.data, &labels, k);

        Ok(PartialResult::new(
            round.info(best_run),
            VoteMetrics {
                inertia,
                agreement,
                run_agreement,
            },
            labels,
            round.partitions.clone(),
        ))
    }
}

/// Permutation mapping `labels`' ids onto `reference`'s ids.
///
/// Pairs are matched greedily by overlap count (largest first, then lower
/// reference id, then lower run id). Ids left unmatched are paired in
/// increasing order.
pub fn align_labels(reference: &[usize], labels: &[usize], k: usize) -> Vec<usize> {
    let mut table = vec![0usize; k * k];
    for (&r, &l) in reference.iter().zip(labels) {
        table[r * k + l] += 1;
    }

    let mut cells: Vec<(usize, usize, usize)> = (0..k)
        .flat_map(|r| (0..k).map(move |l| (r, l)))
        .map(|(r, l)| (table[r * k + l], r, l))
        .filter(|&(count, _, _)| count > 0)
        .collect();
    cells.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    let mut mapping = vec![usize::MAX; k];
    let mut ref_used = vec![false; k];
    for (_, r, l) in cells {
        if mapping[l] == usize::MAX && !ref_used[r] {
            mapping[l] = r;
            ref_used[r] = true;
        }
    }

    let mut free = (0..k).filter(|&r| !ref_used[r]);
    for slot in mapping.iter_mut().filter(|m| **m == usize::MAX) {
        // A permutation has exactly as many free targets as unmatched ids.
        *slot = free.next().unwrap_or(0);
    }
    mapping
}

fn majority(votes: &[usize], reference_label: usize) -> usize {
    let top = votes.iter().copied().max().unwrap_or(0);
    if votes.get(reference_label) == Some(&top) {
        return reference_label;
    }
    votes.iter().position(|&v| v == top).unwrap_or(reference_label)
}
