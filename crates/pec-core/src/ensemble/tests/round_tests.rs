//! Round bookkeeping tests.

use crate::config::EnsembleConfig;
use crate::consensus::{ConsensusMetrics, InertiaConsensus, VotingConsensus};
use crate::ensemble::{EnsembleStage, ProgressiveEnsembleClustering};
use crate::run::ProgressiveRun;
use crate::synthetic::{make_blobs, BlobsConfig};

use super::helpers::{scripted, six_points, ScriptedFactory};

#[test]
fn test_round_counters_and_single_last() {
    let (mut ensemble, _) = scripted(&[1, 3, 2], 4);

    let results: Vec<_> = ensemble.rounds().collect::<Result<_, _>>().unwrap();

    assert_eq!(results.len(), 3);
    let iterations: Vec<usize> = results.iter().map(|r| r.iteration()).collect();
    assert_eq!(iterations, vec![1, 2, 3]);
    let lasts: Vec<bool> = results.iter().map(|r| r.is_last()).collect();
    assert_eq!(lasts, vec![false, false, true]);

    assert_eq!(results[0].info().run_iteration, vec![1, 1, 1]);
    assert_eq!(results[1].info().run_iteration, vec![1, 2, 2]);
    assert_eq!(results[2].info().run_iteration, vec![1, 3, 2]);

    println!("[VERIFIED] Round iteration increments by 1 and is_last is set once");
}

#[test]
fn test_exhausted_columns_are_preserved() {
    let (mut ensemble, _) = scripted(&[1, 3], 4);

    let first = ensemble.next_round().unwrap();
    assert_eq!(first.partitions().column(0), Some(&[1; 6][..]));
    assert_eq!(first.partitions().column(1), Some(&[1; 6][..]));

    let second = ensemble.next_round().unwrap();
    assert_eq!(second.partitions().column(0), Some(&[1; 6][..]), "run 0 exhausted");
    assert_eq!(second.partitions().column(1), Some(&[2; 6][..]));

    let third = ensemble.next_round().unwrap();
    assert_eq!(third.partitions().column(0), Some(&[1; 6][..]));
    assert_eq!(third.partitions().column(1), Some(&[3; 6][..]));
    assert!(third.is_last());

    assert_eq!(first.partitions().column(1), Some(&[1; 6][..]), "snapshots are independent");
}

#[test]
fn test_exhausted_runs_keep_their_metric() {
    // Metrics per step t of run i are (i + 1) / t.
    let (mut ensemble, _) = scripted(&[1, 3, 2], 2);

    let r1 = ensemble.next_round().unwrap();
    assert_eq!(r1.info().best_run, 0);
    assert_eq!(r1.metrics().inertia, 1.0);

    // run 0 keeps 1.0; run 1 reaches 1.0; tie goes to run 0.
    let r2 = ensemble.next_round().unwrap();
    assert_eq!(ensemble.run_metrics(), &[1.0, 1.0, 1.5]);
    assert_eq!(r2.info().best_run, 0);

    let r3 = ensemble.next_round().unwrap();
    assert_eq!(r3.info().best_run, 1);
    assert!((r3.metrics().inertia() - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(r3.labels(), &[1; 6]);
}

#[test]
fn test_elapsed_time_reported() {
    let (mut ensemble, _) = scripted(&[2], 1);
    let result = ensemble.next_round().unwrap();
    assert!(result.info().elapsed_time >= 0.0);
    assert!(result.info().elapsed_time.is_finite());
}

#[test]
fn test_rounds_iterator_stops_after_error() {
    let factory = ScriptedFactory::new(&[3, 3]).failing(1, 2);
    let config = EnsembleConfig::new(2).with_runs(2).with_seed(1);
    let mut ensemble =
        ProgressiveEnsembleClustering::with_factory(six_points(), config, InertiaConsensus, factory)
            .unwrap();

    let mut rounds = ensemble.rounds();
    assert!(rounds.next().unwrap().is_ok());
    let err = rounds.next().unwrap().unwrap_err();
    assert!(err.is_critical());
    assert!(rounds.next().is_none());
    assert!(rounds.next().is_none());
}

#[test]
fn test_rounds_iterator_is_empty_after_completion() {
    let (mut ensemble, _) = scripted(&[2], 1);
    assert_eq!(ensemble.rounds().count(), 2);
    assert_eq!(ensemble.rounds().count(), 0);
    assert_eq!(ensemble.stage(), EnsembleStage::Completed);
}

fn blob_config(parallel: bool) -> EnsembleConfig {
    EnsembleConfig::new(4)
        .with_runs(6)
        .with_max_iter(50)
        .with_seed(2024)
        .with_parallel(parallel)
}

#[test]
fn test_parallel_matches_sequential() {
    let data = make_blobs(&BlobsConfig {
        n_samples: 200,
        n_centers: 4,
        cluster_std: 2.0,
        seed: 9,
        ..Default::default()
    })
    .unwrap()
    .data;

    let mut sequential =
        ProgressiveEnsembleClustering::new(data.clone(), blob_config(false), InertiaConsensus).unwrap();
    let mut parallel =
        ProgressiveEnsembleClustering::new(data, blob_config(true), InertiaConsensus).unwrap();

    let mut rounds = 0;
    while sequential.has_next_round() {
        assert!(parallel.has_next_round());
        let a = sequential.next_round().unwrap();
        let b = parallel.next_round().unwrap();
        assert_eq!(a.labels(), b.labels());
        assert_eq!(a.partitions(), b.partitions());
        assert_eq!(a.metrics(), b.metrics());
        assert_eq!(a.info().run_iteration, b.info().run_iteration);
        assert_eq!(a.info().best_run, b.info().best_run);
        rounds += 1;
    }
    assert!(!parallel.has_next_round());

    println!("[VERIFIED] Parallel stepping matches sequential over {} rounds", rounds);
}

#[test]
fn test_kmeans_runs_share_dataset() {
    let data = six_points();
    let config = EnsembleConfig::new(2).with_runs(3).with_seed(5);
    let mut ensemble = ProgressiveEnsembleClustering::new(data.clone(), config, VotingConsensus).unwrap();
    ensemble.next_round().unwrap();

    assert!(ensemble.data().shares_buffer_with(&data));
    for run in ensemble.runs() {
        assert!(run.iteration() >= 1);
        assert_eq!(run.labels().len(), 6);
    }
}

#[test]
fn test_voting_ensemble_separates_groups() {
    let config = EnsembleConfig::new(2).with_runs(5).with_seed(3);
    let mut ensemble = ProgressiveEnsembleClustering::new(six_points(), config, VotingConsensus).unwrap();

    let last = ensemble.run_to_completion().unwrap();
    let labels = last.labels();

    assert_eq!(labels[0], labels[1]);
    assert_eq!(labels[1], labels[2]);
    assert_eq!(labels[3], labels[4]);
    assert_eq!(labels[4], labels[5]);
    assert_ne!(labels[0], labels[3]);
    assert!((last.metrics().inertia - 4.0).abs() < 1e-9);
    assert_eq!(last.metrics().agreement, 1.0);
}
