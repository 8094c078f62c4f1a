//! Policy tests driven by hand-built rounds.

use std::time::Duration;

use crate::consensus::{
    stable_argmax, stable_argmin, ConsensusMetrics, ConsensusPolicy, InertiaConsensus,
    RoundOutcome, VotingConsensus,
};
use crate::dataset::Dataset;
use crate::partition::PartitionMatrix;

fn pairs() -> Dataset {
    Dataset::from_rows(&[
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
    ])
    .unwrap()
}

fn round<'a>(
    data: &'a Dataset,
    partitions: &'a PartitionMatrix,
    run_iteration: &'a [usize],
    run_metrics: &'a [f64],
    is_last: bool,
) -> RoundOutcome<'a> {
    RoundOutcome {
        iteration: 3,
        is_last,
        run_iteration,
        run_metrics,
        partitions,
        elapsed: Duration::from_micros(1500),
        data,
        n_clusters: 2,
    }
}

#[test]
fn test_stable_argmin_and_argmax() {
    assert_eq!(stable_argmin(&[3.0, 1.0, 1.0, 2.0]), Some(1));
    assert_eq!(stable_argmax(&[3.0, 1.0, 3.0]), Some(0));
    assert_eq!(stable_argmin(&[f64::NAN, 5.0]), Some(1));
    assert_eq!(stable_argmin(&[]), None);
    assert_eq!(stable_argmax(&[]), None);
}

#[test]
fn test_inertia_picks_lowest_metric() {
    let data = pairs();
    let partitions =
        PartitionMatrix::from_columns(&[vec![0, 0, 0, 1], vec![1, 1, 0, 0], vec![0, 1, 1, 1]]).unwrap();
    let outcome = round(&data, &partitions, &[2, 3, 3], &[50.0, 1.0, 80.0], false);

    let result = InertiaConsensus::new().build(&outcome).unwrap();

    assert_eq!(result.info().best_run, 1);
    assert_eq!(result.labels(), &[1, 1, 0, 0]);
    assert_eq!(result.metrics().inertia, 1.0);
    assert_eq!(result.metrics().inertia(), 1.0);
    assert_eq!(result.partitions(), &partitions);
    assert_eq!(result.info().iteration, 3);
    assert_eq!(result.info().run_iteration, vec![2, 3, 3]);
    assert!((result.info().elapsed_time - 0.0015).abs() < 1e-12);
    assert!(!result.is_last());

    println!("[VERIFIED] Inertia consensus returns the argmin run's labels");
}

#[test]
fn test_inertia_ties_go_to_lowest_run() {
    let data = pairs();
    let partitions = PartitionMatrix::from_columns(&[vec![0, 0, 1, 1], vec![1, 1, 0, 0]]).unwrap();
    let outcome = round(&data, &partitions, &[1, 1], &[1.0, 1.0], true);

    let result = InertiaConsensus.build(&outcome).unwrap();

    assert_eq!(result.info().best_run, 0);
    assert_eq!(result.labels(), &[0, 0, 1, 1]);
    assert!(result.is_last());
}

#[test]
fn test_inertia_empty_round_is_internal_error() {
    let data = pairs();
    let partitions = PartitionMatrix::new(4, 0);
    let outcome = round(&data, &partitions, &[], &[], true);

    let err = InertiaConsensus.build(&outcome).unwrap_err();
    assert!(err.is_critical());
}

#[test]
fn test_vote_aligns_permuted_runs() {
    let data = pairs();
    // Run 1 is run 0 with ids swapped; run 2 disagrees on point 1.
    let partitions =
        PartitionMatrix::from_columns(&[vec![0, 0, 1, 1], vec![1, 1, 0, 0], vec![0, 1, 1, 1]]).unwrap();
    let outcome = round(&data, &partitions, &[4, 4, 4], &[1.0, 1.0, 60.5], true);

    let result = VotingConsensus::new().build(&outcome).unwrap();

    assert_eq!(result.labels(), &[0, 0, 1, 1]);
    assert!((result.metrics().inertia - 1.0).abs() < 1e-12);
    assert_eq!(result.metrics().run_agreement, vec![1.0, 1.0, 0.75]);
    assert!((result.metrics().agreement - 2.75 / 3.0).abs() < 1e-12);
    assert_eq!(result.info().best_run, 0);

    println!("[VERIFIED] Voting consensus aligns ids before voting");
}

#[test]
fn test_vote_with_single_run_matches_that_run() {
    let data = pairs();
    let partitions = PartitionMatrix::from_columns(&[vec![1, 1, 0, 0]]).unwrap();
    let outcome = round(&data, &partitions, &[2], &[1.0], false);

    let result = VotingConsensus.build(&outcome).unwrap();

    assert_eq!(result.labels(), &[1, 1, 0, 0]);
    assert_eq!(result.info().best_run, 0);
    assert_eq!(result.metrics().agreement, 1.0);
}

#[test]
fn test_info_serializes_camel_case() {
    let data = pairs();
    let partitions = PartitionMatrix::from_columns(&[vec![0, 0, 1, 1]]).unwrap();
    let outcome = round(&data, &partitions, &[1], &[1.0], false);

    let result = InertiaConsensus.build(&outcome).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    for key in ["iteration", "isLast", "timestamp", "runIteration", "elapsedTime", "bestRun"] {
        assert!(json["info"].get(key).is_some(), "missing info.{}", key);
    }
    assert_eq!(json["metrics"]["inertia"], 1.0);
    assert_eq!(json["labels"], serde_json::json!([0, 0, 1, 1]));
    assert_eq!(json["partitions"], serde_json::json!([[0], [0], [1], [1]]));
}
