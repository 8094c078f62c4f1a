//! Progressive Ensemble Clustering
//!
//! Runs several independent k-means trials in lock-step and hands back a
//! consensus answer after every round, so callers can watch the clustering
//! refine and stop whenever the answer is good enough.
//!
//! # Architecture
//!
//! This crate defines:
//! - Single-step trials behind the [`ProgressiveRun`](run::ProgressiveRun) trait
//! - The round-synchronized orchestrator [`ProgressiveEnsembleClustering`]
//! - The consensus hook [`ConsensusPolicy`](consensus::ConsensusPolicy) with
//!   inertia and voting policies
//! - Seed derivation, validated configuration, and error types
//!
//! # Example
//!
//! ```
//! use pec_core::config::EnsembleConfig;
//! use pec_core::consensus::InertiaConsensus;
//! use pec_core::synthetic::{make_blobs, BlobsConfig};
//! use pec_core::ProgressiveEnsembleClustering;
//!
//! let blobs = make_blobs(&BlobsConfig::default()).unwrap();
//! let config = EnsembleConfig::new(3).with_runs(4).with_seed(42);
//! let mut ensemble = ProgressiveEnsembleClustering::new(blobs.data, config, InertiaConsensus).unwrap();
//!
//! let mut last_round = 0;
//! for result in ensemble.rounds() {
//!     let result = result.unwrap();
//!     assert_eq!(result.iteration(), last_round + 1);
//!     last_round = result.iteration();
//! }
//! assert!(!ensemble.has_next_round());
//! ```

pub mod config;
pub mod consensus;
pub mod dataset;
pub mod ensemble;
pub mod error;
pub mod metrics;
pub mod partition;
pub mod run;
pub mod seed;
pub mod synthetic;

// Re-exports for convenience
pub use config::{EnsembleConfig, InitStrategy};
pub use consensus::{ConsensusPolicy, InertiaConsensus, PartialResult, VotingConsensus};
pub use dataset::Dataset;
pub use ensemble::{EnsembleStage, InertiaEnsemble, ProgressiveEnsembleClustering, VotingEnsemble};
pub use error::{PecError, Result};
pub use partition::PartitionMatrix;
pub use seed::SeedGenerator;
