//! The round-synchronized multi-run orchestrator.
//!
//! # Overview
//!
//! [`ProgressiveEnsembleClustering`] owns `r` independent runs and advances
//! them together, one step each per round. After every round it writes each
//! stepped run's labels into that run's column of the partition matrix and
//! hands the round to a [`ConsensusPolicy`](crate::consensus::ConsensusPolicy),
//! whose [`PartialResult`](crate::consensus::PartialResult) goes back to the
//! caller.
//!
//! # Lifecycle
//!
//! ```text
//! Constructed --next_round()--> Active --all runs exhausted--> Completed
//! ```
//!
//! Runs are created lazily on the first `next_round()` call. Calling
//! `next_round()` on a completed ensemble is a state error.

mod lifecycle;
mod orchestrator;
mod rounds;
#[cfg(test)]
mod tests;

pub use lifecycle::EnsembleStage;
pub use orchestrator::{InertiaEnsemble, ProgressiveEnsembleClustering, VotingEnsemble};
pub use rounds::Rounds;
