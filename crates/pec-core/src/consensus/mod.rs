//! Consensus policies: reduce one round's per-run outcomes to one answer.
//!
//! # Policies
//!
//! - [`InertiaConsensus`]: labels of the lowest-inertia run
//! - [`VotingConsensus`]: majority vote over label-aligned runs
//!
//! Both implement [`ConsensusPolicy`]; the orchestrator is generic over it.

mod inertia;
#[cfg(test)]
mod tests;
mod traits;
mod types;
mod vote;

pub use inertia::InertiaConsensus;
pub use traits::{stable_argmax, stable_argmin, ConsensusPolicy, RoundOutcome};
pub use types::{ConsensusMetrics, InertiaMetrics, PartialResult, PartialResultInfo, VoteMetrics};
pub use vote::{align_labels, VotingConsensus};
