//! Ensemble lifecycle states.

use serde::Serialize;

/// Public view of where an ensemble is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnsembleStage {
    /// Configured and validated; no runs exist yet.
    Constructed,
    /// Runs created; at least one can still step.
    Active,
    /// Every run is exhausted; no further rounds.
    Completed,
}

impl EnsembleStage {
    /// Lowercase stage name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constructed => "constructed",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for EnsembleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle state carrying the runs once they exist.
#[derive(Debug)]
pub(crate) enum Lifecycle<R> {
    Constructed,
    Active(Vec<R>),
    Completed(Vec<R>),
}

impl<R> Lifecycle<R> {
    pub(crate) fn stage(&self) -> EnsembleStage {
        match self {
            Self::Constructed => EnsembleStage::Constructed,
            Self::Active(_) => EnsembleStage::Active,
            Self::Completed(_) => EnsembleStage::Completed,
        }
    }

    pub(crate) fn runs(&self) -> &[R] {
        match self {
            Self::Constructed => &[],
            Self::Active(runs) | Self::Completed(runs) => runs,
        }
    }

    /// Move to `Completed`, keeping the runs.
    pub(crate) fn complete(&mut self) {
        *self = match std::mem::replace(self, Self::Constructed) {
            Self::Active(runs) | Self::Completed(runs) => Self::Completed(runs),
            Self::Constructed => Self::Completed(Vec::new()),
        };
    }
}
