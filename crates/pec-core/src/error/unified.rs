//! Top-level unified error type for pec-core.

use thiserror::Error;

use super::sub_errors::{ConfigError, StateError};

// ============================================================================
// TOP-LEVEL UNIFIED ERROR TYPE
// ============================================================================

/// Top-level unified error type for the progressive ensemble engine.
///
/// All crate errors convert into this type via `From` implementations, so
/// `?` works across config validation, run stepping, and round pulling.
///
/// # Examples
///
/// ```rust
/// use pec_core::error::{PecError, StateError};
///
/// let err: PecError = StateError::EnsembleCompleted { rounds: 7 }.into();
/// assert!(err.is_state());
/// assert!(!err.is_critical());
/// assert_eq!(err.to_string(), "State error: ensemble already completed after 7 rounds");
/// ```
#[derive(Debug, Error)]
pub enum PecError {
    /// Configuration error.
    ///
    /// Covers invalid parameters, malformed input matrices, and parse failures.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// State error.
    ///
    /// Covers misuse of the round-pull and step-pull protocols.
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// Internal error indicating a bug.
    ///
    /// # When This Occurs
    ///
    /// - Invariant violation detected (e.g. a run returned labels of the wrong length)
    /// - A consensus policy received an empty round
    ///
    /// These errors indicate bugs and should be investigated.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PecError {
    /// True for errors raised while validating configuration or input data.
    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// True for round/step protocol violations.
    #[inline]
    pub fn is_state(&self) -> bool {
        matches!(self, Self::State(_))
    }

    /// Check if this error indicates a bug rather than caller misuse.
    ///
    /// Critical errors should be logged at ERROR level.
    #[inline]
    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    /// Create an internal error from a message.
    #[inline]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for pec-core operations.
pub type Result<T> = std::result::Result<T, PecError>;
