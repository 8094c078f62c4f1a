//! Error types for pec-core.
//!
//! - [`PecError`]: Top-level unified error for all crate errors
//! - Sub-error types: [`ConfigError`], [`StateError`]
//!
//! # Taxonomy
//!
//! - Configuration errors are raised synchronously at construction and are
//!   never retried. Rebuild with corrected parameters.
//! - State errors fail fast when the round-pull protocol is misused
//!   (pulling from a completed ensemble, stepping an exhausted run).
//! - Numeric edge cases inside a run (empty clusters) are handled by the run
//!   itself and never surface here.
//!
//! Library code never panics on bad input; every failure is a `Result`.
//!
//! # Examples
//!
//! ```rust
//! use pec_core::error::{ConfigError, PecError, Result};
//!
//! fn require_clusters(k: usize) -> Result<usize> {
//!     if k == 0 {
//!         return Err(ConfigError::InvalidClusterCount(k).into());
//!     }
//!     Ok(k)
//! }
//!
//! let err = require_clusters(0).unwrap_err();
//! assert!(err.is_configuration());
//! assert!(matches!(err, PecError::Config(ConfigError::InvalidClusterCount(0))));
//! ```

mod sub_errors;
mod unified;


pub use sub_errors::{ConfigError, StateError};
pub use unified::{PecError, Result};
