//! Tests for progressive runs.
//!
//! # Test Organization
//!
//! - `helpers` - Deterministic test datasets
//! - `init_tests` - Random and K-means++ seeding
//! - `kmeans_tests` - Step contract, convergence, determinism
//! - `recovery_tests` - Empty-cluster recovery

mod helpers;
