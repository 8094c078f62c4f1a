//! Tests for the ensemble orchestrator.
//!
//! # Test Organization
//!
//! - `helpers` - Scripted runs with known lengths and metrics
//! - `lifecycle_tests` - Lazy run creation, stages, state errors
//! - `round_tests` - Round bookkeeping, preserved columns, parallel stepping

mod helpers;

mod round_tests;
