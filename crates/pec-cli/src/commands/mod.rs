//! CLI command handlers
//!
//! # Modules
//!
//! - `run`: Drive an ensemble over generated blobs and stream its rounds

pub mod run;
