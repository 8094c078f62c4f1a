//! Ensemble configuration.
//!
//! - [`EnsembleConfig`]: validated ensemble parameters, loadable from TOML
//! - [`InitStrategy`]: centroid seeding variant handed to each run
//! - [`constants`]: shared defaults

pub mod constants;
mod ensemble_config;
mod init_strategy;

#[cfg(test)]
mod tests;

pub use ensemble_config::EnsembleConfig;
pub use init_strategy::{deserialize_init_strategy, InitStrategy};
