//! Centroid initialization strategy selection.
//!
//! The strategy is chosen once, at configuration time, and handed to the run
//! factory. Config files may use the canonical name or one of its aliases:
//!
//! ```toml
//! init = "k-means++"   # canonical
//! init = "kmeans++"    # alias
//! init = "random"
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// How a run picks its initial `k` centroids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum InitStrategy {
    /// `k` distinct data points chosen uniformly at random.
    #[serde(rename = "random")]
    Random,

    /// D²-weighted seeding: each next centroid is drawn with probability
    /// proportional to its squared distance from the nearest chosen centroid.
    #[default]
    #[serde(rename = "k-means++")]
    KMeansPlusPlus,
}

impl InitStrategy {
    /// All variants, in declaration order.
    pub const ALL: [InitStrategy; 2] = [InitStrategy::Random, InitStrategy::KMeansPlusPlus];

    /// Canonical configuration name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::KMeansPlusPlus => "k-means++",
        }
    }

    /// Parse a canonical or alias name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownInitStrategy`] for anything else.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "k-means++" | "kmeans++" | "kmeanspp" | "kmeans_plus_plus" => Ok(Self::KMeansPlusPlus),
            _ => Err(ConfigError::UnknownInitStrategy(name.to_string())),
        }
    }
}

impl fmt::Display for InitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InitStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Serde deserializer that accepts canonical and alias strategy names.
pub fn deserialize_init_strategy<'de, D>(deserializer: D) -> Result<InitStrategy, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    InitStrategy::from_name(&name).map_err(serde::de::Error::custom)
}
