//! Search configuration files.
//!
//! A [`SearchConfig`] bundles the run constants, the parameter space and
//! how the dataset is split. Every field has a default, so `{}` is a valid
//! configuration file.
//!
//! ```json
//! {
//!   "evolution": { "population_size": 20, "generations": 10, "seed": 7 },
//!   "space": [
//!     { "name": "n_neighbors", "domain": { "kind": "integer", "values": [1, 3, 5] } },
//!     { "name": "weights", "domain": { "kind": "categorical", "choices": ["uniform", "distance"] } }
//!   ],
//!   "data": { "test_size": 0.25 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AfinarError, Result};
use crate::evolution::{EvolutionConfig, ParameterSpace};

/// Default fraction of rows held out for validation.
pub const DEFAULT_TEST_SIZE: f64 = 0.3;
/// Default seed of the train/validation shuffle.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// How the dataset is read and partitioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Fraction of rows held out for validation
    pub test_size: f64,
    /// Seed of the train/validation shuffle
    pub split_seed: u64,
    /// Whether the first CSV line is a header
    pub has_header: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
            split_seed: DEFAULT_SPLIT_SEED,
            has_header: true,
        }
    }
}

/// Everything a search run needs besides the data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Run constants
    pub evolution: EvolutionConfig,
    /// Searched hyperparameters
    pub space: ParameterSpace,
    /// Dataset handling
    pub data: DataConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            evolution: EvolutionConfig::default(),
            space: ParameterSpace::knn_default(),
            data: DataConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Parse a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::Serialization`] for malformed JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::Io`] if the file cannot be read, otherwise as
    /// [`from_json`](Self::from_json).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded search config");
        Ok(config)
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::Serialization`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check constants, space and split fraction together.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        self.evolution.validate()?;
        self.space.validate()?;
        if !(self.data.test_size > 0.0 && self.data.test_size < 1.0) {
            return Err(AfinarError::invalid_hyperparameter(
                "test_size",
                self.data.test_size,
                "(0, 1)",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
