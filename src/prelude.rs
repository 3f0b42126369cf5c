//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use afinar::prelude::*;
//! ```

pub use crate::classification::{KNearestNeighbors, KnnFactory};
pub use crate::config::SearchConfig;
pub use crate::data::{train_test_split, DataSplit, Dataset};
pub use crate::error::{AfinarError, Result};
pub use crate::evolution::{
    EvolutionConfig, EvolutionEngine, FitnessEvaluator, Genes, ModelEvaluator, ParameterSpace,
    SearchResult,
};
pub use crate::metrics::accuracy;
pub use crate::primitives::Matrix;
pub use crate::traits::{Classifier, ModelFactory};
