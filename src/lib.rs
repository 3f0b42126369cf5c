//! Afinar: evolutionary hyperparameter search in pure Rust.
//!
//! Afinar tunes the configuration of a classification model by evolving a
//! population of candidate configurations against a held-out validation
//! split, and reports the best configuration ever observed.
//!
//! # Quick Start
//!
//! ```
//! use afinar::prelude::*;
//!
//! // Two clusters on a line
//! let x = Matrix::from_vec(10, 1, vec![
//!     0.0, 0.1, 0.2, 0.3, 0.4,
//!     5.0, 5.1, 5.2, 5.3, 5.4,
//! ]).unwrap();
//! let data = Dataset::new(x, vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1]).unwrap();
//! let split = train_test_split(&data, 0.3, 42).unwrap();
//!
//! let space = ParameterSpace::new()
//!     .integer("n_neighbors", [1, 3, 5])
//!     .categorical("weights", ["uniform", "distance"]);
//! let engine = EvolutionEngine::new(space, ModelEvaluator::new(KnnFactory::new(), split))
//!     .with_config(EvolutionConfig::new().with_population_size(6).with_parent_count(3));
//!
//! let result = engine.run().unwrap();
//! assert!(result.best_fitness > 0.99);
//! ```
//!
//! # Modules
//!
//! - [`evolution`]: Parameter spaces, populations and the search engine
//! - [`classification`]: k-nearest neighbours and its model factory
//! - [`data`]: Labelled datasets, CSV loading and train/validation splits
//! - [`metrics`]: Validation accuracy
//! - [`config`]: JSON search configuration
//! - [`primitives`]: Matrix type
//! - [`traits`]: `Classifier` and `ModelFactory`

pub mod classification;
pub mod config;
pub mod data;
pub mod error;
pub mod evolution;
pub mod metrics;
pub mod prelude;
pub mod primitives;
pub mod traits;

pub use error::{AfinarError, Result};
