//! Evolutionary hyperparameter search.
//!
//! A population of candidate configurations is scored against a held-out
//! validation split, ranked, and replaced each generation by children of
//! its top performers. The best configuration ever observed is reported,
//! even if later generations regress.
//!
//! # Components
//!
//! - [`ParameterSpace`] - discrete domain of every tunable hyperparameter
//! - [`FitnessEvaluator`] - scores one candidate ([`ModelEvaluator`] for real models)
//! - [`Population`] - ranked collection of [`Individual`]s
//! - [`EvolutionEngine`] - the generational loop and best-ever tracking
//!
//! # Example
//!
//! ```
//! use afinar::classification::KnnFactory;
//! use afinar::data::{DataSplit, Dataset};
//! use afinar::evolution::{EvolutionConfig, EvolutionEngine, ModelEvaluator, ParameterSpace};
//! use afinar::primitives::Matrix;
//!
//! let train = Dataset::new(
//!     Matrix::from_vec(8, 1, vec![0.0, 0.1, 0.2, 0.3, 5.0, 5.1, 5.2, 5.3]).unwrap(),
//!     vec![0, 0, 0, 0, 1, 1, 1, 1],
//! ).unwrap();
//! let validation = Dataset::new(
//!     Matrix::from_vec(2, 1, vec![0.15, 5.15]).unwrap(),
//!     vec![0, 1],
//! ).unwrap();
//!
//! let space = ParameterSpace::new()
//!     .integer("n_neighbors", [1, 3])
//!     .categorical("weights", ["uniform", "distance"]);
//! let evaluator = ModelEvaluator::new(KnnFactory::new(), DataSplit::new(train, validation));
//!
//! let result = EvolutionEngine::new(space, evaluator)
//!     .with_config(EvolutionConfig::new().with_population_size(4).with_parent_count(2))
//!     .run()
//!     .unwrap();
//! assert!((result.best_fitness - 1.0).abs() < 1e-12);
//! ```
//!
//! # Operators
//!
//! Selection is uniform within the top `parent_count` individuals. A child
//! inherits integer genes from one parent (redrawn with probability
//! `mutation_rate`) and draws categorical genes fresh. See [`variation`].

mod engine;
mod fitness;
mod individual;
mod population;
mod space;
pub mod variation;

pub use engine::{
    EvolutionConfig, EvolutionEngine, GenerationReport, SearchPhase, SearchResult, SearchState,
    DEFAULT_GENERATIONS, DEFAULT_MUTATION_RATE, DEFAULT_PARENT_COUNT, DEFAULT_POPULATION_SIZE,
    DEFAULT_SEED,
};
pub use fitness::{FitnessEvaluator, ModelEvaluator};
pub use individual::{Genes, Individual};
pub use population::Population;
pub use space::{Domain, GeneRole, ParamValue, Parameter, ParameterSpace};
