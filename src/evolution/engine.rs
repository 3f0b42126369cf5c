//! The generational search loop.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::variation::{breed, initial_population, select_parents};
use super::{FitnessEvaluator, Genes, Individual, ParameterSpace, Population};
use crate::error::{AfinarError, Result};

/// Default number of individuals per generation.
pub const DEFAULT_POPULATION_SIZE: usize = 10;
/// Default number of generations.
pub const DEFAULT_GENERATIONS: usize = 5;
/// Default size of the parent pool.
pub const DEFAULT_PARENT_COUNT: usize = 5;
/// Default probability of redrawing an inherited gene.
pub const DEFAULT_MUTATION_RATE: f64 = 0.2;
/// Default random seed.
pub const DEFAULT_SEED: u64 = 42;

/// Constants of one search run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Individuals per generation
    pub population_size: usize,
    /// Generations to run
    pub generations: usize,
    /// Top-ranked individuals eligible as parents
    pub parent_count: usize,
    /// Probability of redrawing an inherited gene
    pub mutation_rate: f64,
    /// Random seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            parent_count: DEFAULT_PARENT_COUNT,
            mutation_rate: DEFAULT_MUTATION_RATE,
            seed: Some(DEFAULT_SEED),
        }
    }
}

impl EvolutionConfig {
    /// Create a configuration with default constants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set population size.
    #[must_use]
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set number of generations.
    #[must_use]
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Set parent pool size.
    #[must_use]
    pub fn with_parent_count(mut self, count: usize) -> Self {
        self.parent_count = count;
        self
    }

    /// Set mutation probability.
    #[must_use]
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Set random seed for reproducibility.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the constants.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::InvalidHyperparameter`] naming the first
    /// offending constant.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(AfinarError::invalid_hyperparameter(
                "population_size",
                self.population_size,
                ">= 1",
            ));
        }
        if self.generations == 0 {
            return Err(AfinarError::invalid_hyperparameter(
                "generations",
                self.generations,
                ">= 1",
            ));
        }
        if self.parent_count == 0 || self.parent_count > self.population_size {
            return Err(AfinarError::invalid_hyperparameter(
                "parent_count",
                self.parent_count,
                format!("1..={}", self.population_size),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(AfinarError::invalid_hyperparameter(
                "mutation_rate",
                self.mutation_rate,
                "[0, 1]",
            ));
        }
        Ok(())
    }

    /// The run's single random source.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Where a search currently is in its generational loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPhase {
    Initializing,
    Evaluating,
    Ranking,
    Selecting,
    Varying,
    Terminal,
}

/// Progress record emitted after each generation is ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// 0-indexed generation
    pub generation: usize,
    /// Best fitness seen in any generation so far
    pub best_fitness: f64,
    /// Genes of the best-ever individual
    pub best_genes: Genes,
    /// Best fitness within this generation
    pub population_best_fitness: f64,
    /// Mean fitness within this generation
    pub mean_fitness: f64,
    /// Evaluator calls made so far
    pub evaluations: usize,
}

/// Final answer of a completed search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Genes of the best individual ever observed
    pub best_genes: Genes,
    /// Its fitness
    pub best_fitness: f64,
    /// Generations completed
    pub generations: usize,
    /// Total evaluator calls
    pub evaluations: usize,
    /// One report per generation
    pub history: Vec<GenerationReport>,
}

/// State of one search run, mutated only by [`EvolutionEngine::step`].
#[derive(Debug, Clone)]
pub struct SearchState {
    phase: SearchPhase,
    generation: usize,
    population: Population,
    parents: Vec<Individual>,
    best_ever: Option<Individual>,
    evaluations: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    /// A fresh state in [`SearchPhase::Initializing`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: SearchPhase::Initializing,
            generation: 0,
            population: Population::default(),
            parents: Vec::new(),
            best_ever: None,
            evaluations: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Current 0-indexed generation.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current population.
    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Parent pool chosen in the last Selecting phase.
    #[must_use]
    pub fn parents(&self) -> &[Individual] {
        &self.parents
    }

    /// Best individual observed in any generation.
    #[must_use]
    pub fn best_ever(&self) -> Option<&Individual> {
        self.best_ever.as_ref()
    }

    /// Evaluator calls made so far.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Whether the search has finished.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == SearchPhase::Terminal
    }
}

/// Evolutionary hyperparameter search.
///
/// Runs `Initializing → Evaluating → Ranking → (Terminal | Selecting →
/// Varying → Evaluating)` for a fixed number of generations and reports the
/// best individual ever observed, which may come from an earlier
/// generation than the last.
///
/// # Example
///
/// ```
/// use afinar::evolution::{EvolutionConfig, EvolutionEngine, Genes, ParameterSpace};
///
/// let space = ParameterSpace::new()
///     .integer("n_neighbors", [3, 5, 7])
///     .categorical("weights", ["uniform", "distance"]);
///
/// // Prefers small k.
/// let evaluator = |genes: &Genes| -> afinar::Result<f64> {
///     Ok(1.0 / genes.get_i64("n_neighbors").unwrap_or(1) as f64)
/// };
///
/// let engine = EvolutionEngine::new(space, evaluator)
///     .with_config(EvolutionConfig::new().with_population_size(6).with_parent_count(3));
/// let result = engine.run().expect("stub evaluator never fails");
///
/// assert_eq!(result.history.len(), 5);
/// assert!(result.best_fitness >= result.history[0].population_best_fitness);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionEngine<E> {
    space: ParameterSpace,
    evaluator: E,
    config: EvolutionConfig,
}

impl<E: FitnessEvaluator> EvolutionEngine<E> {
    /// Create an engine with default constants.
    #[must_use]
    pub fn new(space: ParameterSpace, evaluator: E) -> Self {
        Self {
            space,
            evaluator,
            config: EvolutionConfig::default(),
        }
    }

    /// Replace the run constants.
    #[must_use]
    pub fn with_config(mut self, config: EvolutionConfig) -> Self {
        self.config = config;
        self
    }

    /// Run constants.
    #[must_use]
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// The searched space.
    #[must_use]
    pub fn space(&self) -> &ParameterSpace {
        &self.space
    }

    /// The fitness evaluator.
    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Run to completion.
    ///
    /// # Errors
    ///
    /// See [`run_with`](Self::run_with).
    pub fn run(&self) -> Result<SearchResult> {
        self.run_with(|_| {})
    }

    /// Run to completion, handing each generation's report to `observer`.
    ///
    /// # Errors
    ///
    /// Returns an error before any evaluation if the constants, the space,
    /// or the evaluator's data are invalid. Evaluation errors abort the run;
    /// no partial result is returned.
    pub fn run_with<O>(&self, mut observer: O) -> Result<SearchResult>
    where
        O: FnMut(&GenerationReport),
    {
        self.prepare()?;
        let mut rng = self.config.rng();

        let span = tracing::info_span!(
            "evolution",
            seed = ?self.config.seed,
            population_size = self.config.population_size,
            generations = self.config.generations,
        );
        let _guard = span.enter();

        let mut state = SearchState::new();
        let mut history = Vec::with_capacity(self.config.generations);
        while !state.is_terminal() {
            if let Some(report) = self.step(&mut state, &mut rng)? {
                observer(&report);
                history.push(report);
            }
        }

        let best = state.best_ever.ok_or_else(|| {
            AfinarError::invalid_space("search finished without ranking a candidate")
        })?;
        let best_fitness = best.score();
        Ok(SearchResult {
            best_genes: best.genes().clone(),
            best_fitness,
            generations: history.len(),
            evaluations: state.evaluations,
            history,
        })
    }

    /// Validate constants, space and evaluator data.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn prepare(&self) -> Result<()> {
        self.config.validate()?;
        self.space.validate()?;
        self.evaluator.check_ready()
    }

    /// Advance `state` by one phase.
    ///
    /// Returns the generation report when a Ranking phase completes.
    /// Stepping a terminal state is a no-op. Callers driving the loop by
    /// hand should call [`prepare`](Self::prepare) first.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors.
    pub fn step<R: Rng + ?Sized>(
        &self,
        state: &mut SearchState,
        rng: &mut R,
    ) -> Result<Option<GenerationReport>> {
        match state.phase {
            SearchPhase::Initializing => {
                state.population = initial_population(&self.space, self.config.population_size, rng);
                state.phase = SearchPhase::Evaluating;
                Ok(None)
            }
            SearchPhase::Evaluating => {
                state.evaluations += state.population.evaluate(&self.evaluator)?;
                state.phase = SearchPhase::Ranking;
                Ok(None)
            }
            SearchPhase::Ranking => {
                state.population.rank();
                let report = self.track_best(state)?;
                state.phase = if state.generation + 1 >= self.config.generations {
                    SearchPhase::Terminal
                } else {
                    SearchPhase::Selecting
                };
                Ok(Some(report))
            }
            SearchPhase::Selecting => {
                state.parents = select_parents(&state.population, self.config.parent_count);
                state.phase = SearchPhase::Varying;
                Ok(None)
            }
            SearchPhase::Varying => {
                state.population = breed(
                    &state.parents,
                    &self.space,
                    self.config.population_size,
                    self.config.mutation_rate,
                    rng,
                );
                state.parents.clear();
                state.generation += 1;
                state.phase = SearchPhase::Evaluating;
                Ok(None)
            }
            SearchPhase::Terminal => Ok(None),
        }
    }

    /// Replace the best-ever individual on strict improvement and report.
    fn track_best(&self, state: &mut SearchState) -> Result<GenerationReport> {
        let current = state
            .population
            .best()
            .ok_or_else(|| AfinarError::invalid_space("population is empty"))?;
        let improved = state
            .best_ever
            .as_ref()
            .map_or(true, |best| current.score() > best.score());
        let population_best_fitness = current.score();
        if improved {
            state.best_ever = Some(current.clone());
        }

        let best = state
            .best_ever
            .as_ref()
            .ok_or_else(|| AfinarError::invalid_space("population is empty"))?;
        let report = GenerationReport {
            generation: state.generation,
            best_fitness: best.score(),
            best_genes: best.genes().clone(),
            population_best_fitness,
            mean_fitness: state.population.mean_fitness().unwrap_or(0.0),
            evaluations: state.evaluations,
        };
        tracing::info!(
            generation = report.generation,
            best_fitness = report.best_fitness,
            population_best = report.population_best_fitness,
            genes = %report.best_genes,
            improved,
            "generation ranked"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
