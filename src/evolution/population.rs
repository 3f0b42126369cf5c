//! Ordered collections of candidates.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{FitnessEvaluator, Individual};
use crate::error::{AfinarError, Result};

/// An ordered sequence of individuals.
///
/// After [`rank`](Self::rank) the order is descending by fitness, ties kept
/// in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Create a population from individuals in the given order.
    #[must_use]
    pub fn new(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Number of individuals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Iterate in current order.
    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Individuals in current order.
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Score every individual that has no fitness yet.
    ///
    /// Returns the number of evaluator calls made.
    ///
    /// # Errors
    ///
    /// Propagates the first evaluator error unchanged, and returns
    /// [`AfinarError::InvalidFitness`] for a NaN or out-of-range score.
    pub fn evaluate<E>(&mut self, evaluator: &E) -> Result<usize>
    where
        E: FitnessEvaluator + ?Sized,
    {
        let mut calls = 0;
        for individual in self.individuals.iter_mut().filter(|i| !i.is_evaluated()) {
            let score = evaluator.evaluate(individual.genes())?;
            calls += 1;
            if !(0.0..=1.0).contains(&score) {
                return Err(AfinarError::InvalidFitness {
                    genes: individual.genes().to_string(),
                    score,
                });
            }
            tracing::debug!(genes = %individual.genes(), fitness = score, "evaluated candidate");
            individual.record_fitness(score);
        }
        Ok(calls)
    }

    /// Sort descending by fitness.
    ///
    /// The sort is stable, so equal scores keep their insertion order.
    /// `-0.0` and `0.0` compare equal.
    pub fn rank(&mut self) {
        self.individuals.sort_by(|a, b| {
            b.score()
                .partial_cmp(&a.score())
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Top individual; meaningful after [`rank`](Self::rank).
    #[must_use]
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    /// First `k` individuals (fewer if the population is smaller).
    #[must_use]
    pub fn top_k(&self, k: usize) -> &[Individual] {
        &self.individuals[..k.min(self.individuals.len())]
    }

    /// Mean fitness over evaluated individuals.
    #[must_use]
    pub fn mean_fitness(&self) -> Option<f64> {
        let scores: Vec<f64> = self.individuals.iter().filter_map(Individual::fitness).collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<I: IntoIterator<Item = Individual>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "population_tests.rs"]
mod tests;
