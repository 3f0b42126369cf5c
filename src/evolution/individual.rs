//! Candidate configurations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ParamValue;

/// A mapping from hyperparameter name to one concrete value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genes {
    values: BTreeMap<String, ParamValue>,
}

impl Genes {
    /// Create an empty gene set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a gene.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Get a gene value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Get a gene as i64.
    #[must_use]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(ParamValue::as_i64)
    }

    /// Get a gene as a string slice.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(ParamValue::as_str)
    }

    /// Number of genes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no genes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over genes ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, ParamValue)> for Genes {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Genes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params: Vec<String> = self
            .values
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        write!(f, "{{{}}}", params.join(", "))
    }
}

/// One candidate configuration plus its measured fitness.
///
/// Genes never change after construction; a child is always a new
/// `Individual`. Fitness is `None` until the candidate has been scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    genes: Genes,
    fitness: Option<f64>,
}

impl Individual {
    /// Create an unevaluated individual.
    #[must_use]
    pub fn new(genes: Genes) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// Consume and return the same genes with a recorded fitness.
    #[must_use]
    pub fn with_fitness(mut self, fitness: f64) -> Self {
        self.fitness = Some(fitness);
        self
    }

    /// The candidate's genes.
    #[must_use]
    pub fn genes(&self) -> &Genes {
        &self.genes
    }

    /// Measured fitness, if evaluated.
    #[must_use]
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Whether a fitness has been recorded.
    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Fitness for ordering; unevaluated individuals rank below any score.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.fitness.unwrap_or(f64::NEG_INFINITY)
    }

    pub(crate) fn record_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }
}
