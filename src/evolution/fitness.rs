//! Scoring candidate configurations.

use crate::data::DataSplit;
use crate::error::{AfinarError, Result};
use crate::metrics::accuracy;
use crate::traits::{Classifier, ModelFactory};

use super::Genes;

/// Scores one candidate configuration.
///
/// Scores live in [0, 1], higher is better. Errors are fatal to a search:
/// the engine never replaces a failed evaluation with a default score.
///
/// Any `Fn(&Genes) -> Result<f64>` is an evaluator, which keeps stubs short:
///
/// ```
/// use afinar::evolution::{FitnessEvaluator, Genes};
///
/// let stub = |genes: &Genes| -> afinar::Result<f64> {
///     Ok(genes.get_i64("k").unwrap_or(0) as f64 / 10.0)
/// };
/// let score = stub.evaluate(&Genes::new().with("k", 7)).unwrap();
/// assert!((score - 0.7).abs() < 1e-12);
/// ```
pub trait FitnessEvaluator {
    /// Checked once before a search initializes its population.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::DataUnavailable`] if the evaluator's data is
    /// missing or malformed.
    fn check_ready(&self) -> Result<()> {
        Ok(())
    }

    /// Score `genes`.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::Configuration`] if `genes` cannot be turned
    /// into a working model.
    fn evaluate(&self, genes: &Genes) -> Result<f64>;
}

impl<F> FitnessEvaluator for F
where
    F: Fn(&Genes) -> Result<f64>,
{
    fn evaluate(&self, genes: &Genes) -> Result<f64> {
        self(genes)
    }
}

/// Validation-accuracy evaluator over a fixed train/validation split.
///
/// Each call builds a fresh model from the genes, fits it on the training
/// split, predicts the validation split and returns the fraction of
/// correct predictions. Deterministic models give identical scores for
/// identical genes.
#[derive(Debug, Clone)]
pub struct ModelEvaluator<M> {
    factory: M,
    split: DataSplit,
}

impl<M: ModelFactory> ModelEvaluator<M> {
    /// Create an evaluator for `factory` over `split`.
    #[must_use]
    pub fn new(factory: M, split: DataSplit) -> Self {
        Self { factory, split }
    }

    /// The data the evaluator scores against.
    #[must_use]
    pub fn split(&self) -> &DataSplit {
        &self.split
    }

    /// The model factory.
    #[must_use]
    pub fn factory(&self) -> &M {
        &self.factory
    }
}

impl<M: ModelFactory> FitnessEvaluator for ModelEvaluator<M> {
    fn check_ready(&self) -> Result<()> {
        self.split.validate()
    }

    fn evaluate(&self, genes: &Genes) -> Result<f64> {
        let train = &self.split.train;
        let validation = &self.split.validation;

        let mut model = self
            .factory
            .build_model(genes)
            .map_err(|e| as_configuration(genes, e))?;
        model
            .fit(&train.features, &train.labels)
            .map_err(|e| as_configuration(genes, e))?;
        let predictions = model
            .predict(&validation.features)
            .map_err(|e| as_configuration(genes, e))?;

        accuracy(&predictions, &validation.labels)
    }
}

/// Attribute a model failure to the candidate that caused it.
fn as_configuration(genes: &Genes, err: AfinarError) -> AfinarError {
    match err {
        AfinarError::Configuration { .. } => err,
        other => AfinarError::configuration(genes, other.to_string()),
    }
}

#[cfg(test)]
#[path = "fitness_tests.rs"]
mod tests;
