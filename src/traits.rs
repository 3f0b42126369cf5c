//! Core traits for models consumed by the search.
//!
//! The search never touches a model directly: it asks a [`ModelFactory`] to
//! build one from candidate genes and drives it through [`Classifier`].

use crate::error::Result;
use crate::evolution::Genes;
use crate::primitives::Matrix;

/// Supervised classifier with a fit/predict lifecycle.
///
/// # Examples
///
/// ```
/// use afinar::classification::KNearestNeighbors;
/// use afinar::primitives::Matrix;
/// use afinar::traits::Classifier;
///
/// let x = Matrix::from_vec(4, 1, vec![0.0, 0.2, 5.0, 5.2]).unwrap();
/// let y = vec![0, 0, 1, 1];
///
/// let mut model = KNearestNeighbors::new(1);
/// model.fit(&x, &y).unwrap();
/// assert_eq!(model.predict(&x).unwrap(), y);
/// ```
pub trait Classifier {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (dimension mismatch, invalid
    /// hyperparameters for this data, etc.).
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()>;

    /// Predicts class labels for input data.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or dimensions mismatch.
    fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>>;
}

/// Builds a fresh, unfitted model from candidate genes.
pub trait ModelFactory {
    /// The model type produced.
    type Model: Classifier;

    /// Constructs a model configured by `genes`.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::Configuration`](crate::error::AfinarError::Configuration)
    /// if the genes do not describe a valid model.
    fn build_model(&self, genes: &Genes) -> Result<Self::Model>;
}

impl<F: ModelFactory + ?Sized> ModelFactory for &F {
    type Model = F::Model;

    fn build_model(&self, genes: &Genes) -> Result<Self::Model> {
        (**self).build_model(genes)
    }
}
