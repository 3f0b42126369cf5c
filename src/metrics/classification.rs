//! Classification metrics for evaluating classifier performance.

use crate::error::{AfinarError, Result};

/// Compute classification accuracy.
///
/// accuracy = `correct_predictions` / `total_predictions`
///
/// # Arguments
///
/// * `y_pred` - Predicted class labels
/// * `y_true` - True class labels
///
/// # Returns
///
/// Accuracy score between 0.0 and 1.0
///
/// # Errors
///
/// Returns an error if the slices have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use afinar::metrics::accuracy;
///
/// let y_true = vec![0, 1, 2, 0, 1, 2];
/// let y_pred = vec![0, 2, 1, 0, 0, 1];
/// let acc = accuracy(&y_pred, &y_true).expect("same length, non-empty");
/// assert!((acc - 0.333333).abs() < 0.001);
/// ```
pub fn accuracy(y_pred: &[usize], y_true: &[usize]) -> Result<f64> {
    if y_pred.len() != y_true.len() {
        return Err(AfinarError::dimension_mismatch(
            "predictions",
            y_true.len(),
            y_pred.len(),
        ));
    }
    if y_true.is_empty() {
        return Err(AfinarError::data_unavailable(
            "cannot score an empty set of predictions",
        ));
    }

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    Ok(correct as f64 / y_true.len() as f64)
}

#[cfg(test)]
#[path = "classification_tests.rs"]
mod tests;
