//! Classification models tuned by the search.
//!
//! Includes k-nearest neighbours and the [`KnnFactory`] that turns candidate
//! genes into an unfitted model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AfinarError, Result};
use crate::evolution::Genes;
use crate::primitives::Matrix;
use crate::traits::{Classifier, ModelFactory};

/// Distances below this count as exact matches.
const EXACT_MATCH: f32 = 1e-10;

/// Distance metric for K-Nearest Neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Euclidean distance: `sqrt(sum((x_i - y_i)^2))`
    Euclidean,
    /// Manhattan distance: `sum(|x_i - y_i|)`
    Manhattan,
    /// Minkowski distance with parameter p
    Minkowski(f32),
}

impl DistanceMetric {
    /// Distance between two equally long rows.
    #[must_use]
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        let diffs = a.iter().zip(b).map(|(x, y)| (x - y).abs());
        match *self {
            Self::Euclidean => diffs.map(|d| d * d).sum::<f32>().sqrt(),
            Self::Manhattan => diffs.sum(),
            Self::Minkowski(p) => diffs.map(|d| d.powf(p)).sum::<f32>().powf(1.0 / p),
        }
    }
}

/// How neighbours contribute to a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weighting {
    /// Every neighbour counts once.
    #[default]
    Uniform,
    /// Neighbours count `1/d`; exact matches outvote everything else.
    Distance,
}

/// K-Nearest Neighbors classifier.
///
/// Instance-based learning algorithm that classifies new samples based on
/// the k closest training examples in the feature space. Predictions are
/// deterministic: equidistant neighbours keep training order and tied votes
/// go to the smallest label.
///
/// # Example
///
/// ```
/// use afinar::classification::{KNearestNeighbors, Weighting};
/// use afinar::primitives::Matrix;
/// use afinar::traits::Classifier;
///
/// let x = Matrix::from_vec(6, 2, vec![
///     0.0, 0.0,  // class 0
///     0.0, 1.0,  // class 0
///     1.0, 0.0,  // class 0
///     5.0, 5.0,  // class 1
///     5.0, 6.0,  // class 1
///     6.0, 5.0,  // class 1
/// ]).expect("6x2 matrix with 12 values");
/// let y = vec![0, 0, 0, 1, 1, 1];
///
/// let mut knn = KNearestNeighbors::new(3).with_weighting(Weighting::Distance);
/// knn.fit(&x, &y).expect("Valid training data with 6 samples");
///
/// let test = Matrix::from_vec(1, 2, vec![0.5, 0.5]).expect("1x2 test matrix");
/// assert_eq!(knn.predict(&test).expect("fitted"), vec![0]);
/// ```
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    k: usize,
    metric: DistanceMetric,
    weighting: Weighting,
    x_train: Option<Matrix<f32>>,
    y_train: Option<Vec<usize>>,
}

impl KNearestNeighbors {
    /// Creates an unfitted classifier voting among `k` neighbours.
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            metric: DistanceMetric::Euclidean,
            weighting: Weighting::Uniform,
            x_train: None,
            y_train: None,
        }
    }

    /// Sets the distance metric.
    #[must_use]
    pub fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Sets the vote weighting.
    #[must_use]
    pub fn with_weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = weighting;
        self
    }

    /// Number of neighbours.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Distance metric.
    #[must_use]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Vote weighting.
    #[must_use]
    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// Whether [`fit`](Classifier::fit) has succeeded.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.x_train.is_some()
    }

    /// Labels of the `k` nearest training rows, nearest first.
    fn neighbours(&self, x_train: &Matrix<f32>, y_train: &[usize], row: &[f32]) -> Vec<(f32, usize)> {
        let mut distances: Vec<(f32, usize)> = y_train
            .iter()
            .enumerate()
            .map(|(j, &label)| (self.metric.distance(row, x_train.row(j)), label))
            .collect();
        distances.sort_by(|a, b| a.0.total_cmp(&b.0));
        distances.truncate(self.k);
        distances
    }

    fn vote(&self, neighbours: &[(f32, usize)]) -> usize {
        let mut tally: BTreeMap<usize, f64> = BTreeMap::new();
        let exact = neighbours.iter().any(|(d, _)| *d < EXACT_MATCH);

        for &(dist, label) in neighbours {
            let weight = match self.weighting {
                Weighting::Uniform => 1.0,
                Weighting::Distance if exact => {
                    if dist < EXACT_MATCH {
                        1.0
                    } else {
                        0.0
                    }
                }
                Weighting::Distance => 1.0 / f64::from(dist),
            };
            *tally.entry(label).or_insert(0.0) += weight;
        }

        // Ascending label order; only a strictly larger tally displaces.
        let mut winner = (0, f64::NEG_INFINITY);
        for (label, weight) in tally {
            if weight > winner.1 {
                winner = (label, weight);
            }
        }
        winner.0
    }
}

impl Classifier for KNearestNeighbors {
    /// Stores the training data; kNN defers all work to prediction.
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        let n_samples = x.n_rows();
        if n_samples == 0 {
            return Err(AfinarError::data_unavailable("cannot fit with zero samples"));
        }
        if y.len() != n_samples {
            return Err(AfinarError::dimension_mismatch("samples", n_samples, y.len()));
        }
        if self.k == 0 || self.k > n_samples {
            return Err(AfinarError::invalid_hyperparameter(
                "n_neighbors",
                self.k,
                format!("1..={n_samples}"),
            ));
        }
        if let DistanceMetric::Minkowski(p) = self.metric {
            if !(p >= 1.0) {
                return Err(AfinarError::invalid_hyperparameter("p", p, ">= 1"));
            }
        }

        self.x_train = Some(x.clone());
        self.y_train = Some(y.to_vec());
        Ok(())
    }

    fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        let (Some(x_train), Some(y_train)) = (self.x_train.as_ref(), self.y_train.as_ref()) else {
            return Err(AfinarError::data_unavailable("model not fitted"));
        };
        if x.n_cols() != x_train.n_cols() {
            return Err(AfinarError::dimension_mismatch(
                "features",
                x_train.n_cols(),
                x.n_cols(),
            ));
        }

        Ok((0..x.n_rows())
            .map(|i| self.vote(&self.neighbours(x_train, y_train, x.row(i))))
            .collect())
    }
}

/// Builds [`KNearestNeighbors`] models from genes.
///
/// Reads `n_neighbors` (integer, required), `weights` (`"uniform"` or
/// `"distance"`, default uniform) and `metric` (`"euclidean"`,
/// `"manhattan"` or `"minkowski"`, default euclidean). A Minkowski metric
/// takes its order from the numeric gene `p` (default 2, at least 1).
///
/// # Examples
///
/// ```
/// use afinar::classification::{KnnFactory, Weighting};
/// use afinar::evolution::Genes;
/// use afinar::traits::ModelFactory;
///
/// let genes = Genes::new().with("n_neighbors", 5).with("weights", "distance");
/// let model = KnnFactory::new().build_model(&genes).unwrap();
/// assert_eq!(model.k(), 5);
/// assert_eq!(model.weighting(), Weighting::Distance);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KnnFactory;

impl KnnFactory {
    /// Create a factory.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ModelFactory for KnnFactory {
    type Model = KNearestNeighbors;

    fn build_model(&self, genes: &Genes) -> Result<KNearestNeighbors> {
        let k = match genes.get("n_neighbors") {
            None => return Err(AfinarError::configuration(genes, "missing gene n_neighbors")),
            Some(value) => value
                .as_i64()
                .ok_or_else(|| {
                    AfinarError::configuration(genes, format!("n_neighbors={value} is not an integer"))
                })?,
        };
        let k = usize::try_from(k)
            .ok()
            .filter(|&k| k >= 1)
            .ok_or_else(|| AfinarError::configuration(genes, format!("n_neighbors={k} must be >= 1")))?;

        let weighting = match genes.get("weights").map(|v| v.as_str()) {
            None | Some(Some("uniform")) => Weighting::Uniform,
            Some(Some("distance")) => Weighting::Distance,
            Some(_) => {
                return Err(AfinarError::configuration(
                    genes,
                    "weights must be \"uniform\" or \"distance\"",
                ))
            }
        };

        let metric = match genes.get("metric").map(|v| v.as_str()) {
            None | Some(Some("euclidean")) => DistanceMetric::Euclidean,
            Some(Some("manhattan")) => DistanceMetric::Manhattan,
            Some(Some("minkowski")) => DistanceMetric::Minkowski(minkowski_order(genes)?),
            Some(_) => {
                return Err(AfinarError::configuration(
                    genes,
                    "metric must be \"euclidean\", \"manhattan\" or \"minkowski\"",
                ))
            }
        };

        Ok(KNearestNeighbors::new(k)
            .with_weighting(weighting)
            .with_metric(metric))
    }
}

fn minkowski_order(genes: &Genes) -> Result<f32> {
    let p = match genes.get("p") {
        None => return Ok(2.0),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| AfinarError::configuration(genes, format!("p={value} is not a number")))?,
    };
    if !(p >= 1.0) {
        return Err(AfinarError::configuration(genes, format!("p={p} must be >= 1")));
    }
    Ok(p as f32)
}

#[cfg(test)]
mod tests;
