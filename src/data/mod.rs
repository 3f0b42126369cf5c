//! Labelled datasets and the train/validation split a search scores against.
//!
//! Data is loaded once before a search starts and never mutated by it.

use std::collections::HashMap;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{AfinarError, Result};
use crate::primitives::Matrix;

/// Feature matrix with one class label per row.
///
/// # Examples
///
/// ```
/// use afinar::data::Dataset;
/// use afinar::primitives::Matrix;
///
/// let features = Matrix::from_vec(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
/// let data = Dataset::new(features, vec![0, 1, 0]).unwrap();
/// assert_eq!(data.len(), 3);
/// assert_eq!(data.n_features(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// One row per sample
    pub features: Matrix<f32>,
    /// Class index of each row
    pub labels: Vec<usize>,
}

impl Dataset {
    /// Pair features with labels.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::DimensionMismatch`] if the label count differs
    /// from the row count.
    pub fn new(features: Matrix<f32>, labels: Vec<usize>) -> Result<Self> {
        if features.n_rows() != labels.len() {
            return Err(AfinarError::dimension_mismatch(
                "samples",
                features.n_rows(),
                labels.len(),
            ));
        }
        Ok(Self { features, labels })
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of feature columns.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.features.n_cols()
    }

    /// Number of distinct classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        let mut seen: Vec<usize> = self.labels.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    /// Rows at `indices`, in that order.
    #[must_use]
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            features: self.features.select_rows(indices),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// Parse comma-separated rows; the last column is the label.
    ///
    /// Labels that all parse as non-negative integers are used as class
    /// indices directly. Otherwise each distinct label text is assigned the
    /// next index in order of first appearance. Blank lines are ignored and
    /// quoted fields may contain commas.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::Parse`] with the 1-based line number for
    /// malformed CSV, ragged rows or non-numeric features, and
    /// [`AfinarError::DataUnavailable`] if no data rows remain.
    pub fn from_csv_str(text: &str, has_header: bool) -> Result<Self> {
        Self::from_csv_reader(text.as_bytes(), has_header)
    }

    /// Read a CSV file; see [`from_csv_str`](Self::from_csv_str).
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::Io`] if the file cannot be read, otherwise as
    /// [`from_csv_str`](Self::from_csv_str).
    pub fn load_csv(path: impl AsRef<Path>, has_header: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let data = Self::from_csv_reader(file, has_header)?;
        tracing::debug!(
            path = %path.display(),
            samples = data.len(),
            features = data.n_features(),
            "loaded dataset"
        );
        Ok(data)
    }

    /// Parse CSV from any reader; see [`from_csv_str`](Self::from_csv_str).
    ///
    /// # Errors
    ///
    /// As [`from_csv_str`](Self::from_csv_str), plus [`AfinarError::Io`] if
    /// reading fails.
    pub fn from_csv_reader<R: std::io::Read>(reader: R, has_header: bool) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(has_header)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut width = None;
        let mut values = Vec::new();
        let mut raw_labels = Vec::new();

        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            let line = record.position().map_or(0, |p| p.line() as usize);
            if record.len() < 2 {
                return Err(AfinarError::Parse {
                    line,
                    cause: "expected at least one feature and a label".into(),
                });
            }
            let n_features = record.len() - 1;
            match width {
                None => width = Some(n_features),
                Some(w) if w != n_features => {
                    return Err(AfinarError::Parse {
                        line,
                        cause: format!("expected {w} features, found {n_features}"),
                    });
                }
                Some(_) => {}
            }
            for field in record.iter().take(n_features) {
                let value = field.parse::<f32>().map_err(|_| AfinarError::Parse {
                    line,
                    cause: format!("feature '{field}' is not a number"),
                })?;
                values.push(value);
            }
            raw_labels.push(record[n_features].to_string());
        }

        let n_features = width.ok_or_else(|| AfinarError::data_unavailable("no data rows"))?;
        let labels = encode_labels(&raw_labels);
        let features = Matrix::from_vec(raw_labels.len(), n_features, values)?;
        Self::new(features, labels)
    }
}

fn csv_error(err: csv::Error) -> AfinarError {
    let line = err.position().map_or(0, |p| p.line() as usize);
    let cause = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => AfinarError::Io(io),
        _ => AfinarError::Parse { line, cause },
    }
}

fn encode_labels(raw: &[String]) -> Vec<usize> {
    let numeric: Option<Vec<usize>> = raw.iter().map(|s| s.parse().ok()).collect();
    if let Some(labels) = numeric {
        return labels;
    }
    let mut index: HashMap<&str, usize> = HashMap::new();
    raw.iter()
        .map(|s| {
            let next = index.len();
            *index.entry(s.as_str()).or_insert(next)
        })
        .collect()
}

/// Fixed training and validation partitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSplit {
    /// Rows models are fitted on
    pub train: Dataset,
    /// Rows models are scored on
    pub validation: Dataset,
}

impl DataSplit {
    /// Pair a training set with a validation set.
    #[must_use]
    pub fn new(train: Dataset, validation: Dataset) -> Self {
        Self { train, validation }
    }

    /// Check that both partitions are usable.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::DataUnavailable`] if either partition is empty,
    /// labels do not match rows, or the feature widths differ.
    pub fn validate(&self) -> Result<()> {
        for (name, part) in [("training", &self.train), ("validation", &self.validation)] {
            if part.is_empty() || part.features.is_empty() || part.n_features() == 0 {
                return Err(AfinarError::data_unavailable(format!(
                    "{name} split is empty"
                )));
            }
            if part.features.n_rows() != part.labels.len() {
                return Err(AfinarError::data_unavailable(format!(
                    "{name} split has {} rows but {} labels",
                    part.features.n_rows(),
                    part.labels.len()
                )));
            }
        }
        if self.train.n_features() != self.validation.n_features() {
            return Err(AfinarError::data_unavailable(format!(
                "training split has {} features, validation split has {}",
                self.train.n_features(),
                self.validation.n_features()
            )));
        }
        Ok(())
    }
}

/// Shuffle `data` with `seed` and hold out `ceil(n * test_size)` rows.
///
/// # Errors
///
/// Returns [`AfinarError::InvalidHyperparameter`] unless `0 < test_size < 1`,
/// and [`AfinarError::DataUnavailable`] if either side would be empty.
///
/// # Examples
///
/// ```
/// use afinar::data::{train_test_split, Dataset};
/// use afinar::primitives::Matrix;
///
/// let features = Matrix::from_vec(10, 1, (0..10).map(|i| i as f32).collect()).unwrap();
/// let data = Dataset::new(features, vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1]).unwrap();
///
/// let split = train_test_split(&data, 0.2, 42).unwrap();
/// assert_eq!(split.train.len(), 8);
/// assert_eq!(split.validation.len(), 2);
/// ```
pub fn train_test_split(data: &Dataset, test_size: f64, seed: u64) -> Result<DataSplit> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(AfinarError::invalid_hyperparameter(
            "test_size",
            test_size,
            "(0, 1)",
        ));
    }

    let n_samples = data.len();
    let n_test = (n_samples as f64 * test_size).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(AfinarError::data_unavailable(format!(
            "split would leave an empty partition (n_train={n_train}, n_test={n_test})"
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));
    let (train_idx, test_idx) = indices.split_at(n_train);

    Ok(DataSplit::new(data.subset(train_idx), data.subset(test_idx)))
}

#[cfg(test)]
mod tests;
