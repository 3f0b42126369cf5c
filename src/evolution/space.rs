//! Discrete hyperparameter domains.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Genes;
use crate::error::{AfinarError, Result};

/// A concrete parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl ParamValue {
    /// Get as f64 if numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as i64 if integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v:.6}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

/// How a gene is produced when breeding a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneRole {
    /// Copied from the chosen parent, redrawn with the mutation probability.
    Inherited,
    /// Drawn fresh from the full domain for every child.
    Resampled,
}

/// Ordered set of legal values for one hyperparameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Domain {
    /// Integer-valued domain, e.g. the neighbour count of a kNN model.
    Integer { values: Vec<i64> },
    /// Categorical domain with discrete choices.
    Categorical { choices: Vec<ParamValue> },
}

impl Domain {
    /// Create an integer domain.
    #[must_use]
    pub fn integer<I: IntoIterator<Item = i64>>(values: I) -> Self {
        Self::Integer {
            values: values.into_iter().collect(),
        }
    }

    /// Create a categorical domain.
    #[must_use]
    pub fn categorical<I, V>(choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        Self::Categorical {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of legal values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Integer { values } => values.len(),
            Self::Categorical { choices } => choices.len(),
        }
    }

    /// Whether the domain has no legal value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The legal values in declaration order.
    #[must_use]
    pub fn values(&self) -> Vec<ParamValue> {
        match self {
            Self::Integer { values } => values.iter().copied().map(ParamValue::Int).collect(),
            Self::Categorical { choices } => choices.clone(),
        }
    }

    /// Whether `value` is one of the legal values.
    #[must_use]
    pub fn contains(&self, value: &ParamValue) -> bool {
        match self {
            Self::Integer { values } => value.as_i64().is_some_and(|v| values.contains(&v)),
            Self::Categorical { choices } => choices.contains(value),
        }
    }

    /// Breeding role of genes drawn from this domain.
    #[must_use]
    pub fn role(&self) -> GeneRole {
        match self {
            Self::Integer { .. } => GeneRole::Inherited,
            Self::Categorical { .. } => GeneRole::Resampled,
        }
    }

    /// Draw one value uniformly at random.
    ///
    /// Consumes exactly one `gen_range` draw from `rng`.
    ///
    /// # Panics
    ///
    /// Panics if the domain is empty; [`ParameterSpace::validate`] rejects
    /// such spaces before a search starts.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ParamValue {
        let idx = rng.gen_range(0..self.len());
        match self {
            Self::Integer { values } => ParamValue::Int(values[idx]),
            Self::Categorical { choices } => choices[idx].clone(),
        }
    }

    fn has_duplicates(&self) -> bool {
        let values = self.values();
        values
            .iter()
            .enumerate()
            .any(|(i, v)| values[..i].contains(v))
    }
}

/// One named hyperparameter with its domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Gene name handed to the model factory.
    pub name: String,
    /// Legal values.
    pub domain: Domain,
}

/// The declared, finite domain of every tunable hyperparameter.
///
/// Parameters keep their declaration order; every stochastic draw walks the
/// space in that order, so a fixed seed reproduces a run exactly.
///
/// # Example
///
/// ```
/// use afinar::evolution::{ParameterSpace, ParamValue};
///
/// let space = ParameterSpace::new()
///     .integer("n_neighbors", [3, 5, 7])
///     .categorical("weights", ["uniform", "distance"]);
///
/// assert_eq!(space.len(), 2);
/// let domain = space.domain_of("weights").expect("declared above");
/// assert!(domain.contains(&ParamValue::from("distance")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSpace {
    params: Vec<Parameter>,
}

impl ParameterSpace {
    /// Create an empty space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The kNN space tuned by default: `n_neighbors` in {3, 5, .., 15} and
    /// `weights` in {uniform, distance}.
    #[must_use]
    pub fn knn_default() -> Self {
        Self::new()
            .integer("n_neighbors", [3, 5, 7, 9, 11, 13, 15])
            .categorical("weights", ["uniform", "distance"])
    }

    /// Add an integer parameter. Re-declaring a name replaces its domain.
    #[must_use]
    pub fn integer<I: IntoIterator<Item = i64>>(self, name: &str, values: I) -> Self {
        self.with_param(name, Domain::integer(values))
    }

    /// Add a categorical parameter. Re-declaring a name replaces its domain.
    #[must_use]
    pub fn categorical<I, V>(self, name: &str, choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParamValue>,
    {
        self.with_param(name, Domain::categorical(choices))
    }

    /// Add a raw domain.
    #[must_use]
    pub fn with_param(mut self, name: &str, domain: Domain) -> Self {
        if let Some(existing) = self.params.iter_mut().find(|p| p.name == name) {
            existing.domain = domain;
        } else {
            self.params.push(Parameter {
                name: name.to_string(),
                domain,
            });
        }
        self
    }

    /// Number of parameters in the space.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if space is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// Ordered set of legal values for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::UnknownParameter`] if `name` is not declared.
    pub fn domain_of(&self, name: &str) -> Result<&Domain> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.domain)
            .ok_or_else(|| AfinarError::UnknownParameter {
                name: name.to_string(),
            })
    }

    /// Draw one value for `name` uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::UnknownParameter`] if `name` is not declared,
    /// or [`AfinarError::InvalidSpace`] if its domain is empty.
    pub fn sample<R: Rng + ?Sized>(&self, name: &str, rng: &mut R) -> Result<ParamValue> {
        let domain = self.domain_of(name)?;
        if domain.is_empty() {
            return Err(AfinarError::invalid_space(format!(
                "parameter '{name}' has an empty domain"
            )));
        }
        Ok(domain.sample(rng))
    }

    /// Draw a full gene set, one value per parameter in declaration order.
    ///
    /// # Panics
    ///
    /// Panics if any domain is empty; call [`validate`](Self::validate) first.
    pub fn sample_genes<R: Rng + ?Sized>(&self, rng: &mut R) -> Genes {
        self.params
            .iter()
            .map(|p| (p.name.clone(), p.domain.sample(rng)))
            .collect()
    }

    /// Whether `genes` assigns every declared parameter a legal value and
    /// nothing else.
    #[must_use]
    pub fn contains(&self, genes: &Genes) -> bool {
        genes.len() == self.params.len()
            && self.params.iter().all(|p| {
                genes
                    .get(&p.name)
                    .is_some_and(|value| p.domain.contains(value))
            })
    }

    /// Check that the space can be searched.
    ///
    /// # Errors
    ///
    /// Returns [`AfinarError::InvalidSpace`] if the space has no parameters,
    /// repeats a name, or declares an empty or repetitive domain.
    pub fn validate(&self) -> Result<()> {
        if self.params.is_empty() {
            return Err(AfinarError::invalid_space("no parameters declared"));
        }
        for (i, param) in self.params.iter().enumerate() {
            if self.params[..i].iter().any(|p| p.name == param.name) {
                return Err(AfinarError::invalid_space(format!(
                    "parameter '{}' is declared twice",
                    param.name
                )));
            }
            if param.domain.is_empty() {
                return Err(AfinarError::invalid_space(format!(
                    "parameter '{}' has an empty domain",
                    param.name
                )));
            }
            if param.domain.has_duplicates() {
                return Err(AfinarError::invalid_space(format!(
                    "parameter '{}' lists a value more than once",
                    param.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "space_tests.rs"]
mod tests;
