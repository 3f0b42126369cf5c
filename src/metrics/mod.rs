//! Evaluation metrics for fitted models.
//!
//! The search scores candidates with [`accuracy`], the fraction of
//! validation labels predicted correctly.

pub mod classification;

pub use classification::accuracy;
