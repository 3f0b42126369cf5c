//! Core compute primitives.
//!
//! Feature data is stored in a dense, row-major [`Matrix`].

mod matrix;

pub use matrix::Matrix;
