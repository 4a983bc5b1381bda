//! # ql-math
//!
//! Mathematical utilities for the evolution engines: the `Array` state
//! vector and `Matrix` newtypes (over nalgebra), the normal distribution
//! (via statrs), Mersenne-Twister random numbers and the Monte Carlo sample
//! accumulator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Dynamically-sized 1D array (the evolved state vector).
pub mod array;

/// Floating-point comparison utilities.
pub mod comparison;

/// Probability distributions.
pub mod distributions;

/// Dynamically-sized 2D matrix.
pub mod matrix;

/// Matrix decompositions.
pub mod matrix_utilities;

/// Random number generators.
pub mod random_numbers;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use array::Array;
pub use comparison::{close, close_enough};
pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use matrix::Matrix;
pub use statistics::SampleAccumulator;
