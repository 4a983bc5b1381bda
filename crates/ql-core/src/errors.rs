//! Error types for the evolution engines.
//!
//! A single `thiserror`-derived enum covers precondition failures, numerical
//! failures inside the implicit solves, and the two distinct ways a Monte
//! Carlo query can be premature. The `ensure!` and `fail!` macros
//! short-circuit with the matching variant.

use thiserror::Error;

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (raised by `fail!`).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (raised by `ensure!`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Date-related error.
    #[error("date error: {0}")]
    Date(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A query was issued on an object that was never initialized.
    #[error("{0} has not been initialized")]
    Uninitialized(String),

    /// A linear solve met a singular or ill-conditioned system.
    ///
    /// Deterministic solves are never retried: the whole induction fails.
    #[error("numerical solve failure: {0}")]
    NumericalSolve(String),

    /// A statistic was requested before enough samples were accumulated.
    #[error("empty accumulator: {required} sample(s) required, {available} available")]
    EmptyAccumulator {
        /// Minimum number of samples the statistic needs.
        required: usize,
        /// Number of samples accumulated so far.
        available: usize,
    },
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ql_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ql_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use ql_core::{fail, errors::Error};
/// fn always_err() -> ql_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
