//! The linear-operator contract shared by all finite-difference evolvers.
//!
//! An [`Operator`] is a linear transform `D` acting on a discretised state
//! vector. The evolvers only ever build affine combinations of `D` with the
//! identity (`I + Δt·D`, `I − Δt·D`, ...) and either apply or invert them,
//! so the contract is: identity construction, operator algebra, forward
//! application, the implicit solve, and an optional time dependence.
//!
//! Evolvers are generic over the operator type, so the algebra is resolved
//! statically.

use std::ops::{Add, Mul};

use ql_core::{errors::Result, Real, Size, Time};
use ql_math::Array;

/// A linear operator on a fixed-size state vector.
///
/// Laws (checked by property tests for the concrete operators):
/// * `a + identity·0 == a` and `a · 1 == a`;
/// * `(a + b) + c == a + (b + c)` up to rounding;
/// * `(a + b).apply_to(x) == a.apply_to(x) + b.apply_to(x)`.
///
/// Combining operators of different sizes is a contract violation and
/// panics.
pub trait Operator: Clone + Add<Output = Self> + Mul<Real, Output = Self> {
    /// The neutral element of composition, of dimension `size`.
    fn identity(size: Size) -> Self;

    /// Dimension of the state vectors this operator acts on.
    fn size(&self) -> Size;

    /// Whether the coefficients change with time, i.e. whether
    /// [`set_time`](Self::set_time) must be called and any combination
    /// built from this operator rebuilt at every step.
    fn is_time_dependent(&self) -> bool {
        false
    }

    /// Move the operator's coefficients to time `t`.
    ///
    /// No-op for time-independent operators.
    fn set_time(&mut self, _t: Time) {}

    /// Forward application `D·v`.
    fn apply_to(&self, v: &Array) -> Array;

    /// Solve `D·x = rhs` for `x`.
    ///
    /// # Errors
    /// [`Error::NumericalSolve`](ql_core::Error::NumericalSolve) when the
    /// system is singular or too ill-conditioned to solve; callers must not
    /// retry.
    fn solve_for(&self, rhs: &Array) -> Result<Array>;
}

/// A time-marching scheme advancing a state vector by one step of size
/// `Δt` under some [`Operator`].
///
/// Corresponds to the `Evolver` concept of QuantLib's
/// `FiniteDifferenceModel`.
pub trait Evolver {
    /// Set the step size used by subsequent calls to [`step`](Self::step).
    fn set_step(&mut self, dt: Time);

    /// Advance `a` by one step, from `t` to `t − Δt`.
    ///
    /// # Errors
    /// Propagates numerical failures of the underlying operator; `a` may be
    /// left in an unspecified state.
    fn step(&mut self, a: &mut Array, t: Time) -> Result<()>;
}
