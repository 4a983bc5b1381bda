//! Tridiagonal operator with Thomas-algorithm solve
//! (translates `ql/methods/finitedifferences/tridiagonaloperator.hpp`).
//!
//! The bands are stored as three vectors of length `n`: `lower[0]` and
//! `upper[n − 1]` are unused. An optional [`TimeSetter`] makes the operator
//! time-dependent; results of operator algebra are plain, time-independent
//! snapshots of the coefficients at the time they were built.

use std::fmt;
use std::ops::{Add, Mul};
use std::sync::Arc;

use ql_core::{
    ensure,
    errors::{Error, Result},
    Real, Size, Time,
};
use ql_math::Array;

use super::operator::Operator;

/// Pivots below this magnitude are treated as singular.
const PIVOT_TOLERANCE: Real = 1e-14;

/// Rewrites the coefficients of a [`TridiagonalOperator`] for a given time.
///
/// Corresponds to `QuantLib::TridiagonalOperator::TimeSetter`.
pub trait TimeSetter: fmt::Debug + Send + Sync {
    /// Set the coefficients of `op` to their values at time `t`.
    fn set_time(&self, t: Time, op: &mut TridiagonalOperator);
}

/// A tridiagonal matrix operator.
///
/// Corresponds to `QuantLib::TridiagonalOperator`.
#[derive(Debug, Clone)]
pub struct TridiagonalOperator {
    /// Lower diagonal (index 0 unused: starts from row 1).
    pub lower: Vec<Real>,
    /// Main diagonal.
    pub diag: Vec<Real>,
    /// Upper diagonal (last index unused: ends at row n−2).
    pub upper: Vec<Real>,
    time_setter: Option<Arc<dyn TimeSetter>>,
}

impl TridiagonalOperator {
    /// Create a zero tridiagonal operator of size `n`.
    pub fn new(n: Size) -> Self {
        Self {
            lower: vec![0.0; n],
            diag: vec![0.0; n],
            upper: vec![0.0; n],
            time_setter: None,
        }
    }

    /// Attach a time setter, making the operator time-dependent.
    pub fn with_time_setter(mut self, setter: Arc<dyn TimeSetter>) -> Self {
        self.time_setter = Some(setter);
        self
    }

    /// Set the first row: `diag` on the diagonal, `upper` to its right.
    pub fn set_first_row(&mut self, diag: Real, upper: Real) {
        self.diag[0] = diag;
        self.upper[0] = upper;
    }

    /// Set row `i` (strictly inside the matrix).
    pub fn set_mid_row(&mut self, i: Size, lower: Real, diag: Real, upper: Real) {
        assert!(
            i >= 1 && i + 1 < self.size(),
            "row {i} is not an interior row of a {0}×{0} operator",
            self.size()
        );
        self.lower[i] = lower;
        self.diag[i] = diag;
        self.upper[i] = upper;
    }

    /// Set every interior row to the same coefficients.
    pub fn set_mid_rows(&mut self, lower: Real, diag: Real, upper: Real) {
        for i in 1..self.size().saturating_sub(1) {
            self.lower[i] = lower;
            self.diag[i] = diag;
            self.upper[i] = upper;
        }
    }

    /// Set the last row: `lower` to the left of the diagonal, `diag` on it.
    pub fn set_last_row(&mut self, lower: Real, diag: Real) {
        let n = self.size();
        self.lower[n - 1] = lower;
        self.diag[n - 1] = diag;
    }

    fn combine(&self, rhs: &TridiagonalOperator, f: impl Fn(Real, Real) -> Real) -> Self {
        assert_eq!(
            self.size(),
            rhs.size(),
            "cannot combine operators of different sizes"
        );
        let zip = |a: &[Real], b: &[Real]| a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect();
        Self {
            lower: zip(&self.lower, &rhs.lower),
            diag: zip(&self.diag, &rhs.diag),
            upper: zip(&self.upper, &rhs.upper),
            time_setter: None,
        }
    }
}

impl Operator for TridiagonalOperator {
    fn identity(size: Size) -> Self {
        let mut op = Self::new(size);
        op.diag.iter_mut().for_each(|d| *d = 1.0);
        op
    }

    fn size(&self) -> Size {
        self.diag.len()
    }

    fn is_time_dependent(&self) -> bool {
        self.time_setter.is_some()
    }

    fn set_time(&mut self, t: Time) {
        if let Some(setter) = self.time_setter.clone() {
            setter.set_time(t, self);
        }
    }

    fn apply_to(&self, x: &Array) -> Array {
        let n = self.size();
        assert_eq!(x.size(), n, "vector size does not match operator size");
        Array::from_fn(n, |i| {
            let mut y = self.diag[i] * x[i];
            if i > 0 {
                y += self.lower[i] * x[i - 1];
            }
            if i + 1 < n {
                y += self.upper[i] * x[i + 1];
            }
            y
        })
    }

    /// Thomas algorithm (LU decomposition for tridiagonal systems).
    fn solve_for(&self, rhs: &Array) -> Result<Array> {
        let n = self.size();
        ensure!(
            rhs.size() == n,
            "rhs size ({}) does not match operator size ({n})",
            rhs.size()
        );
        if n == 0 {
            return Ok(Array::zeros(0));
        }

        let singular = |row: Size, pivot: Real| {
            Error::NumericalSolve(format!(
                "singular tridiagonal system: pivot {pivot:e} at row {row}"
            ))
        };

        // Forward sweep
        let mut c_prime = vec![0.0; n];
        let mut d_prime = vec![0.0; n];

        if self.diag[0].abs() <= PIVOT_TOLERANCE || !self.diag[0].is_finite() {
            return Err(singular(0, self.diag[0]));
        }
        c_prime[0] = self.upper[0] / self.diag[0];
        d_prime[0] = rhs[0] / self.diag[0];

        for i in 1..n {
            let m = self.diag[i] - self.lower[i] * c_prime[i - 1];
            if m.abs() <= PIVOT_TOLERANCE || !m.is_finite() {
                return Err(singular(i, m));
            }
            if i < n - 1 {
                c_prime[i] = self.upper[i] / m;
            }
            d_prime[i] = (rhs[i] - self.lower[i] * d_prime[i - 1]) / m;
        }

        // Back substitution
        let mut x = Array::zeros(n);
        x[n - 1] = d_prime[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = d_prime[i] - c_prime[i] * x[i + 1];
        }

        if x.iter().any(|v| !v.is_finite()) {
            return Err(Error::NumericalSolve(
                "tridiagonal solve produced non-finite values".into(),
            ));
        }
        Ok(x)
    }
}

// ── Operator algebra ──────────────────────────────────────────────────────────

impl Add for TridiagonalOperator {
    type Output = TridiagonalOperator;
    fn add(self, rhs: TridiagonalOperator) -> TridiagonalOperator {
        self.combine(&rhs, |a, b| a + b)
    }
}

impl Add for &TridiagonalOperator {
    type Output = TridiagonalOperator;
    fn add(self, rhs: &TridiagonalOperator) -> TridiagonalOperator {
        self.combine(rhs, |a, b| a + b)
    }
}

impl Mul<Real> for TridiagonalOperator {
    type Output = TridiagonalOperator;
    fn mul(self, factor: Real) -> TridiagonalOperator {
        let scale = |v: Vec<Real>| v.into_iter().map(|x| x * factor).collect();
        TridiagonalOperator {
            lower: scale(self.lower),
            diag: scale(self.diag),
            upper: scale(self.upper),
            time_setter: None,
        }
    }
}

impl Mul<TridiagonalOperator> for Real {
    type Output = TridiagonalOperator;
    fn mul(self, op: TridiagonalOperator) -> TridiagonalOperator {
        op * self
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
