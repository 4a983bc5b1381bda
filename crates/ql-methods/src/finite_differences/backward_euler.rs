//! Backward (implicit) Euler time stepping
//! (translates `ql/methods/finitedifferences/backwardeuler.hpp`).
//!
//! One step from `t` to `t − Δt` solves `(I + Δt·D)·aⁿ = aⁿ⁺¹`. The
//! implicit part `I + Δt·D` is built by [`set_step`](Evolver::set_step) and
//! reused by every step; it is rebuilt inside [`step`](Evolver::step) only
//! when `D` is time-dependent.

use ql_core::{errors::Result, Time};
use ql_math::Array;
use tracing::warn;

use super::operator::{Evolver, Operator};

/// Fully implicit Euler evolver.
///
/// Corresponds to `QuantLib::BackwardEuler<Operator>`.
#[derive(Debug, Clone)]
pub struct BackwardEuler<O: Operator> {
    d: O,
    identity: O,
    implicit_part: O,
    dt: Time,
}

impl<O: Operator> BackwardEuler<O> {
    /// Create an evolver for the differential operator `d`.
    ///
    /// The step size starts at zero; call [`Evolver::set_step`] before
    /// stepping.
    pub fn new(d: O) -> Self {
        let identity = O::identity(d.size());
        Self {
            implicit_part: identity.clone(),
            identity,
            d,
            dt: 0.0,
        }
    }

    /// The current step size.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// The differential operator `D`.
    pub fn operator(&self) -> &O {
        &self.d
    }

    /// The implicit part `I + Δt·D` currently in use.
    pub fn implicit_part(&self) -> &O {
        &self.implicit_part
    }

    fn rebuild(&mut self) {
        self.implicit_part = self.identity.clone() + self.d.clone() * self.dt;
    }
}

impl<O: Operator> Evolver for BackwardEuler<O> {
    fn set_step(&mut self, dt: Time) {
        self.dt = dt;
        self.rebuild();
    }

    fn step(&mut self, a: &mut Array, t: Time) -> Result<()> {
        if self.d.is_time_dependent() {
            self.d.set_time(t);
            self.rebuild();
        }
        match self.implicit_part.solve_for(a) {
            Ok(next) => {
                *a = next;
                Ok(())
            }
            Err(e) => {
                warn!(t, dt = self.dt, error = %e, "backward Euler solve failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::finite_differences::TridiagonalOperator;
    use ql_core::{errors::Error, Real, Size};
    use std::cell::Cell;
    use std::ops::{Add, Mul};
    use std::rc::Rc;

    /// Diagonal operator recording how often it was combined by `+` and how
    /// often (and at which times) `set_time` was called.
    #[derive(Debug, Clone)]
    pub(crate) struct CountingDiagonal {
        pub(crate) diag: Vec<Real>,
        pub(crate) time_dependent: bool,
        pub(crate) additions: Rc<Cell<usize>>,
        pub(crate) times: Rc<std::cell::RefCell<Vec<Time>>>,
    }

    impl CountingDiagonal {
        pub(crate) fn new(diag: Vec<Real>, time_dependent: bool) -> Self {
            Self {
                diag,
                time_dependent,
                additions: Rc::new(Cell::new(0)),
                times: Rc::default(),
            }
        }
    }

    impl Add for CountingDiagonal {
        type Output = Self;
        fn add(self, rhs: Self) -> Self {
            self.additions.set(self.additions.get() + 1);
            let diag = self.diag.iter().zip(&rhs.diag).map(|(a, b)| a + b).collect();
            Self {
                diag,
                time_dependent: false,
                additions: self.additions,
                times: self.times,
            }
        }
    }

    impl Mul<Real> for CountingDiagonal {
        type Output = Self;
        fn mul(self, s: Real) -> Self {
            Self {
                diag: self.diag.iter().map(|d| d * s).collect(),
                time_dependent: false,
                ..self
            }
        }
    }

    impl Operator for CountingDiagonal {
        fn identity(size: Size) -> Self {
            Self::new(vec![1.0; size], false)
        }
        fn size(&self) -> Size {
            self.diag.len()
        }
        fn is_time_dependent(&self) -> bool {
            self.time_dependent
        }
        fn set_time(&mut self, t: Time) {
            self.times.borrow_mut().push(t);
        }
        fn apply_to(&self, v: &Array) -> Array {
            Array::from_fn(v.size(), |i| self.diag[i] * v[i])
        }
        fn solve_for(&self, rhs: &Array) -> Result<Array> {
            if self.diag.iter().any(|d| *d == 0.0) {
                return Err(Error::NumericalSolve("zero on the diagonal".into()));
            }
            Ok(Array::from_fn(rhs.size(), |i| rhs[i] / self.diag[i]))
        }
    }

    #[test]
    fn diagonal_operator_has_closed_form_step() {
        let d = vec![0.5, 1.0, 2.0, 4.0];
        let x0 = [1.0, -2.0, 3.0, 0.25];
        let dt = 0.1;
        let mut evolver = BackwardEuler::new(CountingDiagonal::new(d.clone(), false));
        evolver.set_step(dt);

        let mut a = Array::from_slice(&x0);
        evolver.step(&mut a, 1.0).unwrap();
        for i in 0..4 {
            let expected = x0[i] / (1.0 + dt * d[i]);
            assert!((a[i] - expected).abs() < 1e-15);
        }
    }

    #[test]
    fn time_independent_operator_is_never_rebuilt() {
        let op = CountingDiagonal::new(vec![1.0; 3], false);
        let additions = op.additions.clone();
        let times = op.times.clone();
        let mut evolver = BackwardEuler::new(op);
        evolver.set_step(0.01);
        assert_eq!(additions.get(), 1);

        let mut a = Array::from_element(3, 1.0);
        for k in 0..50 {
            evolver.step(&mut a, 1.0 - k as Real * 0.01).unwrap();
        }
        assert_eq!(additions.get(), 1);
        assert!(times.borrow().is_empty());
    }

    #[test]
    fn time_dependent_operator_is_rebuilt_at_the_step_time() {
        let op = CountingDiagonal::new(vec![1.0; 3], true);
        let additions = op.additions.clone();
        let times = op.times.clone();
        let mut evolver = BackwardEuler::new(op);
        evolver.set_step(0.25);

        let mut a = Array::from_element(3, 1.0);
        for t in [1.0, 0.75, 0.5] {
            evolver.step(&mut a, t).unwrap();
        }
        assert_eq!(additions.get(), 4);
        assert_eq!(*times.borrow(), vec![1.0, 0.75, 0.5]);
    }

    #[test]
    fn singular_implicit_part_is_reported() {
        // I + 1·(−I) = 0
        let mut evolver = BackwardEuler::new(TridiagonalOperator::identity(3) * -1.0);
        evolver.set_step(1.0);
        let mut a = Array::from_element(3, 1.0);
        assert!(matches!(
            evolver.step(&mut a, 1.0),
            Err(Error::NumericalSolve(_))
        ));
    }
}
