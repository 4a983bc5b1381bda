//! Crank-Nicolson time stepping
//! (translates `ql/methods/finitedifferences/cranknicolson.hpp`).
//!
//! One step from `t` to `t − Δt` solves
//! `(I + ½Δt·D(t − Δt))·aⁿ = (I − ½Δt·D(t))·aⁿ⁺¹`,
//! i.e. the θ = ½ member of the mixed scheme. Second order in time.

use ql_core::{errors::Result, Real, Time};
use ql_math::Array;
use tracing::warn;

use super::operator::{Evolver, Operator};

const THETA: Real = 0.5;

/// Crank-Nicolson evolver.
///
/// Corresponds to `QuantLib::CrankNicolson<Operator>`.
#[derive(Debug, Clone)]
pub struct CrankNicolson<O: Operator> {
    d: O,
    identity: O,
    explicit_part: O,
    implicit_part: O,
    dt: Time,
}

impl<O: Operator> CrankNicolson<O> {
    /// Create an evolver for the differential operator `d`.
    pub fn new(d: O) -> Self {
        let identity = O::identity(d.size());
        Self {
            explicit_part: identity.clone(),
            implicit_part: identity.clone(),
            identity,
            d,
            dt: 0.0,
        }
    }

    fn rebuild_explicit(&mut self) {
        self.explicit_part =
            self.identity.clone() + self.d.clone() * (-(1.0 - THETA) * self.dt);
    }

    fn rebuild_implicit(&mut self) {
        self.implicit_part = self.identity.clone() + self.d.clone() * (THETA * self.dt);
    }
}

impl<O: Operator> Evolver for CrankNicolson<O> {
    fn set_step(&mut self, dt: Time) {
        self.dt = dt;
        self.rebuild_explicit();
        self.rebuild_implicit();
    }

    fn step(&mut self, a: &mut Array, t: Time) -> Result<()> {
        if self.d.is_time_dependent() {
            self.d.set_time(t);
            self.rebuild_explicit();
        }
        let rhs = self.explicit_part.apply_to(a);

        if self.d.is_time_dependent() {
            self.d.set_time(t - self.dt);
            self.rebuild_implicit();
        }
        match self.implicit_part.solve_for(&rhs) {
            Ok(next) => {
                *a = next;
                Ok(())
            }
            Err(e) => {
                warn!(t, dt = self.dt, error = %e, "Crank-Nicolson solve failed");
                Err(e)
            }
        }
    }
}
