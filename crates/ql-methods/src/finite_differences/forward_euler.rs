//! Forward (explicit) Euler time stepping
//! (translates `ql/methods/finitedifferences/forwardeuler.hpp`).
//!
//! One step from `t` to `t − Δt` applies `aⁿ = (I − Δt·D)·aⁿ⁺¹`. Only
//! conditionally stable: the step must be small compared with `dx²/σ²`.

use ql_core::{errors::Result, Time};
use ql_math::Array;

use super::operator::{Evolver, Operator};

/// Explicit Euler evolver.
///
/// Corresponds to `QuantLib::ForwardEuler<Operator>`.
#[derive(Debug, Clone)]
pub struct ForwardEuler<O: Operator> {
    d: O,
    identity: O,
    explicit_part: O,
    dt: Time,
}

impl<O: Operator> ForwardEuler<O> {
    /// Create an evolver for the differential operator `d`.
    pub fn new(d: O) -> Self {
        let identity = O::identity(d.size());
        Self {
            explicit_part: identity.clone(),
            identity,
            d,
            dt: 0.0,
        }
    }

    fn rebuild(&mut self) {
        self.explicit_part = self.identity.clone() + self.d.clone() * (-self.dt);
    }
}

impl<O: Operator> Evolver for ForwardEuler<O> {
    fn set_step(&mut self, dt: Time) {
        self.dt = dt;
        self.rebuild();
    }

    fn step(&mut self, a: &mut Array, t: Time) -> Result<()> {
        if self.d.is_time_dependent() {
            self.d.set_time(t);
            self.rebuild();
        }
        *a = self.explicit_part.apply_to(a);
        Ok(())
    }
}
