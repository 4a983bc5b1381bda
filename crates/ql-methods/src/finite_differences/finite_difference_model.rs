//! Generic finite-difference driver
//! (translates `ql/methods/finitedifferences/finitedifferencemodel.hpp`).
//!
//! Rolls a state vector back in time through a strictly decreasing
//! sequence of times, stepping with any [`Evolver`] and applying an
//! optional [`StepCondition`] at the end of every step.

use ql_core::{ensure, errors::Result, Size, Time};
use ql_math::comparison::{close_enough, DEFAULT_ULPS};
use ql_math::Array;
use tracing::{debug, debug_span, trace};

use super::operator::Evolver;
use super::step_condition::StepCondition;

/// Finite-difference model driving an evolver.
///
/// Corresponds to `QuantLib::FiniteDifferenceModel<Evolver>`.
#[derive(Debug, Clone)]
pub struct FiniteDifferenceModel<E: Evolver> {
    evolver: E,
    dt: Option<Time>,
}

impl<E: Evolver> FiniteDifferenceModel<E> {
    /// Wrap `evolver`.
    pub fn new(evolver: E) -> Self {
        Self { evolver, dt: None }
    }

    /// The wrapped evolver.
    pub fn evolver(&self) -> &E {
        &self.evolver
    }

    /// Roll `a` back through `times` (strictly decreasing).
    ///
    /// For each interval `[tᵢ₊₁, tᵢ]` the evolver steps from `tᵢ`, after
    /// which `condition` (if any) is applied at `tᵢ₊₁`. The step size is
    /// passed to the evolver only when it changes. Fewer than two times
    /// leave `a` untouched.
    ///
    /// # Errors
    /// [`Error::Precondition`](ql_core::Error::Precondition) if `times` is
    /// not strictly decreasing; any evolver failure aborts the rollback.
    /// On error `a` holds the values it had before the call.
    pub fn rollback_over(
        &mut self,
        a: &mut Array,
        times: &[Time],
        condition: Option<&dyn StepCondition>,
    ) -> Result<()> {
        if times.len() < 2 {
            return Ok(());
        }
        for (i, w) in times.windows(2).enumerate() {
            ensure!(
                w[1] < w[0],
                "times must be strictly decreasing: t[{}] = {} is not below t[{i}] = {}",
                i + 1,
                w[1],
                w[0]
            );
        }

        let span = debug_span!("rollback", from = times[0], to = times[times.len() - 1]);
        let _enter = span.enter();
        debug!(steps = times.len() - 1, "starting rollback");

        let mut work = a.clone();
        for w in times.windows(2) {
            let (t, next) = (w[0], w[1]);
            let dt = t - next;
            if !self.dt.is_some_and(|current| close_enough(current, dt, DEFAULT_ULPS)) {
                self.evolver.set_step(dt);
                self.dt = Some(dt);
            }
            self.evolver.step(&mut work, t)?;
            if let Some(c) = condition {
                c.apply_to(&mut work, next);
            }
            trace!(t = next, "step done");
        }

        *a = work;
        debug!("rollback complete");
        Ok(())
    }

    /// Roll `a` back from `from` to `to` in `steps` equal steps.
    ///
    /// # Errors
    /// [`Error::Precondition`](ql_core::Error::Precondition) unless
    /// `from > to` and `steps ≥ 1`; otherwise as
    /// [`rollback_over`](Self::rollback_over).
    pub fn rollback(
        &mut self,
        a: &mut Array,
        from: Time,
        to: Time,
        steps: Size,
        condition: Option<&dyn StepCondition>,
    ) -> Result<()> {
        ensure!(from > to, "cannot roll back from {from} to {to}");
        ensure!(steps > 0, "at least one step required");
        let dt = (from - to) / steps as Time;
        let times: Vec<Time> = (0..=steps)
            .map(|i| if i == steps { to } else { from - i as Time * dt })
            .collect();
        self.rollback_over(a, &times, condition)
    }
}
