//! Shout option with discrete cash dividends, priced by finite differences
//! (translates `ql/pricers/dividendshoutoption.hpp`).
//!
//! At any time before maturity the holder may shout once, locking in the
//! current intrinsic value, paid at maturity. On the grid this is the
//! [`ShoutCondition`] `V ← max(V, e^{−r(T−t)}·intrinsic)` applied after
//! every step. Across each ex-dividend date the spot drops by the cash
//! amount, `V(t⁻, S) = V(t⁺, S − D)`; the shout condition is applied on
//! both sides of the drop.

use ql_core::{errors::Result, Real};
use ql_methods::finite_differences::{FdSettings, ShoutCondition};

use crate::fd_vanilla::{Dividend, FdProblem, VanillaInputs};

/// Finite-difference shout option with discrete dividends.
///
/// Corresponds to `QuantLib::DividendShoutOption`.
#[derive(Debug, Clone)]
pub struct DividendShoutOption {
    inputs: VanillaInputs,
    problem: FdProblem,
}

impl DividendShoutOption {
    /// Shout option paying `dividends`.
    ///
    /// # Errors
    /// [`Error::Precondition`](ql_core::Error::Precondition) for invalid
    /// inputs or settings, or for a dividend outside the life of the option.
    pub fn new(inputs: VanillaInputs, dividends: &[Dividend], settings: &FdSettings) -> Result<Self> {
        let problem = FdProblem::new(&inputs, dividends, settings)?;
        Ok(Self { inputs, problem })
    }

    /// Present value at the input spot.
    ///
    /// # Errors
    /// Propagates numerical failures of the rollback.
    pub fn value(&self) -> Result<Real> {
        let intrinsic = self.problem.intrinsic_values(&self.inputs);
        let shout = ShoutCondition::discounted(
            intrinsic.clone(),
            self.inputs.residual_time,
            self.inputs.risk_free_rate,
        );
        let mut values = intrinsic;
        self.problem.rollback(&mut values, Some(&shout))?;
        Ok(self.problem.value_at(&values, self.inputs.underlying))
    }
}
