//! European option priced by finite differences, with optional discrete
//! dividends (translates `ql/pricers/fdeuropean.hpp` and
//! `dividendeuropeanoption.hpp`).

use ql_core::{errors::Result, Real};
use ql_methods::finite_differences::FdSettings;

use crate::fd_vanilla::{Dividend, FdProblem, VanillaInputs};

/// Finite-difference European option.
#[derive(Debug, Clone)]
pub struct FdEuropeanOption {
    inputs: VanillaInputs,
    problem: FdProblem,
}

impl FdEuropeanOption {
    /// European option without discrete dividends.
    pub fn new(inputs: VanillaInputs, settings: &FdSettings) -> Result<Self> {
        Self::with_dividends(inputs, &[], settings)
    }

    /// European option paying the given cash dividends.
    pub fn with_dividends(
        inputs: VanillaInputs,
        dividends: &[Dividend],
        settings: &FdSettings,
    ) -> Result<Self> {
        let problem = FdProblem::new(&inputs, dividends, settings)?;
        Ok(Self { inputs, problem })
    }

    /// Present value at the input spot.
    pub fn value(&self) -> Result<Real> {
        let mut values = self.problem.intrinsic_values(&self.inputs);
        self.problem.rollback(&mut values, None)?;
        Ok(self.problem.value_at(&values, self.inputs.underlying))
    }
}
