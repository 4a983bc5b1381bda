//! Shared machinery of the finite-difference vanilla pricers: contract
//! inputs, discrete dividends, and the segment-by-segment rollback on a
//! log-spot grid (translates the `BSMNumericalOption` / `DividendOption`
//! pricer bases).

use ql_core::{ensure, errors::Result, Rate, Real, Time, Volatility};
use ql_math::Array;
use ql_methods::finite_differences::{
    BackwardEuler, BsmOperator, CrankNicolson, Evolver, FdSettings, FdmScheme,
    FiniteDifferenceModel, ForwardEuler, LogGrid, StepCondition, TridiagonalOperator,
};
use ql_methods::monte_carlo::OptionType;
use ql_methods::TimeGrid;
use ql_time::{Date, DayCounter};
use tracing::debug;

/// Contract and market inputs of a single-asset option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaInputs {
    /// Call or put.
    pub option_type: OptionType,
    /// Spot price of the underlying.
    pub underlying: Real,
    /// Strike.
    pub strike: Real,
    /// Continuous dividend yield.
    pub dividend_yield: Rate,
    /// Continuous risk-free rate.
    pub risk_free_rate: Rate,
    /// Time to maturity in years.
    pub residual_time: Time,
    /// Black-Scholes volatility.
    pub volatility: Volatility,
}

impl VanillaInputs {
    /// Checks that the inputs describe a priceable contract.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.underlying > 0.0,
            "underlying must be positive, got {}",
            self.underlying
        );
        ensure!(self.strike > 0.0, "strike must be positive, got {}", self.strike);
        ensure!(
            self.residual_time > 0.0,
            "residual time must be positive, got {}",
            self.residual_time
        );
        ensure!(
            self.volatility > 0.0,
            "volatility must be positive, got {}",
            self.volatility
        );
        Ok(())
    }
}

/// A discrete cash dividend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dividend {
    /// Ex-dividend time in years from the valuation date.
    pub ex_time: Time,
    /// Cash amount.
    pub amount: Real,
}

impl Dividend {
    /// Dividend going ex at `ex_time`.
    pub fn new(ex_time: Time, amount: Real) -> Self {
        Self { ex_time, amount }
    }

    /// Dividend going ex on `ex_date`, its time measured from `reference`
    /// with `day_counter`.
    pub fn on_date(
        day_counter: &dyn DayCounter,
        reference: Date,
        ex_date: Date,
        amount: Real,
    ) -> Self {
        Self::new(day_counter.year_fraction(reference, ex_date), amount)
    }
}

/// Sort dividends by ex-time and check they fall strictly inside the life
/// of the contract.
pub(crate) fn sorted_dividends(dividends: &[Dividend], residual_time: Time) -> Result<Vec<Dividend>> {
    let mut sorted = dividends.to_vec();
    sorted.sort_by(|a, b| a.ex_time.total_cmp(&b.ex_time));
    for d in &sorted {
        ensure!(
            d.ex_time > 0.0 && d.ex_time < residual_time,
            "ex-dividend time {} outside (0, {residual_time})",
            d.ex_time
        );
        ensure!(
            d.amount.is_finite() && d.amount >= 0.0,
            "dividend amount must be non-negative, got {}",
            d.amount
        );
    }
    for w in sorted.windows(2) {
        ensure!(
            w[0].ex_time < w[1].ex_time,
            "two dividends go ex at time {}",
            w[0].ex_time
        );
    }
    Ok(sorted)
}

/// The discretised pricing problem: spatial grid, operator, time grid.
#[derive(Debug, Clone)]
pub(crate) struct FdProblem {
    pub(crate) grid: LogGrid,
    pub(crate) operator: TridiagonalOperator,
    pub(crate) time_grid: TimeGrid,
    pub(crate) scheme: FdmScheme,
    dividends: Vec<Dividend>,
}

impl FdProblem {
    pub(crate) fn new(
        inputs: &VanillaInputs,
        dividends: &[Dividend],
        settings: &FdSettings,
    ) -> Result<Self> {
        inputs.validate()?;
        settings.validate()?;
        let dividends = sorted_dividends(dividends, inputs.residual_time)?;

        let grid = LogGrid::centered(
            inputs.underlying,
            inputs.volatility,
            inputs.residual_time,
            settings.grid_width(),
            settings.grid_points(),
        )?;
        let operator = BsmOperator::build(
            &grid,
            inputs.risk_free_rate,
            inputs.dividend_yield,
            inputs.volatility,
        );
        let mut mandatory: Vec<Time> = dividends.iter().map(|d| d.ex_time).collect();
        mandatory.push(inputs.residual_time);
        let time_grid = TimeGrid::with_mandatory_times(&mandatory, settings.time_steps())?;

        Ok(Self {
            grid,
            operator,
            time_grid,
            scheme: settings.scheme(),
            dividends,
        })
    }

    /// Terminal payoff on the grid nodes.
    pub(crate) fn intrinsic_values(&self, inputs: &VanillaInputs) -> Array {
        Array::from_vec(
            self.grid
                .spots()
                .into_iter()
                .map(|s| inputs.option_type.intrinsic(s, inputs.strike))
                .collect(),
        )
    }

    /// Roll `values` back from maturity to today.
    pub(crate) fn rollback(
        &self,
        values: &mut Array,
        condition: Option<&dyn StepCondition>,
    ) -> Result<()> {
        debug!(
            scheme = ?self.scheme,
            points = self.grid.size(),
            steps = self.time_grid.steps(),
            dividends = self.dividends.len(),
            "finite-difference rollback"
        );
        let d = self.operator.clone();
        match self.scheme {
            FdmScheme::Explicit => self.rollback_with(ForwardEuler::new(d), values, condition),
            FdmScheme::Implicit => self.rollback_with(BackwardEuler::new(d), values, condition),
            FdmScheme::CrankNicolson => {
                self.rollback_with(CrankNicolson::new(d), values, condition)
            }
        }
    }

    fn rollback_with<E: Evolver>(
        &self,
        evolver: E,
        values: &mut Array,
        condition: Option<&dyn StepCondition>,
    ) -> Result<()> {
        let mut model = FiniteDifferenceModel::new(evolver);
        let mut work = values.clone();
        let mut end = self.time_grid.end();
        for dividend in self.dividends.iter().rev() {
            let times = self.time_grid.backward_times(end, dividend.ex_time)?;
            model.rollback_over(&mut work, &times, condition)?;
            self.apply_dividend(&mut work, dividend.amount);
            if let Some(c) = condition {
                c.apply_to(&mut work, dividend.ex_time);
            }
            end = dividend.ex_time;
        }
        let times = self.time_grid.backward_times(end, 0.0)?;
        model.rollback_over(&mut work, &times, condition)?;
        *values = work;
        Ok(())
    }

    /// Across an ex-date the spot drops by `amount`: `V⁻(S) = V⁺(S − D)`.
    fn apply_dividend(&self, values: &mut Array, amount: Real) {
        if amount == 0.0 {
            return;
        }
        let after = values.as_slice().to_vec();
        for i in 0..self.grid.size() {
            values[i] = self.grid.interpolate(&after, self.grid.spot(i) - amount);
        }
    }

    /// Value at today's spot.
    pub(crate) fn value_at(&self, values: &Array, spot: Real) -> Real {
        self.grid.interpolate(values.as_slice(), spot)
    }
}
