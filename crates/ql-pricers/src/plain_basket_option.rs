//! European option on a basket of correlated assets, priced by multi-factor
//! Monte Carlo (translates `ql/pricers/mcbasket.hpp`).

use std::sync::Arc;

use ql_core::{ensure, errors::Result, Rate, Real, Time, Volatility};
use ql_math::Matrix;
use ql_methods::monte_carlo::{
    BasketPathPricer, BasketType, McSettings, MultiFactorMonteCarlo, MultiFactorPricer,
    OptionType, PricerPhase,
};
use ql_methods::TimeGrid;
use ql_processes::{
    GeometricBrownianMotionProcess, StochasticProcess, StochasticProcess1D,
    StochasticProcessArray,
};
use tracing::debug;

/// Contract and market inputs of a basket option.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketInputs {
    /// Call or put on the aggregated underlying.
    pub option_type: OptionType,
    /// How the terminal asset values are aggregated.
    pub basket_type: BasketType,
    /// Spot prices of the assets.
    pub underlyings: Vec<Real>,
    /// Strike.
    pub strike: Real,
    /// Continuous dividend yield of each asset.
    pub dividend_yields: Vec<Rate>,
    /// Continuous risk-free rate.
    pub risk_free_rate: Rate,
    /// Volatility of each asset.
    pub volatilities: Vec<Volatility>,
    /// Correlation between the asset returns.
    pub correlation: Matrix,
    /// Time to maturity in years.
    pub residual_time: Time,
}

impl BasketInputs {
    fn validate(&self) -> Result<()> {
        let n = self.underlyings.len();
        ensure!(n > 0, "basket must contain at least one asset");
        ensure!(
            self.dividend_yields.len() == n && self.volatilities.len() == n,
            "{n} underlyings but {} dividend yields and {} volatilities",
            self.dividend_yields.len(),
            self.volatilities.len()
        );
        ensure!(self.strike >= 0.0, "strike must be non-negative, got {}", self.strike);
        ensure!(
            self.residual_time > 0.0,
            "residual time must be positive, got {}",
            self.residual_time
        );
        Ok(())
    }
}

/// Monte Carlo basket option.
///
/// Corresponds to `QuantLib::McBasket` / `PlainBasketOption`.
#[derive(Debug, Clone)]
pub struct PlainBasketOption {
    pricer: MultiFactorPricer<BasketPathPricer>,
}

impl PlainBasketOption {
    /// Set up the simulation. Each asset follows a geometric Brownian
    /// motion with drift `r − qᵢ`; nothing is sampled until
    /// [`value`](Self::value).
    ///
    /// # Errors
    /// [`Error::Precondition`](ql_core::Error::Precondition) for
    /// inconsistent inputs or settings, or a correlation matrix that is
    /// not a valid correlation.
    pub fn new(inputs: &BasketInputs, settings: &McSettings) -> Result<Self> {
        inputs.validate()?;
        settings.validate()?;

        let processes = inputs
            .underlyings
            .iter()
            .zip(&inputs.dividend_yields)
            .zip(&inputs.volatilities)
            .map(|((&s0, &q), &sigma)| -> Result<Arc<dyn StochasticProcess1D>> {
                Ok(Arc::new(GeometricBrownianMotionProcess::new(
                    s0,
                    inputs.risk_free_rate - q,
                    sigma,
                )?))
            })
            .collect::<Result<Vec<_>>>()?;
        let process: Arc<dyn StochasticProcess> =
            Arc::new(StochasticProcessArray::new(processes, &inputs.correlation)?);

        let discount = (-inputs.risk_free_rate * inputs.residual_time).exp();
        let path_pricer = BasketPathPricer::new(
            inputs.option_type,
            inputs.basket_type,
            inputs.strike,
            discount,
        );
        let grid = TimeGrid::uniform(inputs.residual_time, settings.time_steps())?;
        let engine = MultiFactorMonteCarlo::new(process, grid, path_pricer)
            .with_antithetic(settings.antithetic())
            .with_batch_size(settings.batch_size());

        debug!(
            assets = inputs.underlyings.len(),
            samples = settings.samples(),
            antithetic = settings.antithetic(),
            "basket option set up"
        );
        Ok(Self {
            pricer: MultiFactorPricer::new(engine, settings.samples(), settings.seed())?,
        })
    }

    /// Monte Carlo price; the first call runs the simulation.
    pub fn value(&mut self) -> Result<Real> {
        self.pricer.value()
    }

    /// Standard error of the price.
    ///
    /// # Errors
    /// [`Error::EmptyAccumulator`](ql_core::Error::EmptyAccumulator) until
    /// [`value`](Self::value) has run.
    pub fn error_estimate(&self) -> Result<Real> {
        self.pricer.error_estimate()
    }

    /// Whether the simulation has run.
    pub fn is_sampled(&self) -> bool {
        self.pricer.phase() == PricerPhase::Sampled
    }
}
