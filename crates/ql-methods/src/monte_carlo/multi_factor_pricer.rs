//! Base pricer for multi-factor Monte Carlo valuations
//! (translates `ql/pricers/multifactorpricer.hpp`).
//!
//! A pricer is built once with a target sample count and a seed. The first
//! [`value`](MultiFactorPricer::value) query runs the simulation; later
//! queries, and [`error_estimate`](MultiFactorPricer::error_estimate), read
//! the same accumulated samples.

use ql_core::{
    errors::{Error, Result},
    Real, Size,
};
use ql_math::SampleAccumulator;
use tracing::debug;

use super::multi_factor_monte_carlo::MultiFactorMonteCarlo;
use super::path_pricer::MultiPathPricer;

/// Lifecycle of a [`MultiFactorPricer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricerPhase {
    /// Default-constructed; every query fails.
    Uninitialized,
    /// Configured, nothing sampled yet.
    Initialized,
    /// Samples drawn; queries are answered from the accumulator.
    Sampled,
}

/// Multi-factor Monte Carlo pricer.
///
/// Corresponds to `QuantLib::MultiFactorPricer`.
#[derive(Debug, Clone)]
pub struct MultiFactorPricer<P> {
    engine: Option<MultiFactorMonteCarlo<P>>,
    samples: Size,
    seed: u64,
    accumulator: SampleAccumulator,
}

impl<P> Default for MultiFactorPricer<P> {
    fn default() -> Self {
        Self {
            engine: None,
            samples: 0,
            seed: 0,
            accumulator: SampleAccumulator::new(),
        }
    }
}

impl<P: MultiPathPricer> MultiFactorPricer<P> {
    /// A pricer drawing `samples` samples from `engine` with `seed`.
    ///
    /// # Errors
    /// [`Error::Precondition`] if `samples` is zero.
    pub fn new(engine: MultiFactorMonteCarlo<P>, samples: Size, seed: u64) -> Result<Self> {
        ql_core::ensure!(samples > 0, "at least one sample required");
        Ok(Self {
            engine: Some(engine),
            samples,
            seed,
            accumulator: SampleAccumulator::new(),
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PricerPhase {
        match (&self.engine, self.accumulator.samples()) {
            (None, _) => PricerPhase::Uninitialized,
            (Some(_), 0) => PricerPhase::Initialized,
            (Some(_), _) => PricerPhase::Sampled,
        }
    }

    /// Target number of samples.
    pub fn samples(&self) -> Size {
        self.samples
    }

    /// Master seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The accumulated samples (empty before the first
    /// [`value`](Self::value)).
    pub fn sample_accumulator(&self) -> &SampleAccumulator {
        &self.accumulator
    }

    /// The Monte Carlo estimate of the price.
    ///
    /// # Errors
    /// [`Error::Uninitialized`] on a default-constructed pricer; any error
    /// raised while sampling, in which case the pricer stays initialized.
    pub fn value(&mut self) -> Result<Real> {
        let Some(engine) = &self.engine else {
            return Err(Error::Uninitialized("MultiFactorPricer::value".into()));
        };
        if self.accumulator.samples() == 0 {
            debug!(samples = self.samples, seed = self.seed, "running sampling phase");
            self.accumulator = engine.sample(self.samples, self.seed)?;
        }
        self.accumulator.mean()
    }

    /// Standard error of [`value`](Self::value).
    ///
    /// # Errors
    /// [`Error::Uninitialized`] on a default-constructed pricer;
    /// [`Error::EmptyAccumulator`] before [`value`](Self::value) has run or
    /// with a single sample.
    pub fn error_estimate(&self) -> Result<Real> {
        if self.engine.is_none() {
            return Err(Error::Uninitialized(
                "MultiFactorPricer::error_estimate".into(),
            ));
        }
        self.accumulator.error_estimate()
    }
}
