//! Multi-factor Monte Carlo model: path generation plus path pricing,
//! reduced into a [`SampleAccumulator`]
//! (translates `ql/methods/montecarlo/montecarlomodel.hpp` for multi-paths).
//!
//! Samples are drawn in fixed-size batches. Batch `b` owns a generator
//! seeded with `derive_seed(seed, b)`, and the per-batch accumulators are
//! merged in batch order, so the result depends only on the seed, the
//! sample count and the batch size. With the `parallel` feature the
//! batches run on the rayon thread pool and produce identical numbers.

use std::sync::Arc;

use ql_core::{ensure, errors::Result, Size};
use ql_math::random_numbers::derive_seed;
use ql_math::SampleAccumulator;
use ql_processes::StochasticProcess;
use tracing::{debug, debug_span};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::multi_path_generator::MultiPathGenerator;
use super::path_pricer::MultiPathPricer;
use super::settings::DEFAULT_BATCH_SIZE;
use crate::time_grid::TimeGrid;

/// Monte Carlo model over a multi-factor process.
///
/// Corresponds to `QuantLib::MultiFactorMonteCarloOption` /
/// `MonteCarloModel<MultiAsset>`.
#[derive(Debug, Clone)]
pub struct MultiFactorMonteCarlo<P> {
    process: Arc<dyn StochasticProcess>,
    grid: TimeGrid,
    pricer: P,
    antithetic: bool,
    batch_size: Size,
}

impl<P: MultiPathPricer> MultiFactorMonteCarlo<P> {
    /// Create a model for `process` simulated on `grid` and priced by
    /// `pricer`.
    pub fn new(process: Arc<dyn StochasticProcess>, grid: TimeGrid, pricer: P) -> Self {
        Self {
            process,
            grid,
            pricer,
            antithetic: false,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Use antithetic variates: every sample is the average of a path and
    /// its mirror.
    pub fn with_antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Number of samples per batch.
    pub fn with_batch_size(mut self, batch_size: Size) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// The path pricer.
    pub fn pricer(&self) -> &P {
        &self.pricer
    }

    /// The simulation grid.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Draw `samples` samples with master seed `seed`.
    ///
    /// # Errors
    /// [`Error::Precondition`](ql_core::Error::Precondition) if `samples`
    /// or the batch size is zero; [`Error::InvalidArgument`](ql_core::Error::InvalidArgument)
    /// if the pricer returns a non-finite value.
    pub fn sample(&self, samples: Size, seed: u64) -> Result<SampleAccumulator> {
        ensure!(samples > 0, "at least one sample required");
        ensure!(self.batch_size > 0, "batch size must be positive");

        let batches = samples.div_ceil(self.batch_size);
        let span = debug_span!("mc_sample", samples, seed, batches);
        let _enter = span.enter();

        let batch_len = |b: Size| self.batch_size.min(samples - b * self.batch_size);

        #[cfg(feature = "parallel")]
        let partials: Vec<SampleAccumulator> = (0..batches)
            .into_par_iter()
            .map(|b| self.run_batch(derive_seed(seed, b as u64), batch_len(b)))
            .collect::<Result<_>>()?;

        #[cfg(not(feature = "parallel"))]
        let partials: Vec<SampleAccumulator> = (0..batches)
            .map(|b| self.run_batch(derive_seed(seed, b as u64), batch_len(b)))
            .collect::<Result<_>>()?;

        let mut acc = SampleAccumulator::new();
        for partial in &partials {
            acc.merge(partial);
        }
        debug!(samples = acc.samples(), "sampling complete");
        Ok(acc)
    }

    fn run_batch(&self, seed: u64, count: Size) -> Result<SampleAccumulator> {
        let mut generator = MultiPathGenerator::new(
            Arc::clone(&self.process),
            self.grid.clone(),
            seed,
            self.antithetic,
        )?;
        let mut acc = SampleAccumulator::new();
        for _ in 0..count {
            let value = if self.antithetic {
                let a = self.pricer.value(&generator.next_path());
                let b = self.pricer.value(&generator.next_path());
                0.5 * (a + b)
            } else {
                self.pricer.value(&generator.next_path())
            };
            acc.add(value)?;
        }
        Ok(acc)
    }
}
