//! Sample accumulator for Monte Carlo estimates (translates the
//! `Statistics` accumulator of `ql/math/statistics/`).
//!
//! The accumulator keeps the count, the running mean, the sum of squared
//! deviations from it (Welford's update) and the extremes. Partial
//! accumulators merge with Chan's pairwise formula, so the rayon reduction
//! of batch results needs no raw sums. Equal-valued samples give a zero
//! variance exactly, whatever their magnitude.

use ql_core::{
    errors::{Error, Result},
    Real, Size,
};

/// Running statistics over independent scalar samples.
///
/// Grows monotonically: samples can be added or merged in, never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleAccumulator {
    count: Size,
    mean: Real,
    m2: Real,
    min: Real,
    max: Real,
}

impl Default for SampleAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleAccumulator {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: Real::INFINITY,
            max: Real::NEG_INFINITY,
        }
    }

    /// Add a single sample.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] for NaN or infinite samples; the
    /// accumulator is left unchanged.
    pub fn add(&mut self, x: Real) -> Result<()> {
        check_finite(x)?;
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as Real;
        self.m2 += delta * (x - self.mean);
        self.min = self.min.min(x);
        self.max = self.max.max(x);
        Ok(())
    }

    /// Add every sample of an iterator.
    ///
    /// All samples are checked before any is added: on error the
    /// accumulator is left unchanged.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if any sample is NaN or infinite.
    pub fn add_all<I: IntoIterator<Item = Real>>(&mut self, samples: I) -> Result<()> {
        let samples: Vec<Real> = samples.into_iter().collect();
        for &x in &samples {
            check_finite(x)?;
        }
        for x in samples {
            self.add(x)?;
        }
        Ok(())
    }

    /// Fold the samples of `other` into `self`.
    ///
    /// Equivalent, up to rounding, to having added `other`'s samples one by
    /// one.
    pub fn merge(&mut self, other: &SampleAccumulator) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let n_a = self.count as Real;
        let n_b = other.count as Real;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;
        self.mean += delta * (n_b / n);
        self.m2 += other.m2 + delta * delta * (n_a * n_b / n);
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Number of samples.
    pub fn samples(&self) -> Size {
        self.count
    }

    /// Sample mean.
    ///
    /// # Errors
    /// [`Error::EmptyAccumulator`] if no sample has been added.
    pub fn mean(&self) -> Result<Real> {
        self.require(1)?;
        Ok(self.mean)
    }

    /// Unbiased (Bessel-corrected) sample variance.
    ///
    /// # Errors
    /// [`Error::EmptyAccumulator`] with fewer than two samples.
    pub fn variance(&self) -> Result<Real> {
        self.require(2)?;
        Ok(self.m2.max(0.0) / (self.count - 1) as Real)
    }

    /// Sample standard deviation.
    pub fn standard_deviation(&self) -> Result<Real> {
        self.variance().map(Real::sqrt)
    }

    /// Standard error of the mean, `σ / √n`.
    ///
    /// # Errors
    /// [`Error::EmptyAccumulator`] with fewer than two samples.
    pub fn error_estimate(&self) -> Result<Real> {
        let var = self.variance()?;
        Ok((var / self.count as Real).sqrt())
    }

    /// Smallest sample.
    pub fn min(&self) -> Result<Real> {
        self.require(1)?;
        Ok(self.min)
    }

    /// Largest sample.
    pub fn max(&self) -> Result<Real> {
        self.require(1)?;
        Ok(self.max)
    }

    fn require(&self, required: Size) -> Result<()> {
        if self.count < required {
            return Err(Error::EmptyAccumulator {
                required,
                available: self.count,
            });
        }
        Ok(())
    }
}

fn check_finite(x: Real) -> Result<()> {
    if !x.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "non-finite sample {x} cannot be accumulated"
        )));
    }
    Ok(())
}
