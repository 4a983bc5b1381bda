//! Monte Carlo simulation settings.
//!
//! Immutable settings built through [`McSettingsBuilder`], validated at
//! build time.

use ql_core::{
    ensure,
    errors::{Error, Result},
    Size,
};

/// Maximum number of samples allowed.
pub const MAX_SAMPLES: Size = 100_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_TIME_STEPS: Size = 10_000;

/// Default number of samples drawn per batch.
pub const DEFAULT_BATCH_SIZE: Size = 1_024;

/// Monte Carlo simulation settings.
///
/// # Examples
///
/// ```rust
/// use ql_methods::monte_carlo::McSettings;
///
/// let settings = McSettings::builder()
///     .samples(50_000)
///     .time_steps(12)
///     .seed(12345)
///     .antithetic(true)
///     .build()
///     .expect("valid settings");
///
/// assert_eq!(settings.samples(), 50_000);
/// assert!(settings.antithetic());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McSettings {
    samples: Size,
    seed: u64,
    time_steps: Size,
    antithetic: bool,
    batch_size: Size,
}

impl McSettings {
    /// Creates a new settings builder.
    #[inline]
    pub fn builder() -> McSettingsBuilder {
        McSettingsBuilder::default()
    }

    /// Number of samples (with antithetic sampling, of path pairs).
    #[inline]
    pub fn samples(&self) -> Size {
        self.samples
    }

    /// Master seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of time steps per path.
    #[inline]
    pub fn time_steps(&self) -> Size {
        self.time_steps
    }

    /// Whether antithetic variates are used.
    #[inline]
    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Number of samples per batch; each batch has its own sub-seed.
    #[inline]
    pub fn batch_size(&self) -> Size {
        self.batch_size
    }

    /// Validates the settings.
    ///
    /// # Errors
    /// [`Error::Precondition`](ql_core::Error::Precondition) if `samples`
    /// is 0 or above [`MAX_SAMPLES`], `time_steps` is 0 or above
    /// [`MAX_TIME_STEPS`], or `batch_size` is 0.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_SAMPLES).contains(&self.samples),
            "sample count must be in [1, {MAX_SAMPLES}], got {}",
            self.samples
        );
        ensure!(
            (1..=MAX_TIME_STEPS).contains(&self.time_steps),
            "time steps must be in [1, {MAX_TIME_STEPS}], got {}",
            self.time_steps
        );
        ensure!(self.batch_size > 0, "batch size must be positive");
        Ok(())
    }
}

/// Builder for [`McSettings`].
#[derive(Debug, Clone, Default)]
pub struct McSettingsBuilder {
    samples: Option<Size>,
    seed: Option<u64>,
    time_steps: Option<Size>,
    antithetic: bool,
    batch_size: Option<Size>,
}

impl McSettingsBuilder {
    /// Sets the number of samples.
    #[inline]
    pub fn samples(mut self, samples: Size) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Sets the master seed (default 0).
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of time steps per path (default 1).
    #[inline]
    pub fn time_steps(mut self, time_steps: Size) -> Self {
        self.time_steps = Some(time_steps);
        self
    }

    /// Enables or disables antithetic variates.
    #[inline]
    pub fn antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Sets the batch size (default [`DEFAULT_BATCH_SIZE`]).
    #[inline]
    pub fn batch_size(mut self, batch_size: Size) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Builds and validates the settings.
    ///
    /// # Errors
    /// [`Error::Precondition`](ql_core::Error::Precondition) if the sample
    /// count was not set or any value is out of range.
    pub fn build(self) -> Result<McSettings> {
        let samples = self
            .samples
            .ok_or_else(|| Error::Precondition("sample count must be set".into()))?;
        let settings = McSettings {
            samples,
            seed: self.seed.unwrap_or(0),
            time_steps: self.time_steps.unwrap_or(1),
            antithetic: self.antithetic,
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
        };
        settings.validate()?;
        Ok(settings)
    }
}
