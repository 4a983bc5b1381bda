//! Validated settings for finite-difference pricers.

use ql_core::{ensure, errors::Result, Real, Size};

/// Upper bound on the number of spatial grid points.
pub const MAX_GRID_POINTS: Size = 100_000;

/// Upper bound on the number of time steps.
pub const MAX_TIME_STEPS: Size = 100_000;

/// Finite difference time-stepping scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FdmScheme {
    /// Explicit: `V^{n} = A · V^{n+1}`: simple but conditionally stable.
    Explicit,
    /// Fully implicit: `A · V^{n} = V^{n+1}`: unconditionally stable.
    #[default]
    Implicit,
    /// Crank-Nicolson: θ-average of explicit and implicit: second-order in time.
    CrankNicolson,
}

/// Grid and stepping settings for a finite-difference pricer.
///
/// Use [`FdSettings::builder`] to construct instances.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FdSettings {
    grid_points: Size,
    time_steps: Size,
    scheme: FdmScheme,
    grid_width: Real,
}

impl Default for FdSettings {
    fn default() -> Self {
        Self {
            grid_points: 100,
            time_steps: 100,
            scheme: FdmScheme::Implicit,
            grid_width: 4.0,
        }
    }
}

impl FdSettings {
    /// Creates a new settings builder.
    pub fn builder() -> FdSettingsBuilder {
        FdSettingsBuilder::default()
    }

    /// Number of spatial (log-spot) grid points.
    pub fn grid_points(&self) -> Size {
        self.grid_points
    }

    /// Number of time steps between valuation and maturity.
    pub fn time_steps(&self) -> Size {
        self.time_steps
    }

    /// Time-stepping scheme.
    pub fn scheme(&self) -> FdmScheme {
        self.scheme
    }

    /// Half-width of the log-spot grid in standard deviations.
    pub fn grid_width(&self) -> Real {
        self.grid_width
    }

    /// Validates the settings.
    ///
    /// # Errors
    /// [`Error::Precondition`](ql_core::Error::Precondition) if the grid
    /// has fewer than 3 or more than [`MAX_GRID_POINTS`] points, the step
    /// count is 0 or above [`MAX_TIME_STEPS`], or the grid width is not
    /// positive.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            (3..=MAX_GRID_POINTS).contains(&self.grid_points),
            "grid points must be in [3, {MAX_GRID_POINTS}], got {}",
            self.grid_points
        );
        ensure!(
            (1..=MAX_TIME_STEPS).contains(&self.time_steps),
            "time steps must be in [1, {MAX_TIME_STEPS}], got {}",
            self.time_steps
        );
        ensure!(
            self.grid_width.is_finite() && self.grid_width > 0.0,
            "grid width must be positive, got {}",
            self.grid_width
        );
        Ok(())
    }
}

/// Builder for [`FdSettings`].
#[derive(Debug, Clone, Default)]
pub struct FdSettingsBuilder {
    grid_points: Option<Size>,
    time_steps: Option<Size>,
    scheme: Option<FdmScheme>,
    grid_width: Option<Real>,
}

impl FdSettingsBuilder {
    /// Sets the number of spatial grid points.
    pub fn grid_points(mut self, n: Size) -> Self {
        self.grid_points = Some(n);
        self
    }

    /// Sets the number of time steps.
    pub fn time_steps(mut self, n: Size) -> Self {
        self.time_steps = Some(n);
        self
    }

    /// Sets the time-stepping scheme.
    pub fn scheme(mut self, scheme: FdmScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Sets the grid half-width in standard deviations.
    pub fn grid_width(mut self, n_std: Real) -> Self {
        self.grid_width = Some(n_std);
        self
    }

    /// Builds and validates the settings; unset fields take their defaults.
    pub fn build(self) -> Result<FdSettings> {
        let defaults = FdSettings::default();
        let settings = FdSettings {
            grid_points: self.grid_points.unwrap_or(defaults.grid_points),
            time_steps: self.time_steps.unwrap_or(defaults.time_steps),
            scheme: self.scheme.unwrap_or(defaults.scheme),
            grid_width: self.grid_width.unwrap_or(defaults.grid_width),
        };
        settings.validate()?;
        Ok(settings)
    }
}
