//! Geometric Brownian motion process
//! (translates `ql/processes/geometricbrownianmotionprocess.hpp`).
//!
//! ```text
//! dS/S = μ dt + σ dW
//! ```

use crate::stochastic_process::StochasticProcess1D;
use ql_core::{ensure, errors::Result, Real, Time, Volatility};

/// Geometric Brownian motion with constant drift and volatility.
///
/// Steps are taken with the exact log-normal transition
/// `S(t+Δt) = S(t)·exp((μ − σ²/2)Δt + σ√Δt·dw)`, so simulated prices stay
/// positive whatever the step size.
///
/// Corresponds to `QuantLib::GeometricBrownianMotionProcess`.
#[derive(Debug, Clone)]
pub struct GeometricBrownianMotionProcess {
    x0: Real,
    mu: Real,
    sigma: Volatility,
}

impl GeometricBrownianMotionProcess {
    /// Create a new GBM process.
    ///
    /// # Arguments
    /// * `x0`: initial asset price (must be > 0)
    /// * `mu`: drift (risk-neutral: `r − q`)
    /// * `sigma`: volatility (must be ≥ 0)
    pub fn new(x0: Real, mu: Real, sigma: Volatility) -> Result<Self> {
        ensure!(x0 > 0.0, "initial value must be positive, got {x0}");
        ensure!(sigma >= 0.0, "volatility must be non-negative, got {sigma}");
        Ok(Self { x0, mu, sigma })
    }

    /// Volatility `σ`.
    pub fn volatility(&self) -> Volatility {
        self.sigma
    }
}

impl StochasticProcess1D for GeometricBrownianMotionProcess {
    fn x0(&self) -> Real {
        self.x0
    }

    fn drift_1d(&self, _t: Time, x: Real) -> Real {
        self.mu * x
    }

    fn diffusion_1d(&self, _t: Time, x: Real) -> Real {
        self.sigma * x
    }

    fn evolve_1d(&self, _t: Time, x: Real, dt: Time, dw: Real) -> Real {
        let drift = (self.mu - 0.5 * self.sigma * self.sigma) * dt;
        x * (drift + self.sigma * dt.sqrt() * dw).exp()
    }
}
