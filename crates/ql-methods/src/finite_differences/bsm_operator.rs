//! Black-Scholes-Merton differential operator on a uniform log-spot grid
//! (translates `ql/methods/finitedifferences/bsmoperator.hpp`).
//!
//! With `x = ln S` and `τ` the time to maturity, the pricing PDE reads
//! `∂V/∂τ = −D·V` with
//!
//! ```text
//! D = −(σ²/2)·∂²/∂x² − ν·∂/∂x + r,    ν = r − q − σ²/2
//! ```
//!
//! discretised with central differences. The first and last rows are left
//! as zero rows, so every evolver keeps the boundary values fixed at their
//! terminal levels.

use ql_core::{ensure, errors::Result, Rate, Real, Size, Volatility};

use super::tridiagonal_operator::TridiagonalOperator;

/// A uniform grid in log-spot space.
#[derive(Debug, Clone, PartialEq)]
pub struct LogGrid {
    x_min: Real,
    dx: Real,
    points: Size,
}

impl LogGrid {
    /// Grid of `points` nodes centred on `ln(center)`, spanning
    /// `±n_std · σ · √t` in log space.
    pub fn centered(
        center: Real,
        sigma: Volatility,
        t: Real,
        n_std: Real,
        points: Size,
    ) -> Result<Self> {
        ensure!(center > 0.0, "grid centre must be positive, got {center}");
        ensure!(points >= 3, "at least 3 grid points required, got {points}");
        ensure!(
            sigma > 0.0 && t > 0.0 && n_std > 0.0,
            "grid width must be positive (σ = {sigma}, t = {t}, n_std = {n_std})"
        );
        let half_width = n_std * sigma * t.sqrt();
        let x_min = center.ln() - half_width;
        let dx = 2.0 * half_width / (points - 1) as Real;
        Ok(Self { x_min, dx, points })
    }

    /// Number of grid nodes.
    pub fn size(&self) -> Size {
        self.points
    }

    /// Log-space spacing.
    pub fn dx(&self) -> Real {
        self.dx
    }

    /// Log-spot at node `i`.
    pub fn x(&self, i: Size) -> Real {
        self.x_min + i as Real * self.dx
    }

    /// Spot at node `i`.
    pub fn spot(&self, i: Size) -> Real {
        self.x(i).exp()
    }

    /// Spot values at every node.
    pub fn spots(&self) -> Vec<Real> {
        (0..self.points).map(|i| self.spot(i)).collect()
    }

    /// Linearly interpolate `values` (in log space) at `spot`.
    ///
    /// Spots outside the grid are clamped to the boundary nodes.
    pub fn interpolate(&self, values: &[Real], spot: Real) -> Real {
        debug_assert_eq!(values.len(), self.points);
        let n = self.points;
        let pos = (spot.ln() - self.x_min) / self.dx;
        if pos.is_nan() || pos <= 0.0 {
            return values[0];
        }
        if pos >= (n - 1) as Real {
            return values[n - 1];
        }
        let idx = (pos.floor() as Size).min(n - 2);
        let frac = pos - idx as Real;
        values[idx] * (1.0 - frac) + values[idx + 1] * frac
    }
}

/// Builder for the Black-Scholes-Merton tridiagonal operator.
///
/// Corresponds to `QuantLib::BSMOperator`.
#[derive(Debug, Clone, Copy)]
pub struct BsmOperator;

impl BsmOperator {
    /// Build `D` on `grid` for constant rate `r`, dividend yield `q` and
    /// volatility `sigma`.
    pub fn build(grid: &LogGrid, r: Rate, q: Rate, sigma: Volatility) -> TridiagonalOperator {
        let dx = grid.dx();
        let sigma2 = sigma * sigma;
        let nu = r - q - 0.5 * sigma2;

        let pd = -0.5 * sigma2 / (dx * dx) + 0.5 * nu / dx;
        let pm = sigma2 / (dx * dx) + r;
        let pu = -0.5 * sigma2 / (dx * dx) - 0.5 * nu / dx;

        let mut op = TridiagonalOperator::new(grid.size());
        op.set_mid_rows(pd, pm, pu);
        op
    }
}
