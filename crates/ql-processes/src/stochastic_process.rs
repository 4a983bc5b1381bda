//! `StochasticProcess`: the stochastic operator driving Monte Carlo paths
//! (translates `ql/stochasticprocess.hpp`).
//!
//! A process `dX = μ(t,X) dt + σ(t,X) dW` advances a state by one time step
//! given a vector of independent standard-normal draws. Multi-factor path
//! generators only rely on [`StochasticProcess::evolve`].

use ql_core::{Real, Size, Time};
use ql_math::{Array, Matrix};

/// A general multi-dimensional stochastic process.
///
/// Corresponds to `QuantLib::StochasticProcess`.
pub trait StochasticProcess: std::fmt::Debug + Send + Sync {
    /// Number of state variables.
    fn size(&self) -> Size;

    /// Number of independent Brownian motions driving the process.
    fn factors(&self) -> Size {
        self.size()
    }

    /// Initial value(s) of the process.
    fn initial_values(&self) -> Array;

    /// Drift vector `μ(t, x)`.
    fn drift(&self, t: Time, x: &Array) -> Array;

    /// Diffusion matrix `σ(t, x)`, dimensioned `size() × factors()`.
    fn diffusion(&self, t: Time, x: &Array) -> Matrix;

    /// Advance the state from `t` to `t + dt` given independent normal
    /// draws `dw` (one per factor).
    ///
    /// Default: Euler step `x + μ·Δt + σ·√Δt·dw`.
    fn evolve(&self, t: Time, x: &Array, dt: Time, dw: &Array) -> Array {
        let mu = self.drift(t, x);
        let shock = self.diffusion(t, x).mul_vec(dw);
        let sqrt_dt = dt.sqrt();
        Array::from_fn(self.size(), |i| x[i] + mu[i] * dt + shock[i] * sqrt_dt)
    }
}

/// A 1-dimensional stochastic process `dX = μ(t,X) dt + σ(t,X) dW`.
///
/// Corresponds to `QuantLib::StochasticProcess1D`.
pub trait StochasticProcess1D: StochasticProcess {
    /// Initial value of the process.
    fn x0(&self) -> Real;

    /// 1D drift `μ(t, x)`.
    fn drift_1d(&self, t: Time, x: Real) -> Real;

    /// 1D diffusion `σ(t, x)`.
    fn diffusion_1d(&self, t: Time, x: Real) -> Real;

    /// One step from `x` at `t` to `t + dt` with normal draw `dw`.
    ///
    /// Default: Euler step.
    fn evolve_1d(&self, t: Time, x: Real, dt: Time, dw: Real) -> Real {
        x + self.drift_1d(t, x) * dt + self.diffusion_1d(t, x) * dt.sqrt() * dw
    }
}

/// Every 1D process is a multi-dimensional process of size 1.
impl<T: StochasticProcess1D> StochasticProcess for T {
    fn size(&self) -> Size {
        1
    }

    fn initial_values(&self) -> Array {
        Array::from_element(1, self.x0())
    }

    fn drift(&self, t: Time, x: &Array) -> Array {
        Array::from_element(1, self.drift_1d(t, x[0]))
    }

    fn diffusion(&self, t: Time, x: &Array) -> Matrix {
        let mut m = Matrix::zeros(1, 1);
        m[(0, 0)] = self.diffusion_1d(t, x[0]);
        m
    }

    fn evolve(&self, t: Time, x: &Array, dt: Time, dw: &Array) -> Array {
        Array::from_element(1, self.evolve_1d(t, x[0], dt, dw[0]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// dX = 0.05·dt + 0.20·dW
    #[derive(Debug)]
    struct ArithmeticProcess;

    impl StochasticProcess1D for ArithmeticProcess {
        fn x0(&self) -> Real {
            100.0
        }

        fn drift_1d(&self, _t: Time, _x: Real) -> Real {
            0.05
        }

        fn diffusion_1d(&self, _t: Time, _x: Real) -> Real {
            0.20
        }
    }

    #[test]
    fn one_dimensional_process_has_one_factor() {
        let p = ArithmeticProcess;
        assert_eq!(p.size(), 1);
        assert_eq!(p.factors(), 1);
        assert_eq!(p.initial_values()[0], 100.0);
    }

    #[test]
    fn euler_step_with_zero_noise() {
        let x_new = ArithmeticProcess.evolve_1d(0.0, 100.0, 1.0, 0.0);
        assert!((x_new - 100.05).abs() < 1e-12);
    }

    #[test]
    fn evolve_through_array_interface() {
        let p = ArithmeticProcess;
        let x = Array::from_element(1, 100.0);
        let dw = Array::from_element(1, 1.0);
        let x_new = p.evolve(0.0, &x, 0.25, &dw);
        // 100 + 0.05·0.25 + 0.20·0.5·1
        assert!((x_new[0] - 100.1125).abs() < 1e-12);
    }
}
