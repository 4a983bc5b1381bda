//! Array of correlated 1-D processes
//! (translates `ql/processes/stochasticprocessarray.hpp`).
//!
//! Each component keeps its own dynamics; the independent normal draws fed
//! to [`StochasticProcess::evolve`] are correlated through the Cholesky
//! factor of the correlation matrix before reaching the components.

use std::sync::Arc;

use crate::stochastic_process::{StochasticProcess, StochasticProcess1D};
use ql_core::{ensure, errors::Result, Size, Time};
use ql_math::matrix_utilities::{check_correlation, cholesky_decomposition};
use ql_math::{Array, Matrix};

/// A multi-factor process made of correlated 1-D processes.
///
/// Corresponds to `QuantLib::StochasticProcessArray`.
#[derive(Debug, Clone)]
pub struct StochasticProcessArray {
    processes: Vec<Arc<dyn StochasticProcess1D>>,
    sqrt_correlation: Matrix,
}

impl StochasticProcessArray {
    /// Combine `processes` with the given correlation matrix.
    ///
    /// # Errors
    /// Fails if the process list is empty, if the matrix size does not match,
    /// if it is not a valid correlation matrix, or if it is not
    /// positive-definite.
    pub fn new(processes: Vec<Arc<dyn StochasticProcess1D>>, correlation: &Matrix) -> Result<Self> {
        ensure!(!processes.is_empty(), "no processes given");
        ensure!(
            correlation.rows() == processes.len(),
            "mismatch between number of processes ({}) and correlation size ({})",
            processes.len(),
            correlation.rows()
        );
        check_correlation(correlation)?;
        let sqrt_correlation = cholesky_decomposition(correlation)?;
        Ok(Self {
            processes,
            sqrt_correlation,
        })
    }

    /// The `i`-th component process.
    pub fn process(&self, i: Size) -> &Arc<dyn StochasticProcess1D> {
        &self.processes[i]
    }

    /// Lower-triangular square root of the correlation matrix.
    pub fn sqrt_correlation(&self) -> &Matrix {
        &self.sqrt_correlation
    }
}

impl StochasticProcess for StochasticProcessArray {
    fn size(&self) -> Size {
        self.processes.len()
    }

    fn initial_values(&self) -> Array {
        Array::from_fn(self.size(), |i| self.processes[i].x0())
    }

    fn drift(&self, t: Time, x: &Array) -> Array {
        Array::from_fn(self.size(), |i| self.processes[i].drift_1d(t, x[i]))
    }

    fn diffusion(&self, t: Time, x: &Array) -> Matrix {
        let n = self.size();
        let mut m = self.sqrt_correlation.clone();
        for i in 0..n {
            let sigma = self.processes[i].diffusion_1d(t, x[i]);
            for j in 0..n {
                m[(i, j)] *= sigma;
            }
        }
        m
    }

    fn evolve(&self, t: Time, x: &Array, dt: Time, dw: &Array) -> Array {
        let correlated = self.sqrt_correlation.mul_vec(dw);
        Array::from_fn(self.size(), |i| {
            self.processes[i].evolve_1d(t, x[i], dt, correlated[i])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeometricBrownianMotionProcess;
    use approx::assert_abs_diff_eq;

    fn gbm(x0: f64, sigma: f64) -> Arc<dyn StochasticProcess1D> {
        Arc::new(GeometricBrownianMotionProcess::new(x0, 0.0, sigma).unwrap())
    }

    #[test]
    fn perfectly_correlated_components_move_together() {
        let rho = Matrix::from_row_slice(2, 2, &[1.0, 0.999_999, 0.999_999, 1.0]);
        let array = StochasticProcessArray::new(vec![gbm(100.0, 0.2), gbm(100.0, 0.2)], &rho).unwrap();
        let x = array.initial_values();
        let next = array.evolve(0.0, &x, 1.0, &Array::from_slice(&[1.0, 0.0]));
        assert_abs_diff_eq!(next[0], next[1], epsilon = 1e-2);
    }

    #[test]
    fn independent_components_ignore_each_other() {
        let array = StochasticProcessArray::new(
            vec![gbm(100.0, 0.2), gbm(50.0, 0.3)],
            &Matrix::identity(2),
        )
        .unwrap();
        assert_eq!(array.size(), 2);
        assert_eq!(array.factors(), 2);
        let next = array.evolve(0.0, &array.initial_values(), 1.0, &Array::from_slice(&[0.0, 1.0]));
        assert_abs_diff_eq!(next[0], 100.0 * (-0.02_f64).exp(), epsilon = 1e-10);
        assert_abs_diff_eq!(next[1], 50.0 * (-0.045_f64 + 0.3).exp(), epsilon = 1e-10);
    }

    #[test]
    fn rejects_mismatched_or_invalid_correlation() {
        assert!(StochasticProcessArray::new(vec![gbm(100.0, 0.2)], &Matrix::identity(2)).is_err());
        let bad = Matrix::from_row_slice(2, 2, &[1.0, 1.5, 1.5, 1.0]);
        assert!(StochasticProcessArray::new(vec![gbm(1.0, 0.1), gbm(1.0, 0.1)], &bad).is_err());
        assert!(StochasticProcessArray::new(vec![], &Matrix::identity(0)).is_err());
    }

    #[test]
    fn diffusion_scales_correlation_root() {
        let rho = Matrix::from_row_slice(2, 2, &[1.0, 0.5, 0.5, 1.0]);
        let array = StochasticProcessArray::new(vec![gbm(100.0, 0.2), gbm(100.0, 0.1)], &rho).unwrap();
        let d = array.diffusion(0.0, &array.initial_values());
        assert_abs_diff_eq!(d[(0, 0)], 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(d[(1, 0)], 10.0 * 0.5, epsilon = 1e-12);
    }
}
