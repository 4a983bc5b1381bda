//! Matrix decompositions used to correlate Gaussian increments (translates
//! part of `ql/math/matrixutilities/`).

use crate::matrix::Matrix;
use ql_core::{
    ensure,
    errors::{Error, Result},
    Real,
};

/// Tolerance used when checking correlation matrices.
const CORRELATION_TOLERANCE: Real = 1e-12;

/// Cholesky decomposition of a symmetric positive-definite matrix.
///
/// Returns the lower-triangular factor `L` such that `A = L * Lᵀ`.
///
/// Corresponds to `QuantLib::CholeskyDecomposition`.
pub fn cholesky_decomposition(m: &Matrix) -> Result<Matrix> {
    if !m.is_square() {
        return Err(Error::InvalidArgument("matrix must be square".into()));
    }
    match m.inner().clone().cholesky() {
        Some(chol) => Ok(Matrix::from(chol.l())),
        None => Err(Error::NumericalSolve(
            "Cholesky decomposition failed: matrix is not positive-definite".into(),
        )),
    }
}

/// Check that `m` is a valid correlation matrix: square, symmetric, unit
/// diagonal and entries in `[-1, 1]`.
pub fn check_correlation(m: &Matrix) -> Result<()> {
    ensure!(m.is_square(), "correlation matrix must be square");
    let n = m.rows();
    for i in 0..n {
        ensure!(
            (m[(i, i)] - 1.0).abs() <= CORRELATION_TOLERANCE,
            "correlation diagonal entry ({i},{i}) is {}, expected 1",
            m[(i, i)]
        );
        for j in 0..i {
            ensure!(
                (m[(i, j)] - m[(j, i)]).abs() <= CORRELATION_TOLERANCE,
                "correlation matrix is not symmetric at ({i},{j})"
            );
            ensure!(
                m[(i, j)].abs() <= 1.0,
                "correlation ({i},{j}) = {} out of [-1, 1]",
                m[(i, j)]
            );
        }
    }
    Ok(())
}
