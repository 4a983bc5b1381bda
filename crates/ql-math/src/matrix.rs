//! `Matrix`: a two-dimensional matrix of reals (translates `ql/math/matrix.hpp`).
//!
//! Used for correlation matrices and their pseudo-square-roots in the
//! multi-factor Monte Carlo machinery. A thin newtype around
//! `nalgebra::DMatrix<f64>`.

use crate::array::Array;
use nalgebra::{DMatrix, DVector};
use ql_core::{Real, Size};
use std::ops::{Index, IndexMut, Mul};

/// A dynamically-sized 2D matrix of `Real` values (row-major access).
///
/// Corresponds to `QuantLib::Matrix`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(DMatrix<Real>);

impl Matrix {
    /// Create a zero-filled `rows × cols` matrix.
    pub fn zeros(rows: Size, cols: Size) -> Self {
        Self(DMatrix::zeros(rows, cols))
    }

    /// Create an identity matrix of size `n × n`.
    pub fn identity(n: Size) -> Self {
        Self(DMatrix::identity(n, n))
    }

    /// Create from a row-major data slice.
    pub fn from_row_slice(rows: Size, cols: Size, data: &[Real]) -> Self {
        Self(DMatrix::from_row_slice(rows, cols, data))
    }

    /// Number of rows.
    pub fn rows(&self) -> Size {
        self.0.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> Size {
        self.0.ncols()
    }

    /// Return `true` if the matrix is square.
    pub fn is_square(&self) -> bool {
        self.0.nrows() == self.0.ncols()
    }

    /// Borrow the inner `DMatrix`.
    pub fn inner(&self) -> &DMatrix<Real> {
        &self.0
    }

    /// Matrix-vector product `M * v`.
    ///
    /// # Panics
    /// Panics if `v.size() != self.cols()`.
    pub fn mul_vec(&self, v: &Array) -> Array {
        assert_eq!(v.size(), self.cols(), "matrix/vector size mismatch");
        let x = DVector::from_column_slice(v.as_slice());
        Array::from_slice((&self.0 * x).as_slice())
    }
}

impl From<DMatrix<Real>> for Matrix {
    fn from(m: DMatrix<Real>) -> Self {
        Self(m)
    }
}

impl Index<(Size, Size)> for Matrix {
    type Output = Real;
    fn index(&self, idx: (Size, Size)) -> &Real {
        &self.0[idx]
    }
}

impl IndexMut<(Size, Size)> for Matrix {
    fn index_mut(&mut self, idx: (Size, Size)) -> &mut Real {
        &mut self.0[idx]
    }
}

impl Mul for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: &Matrix) -> Matrix {
        Matrix(&self.0 * &rhs.0)
    }
}
