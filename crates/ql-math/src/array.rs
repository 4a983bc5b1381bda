//! `Array`: the state vector evolved by the finite-difference and Monte
//! Carlo engines (translates `ql/math/array.hpp`).
//!
//! A thin newtype around `nalgebra::DVector<f64>`. Its length is fixed for
//! the lifetime of a stepping session: evolvers overwrite it in place, step
//! conditions adjust individual entries.

use nalgebra::DVector;
use ql_core::{Real, Size};
use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

/// A dynamically-sized 1D vector of `Real` values.
///
/// Corresponds to `QuantLib::Array`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array(DVector<Real>);

impl Array {
    /// Create a zero-filled array of length `n`.
    pub fn zeros(n: Size) -> Self {
        Self(DVector::zeros(n))
    }

    /// Create an array filled with `value`.
    pub fn from_element(n: Size, value: Real) -> Self {
        Self(DVector::from_element(n, value))
    }

    /// Create an array whose `i`-th element is `f(i)`.
    pub fn from_fn<F: FnMut(Size) -> Real>(n: Size, mut f: F) -> Self {
        Self(DVector::from_fn(n, |i, _| f(i)))
    }

    /// Create an array from a slice.
    pub fn from_slice(data: &[Real]) -> Self {
        Self(DVector::from_column_slice(data))
    }

    /// Create an array from a `Vec`.
    pub fn from_vec(data: Vec<Real>) -> Self {
        Self(DVector::from_vec(data))
    }

    /// Number of elements.
    pub fn size(&self) -> Size {
        self.0.len()
    }

    /// Return `true` if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the elements as a slice.
    pub fn as_slice(&self) -> &[Real] {
        self.0.as_slice()
    }

    /// Apply a function element-wise, returning a new array.
    pub fn map<F: Fn(Real) -> Real>(&self, f: F) -> Self {
        Self(self.0.map(f))
    }

    /// Element-wise maximum with `other`, in place.
    ///
    /// # Panics
    /// Panics if the sizes differ.
    pub fn max_assign(&mut self, other: &Array) {
        assert_eq!(self.size(), other.size(), "array size mismatch");
        for (a, b) in self.0.iter_mut().zip(other.0.iter()) {
            if *b > *a {
                *a = *b;
            }
        }
    }

    /// Iterator over elements.
    pub fn iter(&self) -> impl Iterator<Item = &Real> {
        self.0.iter()
    }
}

// ── From / Into conversions ───────────────────────────────────────────────────

impl From<Vec<Real>> for Array {
    fn from(v: Vec<Real>) -> Self {
        Self::from_vec(v)
    }
}

impl From<&[Real]> for Array {
    fn from(s: &[Real]) -> Self {
        Self::from_slice(s)
    }
}

// ── Index ─────────────────────────────────────────────────────────────────────

impl Index<Size> for Array {
    type Output = Real;
    fn index(&self, i: Size) -> &Real {
        &self.0[i]
    }
}

impl IndexMut<Size> for Array {
    fn index_mut(&mut self, i: Size) -> &mut Real {
        &mut self.0[i]
    }
}

// ── Element-wise arithmetic ───────────────────────────────────────────────────

impl Add for &Array {
    type Output = Array;
    fn add(self, rhs: &Array) -> Array {
        Array(&self.0 + &rhs.0)
    }
}

impl Sub for &Array {
    type Output = Array;
    fn sub(self, rhs: &Array) -> Array {
        Array(&self.0 - &rhs.0)
    }
}

impl Mul<Real> for &Array {
    type Output = Array;
    fn mul(self, rhs: Real) -> Array {
        Array(&self.0 * rhs)
    }
}

impl Mul<&Array> for Real {
    type Output = Array;
    fn mul(self, rhs: &Array) -> Array {
        Array(&rhs.0 * self)
    }
}

impl Neg for &Array {
    type Output = Array;
    fn neg(self) -> Array {
        Array(-&self.0)
    }
}

// ── Display ───────────────────────────────────────────────────────────────────

impl std::fmt::Display for Array {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_and_from_fn() {
        let a = Array::zeros(5);
        assert_eq!(a.size(), 5);
        assert_eq!(a[0], 0.0);
        let b = Array::from_fn(4, |i| i as Real * 2.0);
        assert_eq!(b.as_slice(), &[0.0, 2.0, 4.0, 6.0]);
    }

    #[test]
    fn element_wise_ops() {
        let a = Array::from_slice(&[1.0, 2.0, 3.0]);
        let b = Array::from_slice(&[4.0, 5.0, 6.0]);
        assert_eq!((&a + &b).as_slice(), &[5.0, 7.0, 9.0]);
        assert_eq!((&b - &a)[0], 3.0);
        assert_eq!((&a * 2.0)[2], 6.0);
        assert_eq!((0.5 * &b)[0], 2.0);
        assert_eq!((-&a)[0], -1.0);
    }

    #[test]
    fn max_assign_keeps_larger_entries() {
        let mut a = Array::from_slice(&[1.0, 5.0, 3.0]);
        a.max_assign(&Array::from_slice(&[2.0, 4.0, 3.0]));
        assert_eq!(a.as_slice(), &[2.0, 5.0, 3.0]);
    }

    #[test]
    fn display() {
        let a = Array::from_slice(&[1.0, 2.5]);
        assert_eq!(a.to_string(), "[1, 2.5]");
    }
}
