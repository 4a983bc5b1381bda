//! Correlated sample paths of several assets
//! (translates `ql/methods/montecarlo/multipath.hpp`).

use ql_core::{Real, Size, Time};

/// One joint realisation of a multi-factor process on a time grid.
///
/// `values[j][i]` is the value of asset `j` at `times[i]`; every asset path
/// starts at the initial value at `times[0] = 0`.
///
/// Corresponds to `QuantLib::MultiPath`.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPath {
    times: Vec<Time>,
    values: Vec<Vec<Real>>,
}

impl MultiPath {
    /// A path over `times` for `assets` assets, all values set to zero.
    pub fn new(assets: Size, times: Vec<Time>) -> Self {
        let len = times.len();
        Self {
            times,
            values: vec![vec![0.0; len]; assets],
        }
    }

    /// Number of assets.
    pub fn asset_count(&self) -> Size {
        self.values.len()
    }

    /// Number of time points, the initial one included.
    pub fn len(&self) -> Size {
        self.times.len()
    }

    /// Whether the path has no time points.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Number of time steps (= len − 1).
    pub fn steps(&self) -> Size {
        self.times.len().saturating_sub(1)
    }

    /// Time points.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Path of asset `j`.
    pub fn asset(&self, j: Size) -> &[Real] {
        &self.values[j]
    }

    /// Mutable path of asset `j`.
    pub fn asset_mut(&mut self, j: Size) -> &mut [Real] {
        &mut self.values[j]
    }

    /// Value of asset `j` at time index `i`.
    pub fn value(&self, j: Size, i: Size) -> Real {
        self.values[j][i]
    }

    /// Final values of every asset.
    pub fn terminal_values(&self) -> Vec<Real> {
        self.values
            .iter()
            .map(|v| v.last().copied().unwrap_or(Real::NAN))
            .collect()
    }
}
