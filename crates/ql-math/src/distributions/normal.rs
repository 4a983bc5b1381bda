//! Standard normal distribution
//! (translates `ql/math/distributions/normaldistribution.hpp`).
//!
//! All three functions go through the error-function family of `statrs`:
//! the CDF feeds the analytic reference prices, the inverse CDF turns
//! Mersenne-Twister uniforms into Gaussian path increments.

use ql_core::Real;
use statrs::function::erf::{erfc, erfc_inv};
use std::f64::consts::SQRT_2;

/// `1 / √(2π)`.
const INV_SQRT_2PI: Real = 0.398_942_280_401_432_7;

/// Density `φ(x) = e^{−x²/2} / √(2π)`.
#[inline]
pub fn normal_pdf(x: Real) -> Real {
    INV_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Cumulative distribution `Φ(x) = ½·erfc(−x/√2)`.
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x / SQRT_2)
}

/// Inverse cumulative distribution `Φ⁻¹(p) = −√2·erfc⁻¹(2p)`.
///
/// Maps 0 and 1 to `∓∞`; `NaN` outside `[0, 1]`.
///
/// Corresponds to `QuantLib::InverseCumulativeNormal`.
pub fn normal_cdf_inverse(p: Real) -> Real {
    if !(0.0..=1.0).contains(&p) {
        return Real::NAN;
    }
    -SQRT_2 * erfc_inv(2.0 * p)
}
