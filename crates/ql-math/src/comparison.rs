//! Comparison utilities (translates `ql/math/comparison.hpp`).
//!
//! Used wherever grid times are matched against event times (ex-dividend
//! dates, exercise dates) that went through floating-point arithmetic.

use ql_core::Real;

/// Default epsilon for absolute comparisons.
pub const EPSILON: Real = 1e-10;

/// Default number of ULP-scaled epsilons used by [`close_enough`] callers,
/// as in QuantLib.
pub const DEFAULT_ULPS: u32 = 42;

/// Return `true` if `|a - b| <= epsilon`.
#[inline]
pub fn close(a: Real, b: Real, epsilon: Real) -> bool {
    (a - b).abs() <= epsilon
}

/// Return `true` if `|a - b| <= n·ε·max(|a|, |b|)` with `ε` the machine
/// epsilon. Exact zero only compares close to itself.
#[inline]
pub fn close_enough(a: Real, b: Real, n: u32) -> bool {
    if a == b {
        return true;
    }
    let eps = (a.abs().max(b.abs())) * f64::EPSILON * n as f64;
    (a - b).abs() <= eps
}
