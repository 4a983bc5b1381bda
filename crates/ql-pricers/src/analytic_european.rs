//! Closed-form Black-Scholes-Merton prices, used as the reference the
//! numerical pricers are checked against
//! (translates `ql/pricingengines/vanilla/analyticeuropeanengine.hpp`).

use ql_core::{Rate, Real, Time, Volatility};
use ql_math::distributions::{normal_cdf, normal_pdf};
use ql_methods::monte_carlo::OptionType;

/// Black-Scholes price and Greeks of a European option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesResults {
    /// Present value.
    pub value: Real,
    /// ∂V/∂S.
    pub delta: Real,
    /// ∂²V/∂S².
    pub gamma: Real,
    /// ∂V/∂σ (per 1.0 absolute vol, not per 1%).
    pub vega: Real,
    /// ∂V/∂t (per year).
    pub theta: Real,
    /// ∂V/∂r (per 1.0 rate shift).
    pub rho: Real,
}

/// Compute Black-Scholes price and Greeks for a European option.
///
/// $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> BlackScholesResults {
    let phi = match option_type {
        OptionType::Call => 1.0,
        OptionType::Put => -1.0,
    };
    let t = time_to_expiry;

    if t <= 0.0 {
        return BlackScholesResults {
            value: option_type.intrinsic(spot, strike),
            delta: 0.0,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            rho: 0.0,
        };
    }

    let r = risk_free_rate;
    let q = dividend_yield;
    let sigma = volatility;
    let sqrt_t = t.sqrt();
    let std_dev = sigma * sqrt_t;
    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();
    let fwd = spot * ((r - q) * t).exp();

    let (d1, d2) = if std_dev > 1e-15 {
        let d1 = ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / std_dev;
        (d1, d1 - std_dev)
    } else {
        let big = if fwd > strike { 1e15 } else { -1e15 };
        (big, big)
    };

    let nd1 = normal_cdf(phi * d1);
    let nd2 = normal_cdf(phi * d2);
    let npd1 = normal_pdf(d1);

    let theta = {
        let term1 = -(spot * df_q * npd1 * sigma) / (2.0 * sqrt_t);
        let term2 = -phi * r * strike * df_r * nd2;
        let term3 = phi * q * spot * df_q * nd1;
        term1 + term2 + term3
    };

    BlackScholesResults {
        value: phi * (spot * df_q * nd1 - strike * df_r * nd2),
        delta: phi * df_q * nd1,
        gamma: df_q * npd1 / (spot * std_dev),
        vega: spot * df_q * npd1 * sqrt_t,
        theta,
        rho: phi * strike * t * df_r * nd2,
    }
}

/// Black-Scholes price only.
pub fn black_scholes_price(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Real {
    black_scholes_merton(
        option_type,
        spot,
        strike,
        risk_free_rate,
        dividend_yield,
        volatility,
        time_to_expiry,
    )
    .value
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn bs_call_price() {
        // S=100, K=100, r=5%, q=0%, σ=20%, T=1
        let res = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0);
        assert_abs_diff_eq!(res.value, 10.450_583_572_185_565, epsilon = 1e-9);
        assert!(res.delta > 0.5 && res.delta < 0.8, "delta = {}", res.delta);
        assert!(res.gamma > 0.0);
        assert!(res.vega > 0.0);
        assert!(res.rho > 0.0);
    }

    #[test]
    fn bs_put_call_parity_with_dividends() {
        let (s, k, r, q, sigma, t) = (100.0, 105.0, 0.08, 0.03, 0.25, 0.5);
        let call = black_scholes_price(OptionType::Call, s, k, r, q, sigma, t);
        let put = black_scholes_price(OptionType::Put, s, k, r, q, sigma, t);
        let parity = call - s * (-q * t).exp() + k * (-r * t).exp();
        assert!((put - parity).abs() < 1e-10, "put={put}, parity={parity}");
    }

    #[test]
    fn bs_zero_vol_and_expired() {
        let price = black_scholes_price(OptionType::Call, 100.0, 95.0, 0.05, 0.0, 0.0, 1.0);
        let expected = 100.0 - 95.0 * (-0.05_f64).exp();
        assert!((price - expected).abs() < 1e-10, "price={price}, expected={expected}");
        let expired = black_scholes_price(OptionType::Put, 90.0, 100.0, 0.05, 0.0, 0.2, 0.0);
        assert_eq!(expired, 10.0);
    }

    proptest! {
        #[test]
        fn put_call_parity_holds(
            s in 50.0..150.0f64,
            k in 50.0..150.0f64,
            r in 0.0..0.1f64,
            q in 0.0..0.05f64,
            sigma in 0.05..0.6f64,
            t in 0.05..3.0f64,
        ) {
            let call = black_scholes_price(OptionType::Call, s, k, r, q, sigma, t);
            let put = black_scholes_price(OptionType::Put, s, k, r, q, sigma, t);
            let forward = s * (-q * t).exp() - k * (-r * t).exp();
            prop_assert!((call - put - forward).abs() < 1e-8);
            prop_assert!(call >= 0.0 && put >= 0.0);
        }
    }
}
