//! Integration tests for the option pricers.

use ql_core::errors::Error;
use ql_math::Matrix;
use ql_methods::finite_differences::{FdSettings, FdmScheme};
use ql_methods::monte_carlo::{
    BasketPathPricer, BasketType, McSettings, MultiFactorPricer, OptionType,
};
use ql_pricers::{
    black_scholes_price, BasketInputs, Dividend, DividendShoutOption, FdEuropeanOption,
    PlainBasketOption, VanillaInputs,
};

fn vanilla(option_type: OptionType) -> VanillaInputs {
    VanillaInputs {
        option_type,
        underlying: 100.0,
        strike: 100.0,
        dividend_yield: 0.0,
        risk_free_rate: 0.05,
        residual_time: 1.0,
        volatility: 0.3,
    }
}

fn fd_settings() -> FdSettings {
    FdSettings::builder()
        .grid_points(200)
        .time_steps(200)
        .scheme(FdmScheme::CrankNicolson)
        .build()
        .unwrap()
}

#[test]
fn shout_is_worth_at_least_the_european() {
    let settings = fd_settings();
    for option_type in [OptionType::Call, OptionType::Put] {
        let european = FdEuropeanOption::new(vanilla(option_type), &settings)
            .unwrap()
            .value()
            .unwrap();
        let shout = DividendShoutOption::new(vanilla(option_type), &[], &settings)
            .unwrap()
            .value()
            .unwrap();
        assert!(shout >= european - 1e-8, "{option_type:?}: shout {shout} < european {european}");
    }
}

#[test]
fn european_schemes_agree_with_black_scholes() {
    let bs = black_scholes_price(OptionType::Put, 100.0, 100.0, 0.05, 0.0, 0.3, 1.0);
    for scheme in [FdmScheme::Implicit, FdmScheme::CrankNicolson] {
        let settings = FdSettings::builder()
            .grid_points(300)
            .time_steps(300)
            .scheme(scheme)
            .build()
            .unwrap();
        let price = FdEuropeanOption::new(vanilla(OptionType::Put), &settings)
            .unwrap()
            .value()
            .unwrap();
        assert!((price - bs).abs() < 0.1, "{scheme:?}: {price} vs {bs}");
    }
}

#[test]
fn cash_dividend_lowers_the_call_and_raises_the_put() {
    let settings = fd_settings();
    let dividend = [Dividend::new(0.5, 3.0)];
    let call = FdEuropeanOption::new(vanilla(OptionType::Call), &settings).unwrap().value().unwrap();
    let call_div = FdEuropeanOption::with_dividends(vanilla(OptionType::Call), &dividend, &settings)
        .unwrap()
        .value()
        .unwrap();
    let put = FdEuropeanOption::new(vanilla(OptionType::Put), &settings).unwrap().value().unwrap();
    let put_div = FdEuropeanOption::with_dividends(vanilla(OptionType::Put), &dividend, &settings)
        .unwrap()
        .value()
        .unwrap();
    assert!(call_div < call);
    assert!(put_div > put);

    // escrowed-dividend approximation: spot reduced by the dividend's PV
    let pv = 3.0 * (-0.05_f64 * 0.5).exp();
    let approx = black_scholes_price(OptionType::Call, 100.0 - pv, 100.0, 0.05, 0.0, 0.3, 1.0);
    assert!((call_div - approx).abs() < 0.5, "{call_div} vs {approx}");
}

#[test]
fn shout_with_dividends_dominates_european_with_dividends() {
    let settings = fd_settings();
    let dividends = [Dividend::new(0.25, 1.0), Dividend::new(0.75, 1.0)];
    let european = FdEuropeanOption::with_dividends(vanilla(OptionType::Put), &dividends, &settings)
        .unwrap()
        .value()
        .unwrap();
    let shout = DividendShoutOption::new(vanilla(OptionType::Put), &dividends, &settings)
        .unwrap()
        .value()
        .unwrap();
    assert!(shout >= european - 1e-8);
}

#[test]
fn dividend_outside_the_option_life_is_rejected() {
    let result = DividendShoutOption::new(
        vanilla(OptionType::Call),
        &[Dividend::new(1.5, 1.0)],
        &fd_settings(),
    );
    assert!(matches!(result, Err(Error::Precondition(_))));
}

fn basket() -> BasketInputs {
    BasketInputs {
        option_type: OptionType::Call,
        basket_type: BasketType::Max,
        underlyings: vec![100.0, 100.0],
        strike: 100.0,
        dividend_yields: vec![0.0, 0.0],
        risk_free_rate: 0.05,
        volatilities: vec![0.3, 0.3],
        correlation: Matrix::from_row_slice(2, 2, &[1.0, 0.5, 0.5, 1.0]),
        residual_time: 1.0,
    }
}

#[test]
fn basket_price_is_reproducible_for_a_seed() {
    let settings = McSettings::builder().samples(5_000).seed(99).build().unwrap();
    let mut a = PlainBasketOption::new(&basket(), &settings).unwrap();
    let mut b = PlainBasketOption::new(&basket(), &settings).unwrap();
    assert_eq!(a.value().unwrap(), b.value().unwrap());
    assert_eq!(a.error_estimate().unwrap(), b.error_estimate().unwrap());
}

#[test]
fn max_basket_call_exceeds_single_asset_call() {
    let settings = McSettings::builder()
        .samples(20_000)
        .seed(7)
        .antithetic(true)
        .build()
        .unwrap();
    let mut option = PlainBasketOption::new(&basket(), &settings).unwrap();
    let price = option.value().unwrap();
    let single = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.3, 1.0);
    assert!(price > single, "{price} <= {single}");
}

#[test]
fn error_estimate_requires_sampling() {
    let settings = McSettings::builder().samples(100).build().unwrap();
    let option = PlainBasketOption::new(&basket(), &settings).unwrap();
    assert!(matches!(
        option.error_estimate(),
        Err(Error::EmptyAccumulator { .. })
    ));
    let mut empty = MultiFactorPricer::<BasketPathPricer>::default();
    assert!(matches!(empty.value(), Err(Error::Uninitialized(_))));
}
