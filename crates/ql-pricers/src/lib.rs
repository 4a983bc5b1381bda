//! # ql-pricers
//!
//! Option pricers built on the evolution engines of `ql-methods`:
//!
//! - [`DividendShoutOption`]: shout option with discrete dividends, by
//!   finite differences.
//! - [`FdEuropeanOption`]: European option with discrete dividends, by
//!   finite differences.
//! - [`PlainBasketOption`]: European basket option, by multi-factor Monte
//!   Carlo.
//! - [`black_scholes_price`]: the closed-form reference.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european;
pub mod dividend_shout_option;
pub mod fd_european_option;
pub mod fd_vanilla;
pub mod plain_basket_option;

pub use analytic_european::{black_scholes_merton, black_scholes_price, BlackScholesResults};
pub use dividend_shout_option::DividendShoutOption;
pub use fd_european_option::FdEuropeanOption;
pub use fd_vanilla::{Dividend, VanillaInputs};
pub use plain_basket_option::{BasketInputs, PlainBasketOption};
