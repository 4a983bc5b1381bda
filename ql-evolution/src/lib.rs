//! # ql-evolution
//!
//! Finite-difference and Monte Carlo evolution engines in the
//! [QuantLib](https://www.quantlib.org/) style.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on it rather than on the individual
//! `ql-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use ql_evolution::methods::finite_differences::FdSettings;
//! use ql_evolution::methods::monte_carlo::OptionType;
//! use ql_evolution::pricers::{FdEuropeanOption, VanillaInputs};
//!
//! let inputs = VanillaInputs {
//!     option_type: OptionType::Call,
//!     underlying: 100.0,
//!     strike: 100.0,
//!     dividend_yield: 0.0,
//!     risk_free_rate: 0.05,
//!     residual_time: 1.0,
//!     volatility: 0.2,
//! };
//! let option = FdEuropeanOption::new(inputs, &FdSettings::default()).unwrap();
//! let value = option.value().unwrap();
//! assert!(value > 9.0 && value < 12.0);
//! ```
//!
//! ## Features
//!
//! - `parallel`: run Monte Carlo batches on the rayon thread pool. Results
//!   are identical to the sequential run.
//! - `serde`: (de)serialise the settings types.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ql_core as core;

/// Dates and day counters.
pub use ql_time as time;

/// Arrays, matrices, distributions, RNG, statistics.
pub use ql_math as math;

/// Stochastic process definitions.
pub use ql_processes as processes;

/// Evolution engines: finite differences and Monte Carlo.
pub use ql_methods as methods;

/// Option pricers.
pub use ql_pricers as pricers;
