//! # ql-processes
//!
//! Stochastic processes driving the Monte Carlo path generators: the
//! process traits, geometric Brownian motion, and arrays of correlated
//! one-dimensional processes for multi-factor simulation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod geometric_brownian_motion;
pub mod stochastic_process;
pub mod stochastic_process_array;

pub use geometric_brownian_motion::GeometricBrownianMotionProcess;
pub use stochastic_process::{StochasticProcess, StochasticProcess1D};
pub use stochastic_process_array::StochasticProcessArray;
