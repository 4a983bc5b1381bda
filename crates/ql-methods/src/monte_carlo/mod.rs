//! Monte Carlo simulation framework for multi-factor processes.
//!
//! Translates `ql/methods/montecarlo/`: multi-asset path generation, path
//! pricing, and the model and pricer orchestrating them.
//!
//! # Overview
//!
//! * [`MultiPath`]: one joint realisation of several assets
//! * [`MultiPathGenerator`]: correlated path generation on a time grid
//! * [`MultiPathPricer`]: trait for evaluating payoffs on generated paths
//! * [`MultiFactorMonteCarlo`]: batched, seed-deterministic sampling
//! * [`MultiFactorPricer`]: sample-once pricer with value and error estimate
//! * [`McSettings`]: validated simulation settings

pub mod multi_factor_monte_carlo;
pub mod multi_factor_pricer;
pub mod multi_path;
pub mod multi_path_generator;
pub mod path_pricer;
pub mod settings;

pub use multi_factor_monte_carlo::MultiFactorMonteCarlo;
pub use multi_factor_pricer::{MultiFactorPricer, PricerPhase};
pub use multi_path::MultiPath;
pub use multi_path_generator::MultiPathGenerator;
pub use path_pricer::{BasketPathPricer, BasketType, MultiPathPricer, OptionType};
pub use settings::{McSettings, McSettingsBuilder};
