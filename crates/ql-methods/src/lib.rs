//! # ql-methods
//!
//! Numerical methods: finite-difference time evolution and the
//! multi-factor Monte Carlo framework.
//!
//! Translates `ql/methods/`: finite difference operators, evolvers and
//! rollback model, and Monte Carlo multi-path simulation.
//!
//! # Modules
//!
//! * [`finite_differences`]: operator contract, evolvers, step conditions, rollback
//! * [`monte_carlo`]: multi-path generation, path pricing, sampling pricers
//! * [`time_grid`]: time grids shared by both
//!
//! # Features
//!
//! * `parallel`: run Monte Carlo batches on the rayon thread pool
//! * `serde`: serialize the settings types

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Finite difference methods: operators, evolvers, step conditions, rollback.
pub mod finite_differences;

/// Monte Carlo simulation: multi-path generation, pricing, statistics.
pub mod monte_carlo;

/// Time grids.
pub mod time_grid;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use finite_differences::{
    BackwardEuler, CrankNicolson, Evolver, FdSettings, FdmScheme, FiniteDifferenceModel,
    ForwardEuler, Operator, ShoutCondition, StepCondition, TridiagonalOperator,
};
pub use monte_carlo::{
    McSettings, MultiFactorMonteCarlo, MultiFactorPricer, MultiPath, MultiPathGenerator,
    MultiPathPricer,
};
pub use time_grid::TimeGrid;
