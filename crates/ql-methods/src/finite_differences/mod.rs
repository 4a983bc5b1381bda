//! Finite difference methods for PDE-based option pricing.
//!
//! Translates the core of `ql/methods/finitedifferences/`.
//!
//! # Overview
//!
//! * [`Operator`]: the linear-operator contract evolvers are generic over
//! * [`TridiagonalOperator`]: tridiagonal matrix with Thomas-algorithm solver
//! * [`BsmOperator`]: Black-Scholes-Merton operator on a [`LogGrid`]
//! * [`BackwardEuler`], [`ForwardEuler`], [`CrankNicolson`]: evolvers
//! * [`StepCondition`]: shout, American and composite conditions
//! * [`FiniteDifferenceModel`]: rollback driver
//! * [`FdSettings`] / [`FdmScheme`]: pricer settings

pub mod backward_euler;
pub mod bsm_operator;
pub mod crank_nicolson;
pub mod finite_difference_model;
pub mod forward_euler;
pub mod operator;
pub mod settings;
pub mod step_condition;
pub mod tridiagonal_operator;

pub use backward_euler::BackwardEuler;
pub use bsm_operator::{BsmOperator, LogGrid};
pub use crank_nicolson::CrankNicolson;
pub use finite_difference_model::FiniteDifferenceModel;
pub use forward_euler::ForwardEuler;
pub use operator::{Evolver, Operator};
pub use settings::{FdSettings, FdSettingsBuilder, FdmScheme};
pub use step_condition::{
    AmericanCondition, CompositeStepCondition, CurrentPayoff, DiscountedIntrinsic,
    ShoutCondition, StepCondition,
};
pub use tridiagonal_operator::{TimeSetter, TridiagonalOperator};
