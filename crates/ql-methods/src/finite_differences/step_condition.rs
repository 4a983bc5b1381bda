//! Step conditions: per-step adjustments of the evolving state
//! (translates `ql/methods/finitedifferences/stepcondition.hpp`,
//! `americancondition.hpp` and `shoutcondition.hpp`).
//!
//! A condition is applied by the [`FiniteDifferenceModel`] after every
//! step, at the time the step arrived at. Conditions hold no state that the
//! driver mutates, and applying one twice at the same time has the same
//! effect as applying it once.
//!
//! [`FiniteDifferenceModel`]: super::FiniteDifferenceModel

use std::fmt;

use ql_core::{Rate, Real, Time};
use ql_math::Array;

/// A rule that may overwrite the state at a given time.
///
/// Corresponds to `QuantLib::StepCondition<Array>`.
pub trait StepCondition {
    /// Adjust `a` at time `t`.
    fn apply_to(&self, a: &mut Array, t: Time);
}

/// The value available by exercising (or shouting) now, per grid node.
pub trait CurrentPayoff {
    /// Payoff at time `t` given the current state `a`.
    fn payoff(&self, a: &Array, t: Time) -> Array;
}

impl<F> CurrentPayoff for F
where
    F: Fn(&Array, Time) -> Array,
{
    fn payoff(&self, a: &Array, t: Time) -> Array {
        self(a, t)
    }
}

/// Intrinsic values locked in now and paid at maturity.
///
/// At time `t` the payoff is `intrinsic · exp(−r·(T − t))`, `T` being the
/// residual time of the contract.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountedIntrinsic {
    intrinsic: Array,
    residual_time: Time,
    rate: Rate,
}

impl DiscountedIntrinsic {
    /// Intrinsic values per node, paid at `residual_time`, discounted at
    /// `rate`.
    pub fn new(intrinsic: Array, residual_time: Time, rate: Rate) -> Self {
        Self {
            intrinsic,
            residual_time,
            rate,
        }
    }
}

impl CurrentPayoff for DiscountedIntrinsic {
    fn payoff(&self, _a: &Array, t: Time) -> Array {
        let df = (-self.rate * (self.residual_time - t)).exp();
        &self.intrinsic * df
    }
}

/// Shout feature: the holder may lock in the current payoff once.
///
/// `a[i] ← max(a[i], payoff(a, t)[i])`.
///
/// Corresponds to `QuantLib::ShoutCondition`.
#[derive(Clone)]
pub struct ShoutCondition<P> {
    payoff: P,
}

impl<P: CurrentPayoff> ShoutCondition<P> {
    /// Shout condition driven by an arbitrary payoff collaborator.
    pub fn new(payoff: P) -> Self {
        Self { payoff }
    }
}

impl ShoutCondition<DiscountedIntrinsic> {
    /// Shout condition locking `intrinsic` paid at `residual_time`,
    /// discounted at `rate`.
    pub fn discounted(intrinsic: Array, residual_time: Time, rate: Rate) -> Self {
        Self::new(DiscountedIntrinsic::new(intrinsic, residual_time, rate))
    }
}

impl<P: CurrentPayoff> StepCondition for ShoutCondition<P> {
    fn apply_to(&self, a: &mut Array, t: Time) {
        let payoff = self.payoff.payoff(a, t);
        a.max_assign(&payoff);
    }
}

impl<P> fmt::Debug for ShoutCondition<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShoutCondition").finish_non_exhaustive()
    }
}

/// Early exercise: `a[i] ← max(a[i], intrinsic[i])`.
///
/// Corresponds to `QuantLib::AmericanCondition`.
#[derive(Debug, Clone, PartialEq)]
pub struct AmericanCondition {
    intrinsic: Array,
}

impl AmericanCondition {
    /// Early-exercise condition with the given intrinsic values per node.
    pub fn new(intrinsic: Array) -> Self {
        Self { intrinsic }
    }

    /// Early-exercise condition from an intrinsic function of the spot.
    pub fn from_payoff(spots: &[Real], intrinsic: impl Fn(Real) -> Real) -> Self {
        Self::new(Array::from_fn(spots.len(), |i| intrinsic(spots[i])))
    }
}

impl StepCondition for AmericanCondition {
    fn apply_to(&self, a: &mut Array, _t: Time) {
        a.max_assign(&self.intrinsic);
    }
}

/// Several conditions applied one after the other, in insertion order.
#[derive(Default)]
pub struct CompositeStepCondition<'a> {
    conditions: Vec<Box<dyn StepCondition + 'a>>,
}

impl<'a> CompositeStepCondition<'a> {
    /// An empty composite (applying it is a no-op).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a condition; it runs after all conditions added before it.
    pub fn push(&mut self, condition: impl StepCondition + 'a) {
        self.conditions.push(Box::new(condition));
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, condition: impl StepCondition + 'a) -> Self {
        self.push(condition);
        self
    }

    /// Number of conditions.
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether no condition was added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl StepCondition for CompositeStepCondition<'_> {
    fn apply_to(&self, a: &mut Array, t: Time) {
        for c in &self.conditions {
            c.apply_to(a, t);
        }
    }
}

impl fmt::Debug for CompositeStepCondition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeStepCondition")
            .field("len", &self.conditions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn shout_takes_per_node_maximum() {
        let shout = ShoutCondition::new(|_: &Array, _: Time| Array::from_slice(&[5.0, 5.0, 5.0]));
        let mut a = Array::from_slice(&[3.0, 7.0, 5.0]);
        shout.apply_to(&mut a, 0.5);
        assert_eq!(a, Array::from_slice(&[5.0, 7.0, 5.0]));
    }

    #[test]
    fn discounted_shout_locks_intrinsic_value() {
        let shout = ShoutCondition::discounted(Array::from_slice(&[0.0, 10.0]), 1.0, 0.05);
        let mut a = Array::from_slice(&[1.0, 2.0]);
        shout.apply_to(&mut a, 0.5);
        assert_eq!(a[0], 1.0);
        assert!((a[1] - 10.0 * (-0.025_f64).exp()).abs() < 1e-14);

        // at maturity the locked value is the undiscounted intrinsic
        let mut b = Array::from_slice(&[1.0, 2.0]);
        shout.apply_to(&mut b, 1.0);
        assert_eq!(b[1], 10.0);
    }

    #[test]
    fn american_condition_floors_at_intrinsic() {
        let spots = [80.0, 100.0, 120.0];
        let cond = AmericanCondition::from_payoff(&spots, |s| (100.0 - s).max(0.0));
        let mut a = Array::from_slice(&[15.0, 3.0, 1.0]);
        cond.apply_to(&mut a, 0.0);
        assert_eq!(a, Array::from_slice(&[20.0, 3.0, 1.0]));
    }

    #[test]
    fn composite_applies_in_insertion_order() {
        struct Set(Real);
        impl StepCondition for Set {
            fn apply_to(&self, a: &mut Array, _t: Time) {
                *a = Array::from_element(a.size(), self.0);
            }
        }
        let composite = CompositeStepCondition::new().with(Set(1.0)).with(Set(2.0));
        assert_eq!(composite.len(), 2);
        let mut a = Array::zeros(2);
        composite.apply_to(&mut a, 0.0);
        assert_eq!(a, Array::from_element(2, 2.0));

        let empty = CompositeStepCondition::new();
        let mut b = Array::from_slice(&[1.0, 2.0]);
        empty.apply_to(&mut b, 0.0);
        assert_eq!(b, Array::from_slice(&[1.0, 2.0]));
    }

    proptest! {
        #[test]
        fn shout_is_idempotent_at_fixed_time(
            values in prop::collection::vec(-50.0..50.0f64, 1..20),
            t in 0.0..1.0f64,
        ) {
            let intrinsic = Array::from_fn(values.len(), |i| (i as Real) - 5.0);
            let shout = ShoutCondition::discounted(intrinsic, 1.0, 0.03);
            let mut once = Array::from_vec(values);
            shout.apply_to(&mut once, t);
            let mut twice = once.clone();
            shout.apply_to(&mut twice, t);
            prop_assert_eq!(once, twice);
        }
    }
}
