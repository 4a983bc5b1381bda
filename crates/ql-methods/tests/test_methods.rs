//! Integration tests for the finite-difference and Monte Carlo methods.

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use ql_core::{Real, Time};
use ql_math::random_numbers::derive_seed;
use ql_math::{Array, Matrix, SampleAccumulator};
use ql_methods::finite_differences::{AmericanCondition, BsmOperator, LogGrid, ShoutCondition};
use ql_methods::monte_carlo::{BasketPathPricer, BasketType, MultiPathPricer, OptionType};
use ql_methods::{
    BackwardEuler, CrankNicolson, Evolver, FiniteDifferenceModel, ForwardEuler,
    MultiFactorMonteCarlo, MultiPathGenerator, StepCondition, TimeGrid,
};
use ql_processes::{
    GeometricBrownianMotionProcess, StochasticProcess, StochasticProcess1D, StochasticProcessArray,
};

/// Black-Scholes call, S = K = 100, r = 5 %, q = 0, σ = 20 %, T = 1.
const BS_CALL: Real = 10.450_583_572_185_565;

fn call_rollback<E: Evolver>(
    evolver: impl FnOnce(ql_methods::TridiagonalOperator) -> E,
    steps: usize,
    condition: Option<&dyn StepCondition>,
) -> Real {
    let grid = LogGrid::centered(100.0, 0.2, 1.0, 5.0, 401).unwrap();
    let d = BsmOperator::build(&grid, 0.05, 0.0, 0.2);
    let mut a = Array::from_vec(grid.spots().iter().map(|s| (s - 100.0).max(0.0)).collect());
    let mut model = FiniteDifferenceModel::new(evolver(d));
    model.rollback(&mut a, 1.0, 0.0, steps, condition).unwrap();
    grid.interpolate(a.as_slice(), 100.0)
}

#[test]
fn implicit_european_call_converges_to_black_scholes() {
    let price = call_rollback(BackwardEuler::new, 400, None);
    assert_abs_diff_eq!(price, BS_CALL, epsilon = 0.05);
}

#[test]
fn crank_nicolson_european_call_converges_to_black_scholes() {
    let price = call_rollback(CrankNicolson::new, 200, None);
    assert_abs_diff_eq!(price, BS_CALL, epsilon = 0.03);
}

#[test]
fn explicit_european_call_converges_with_small_steps() {
    // stable while Δt·σ²/dx² < 1: dx = 0.005, σ²/dx² = 1600
    let price = call_rollback(ForwardEuler::new, 4000, None);
    assert_abs_diff_eq!(price, BS_CALL, epsilon = 0.05);
}

#[test]
fn american_put_is_worth_at_least_the_european_put() {
    let grid = LogGrid::centered(100.0, 0.2, 1.0, 5.0, 301).unwrap();
    let spots = grid.spots();
    let d = BsmOperator::build(&grid, 0.05, 0.0, 0.2);
    let payoff = Array::from_vec(spots.iter().map(|s| (100.0 - s).max(0.0)).collect());
    let american = AmericanCondition::from_payoff(&spots, |s| (100.0 - s).max(0.0));

    let mut european = payoff.clone();
    FiniteDifferenceModel::new(BackwardEuler::new(d.clone()))
        .rollback(&mut european, 1.0, 0.0, 200, None)
        .unwrap();
    let mut early = payoff.clone();
    FiniteDifferenceModel::new(BackwardEuler::new(d))
        .rollback(&mut early, 1.0, 0.0, 200, Some(&american))
        .unwrap();

    let e = grid.interpolate(european.as_slice(), 100.0);
    let a = grid.interpolate(early.as_slice(), 100.0);
    assert!(a > e, "american {a} vs european {e}");
    for i in 0..spots.len() {
        assert!(early[i] >= payoff[i]);
        assert!(early[i] >= european[i] - 1e-12);
    }
}

/// Applies the wrapped condition at a single time only.
struct OnlyAt<C> {
    time: Time,
    inner: C,
}

impl<C: StepCondition> StepCondition for OnlyAt<C> {
    fn apply_to(&self, a: &mut Array, t: Time) {
        if (t - self.time).abs() < 1e-9 {
            self.inner.apply_to(a, t);
        }
    }
}

#[test]
fn a_single_midpoint_shout_never_lowers_the_put() {
    let grid = LogGrid::centered(100.0, 0.2, 1.0, 5.0, 201).unwrap();
    let spots = grid.spots();
    let d = BsmOperator::build(&grid, 0.05, 0.0, 0.2);
    let intrinsic = Array::from_vec(spots.iter().map(|s| (100.0 - s).max(0.0)).collect());
    let mid_shout = OnlyAt {
        time: 0.5,
        inner: ShoutCondition::discounted(intrinsic.clone(), 1.0, 0.05),
    };

    let mut european = intrinsic.clone();
    FiniteDifferenceModel::new(BackwardEuler::new(d.clone()))
        .rollback(&mut european, 1.0, 0.0, 100, None)
        .unwrap();
    let mut shouted = intrinsic.clone();
    FiniteDifferenceModel::new(BackwardEuler::new(d))
        .rollback(&mut shouted, 1.0, 0.0, 100, Some(&mid_shout))
        .unwrap();

    let e = grid.interpolate(european.as_slice(), 100.0);
    let m = grid.interpolate(shouted.as_slice(), 100.0);
    assert!(m >= e, "midpoint shout {m} vs european {e}");
    assert!(m > e + 0.05);
    for i in 0..spots.len() {
        assert!(shouted[i] >= european[i] - 1e-12, "node {i}");
    }
}

fn basket(assets: usize, rho: Real) -> Arc<dyn StochasticProcess> {
    let processes: Vec<Arc<dyn StochasticProcess1D>> = (0..assets)
        .map(|_| {
            Arc::new(GeometricBrownianMotionProcess::new(100.0, 0.05, 0.2).unwrap())
                as Arc<dyn StochasticProcess1D>
        })
        .collect();
    let data: Vec<Real> = (0..assets * assets)
        .map(|k| if k / assets == k % assets { 1.0 } else { rho })
        .collect();
    let corr = Matrix::from_row_slice(assets, assets, &data);
    Arc::new(StochasticProcessArray::new(processes, &corr).unwrap())
}

#[test]
fn batched_sampling_equals_ordered_merge_of_batches() {
    let grid = TimeGrid::uniform(1.0, 3).unwrap();
    let pricer = BasketPathPricer::new(OptionType::Call, BasketType::Average, 100.0, 0.95);
    let process = basket(3, 0.2);
    let mc = MultiFactorMonteCarlo::new(process.clone(), grid.clone(), pricer.clone())
        .with_batch_size(100);
    let total = mc.sample(250, 99).unwrap();

    let mut expected = SampleAccumulator::new();
    for (b, count) in [(0u64, 100), (1, 100), (2, 50)] {
        let mut gen =
            MultiPathGenerator::new(process.clone(), grid.clone(), derive_seed(99, b), false)
                .unwrap();
        let mut partial = SampleAccumulator::new();
        for _ in 0..count {
            partial.add(pricer.value(&gen.next_path())).unwrap();
        }
        expected.merge(&partial);
    }
    assert_eq!(total, expected);
}

#[test]
fn max_basket_call_dominates_single_asset_call() {
    let grid = TimeGrid::uniform(1.0, 1).unwrap();
    let df = (-0.05_f64).exp();
    let max_call = BasketPathPricer::new(OptionType::Call, BasketType::Max, 100.0, df);
    let acc = MultiFactorMonteCarlo::new(basket(2, 0.5), grid, max_call)
        .sample(20_000, 2024)
        .unwrap();
    let mean = acc.mean().unwrap();
    let err = acc.error_estimate().unwrap();
    assert!(mean + 3.0 * err > BS_CALL, "max call {mean} ± {err}");
    assert!(mean > BS_CALL);
}
