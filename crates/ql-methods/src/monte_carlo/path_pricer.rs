//! Payoffs evaluated on multi-asset paths
//! (translates `ql/methods/montecarlo/pathpricer.hpp` and the basket path
//! pricer of the plain basket option).

use ql_core::{DiscountFactor, Real};

use super::multi_path::MultiPath;

/// Computes the discounted payoff of one [`MultiPath`].
///
/// Corresponds to `QuantLib::PathPricer<MultiPath>`.
pub trait MultiPathPricer: Send + Sync {
    /// Evaluate the discounted payoff for a given path.
    fn value(&self, path: &MultiPath) -> Real;
}

impl<F> MultiPathPricer for F
where
    F: Fn(&MultiPath) -> Real + Send + Sync,
{
    fn value(&self, path: &MultiPath) -> Real {
        self(path)
    }
}

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Pays `max(x − K, 0)`.
    Call,
    /// Pays `max(K − x, 0)`.
    Put,
}

impl OptionType {
    /// Intrinsic value of `x` against `strike`.
    pub fn intrinsic(self, x: Real, strike: Real) -> Real {
        match self {
            OptionType::Call => (x - strike).max(0.0),
            OptionType::Put => (strike - x).max(0.0),
        }
    }
}

/// How the terminal asset values are aggregated into one underlying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BasketType {
    /// Best performer.
    Max,
    /// Worst performer.
    Min,
    /// Arithmetic average.
    Average,
}

impl BasketType {
    /// Aggregate `values`.
    pub fn aggregate(self, values: &[Real]) -> Real {
        match self {
            BasketType::Max => values.iter().copied().fold(Real::NEG_INFINITY, Real::max),
            BasketType::Min => values.iter().copied().fold(Real::INFINITY, Real::min),
            BasketType::Average => values.iter().sum::<Real>() / values.len() as Real,
        }
    }
}

/// European basket payoff on the terminal asset values, discounted.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketPathPricer {
    option_type: OptionType,
    basket_type: BasketType,
    strike: Real,
    discount: DiscountFactor,
}

impl BasketPathPricer {
    /// Create a basket pricer.
    pub fn new(
        option_type: OptionType,
        basket_type: BasketType,
        strike: Real,
        discount: DiscountFactor,
    ) -> Self {
        Self {
            option_type,
            basket_type,
            strike,
            discount,
        }
    }
}

impl MultiPathPricer for BasketPathPricer {
    fn value(&self, path: &MultiPath) -> Real {
        let terminal = path.terminal_values();
        let underlying = self.basket_type.aggregate(&terminal);
        self.option_type.intrinsic(underlying, self.strike) * self.discount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(terminal: &[Real]) -> MultiPath {
        let mut p = MultiPath::new(terminal.len(), vec![0.0, 1.0]);
        for (j, &v) in terminal.iter().enumerate() {
            p.asset_mut(j)[1] = v;
        }
        p
    }

    #[test]
    fn basket_aggregation() {
        let p = path(&[90.0, 120.0, 105.0]);
        let call = |b| BasketPathPricer::new(OptionType::Call, b, 100.0, 1.0);
        assert_eq!(call(BasketType::Max).value(&p), 20.0);
        assert_eq!(call(BasketType::Min).value(&p), 0.0);
        assert_eq!(call(BasketType::Average).value(&p), 5.0);
        let put = BasketPathPricer::new(OptionType::Put, BasketType::Min, 100.0, 0.5);
        assert_eq!(put.value(&p), 5.0);
    }

    #[test]
    fn closures_are_path_pricers() {
        let first_asset = |p: &MultiPath| p.value(0, 1);
        assert_eq!(first_asset.value(&path(&[3.0, 4.0])), 3.0);
    }
}
