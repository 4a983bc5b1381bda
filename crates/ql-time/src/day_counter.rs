//! `DayCounter` trait and the actual-day conventions used to turn dates into
//! the `Time` values consumed by operators and step conditions.
//!
//! The evolution engines never look at calendar rules: they only rely on a
//! day counter being a pure function from a pair of dates to a year fraction.

use crate::date::Date;
use ql_core::{Real, Time};

/// A convention for counting the fraction of a year between two dates.
///
/// Corresponds to `QuantLib::DayCounter`.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// Human-readable name of this convention (e.g. `"Actual/365 (Fixed)"`).
    fn name(&self) -> &str;

    /// Number of days between `d1` and `d2` according to this convention.
    fn day_count(&self, d1: Date, d2: Date) -> i64;

    /// Fraction of a year between `d1` and `d2`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;

    /// Fraction of a year between `d1` and `d2` with reference period hints.
    ///
    /// The actual-day conventions ignore the reference period; it is part of
    /// the contract for conventions that need it.
    fn year_fraction_with_ref(
        &self,
        d1: Date,
        d2: Date,
        _ref_start: Date,
        _ref_end: Date,
    ) -> Time {
        self.year_fraction(d1, d2)
    }
}

/// Actual/365 (Fixed) day counter.
///
/// `year_fraction = actual_days / 365`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &str {
        "act/365"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        d1.days_between(d2) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// Actual/360 day counter.
///
/// `year_fraction = actual_days / 360`
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &str {
        "act/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        d1.days_between(d2) as i64
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Convert a list of event dates into times measured from `reference`.
///
/// This is how ex-dividend dates and exercise dates become the `Time` grid
/// points of a finite-difference rollback.
pub fn times_from_reference(dc: &dyn DayCounter, reference: Date, dates: &[Date]) -> Vec<Time> {
    dates
        .iter()
        .map(|&d| dc.year_fraction(reference, d))
        .collect()
}
