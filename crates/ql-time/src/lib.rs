//! # ql-time
//!
//! Serial-number dates and the day-count conventions that convert them into
//! year fractions for the evolution engines.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Date` type.
pub mod date;

/// `DayCounter` trait and built-in day-count conventions.
pub mod day_counter;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use date::Date;
pub use day_counter::{times_from_reference, Actual360, Actual365Fixed, DayCounter};
