//! Serial-number dates (translates `ql/time/date.hpp`).
//!
//! A [`Date`] is a count of days, serial 1 being 1 January 1900. Dates only
//! reach the evolution engines through a
//! [`DayCounter`](crate::day_counter::DayCounter), which turns a pair of
//! them into a `Time`.

use std::fmt;

use ql_core::errors::{Error, Result};

/// Days from 0000-03-01 to 1899-12-31 in the proleptic Gregorian calendar.
const EPOCH_OFFSET: i64 = 693_900;

/// Supported year range.
const YEARS: std::ops::RangeInclusive<u16> = 1900..=2199;

/// Serial of 2199-12-31.
const MAX_SERIAL: i32 = 109_573;

/// A calendar date stored as a serial day number.
///
/// Corresponds to `QuantLib::Date`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

impl Date {
    /// Date from year, month (1–12) and day of month.
    ///
    /// # Errors
    /// [`Error::Date`] outside 1900–2199 or for a day the month lacks.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !YEARS.contains(&year) {
            return Err(Error::Date(format!("year {year} outside {YEARS:?}")));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} outside 1..=12")));
        }
        let last = days_in_month(year, month);
        if !(1..=last).contains(&day) {
            return Err(Error::Date(format!(
                "{year}-{month:02} has no day {day}"
            )));
        }
        let days = days_from_civil(i64::from(year), i64::from(month), i64::from(day));
        Ok(Date((days - EPOCH_OFFSET) as i32))
    }

    /// Serial day number.
    pub fn serial(self) -> i32 {
        self.0
    }

    /// `(year, month, day)`.
    pub fn ymd(self) -> (u16, u8, u8) {
        let (y, m, d) = civil_from_days(i64::from(self.0) + EPOCH_OFFSET);
        (y as u16, m as u8, d as u8)
    }

    /// The date `n` days later (earlier for negative `n`).
    ///
    /// # Errors
    /// [`Error::Date`] if the result leaves the supported range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        let shifted = Date(self.0.saturating_add(n));
        if !(1..=MAX_SERIAL).contains(&shifted.0) {
            return Err(Error::Date(format!("{self} + {n} days is out of range")));
        }
        Ok(shifted)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }
}

impl std::ops::Sub for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        rhs.days_between(self)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({self})")
    }
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

// Eras of 400 years starting on 1 March; see H. Hinnant, "chrono-compatible
// low-level date algorithms".
fn days_from_civil(y: i64, m: i64, d: i64) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe
}

fn civil_from_days(z: i64) -> (i64, i64, i64) {
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe + era * 400 + i64::from(m <= 2);
    (y, m, d)
}
