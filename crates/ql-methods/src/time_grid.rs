//! Time grids shared by the finite-difference rollbacks and the Monte Carlo
//! path generators (translates `ql/timegrid.hpp`).

use ql_core::{
    ensure,
    errors::{Error, Result},
    Size, Time,
};
use ql_math::comparison::{close_enough, DEFAULT_ULPS};

/// An increasing grid of times starting at 0.
///
/// Corresponds to `QuantLib::TimeGrid`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    times: Vec<Time>,
    dts: Vec<Time>,
    mandatory: Vec<Time>,
}

impl TimeGrid {
    /// A uniform grid from 0 to `end` with `steps` intervals.
    pub fn uniform(end: Time, steps: Size) -> Result<Self> {
        ensure!(end > 0.0, "grid end must be positive, got {end}");
        ensure!(steps > 0, "at least one step required");
        let dt = end / steps as Time;
        let times: Vec<Time> = (0..=steps)
            .map(|i| if i == steps { end } else { i as Time * dt })
            .collect();
        Ok(Self::from_times(times, vec![end]))
    }

    /// A grid containing every (positive) time in `mandatory`, with the
    /// gaps between them subdivided so that no step is much longer than
    /// `last / steps`.
    ///
    /// Each gap gets `round(gap / dt_max)` steps, at least one.
    pub fn with_mandatory_times(mandatory: &[Time], steps: Size) -> Result<Self> {
        ensure!(!mandatory.is_empty(), "at least one mandatory time required");
        ensure!(
            mandatory.iter().all(|t| t.is_finite() && *t >= 0.0),
            "mandatory times must be finite and non-negative"
        );
        let mut points: Vec<Time> = mandatory.to_vec();
        points.sort_by(|a, b| a.total_cmp(b));
        points.dedup_by(|a, b| close_enough(*a, *b, DEFAULT_ULPS));
        points.retain(|&t| t > 0.0);
        ensure!(!points.is_empty(), "mandatory times must include a positive time");

        let last = points[points.len() - 1];
        let dt_max = if steps == 0 {
            points
                .iter()
                .scan(0.0, |begin, &t| {
                    let gap = t - *begin;
                    *begin = t;
                    Some(gap)
                })
                .fold(Time::INFINITY, Time::min)
        } else {
            last / steps as Time
        };

        let mut times = vec![0.0];
        let mut begin = 0.0;
        for &end in &points {
            let n = (((end - begin) / dt_max + 0.5) as Size).max(1);
            let dt = (end - begin) / n as Time;
            for k in 1..n {
                times.push(begin + k as Time * dt);
            }
            times.push(end);
            begin = end;
        }
        Ok(Self::from_times(times, points))
    }

    fn from_times(times: Vec<Time>, mandatory: Vec<Time>) -> Self {
        let dts = times.windows(2).map(|w| w[1] - w[0]).collect();
        Self {
            times,
            dts,
            mandatory,
        }
    }

    /// Number of time points (= steps + 1).
    pub fn size(&self) -> Size {
        self.times.len()
    }

    /// Number of steps (= time points − 1).
    pub fn steps(&self) -> Size {
        self.dts.len()
    }

    /// Time at index `i`.
    pub fn time(&self, i: Size) -> Time {
        self.times[i]
    }

    /// Time step between index `i` and `i+1`.
    pub fn dt(&self, i: Size) -> Time {
        self.dts[i]
    }

    /// Final time.
    pub fn end(&self) -> Time {
        self.times[self.times.len() - 1]
    }

    /// All time points, increasing.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// The mandatory times the grid was built from, increasing.
    pub fn mandatory_times(&self) -> &[Time] {
        &self.mandatory
    }

    /// Index of the grid point equal (up to rounding) to `t`.
    pub fn index(&self, t: Time) -> Option<Size> {
        self.times.iter().position(|&x| close_enough(x, t, DEFAULT_ULPS))
    }

    /// Grid points between `from` and `to` (both on the grid), in
    /// decreasing order, as consumed by a rollback.
    ///
    /// # Errors
    /// [`Error::Precondition`](ql_core::Error::Precondition) if either time
    /// is not on the grid or `from < to`.
    pub fn backward_times(&self, from: Time, to: Time) -> Result<Vec<Time>> {
        let (Some(i_from), Some(i_to)) = (self.index(from), self.index(to)) else {
            return Err(Error::Precondition(format!(
                "{from} and {to} must both lie on the time grid"
            )));
        };
        ensure!(i_from >= i_to, "cannot go backward from {from} to {to}");
        Ok(self.times[i_to..=i_from].iter().rev().copied().collect())
    }
}
