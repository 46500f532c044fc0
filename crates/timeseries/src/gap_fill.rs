//! Filling of invalid precipitation time steps.
//!
//! MSWEP contains a few time steps at which every cell carries a huge
//! sentinel instead of a physical value. Such steps are replaced by linear
//! interpolation in time between the nearest valid steps.

use chrono::NaiveDateTime;
use ndarray::{Axis, Zip};
use tracing::info;

use crate::error::TimeSeriesError;
use crate::series::TimeSeries;

/// Values above this magnitude mark a missing observation.
pub const DEFAULT_SENTINEL: f64 = 1e9;

/// Result of [`fill_invalid`]: the repaired series and the filled steps.
#[derive(Debug, Clone)]
pub struct GapFill {
    series: TimeSeries,
    filled: Vec<NaiveDateTime>,
}

impl GapFill {
    /// Returns the repaired series.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Consumes the result and returns the repaired series.
    pub fn into_series(self) -> TimeSeries {
        self.series
    }

    /// Returns the timestamps of the steps that were filled, ascending.
    pub fn filled(&self) -> &[NaiveDateTime] {
        &self.filled
    }
}

/// Replaces every invalid time step by interpolating between valid neighbours.
///
/// A step is invalid when every cell exceeds `sentinel`; partial slices are
/// left alone. An isolated invalid step becomes the element-wise mean of the
/// steps before and after it. A run of adjacent invalid steps is filled in
/// ascending index order by linear interpolation between the valid steps
/// that bound the run.
///
/// # Errors
///
/// Returns [`TimeSeriesError::BoundaryGap`] if an invalid run touches the
/// first or last index.
pub fn fill_invalid(series: &TimeSeries, sentinel: f64) -> Result<GapFill, TimeSeriesError> {
    let n = series.len();
    let values = series.values();
    let (ny, nx) = series.grid_shape();
    if ny * nx == 0 {
        return Ok(GapFill {
            series: series.clone(),
            filled: Vec::new(),
        });
    }

    let invalid: Vec<bool> = values
        .axis_iter(Axis(0))
        .map(|step| step.iter().all(|&v| v > sentinel))
        .collect();

    let mut filled_values = values.clone();
    let mut filled = Vec::new();
    let mut t = 0;
    while t < n {
        if !invalid[t] {
            t += 1;
            continue;
        }
        let first = t;
        let mut last = t;
        while last + 1 < n && invalid[last + 1] {
            last += 1;
        }
        if first == 0 {
            return Err(TimeSeriesError::BoundaryGap {
                index: first,
                time: series.times()[first],
            });
        }
        if last == n - 1 {
            return Err(TimeSeriesError::BoundaryGap {
                index: last,
                time: series.times()[last],
            });
        }

        let lo = first - 1;
        let hi = last + 1;
        let span = (hi - lo) as f64;
        for k in first..=last {
            let w = (k - lo) as f64 / span;
            let (before, rest) = filled_values.view_mut().split_at(Axis(0), k);
            let (mut target, after) = rest.split_at(Axis(0), 1);
            let prev = before.index_axis(Axis(0), lo);
            let next = after.index_axis(Axis(0), hi - k - 1);
            let mut target = target.index_axis_mut(Axis(0), 0);
            if first == last {
                Zip::from(&mut target)
                    .and(&prev)
                    .and(&next)
                    .for_each(|v, &a, &b| *v = 0.5 * (a + b));
            } else {
                Zip::from(&mut target)
                    .and(&prev)
                    .and(&next)
                    .for_each(|v, &a, &b| *v = (1.0 - w) * a + w * b);
            }
            info!(index = k, time = %series.times()[k], "filled invalid precipitation step");
            filled.push(series.times()[k]);
        }
        t = last + 1;
    }

    Ok(GapFill {
        series: series.with_values(filled_values)?,
        filled,
    })
}
