//! Validated gridded time series.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDateTime};
use ndarray::{Array3, ArrayView2, Axis};

use crate::error::TimeSeriesError;

/// A gridded time series: `N` timestamps and an `[N, lat, lon]` array.
///
/// Guarantees:
/// - the array's first axis has exactly one entry per timestamp
/// - timestamps are strictly increasing (no duplicates)
///
/// An empty series (zero time steps) is valid and keeps its grid shape, so
/// a selection that matches nothing can still be inspected and combined.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    times: Vec<NaiveDateTime>,
    values: Array3<f64>,
}

impl TimeSeries {
    /// Creates a new `TimeSeries` after validating the data.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`TimeSeriesError::ShapeMismatch`] | `times.len() != values.len_of(Axis(0))` |
    /// | [`TimeSeriesError::NonMonotonic`] | `times[i] <= times[i - 1]` for some `i` |
    pub fn new(times: Vec<NaiveDateTime>, values: Array3<f64>) -> Result<Self, TimeSeriesError> {
        let steps = values.len_of(Axis(0));
        if times.len() != steps {
            return Err(TimeSeriesError::ShapeMismatch {
                times: times.len(),
                steps,
            });
        }
        if let Some(index) = (1..times.len()).find(|&i| times[i] <= times[i - 1]) {
            return Err(TimeSeriesError::NonMonotonic {
                index,
                previous: times[index - 1],
                current: times[index],
            });
        }
        Ok(Self { times, values })
    }

    /// Returns the timestamps.
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Returns the `[time, lat, lon]` values.
    pub fn values(&self) -> &Array3<f64> {
        &self.values
    }

    /// Consumes the series and returns its timestamps and values.
    pub fn into_parts(self) -> (Vec<NaiveDateTime>, Array3<f64>) {
        (self.times, self.values)
    }

    /// Returns the number of time steps.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if the series has no time steps.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the spatial grid shape `(lat, lon)`.
    pub fn grid_shape(&self) -> (usize, usize) {
        let (_, ny, nx) = self.values.dim();
        (ny, nx)
    }

    /// Returns the spatial field at time index `t`.
    ///
    /// # Panics
    ///
    /// Panics if `t >= self.len()`.
    pub fn step(&self, t: usize) -> ArrayView2<'_, f64> {
        self.values.index_axis(Axis(0), t)
    }

    /// Returns the first timestamp, if any.
    pub fn first_time(&self) -> Option<NaiveDateTime> {
        self.times.first().copied()
    }

    /// Returns the last timestamp, if any.
    pub fn last_time(&self) -> Option<NaiveDateTime> {
        self.times.last().copied()
    }

    /// Returns the distinct calendar years present, in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.times
            .iter()
            .map(|t| t.year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Returns a copy of the series with new values on the same timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`TimeSeriesError::ShapeMismatch`] if `values` has a different
    /// number of time steps.
    pub fn with_values(&self, values: Array3<f64>) -> Result<Self, TimeSeriesError> {
        let steps = values.len_of(Axis(0));
        if steps != self.times.len() {
            return Err(TimeSeriesError::ShapeMismatch {
                times: self.times.len(),
                steps,
            });
        }
        Ok(Self {
            times: self.times.clone(),
            values,
        })
    }

    /// Returns the sub-series whose timestamps satisfy `keep`.
    ///
    /// Order is preserved, so the result is always a valid series.
    pub fn filter_times<F>(&self, keep: F) -> Self
    where
        F: Fn(NaiveDateTime) -> bool,
    {
        let indices: Vec<usize> = self
            .times
            .iter()
            .enumerate()
            .filter(|(_, t)| keep(**t))
            .map(|(i, _)| i)
            .collect();
        Self {
            times: indices.iter().map(|&i| self.times[i]).collect(),
            values: self.values.select(Axis(0), &indices),
        }
    }

    /// Returns the sub-series with timestamps in `[start, end)`.
    pub fn between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.filter_times(|t| start <= t && t < end)
    }
}
