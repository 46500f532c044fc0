//! Time-range selection and leap-day removal.

use chrono::NaiveDateTime;
use pluvia_calendar::is_leap_day;

use crate::series::TimeSeries;

/// Whether the end of a selection range is part of the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndBound {
    /// `[start, end)`.
    #[default]
    Exclusive,
    /// `[start, end]`.
    Inclusive,
}

/// Selects the time steps of `series` between `start` and `end`.
///
/// `bound` decides whether a step exactly at `end` is kept.
pub fn select(
    series: &TimeSeries,
    start: NaiveDateTime,
    end: NaiveDateTime,
    bound: EndBound,
) -> TimeSeries {
    match bound {
        EndBound::Exclusive => series.filter_times(|t| start <= t && t < end),
        EndBound::Inclusive => series.filter_times(|t| start <= t && t <= end),
    }
}

/// Drops every time step that falls on February 29.
pub fn remove_leap_days(series: &TimeSeries) -> TimeSeries {
    series.filter_times(|t| !is_leap_day(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};
    use ndarray::Array3;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn three_hourly(start: NaiveDateTime, n: usize) -> TimeSeries {
        let times = (0..n)
            .map(|i| start + TimeDelta::hours(3 * i as i64))
            .collect();
        let values = Array3::from_shape_fn((n, 1, 2), |(t, _, i)| (2 * t + i) as f64);
        TimeSeries::new(times, values).unwrap()
    }

    #[test]
    fn select_exclusive_drops_end() {
        let s = three_hourly(at(2000, 1, 1, 0), 16);
        let sel = select(&s, at(2000, 1, 1, 3), at(2000, 1, 2, 0), EndBound::Exclusive);
        assert_eq!(sel.len(), 7);
        assert_eq!(sel.first_time(), Some(at(2000, 1, 1, 3)));
        assert_eq!(sel.last_time(), Some(at(2000, 1, 1, 21)));
    }

    #[test]
    fn select_inclusive_keeps_end() {
        let s = three_hourly(at(2000, 1, 1, 0), 16);
        let sel = select(&s, at(2000, 1, 1, 3), at(2000, 1, 2, 0), EndBound::Inclusive);
        assert_eq!(sel.len(), 8);
        assert_eq!(sel.last_time(), Some(at(2000, 1, 2, 0)));
        assert_eq!(sel.step(7), s.step(8));
    }

    #[test]
    fn select_outside_range_is_empty() {
        let s = three_hourly(at(2000, 1, 1, 0), 8);
        let sel = select(&s, at(2001, 1, 1, 0), at(2002, 1, 1, 0), EndBound::Inclusive);
        assert!(sel.is_empty());
        assert_eq!(sel.grid_shape(), (1, 2));
    }

    #[test]
    fn remove_leap_days_drops_eight_steps() {
        let s = three_hourly(at(2000, 2, 28, 0), 8 * 3);
        let out = remove_leap_days(&s);
        assert_eq!(out.len(), 16);
        assert!(out.times().iter().all(|t| !is_leap_day(*t)));
        // Feb 28 21:00 is followed directly by Mar 1 00:00.
        assert_eq!(out.times()[7], at(2000, 2, 28, 21));
        assert_eq!(out.times()[8], at(2000, 3, 1, 0));
        assert_eq!(out.step(8), s.step(16));
    }

    #[test]
    fn remove_leap_days_noop_in_common_year() {
        let s = three_hourly(at(2001, 2, 27, 0), 8 * 3);
        assert_eq!(remove_leap_days(&s), s);
    }
}
