//! Per-year extraction of dry and wet season segments.

use std::collections::BTreeMap;
use std::fmt;

use pluvia_timeseries::TimeSeries;
use tracing::info;

use crate::boundary::{SeasonBoundary, SeasonWindow};

/// Which half of the year a segment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeasonKind {
    /// `[dry_start(Y), dry_end(Y))`.
    Dry,
    /// `[dry_end(Y), dry_start(Y + 1))`.
    Wet,
}

impl SeasonKind {
    /// Returns the window of this season starting in `year`.
    pub fn window(self, boundary: &SeasonBoundary, year: i32) -> SeasonWindow {
        match self {
            Self::Dry => boundary.dry_window(year),
            Self::Wet => boundary.wet_window(year),
        }
    }
}

impl fmt::Display for SeasonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dry => f.write_str("dry"),
            Self::Wet => f.write_str("wet"),
        }
    }
}

/// Season segments keyed by the year in which each season starts.
///
/// Segments are ragged: leap years and the open ends of the loaded horizon
/// give segments of different lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonSegments {
    kind: SeasonKind,
    segments: BTreeMap<i32, TimeSeries>,
}

impl SeasonSegments {
    /// Returns the season kind.
    pub fn kind(&self) -> SeasonKind {
        self.kind
    }

    /// Returns the segment of `year`, if extracted.
    pub fn get(&self, year: i32) -> Option<&TimeSeries> {
        self.segments.get(&year)
    }

    /// Returns the years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.segments.keys().copied().collect()
    }

    /// Iterates over `(year, segment)` in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &TimeSeries)> {
        self.segments.iter().map(|(y, s)| (*y, s))
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if there are no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Slices one `kind` segment per year out of `series`.
pub fn extract(
    series: &TimeSeries,
    years: &[i32],
    boundary: &SeasonBoundary,
    kind: SeasonKind,
) -> SeasonSegments {
    let segments: BTreeMap<i32, TimeSeries> = years
        .iter()
        .map(|&year| {
            let window = kind.window(boundary, year);
            (year, series.between(window.start(), window.end()))
        })
        .collect();
    info!(season = %kind, years = segments.len(), "extracted season segments");
    SeasonSegments { kind, segments }
}

/// Returns the years whose dry and wet seasons both lie inside `series`.
///
/// Year `Y` qualifies when the series starts no later than `dry_start(Y)`
/// and reaches `dry_start(Y + 1)`. With data ending early in a year this
/// drops the last two years.
pub fn seasonal_years(series: &TimeSeries, boundary: &SeasonBoundary) -> Vec<i32> {
    let (Some(first), Some(last)) = (series.first_time(), series.last_time()) else {
        return Vec::new();
    };
    series
        .years()
        .into_iter()
        .filter(|&year| {
            first <= boundary.dry_window(year).start() && last >= boundary.wet_window(year).end()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use ndarray::Array3;
    use pluvia_calendar::{YearMarker, step_sequence};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn boundary() -> SeasonBoundary {
        SeasonBoundary::new(
            YearMarker::new(6, 1, 0).unwrap(),
            YearMarker::new(10, 1, 0).unwrap(),
        )
        .unwrap()
    }

    fn daily(start: NaiveDateTime, end: NaiveDateTime) -> TimeSeries {
        let times = step_sequence(start, end, TimeDelta::days(1), false);
        let values = Array3::from_shape_fn((times.len(), 1, 1), |(t, _, _)| t as f64);
        TimeSeries::new(times, values).unwrap()
    }

    #[test]
    fn dry_and_wet_segments() {
        let s = daily(at(2001, 1, 1), at(2004, 1, 1));
        let b = boundary();

        let dry = extract(&s, &[2001, 2002], &b, SeasonKind::Dry);
        assert_eq!(dry.kind(), SeasonKind::Dry);
        assert_eq!(dry.len(), 2);
        let d = dry.get(2001).unwrap();
        assert_eq!(d.first_time(), Some(at(2001, 6, 1)));
        assert_eq!(d.last_time(), Some(at(2001, 9, 30)));
        assert_eq!(d.len(), 122);

        let wet = extract(&s, &[2001], &b, SeasonKind::Wet);
        let w = wet.get(2001).unwrap();
        assert_eq!(w.first_time(), Some(at(2001, 10, 1)));
        assert_eq!(w.last_time(), Some(at(2002, 5, 31)));
    }

    #[test]
    fn ragged_lengths_across_leap_year() {
        let s = daily(at(2002, 1, 1), at(2006, 1, 1));
        let wet = extract(&s, &[2002, 2003], &boundary(), SeasonKind::Wet);
        // The 2003 wet season contains Feb 29, 2004.
        assert_eq!(wet.get(2003).unwrap().len(), wet.get(2002).unwrap().len() + 1);
        assert_eq!(wet.years(), vec![2002, 2003]);
    }

    #[test]
    fn seasonal_years_require_full_coverage() {
        // Data from 2001-01-01 to 2005-03-01: 2004 lacks the next dry start.
        let s = daily(at(2001, 1, 1), at(2005, 3, 2));
        assert_eq!(seasonal_years(&s, &boundary()), vec![2001, 2002, 2003]);

        // Starting mid-year drops the first year too.
        let s = daily(at(2001, 7, 1), at(2004, 12, 31));
        assert_eq!(seasonal_years(&s, &boundary()), vec![2002, 2003]);
    }

    #[test]
    fn seasonal_years_of_empty_series() {
        let s = TimeSeries::new(vec![], Array3::zeros((0, 1, 1))).unwrap();
        assert!(seasonal_years(&s, &boundary()).is_empty());
    }
}
