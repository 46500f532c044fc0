//! Fixed-length averaging windows over the calendar year.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use pluvia_calendar::{DAYS_PER_YEAR, REFERENCE_YEAR, YearMarker};

use crate::config::validate_window_days;
use crate::error::SeasonError;

/// One averaging window, defined on the reference non-leap year.
///
/// The window covers `[start, end)` in every year. The last window of a
/// partition is open: it runs to January 1 of the following year and absorbs
/// the days left over when the window length does not divide 365.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AveragingWindow {
    start: YearMarker,
    end: Option<YearMarker>,
    days: u16,
}

impl AveragingWindow {
    /// Returns the nominal window length in days; the open last window may
    /// be longer.
    pub fn days(&self) -> u16 {
        self.days
    }

    /// Returns the start marker.
    pub fn start(&self) -> YearMarker {
        self.start
    }

    /// Returns the end marker, or `None` for the open last window.
    pub fn end(&self) -> Option<YearMarker> {
        self.end
    }

    /// Returns `true` for the open last window.
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Returns the `[start, end)` timestamps of this window in `year`.
    pub fn bounds(&self, year: i32) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.start.in_year(year);
        let end = match self.end {
            Some(end) => end.in_year(year),
            None => jan_first(year + 1),
        };
        (start, end)
    }

    /// Returns the midpoint `start + (end - start) / 2` in `year`.
    pub fn mid(&self, year: i32) -> NaiveDateTime {
        let (start, end) = self.bounds(year);
        start + (end - start) / 2
    }
}

/// Partitions the year into `floor(365 / window_days)` windows.
///
/// Windows are `window_days` long and start on January 1 of the reference
/// year; the last one is open.
///
/// # Errors
///
/// Returns [`SeasonError::InvalidConfig`] unless `1 <= window_days <= 365`.
pub fn build_windows(window_days: u16) -> Result<Vec<AveragingWindow>, SeasonError> {
    validate_window_days(window_days)?;
    let n = DAYS_PER_YEAR / window_days;
    let origin = jan_first(REFERENCE_YEAR);
    let step = TimeDelta::days(i64::from(window_days));

    let mut windows = Vec::with_capacity(usize::from(n));
    for k in 0..i32::from(n) {
        let start = origin + step * k;
        let end = if k + 1 == i32::from(n) {
            None
        } else {
            Some(YearMarker::from_datetime(start + step)?)
        };
        windows.push(AveragingWindow {
            start: YearMarker::from_datetime(start)?,
            end,
            days: window_days,
        });
    }
    Ok(windows)
}

fn jan_first(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        // Safety: January 1 exists in every year chrono can represent here.
        .expect("January 1 is always a valid date")
}
